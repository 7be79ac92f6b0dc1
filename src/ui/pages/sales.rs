use crate::error::QaResult;
use crate::routes;
use crate::ui::expect::url_containing;
use crate::ui::selectors::sales;
use crate::ui::{Browser, Expect, LoadState, Locator};

#[derive(Debug, Clone)]
pub struct SalesPage<'a> {
    browser: &'a Browser,
    pub table: Locator,
    pub pagination: Locator,
}

impl<'a> SalesPage<'a> {
    pub fn new(browser: &'a Browser) -> Self {
        SalesPage {
            browser,
            table: Locator::css(sales::TABLE),
            pagination: Locator::css(sales::PAGINATION),
        }
    }

    pub async fn open(&self) -> QaResult<()> {
        self.browser.goto(routes::UI_SALES, LoadState::NetworkIdle).await
    }

    pub async fn expect_on_sales_page(&self) -> QaResult<()> {
        self.browser
            .expect(Expect::UrlMatches(url_containing(routes::UI_SALES)?))
            .await
    }

    pub async fn expect_table_visible(&self) -> QaResult<()> {
        self.browser.expect(Expect::Visible(self.table.first())).await
    }

    pub async fn expect_pagination_visible(&self) -> QaResult<()> {
        self.browser
            .expect(Expect::Visible(self.pagination.first()))
            .await
    }

    /// Pagination is only rendered when there is more than one page.
    pub async fn has_pagination(&self) -> QaResult<bool> {
        Ok(self.browser.count(&self.pagination).await? > 0)
    }
}
