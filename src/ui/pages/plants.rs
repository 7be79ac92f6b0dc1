use crate::error::{QaError, QaResult};
use crate::routes;
use crate::ui::expect::url_containing;
use crate::ui::selectors::{plants, table};
use crate::ui::{Browser, EXPECT_TIMEOUT, Expect, LoadState, Locator, WaitState};

/// Columns that must hold text in every plant row (name, category, price, stock).
const DETAIL_COLUMNS: i32 = 4;

#[derive(Debug, Clone)]
pub struct PlantsPage<'a> {
    browser: &'a Browser,
    pub table: Locator,
    pub header: Locator,
    pub body: Locator,
    pub rows: Locator,
    pub add_button: Locator,
}

impl<'a> PlantsPage<'a> {
    pub fn new(browser: &'a Browser) -> Self {
        PlantsPage {
            browser,
            table: Locator::css(plants::TABLE),
            header: Locator::css(plants::HEADER),
            body: Locator::css(table::BODY),
            rows: Locator::css(table::ROWS),
            add_button: Locator::css(plants::ADD_BUTTON),
        }
    }

    pub async fn open(&self) -> QaResult<()> {
        self.browser.goto(routes::UI_PLANTS, LoadState::NetworkIdle).await
    }

    pub async fn expect_on_plants_page(&self) -> QaResult<()> {
        self.browser
            .expect(Expect::UrlMatches(url_containing(routes::UI_PLANTS)?))
            .await
    }

    pub fn row_named(&self, name: &str) -> Locator {
        Locator::css(table::ROWS).has_text(name)
    }

    pub async fn click_add_plant(&self) -> QaResult<()> {
        self.browser.expect(Expect::Visible(self.add_button.clone())).await?;
        self.browser.click(&self.add_button).await
    }

    pub async fn expect_plant_list_displayed(&self) -> QaResult<()> {
        for part in [&self.table, &self.header, &self.body] {
            self.browser.expect(Expect::Visible(part.first())).await?;
        }
        Ok(())
    }

    pub async fn expect_headers(&self) -> QaResult<()> {
        for name in plants::HEADER_NAMES {
            let th = Locator::css("th").has_text(name);
            self.browser.expect(Expect::Visible(th.first())).await?;
        }
        Ok(())
    }

    /// At least one row, and every row has its detail columns filled in.
    pub async fn expect_plants_with_details(&self) -> QaResult<()> {
        self.browser.expect(Expect::Visible(self.rows.first())).await?;
        let count = self.browser.count(&self.rows).await?;
        for i in 0..count as i32 {
            let cells = self.rows.nth(i).locate(table::CELL);
            for j in 0..DETAIL_COLUMNS {
                let text = self.browser.text(&cells.nth(j)).await?;
                if text.trim().is_empty() {
                    return Err(QaError::Assertion(format!(
                        "plant row {i} has an empty column {j}"
                    )));
                }
            }
        }
        Ok(())
    }

    pub async fn expect_plant_listed(&self, name: &str) -> QaResult<()> {
        self.browser.wait_for_load(LoadState::NetworkIdle).await?;
        self.browser.expect(Expect::Visible(self.table.first())).await?;
        self.browser
            .expect(Expect::Visible(self.row_named(name).first()))
            .await
    }

    /// Reload and wait until no row mentions `name`.
    pub async fn expect_plant_gone(&self, name: &str) -> QaResult<()> {
        self.browser.reload(LoadState::NetworkIdle).await?;
        self.browser
            .wait_for(&self.row_named(name), WaitState::Detached, EXPECT_TIMEOUT)
            .await
    }

    /// Text of the row's first cell.
    async fn row_name(&self, row: &Locator) -> QaResult<String> {
        let name = self
            .browser
            .inner_text(&row.locate(table::CELL).first())
            .await?;
        Ok(name.trim().to_string())
    }

    /// Click Edit on the first plant, returning its name.
    pub async fn edit_first_plant(&self) -> QaResult<String> {
        self.act_on_first(table::EDIT_ACTION).await
    }

    /// Click Delete on the first plant, returning its name. Arm the dialog
    /// with [`Browser::accept_next_dialog`] first to confirm it.
    pub async fn delete_first_plant(&self) -> QaResult<String> {
        self.act_on_first(table::DELETE_ACTION).await
    }

    async fn act_on_first(&self, action: &str) -> QaResult<String> {
        let row = self.rows.first();
        self.browser.expect(Expect::Visible(row.clone())).await?;
        let name = self.row_name(&row).await?;
        let button = row.locate(action).first();
        self.browser.expect(Expect::Visible(button.clone())).await?;
        self.browser.click(&button).await?;
        Ok(name)
    }

    pub async fn expect_add_button_hidden(&self) -> QaResult<()> {
        self.browser.expect(Expect::Hidden(self.add_button.clone())).await
    }

    pub async fn expect_no_edit_buttons(&self) -> QaResult<()> {
        let edits = self.body.locate(table::EDIT_ACTION);
        self.browser.expect(Expect::Count(edits, 0)).await
    }

    pub async fn expect_no_delete_buttons(&self) -> QaResult<()> {
        let deletes = self.body.locate(table::DELETE_ACTION);
        self.browser.expect(Expect::Count(deletes, 0)).await
    }
}
