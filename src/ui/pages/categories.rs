use super::base::{BasePage, expect_invalid_feedback, expect_saved};
use crate::error::QaResult;
use crate::routes;
use crate::ui::expect::url_containing;
use crate::ui::selectors::{categories, layout, table};
use crate::ui::{Browser, Expect, LoadState, Locator};

#[derive(Debug, Clone)]
pub struct CategoriesPage<'a> {
    browser: &'a Browser,
    pub table: Locator,
    pub rows: Locator,
    pub add_button: Locator,
    pub name: Locator,
    pub save: Locator,
    pub name_error: Locator,
    pub search: Locator,
    pub search_button: Locator,
    pub reset: Locator,
    pub alert: Locator,
}

impl<'a> CategoriesPage<'a> {
    pub fn new(browser: &'a Browser) -> Self {
        CategoriesPage {
            browser,
            table: Locator::css(categories::TABLE),
            rows: Locator::css(table::ROWS),
            add_button: Locator::css(categories::ADD_BUTTON),
            name: Locator::css(categories::NAME),
            save: Locator::css(categories::SAVE),
            name_error: Locator::css(categories::NAME_ERROR),
            search: Locator::css(categories::SEARCH),
            search_button: Locator::css(categories::SEARCH_BUTTON),
            reset: Locator::css(categories::RESET),
            alert: Locator::css(layout::ALERT),
        }
    }

    pub async fn open(&self) -> QaResult<()> {
        self.browser
            .goto(routes::UI_CATEGORIES, LoadState::NetworkIdle)
            .await
    }

    /// Open the add form by URL, bypassing the list page.
    pub async fn open_add_form(&self) -> QaResult<()> {
        self.browser
            .goto(routes::UI_CATEGORIES_ADD, LoadState::NetworkIdle)
            .await
    }

    pub async fn expect_on_categories_page(&self) -> QaResult<()> {
        self.browser
            .expect(Expect::UrlMatches(url_containing(routes::UI_CATEGORIES)?))
            .await
    }

    pub async fn expect_add_button_usable(&self) -> QaResult<()> {
        self.browser.expect(Expect::Visible(self.add_button.first())).await?;
        self.browser.expect(Expect::Enabled(self.add_button.first())).await
    }

    pub async fn click_add(&self) -> QaResult<()> {
        self.browser.click(&self.add_button.first()).await?;
        self.browser
            .expect(Expect::Visible(self.name.first()))
            .await
    }

    pub async fn set_name(&self, name: &str) -> QaResult<()> {
        self.browser.fill(&self.name.first(), name).await
    }

    pub async fn clear_name(&self) -> QaResult<()> {
        self.browser.clear(&self.name.first()).await
    }

    pub async fn save(&self) -> QaResult<()> {
        self.browser.click(&self.save.first()).await
    }

    /// A success alert, or the list page the app redirects to after saving.
    pub async fn expect_success(&self) -> QaResult<()> {
        let success = Locator::css(layout::SUCCESS_ALERT);
        expect_saved(self.browser, &success, routes::UI_CATEGORIES).await
    }

    pub async fn expect_name_required(&self) -> QaResult<()> {
        expect_invalid_feedback(self.browser, &self.name_error).await
    }

    pub async fn expect_list_displayed(&self) -> QaResult<()> {
        self.browser.expect(Expect::Visible(self.table.first())).await
    }

    pub async fn expect_listed(&self, name: &str) -> QaResult<()> {
        let row = Locator::css(table::ROWS).has_text(name).first();
        self.browser.expect(Expect::Visible(row)).await
    }

    pub async fn edit_first(&self) -> QaResult<()> {
        let edit = self.rows.first().locate(table::EDIT_ACTION).first();
        self.browser.expect(Expect::Visible(edit.clone())).await?;
        self.browser.click(&edit).await
    }

    /// Delete the listed category named `name`, confirming the dialog.
    pub async fn delete_named(&self, name: &str) -> QaResult<()> {
        self.delete_row(Locator::css(table::ROWS).has_text(name).first())
            .await
    }

    async fn delete_row(&self, row: Locator) -> QaResult<()> {
        let delete = row.locate(table::DELETE_ACTION).first();
        self.browser.expect(Expect::Visible(delete.clone())).await?;
        self.browser.accept_next_dialog().await?;
        self.browser.click(&delete).await?;
        self.browser.wait_for_load(LoadState::NetworkIdle).await
    }

    pub async fn apply_search(&self, text: &str) -> QaResult<()> {
        self.browser.fill(&self.search.first(), text).await?;
        self.browser.click(&self.search_button.first()).await?;
        self.browser.wait_for_load(LoadState::NetworkIdle).await
    }

    pub async fn click_reset(&self) -> QaResult<()> {
        self.browser.click(&self.reset.first()).await?;
        self.browser.wait_for_load(LoadState::NetworkIdle).await
    }

    /// Edit is either absent or rendered disabled for every row.
    pub async fn expect_edit_unavailable(&self) -> QaResult<()> {
        self.expect_action_unavailable(table::EDIT_ACTION).await
    }

    pub async fn expect_delete_unavailable(&self) -> QaResult<()> {
        self.expect_action_unavailable(table::DELETE_ACTION).await
    }

    async fn expect_action_unavailable(&self, action: &str) -> QaResult<()> {
        let enabled = Locator::css(table::BODY).locate(format!(
            ":is({action}):visible:not([disabled]):not(.disabled)"
        ));
        self.browser.expect(Expect::Count(enabled, 0)).await
    }

    pub async fn expect_access_denied(&self) -> QaResult<()> {
        BasePage::new(self.browser).expect_access_denied().await
    }

    /// The app refused a delete because of children or assigned plants.
    pub async fn expect_dependency_error(&self) -> QaResult<()> {
        self.browser.expect(Expect::Visible(self.alert.first())).await
    }
}
