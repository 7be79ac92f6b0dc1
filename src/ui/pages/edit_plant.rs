use regex::Regex;

use super::add_plant::{PlantFields, PlantForm};
use super::base::expect_saved;
use crate::error::QaResult;
use crate::routes;
use crate::ui::selectors::layout;
use crate::ui::{Browser, Expect, Locator, SelectBy};

#[derive(Debug, Clone)]
pub struct EditPlantPage<'a> {
    browser: &'a Browser,
    fields: PlantFields,
    success: Locator,
}

impl<'a> EditPlantPage<'a> {
    pub fn new(browser: &'a Browser) -> Self {
        EditPlantPage {
            browser,
            fields: PlantFields::new(),
            success: Locator::css(layout::SUCCESS_ALERT),
        }
    }

    pub async fn expect_on_edit_plant_page(&self) -> QaResult<()> {
        self.browser
            .expect(Expect::UrlMatches(Regex::new(r"/ui/plants/edit/\d+")?))
            .await
    }

    /// Current form contents; `category` is the selected option's value.
    pub async fn current_values(&self) -> QaResult<PlantForm> {
        let f = &self.fields;
        Ok(PlantForm {
            name: self.browser.input_value(&f.name).await?,
            category: self.browser.input_value(&f.category).await?,
            price: self.browser.input_value(&f.price).await?,
            quantity: self.browser.input_value(&f.quantity).await?,
        })
    }

    /// Overwrite every field. Playwright matches the category against option
    /// values and labels alike.
    pub async fn update(&self, form: &PlantForm) -> QaResult<()> {
        let f = &self.fields;
        self.browser.clear(&f.name).await?;
        self.browser.fill(&f.name, &form.name).await?;
        self.browser
            .select_option(&f.category, SelectBy::Value(&form.category))
            .await?;
        self.browser.clear(&f.price).await?;
        self.browser.fill(&f.price, &form.price).await?;
        self.browser.clear(&f.quantity).await?;
        self.browser.fill(&f.quantity, &form.quantity).await
    }

    pub async fn save(&self) -> QaResult<()> {
        self.browser.click(&self.fields.save).await
    }

    pub async fn expect_success(&self) -> QaResult<()> {
        expect_saved(self.browser, &self.success, routes::UI_PLANTS).await
    }
}
