use serde::Deserialize;

use super::base::expect_saved;
use crate::error::QaResult;
use crate::routes;
use crate::ui::expect::url_containing;
use crate::ui::selectors::{layout, plant_form};
use crate::ui::{Browser, Expect, LoadState, Locator, SelectBy};

/// Values typed into the add/edit plant form, as a Gherkin table row
/// provides them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlantForm {
    pub name: String,
    pub category: String,
    pub price: String,
    pub quantity: String,
}

/// Field locators shared by the add and edit forms.
#[derive(Debug, Clone)]
pub(crate) struct PlantFields {
    pub name: Locator,
    pub category: Locator,
    pub price: Locator,
    pub quantity: Locator,
    pub save: Locator,
    pub cancel: Locator,
    pub success: Locator,
}

impl PlantFields {
    pub fn new() -> Self {
        PlantFields {
            name: Locator::css(plant_form::NAME),
            category: Locator::css(plant_form::CATEGORY),
            price: Locator::css(plant_form::PRICE),
            quantity: Locator::css(plant_form::QUANTITY),
            save: Locator::css(plant_form::SAVE),
            cancel: Locator::css(plant_form::CANCEL),
            success: Locator::css(layout::SUCCESS_ALERT).has_text("success"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AddPlantPage<'a> {
    browser: &'a Browser,
    fields: PlantFields,
}

impl<'a> AddPlantPage<'a> {
    pub fn new(browser: &'a Browser) -> Self {
        AddPlantPage {
            browser,
            fields: PlantFields::new(),
        }
    }

    pub async fn open(&self) -> QaResult<()> {
        self.browser.goto(routes::UI_PLANTS_ADD, LoadState::NetworkIdle).await
    }

    pub async fn expect_on_add_plant_page(&self) -> QaResult<()> {
        self.browser
            .expect(Expect::UrlMatches(url_containing(routes::UI_PLANTS_ADD)?))
            .await
    }

    pub async fn expect_required_fields_visible(&self) -> QaResult<()> {
        let f = &self.fields;
        for field in [&f.name, &f.category, &f.price, &f.quantity] {
            self.browser.expect(Expect::Visible(field.clone())).await?;
        }
        Ok(())
    }

    pub async fn expect_save_visible(&self) -> QaResult<()> {
        self.browser.expect(Expect::Visible(self.fields.save.clone())).await
    }

    /// Fill the form; the category is picked by its visible label.
    pub async fn fill(&self, form: &PlantForm) -> QaResult<()> {
        let f = &self.fields;
        self.browser.fill(&f.name, &form.name).await?;
        self.browser
            .select_option(&f.category, SelectBy::Label(&form.category))
            .await?;
        self.browser.fill(&f.price, &form.price).await?;
        self.browser.fill(&f.quantity, &form.quantity).await
    }

    pub async fn save(&self) -> QaResult<()> {
        self.browser.click(&self.fields.save).await
    }

    pub async fn cancel(&self) -> QaResult<()> {
        self.browser.click(&self.fields.cancel.first()).await
    }

    pub async fn expect_success(&self) -> QaResult<()> {
        expect_saved(self.browser, &self.fields.success, routes::UI_PLANTS).await
    }

    pub async fn expect_redirected_to_plants(&self) -> QaResult<()> {
        self.browser
            .expect(Expect::UrlMatches(url_containing(routes::UI_PLANTS)?))
            .await
    }
}
