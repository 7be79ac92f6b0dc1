use crate::error::QaResult;
use crate::routes;
use crate::ui::expect::{url_containing, url_ending_with};
use crate::ui::selectors::{layout, login};
use crate::ui::{Browser, Expect, LoadState, Locator};

#[derive(Debug, Clone)]
pub struct LoginPage<'a> {
    browser: &'a Browser,
    pub username: Locator,
    pub password: Locator,
    pub submit: Locator,
    pub username_error: Locator,
    pub password_error: Locator,
    pub alert: Locator,
}

impl<'a> LoginPage<'a> {
    pub fn new(browser: &'a Browser) -> Self {
        LoginPage {
            browser,
            username: Locator::css(login::USERNAME),
            password: Locator::css(login::PASSWORD),
            submit: Locator::css(login::SUBMIT),
            username_error: Locator::css(login::USERNAME_ERROR),
            password_error: Locator::css(login::PASSWORD_ERROR),
            alert: Locator::css(layout::ALERT),
        }
    }

    pub async fn open(&self) -> QaResult<()> {
        self.browser.goto(routes::UI_LOGIN, LoadState::NetworkIdle).await?;
        self.browser
            .expect(Expect::UrlMatches(url_ending_with(routes::UI_LOGIN)?))
            .await
    }

    /// Fill both fields and submit. Empty strings leave a field blank.
    pub async fn login(&self, username: &str, password: &str) -> QaResult<()> {
        self.browser.fill(&self.username, username).await?;
        self.browser.fill(&self.password, password).await?;
        self.browser.click(&self.submit).await
    }

    pub async fn expect_username_error(&self, message: &str) -> QaResult<()> {
        self.expect_field_error(&self.username_error, message).await
    }

    pub async fn expect_password_error(&self, message: &str) -> QaResult<()> {
        self.expect_field_error(&self.password_error, message).await
    }

    async fn expect_field_error(&self, feedback: &Locator, message: &str) -> QaResult<()> {
        self.browser.expect(Expect::Visible(feedback.clone())).await?;
        self.browser
            .expect(Expect::TextIs(feedback.clone(), message.to_string()))
            .await
    }

    pub async fn expect_redirected_from_login(&self) -> QaResult<()> {
        self.browser
            .expect(Expect::UrlNotMatches(url_containing(routes::UI_LOGIN)?))
            .await
    }

    /// Any alert on the page containing `message`. Used for the
    /// invalid-credentials banner as well as success toasts.
    pub async fn expect_alert(&self, message: &str) -> QaResult<()> {
        self.browser.expect(Expect::Visible(self.alert.first())).await?;
        self.browser
            .expect(Expect::TextContains(self.alert.first(), message.to_string()))
            .await
    }

    pub async fn expect_submit_visible(&self) -> QaResult<()> {
        self.browser.expect(Expect::Visible(self.submit.clone())).await
    }

    pub async fn expect_submit_enabled(&self) -> QaResult<()> {
        self.browser.expect(Expect::Enabled(self.submit.clone())).await
    }

    pub async fn expect_submit_text(&self, text: &str) -> QaResult<()> {
        self.browser
            .expect(Expect::TextIs(self.submit.clone(), text.to_string()))
            .await
    }
}
