use regex::Regex;

use crate::error::QaResult;
use crate::ui::selectors::layout;
use crate::ui::{Browser, Expect, Locator};

#[derive(Debug, Clone)]
pub struct LogoutPage<'a> {
    browser: &'a Browser,
    pub logout: Locator,
}

impl<'a> LogoutPage<'a> {
    pub fn new(browser: &'a Browser) -> Self {
        LogoutPage {
            browser,
            logout: Locator::css(layout::LOGOUT),
        }
    }

    /// Click whichever logout control the layout renders, button or link.
    pub async fn logout(&self) -> QaResult<()> {
        let button = Locator::role("button", Some("logout"));
        if self.browser.is_visible(&button).await? {
            return self.browser.click(&button).await;
        }
        let link = Locator::role("link", Some("logout"));
        self.browser.expect(Expect::Visible(link.clone())).await?;
        self.browser.click(&link).await
    }

    pub async fn expect_redirected_to_login(&self) -> QaResult<()> {
        self.browser
            .expect(Expect::UrlMatches(Regex::new(r"(?i)/login")?))
            .await
    }

    pub async fn expect_logout_visible(&self) -> QaResult<()> {
        self.browser.expect(Expect::Visible(self.logout.first())).await
    }

    pub async fn expect_logout_enabled(&self) -> QaResult<()> {
        self.browser.expect(Expect::Enabled(self.logout.first())).await
    }
}
