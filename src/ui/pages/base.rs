use std::time::Duration;

use crate::error::{QaError, QaResult};
use crate::routes;
use crate::ui::expect::{url_containing, url_ending_with};
use crate::ui::selectors::layout;
use crate::ui::{Browser, Expect, LoadState, Locator};

/// Computed `color` values accepted for Bootstrap's danger text.
pub const DANGER_COLORS: &[&str] = &["rgb(220, 53, 69)", "rgb(255, 0, 0)"];

/// The post-login shell every other page lives in.
#[derive(Debug, Clone, Copy)]
pub struct BasePage<'a> {
    browser: &'a Browser,
}

impl<'a> BasePage<'a> {
    pub fn new(browser: &'a Browser) -> Self {
        BasePage { browser }
    }

    /// The browser has left the login page and landed on the dashboard.
    pub async fn expect_on_dashboard(&self) -> QaResult<()> {
        self.browser
            .expect(Expect::UrlNotMatches(url_ending_with(routes::UI_LOGIN)?))
            .await?;
        self.browser
            .expect(Expect::UrlMatches(url_containing(routes::UI_DASHBOARD)?))
            .await
    }

    /// The app refused the page: either the URL or the body says so.
    pub async fn expect_access_denied(&self) -> QaResult<()> {
        self.browser.wait_for_load(LoadState::NetworkIdle).await?;
        let url = self.browser.url().await?;
        let body = self.browser.text(&Locator::css(layout::BODY)).await?;
        if is_denial(&url, &body) {
            return Ok(());
        }
        Err(QaError::Assertion(format!(
            "expected 403 / Access Denied, got {url}"
        )))
    }
}

fn is_denial(url: &str, body: &str) -> bool {
    let url = url.to_lowercase();
    ["403", "access-denied", "forbidden"].iter().any(|m| url.contains(m))
        || ["Access Denied", "403", "Forbidden"].iter().any(|m| body.contains(m))
}

/// A form field's validation message: visible and rendered in danger red.
pub(crate) async fn expect_invalid_feedback(browser: &Browser, feedback: &Locator) -> QaResult<()> {
    browser.expect(Expect::Visible(feedback.first())).await?;
    browser
        .expect(Expect::StyleIn(
            feedback.first(),
            "color".to_string(),
            DANGER_COLORS.iter().map(|c| c.to_string()).collect(),
        ))
        .await
}

/// After a form save: either a success alert shows up, or the app has
/// redirected to `list_path`.
pub(crate) async fn expect_saved(browser: &Browser, success: &Locator, list_path: &str) -> QaResult<()> {
    browser.wait_for_load(LoadState::NetworkIdle).await?;
    if browser
        .eventually(Expect::Visible(success.first()), Duration::from_millis(500))
        .await?
    {
        return Ok(());
    }
    browser
        .expect(Expect::UrlMatches(url_containing(list_path)?))
        .await
}
