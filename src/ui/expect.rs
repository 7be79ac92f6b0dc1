//! Auto-waiting assertions on page state.

use std::time::{Duration, Instant};

use regex::Regex;

use super::driver::Browser;
use super::locator::Locator;
use crate::error::{QaError, QaResult};

/// How long an expectation keeps polling before it fails.
pub const EXPECT_TIMEOUT: Duration = Duration::from_secs(10);

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A condition on the page that becomes true eventually, or fails.
#[derive(Debug, Clone)]
pub enum Expect {
    Visible(Locator),
    Hidden(Locator),
    Enabled(Locator),
    Count(Locator, usize),
    /// `textContent` of the first match equals the text (trimmed).
    TextIs(Locator, String),
    /// `textContent` of the first match contains the text, ignoring case.
    TextContains(Locator, String),
    UrlMatches(Regex),
    UrlNotMatches(Regex),
    TitleContains(String),
    /// Computed style `property` of the first match is one of the values.
    StyleIn(Locator, String, Vec<String>),
}

impl Expect {
    pub fn describe(&self) -> String {
        match self {
            Expect::Visible(l) => format!("{l} to be visible"),
            Expect::Hidden(l) => format!("{l} to be hidden"),
            Expect::Enabled(l) => format!("{l} to be enabled"),
            Expect::Count(l, n) => format!("{l} to match {n} element(s)"),
            Expect::TextIs(l, t) => format!("{l} to have text {t:?}"),
            Expect::TextContains(l, t) => format!("{l} to contain text {t:?}"),
            Expect::UrlMatches(re) => format!("URL to match /{re}/"),
            Expect::UrlNotMatches(re) => format!("URL not to match /{re}/"),
            Expect::TitleContains(t) => format!("title to contain {t:?}"),
            Expect::StyleIn(l, p, values) => format!("{p} of {l} to be one of {values:?}"),
        }
    }

    /// Check once, returning what was observed alongside the verdict.
    async fn probe(&self, browser: &Browser) -> QaResult<(bool, String)> {
        Ok(match self {
            Expect::Visible(l) => {
                let v = browser.is_visible(l).await?;
                (v, format!("visible: {v}"))
            }
            Expect::Hidden(l) => {
                let v = browser.is_visible(l).await?;
                (!v, format!("visible: {v}"))
            }
            Expect::Enabled(l) => {
                let v = browser.is_enabled(l).await?;
                (v, format!("enabled: {v}"))
            }
            Expect::Count(l, n) => {
                let c = browser.count(l).await?;
                (c == *n, format!("count: {c}"))
            }
            Expect::TextIs(l, t) => {
                let text = read_text(browser, l).await?;
                (text.trim() == t.trim(), format!("text: {text:?}"))
            }
            Expect::TextContains(l, t) => {
                let text = read_text(browser, l).await?;
                (
                    text.to_lowercase().contains(&t.to_lowercase()),
                    format!("text: {text:?}"),
                )
            }
            Expect::UrlMatches(re) => {
                let url = browser.url().await?;
                (re.is_match(&url), format!("url: {url}"))
            }
            Expect::UrlNotMatches(re) => {
                let url = browser.url().await?;
                (!re.is_match(&url), format!("url: {url}"))
            }
            Expect::TitleContains(t) => {
                let title = browser.title().await?;
                (title.contains(t.as_str()), format!("title: {title:?}"))
            }
            Expect::StyleIn(l, p, values) => {
                if browser.count(l).await? == 0 {
                    (false, "no element".to_string())
                } else {
                    let v = browser.computed_style(l, p).await?;
                    (values.iter().any(|x| x == v.trim()), format!("{p}: {v}"))
                }
            }
        })
    }
}

/// Text of the first match, or empty when nothing matches yet.
async fn read_text(browser: &Browser, locator: &Locator) -> QaResult<String> {
    if browser.count(locator).await? == 0 {
        return Ok(String::new());
    }
    browser.text(locator).await
}

impl Browser {
    /// Poll `expectation` until it holds, for up to [`EXPECT_TIMEOUT`].
    pub async fn expect(&self, expectation: Expect) -> QaResult<()> {
        self.expect_within(expectation, EXPECT_TIMEOUT).await
    }

    pub async fn expect_within(&self, expectation: Expect, timeout: Duration) -> QaResult<()> {
        let deadline = Instant::now() + timeout;
        loop {
            let (ok, observed) = expectation.probe(self).await?;
            if ok {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(QaError::Assertion(format!(
                    "expected {} within {}s ({observed})",
                    expectation.describe(),
                    timeout.as_secs()
                )));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Whether `expectation` holds within `timeout`, without failing.
    pub async fn eventually(&self, expectation: Expect, timeout: Duration) -> QaResult<bool> {
        match self.expect_within(expectation, timeout).await {
            Ok(()) => Ok(true),
            Err(QaError::Assertion(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Regex matching a URL that contains `path`.
pub fn url_containing(path: &str) -> QaResult<Regex> {
    Ok(Regex::new(&regex::escape(path))?)
}

/// Regex matching a URL that ends with `path`.
pub fn url_ending_with(path: &str) -> QaResult<Regex> {
    Ok(Regex::new(&format!("{}$", regex::escape(path)))?)
}
