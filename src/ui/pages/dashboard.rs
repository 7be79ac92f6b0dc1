use regex::Regex;

use crate::error::QaResult;
use crate::routes;
use crate::ui::{Browser, EXPECT_TIMEOUT, Expect, LoadState, Locator};

/// Sections reachable from the side navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Categories,
    Plants,
    Sales,
}

impl NavItem {
    pub fn label(&self) -> &'static str {
        match self {
            NavItem::Categories => "categories",
            NavItem::Plants => "plants",
            NavItem::Sales => "sales",
        }
    }

    /// Case-insensitive `/<section>` URL pattern.
    pub fn url_pattern(&self) -> QaResult<Regex> {
        Ok(Regex::new(&format!("(?i)/{}", self.label()))?)
    }
}

#[derive(Debug, Clone)]
pub struct DashboardPage<'a> {
    browser: &'a Browser,
    pub navigation: Locator,
}

impl<'a> DashboardPage<'a> {
    pub fn new(browser: &'a Browser) -> Self {
        DashboardPage {
            browser,
            navigation: Locator::role("navigation", None),
        }
    }

    pub async fn open(&self) -> QaResult<()> {
        self.browser.goto(routes::UI_DASHBOARD, LoadState::Load).await
    }

    pub fn nav_link(&self, item: NavItem) -> Locator {
        Locator::role("link", Some(item.label()))
    }

    /// Click a navigation link and give the app time to change the URL.
    /// A URL that never changes is left for the caller to assert on.
    pub async fn navigate_to(&self, item: NavItem) -> QaResult<()> {
        let link = self.nav_link(item);
        self.browser.expect(Expect::Visible(link.first())).await?;
        self.browser.click(&link.first()).await?;
        self.browser
            .eventually(Expect::UrlMatches(item.url_pattern()?), EXPECT_TIMEOUT)
            .await?;
        Ok(())
    }

    pub async fn expect_on(&self, item: NavItem) -> QaResult<()> {
        self.browser
            .expect(Expect::UrlMatches(item.url_pattern()?))
            .await
    }

    pub async fn expect_title_contains(&self, text: &str) -> QaResult<()> {
        self.browser
            .expect(Expect::TitleContains(text.to_string()))
            .await
    }

    pub async fn expect_navigation_visible(&self) -> QaResult<()> {
        self.browser
            .expect(Expect::Visible(self.navigation.first()))
            .await
    }

    pub async fn expect_navigation_contains(&self, item: &str) -> QaResult<()> {
        self.expect_navigation_visible().await?;
        let entry = self.navigation.locate(format!("text={item}")).first();
        self.browser.expect(Expect::Visible(entry)).await
    }

    pub async fn refresh(&self) -> QaResult<()> {
        self.browser.reload(LoadState::Load).await
    }

    pub async fn expect_still_on_dashboard(&self) -> QaResult<()> {
        self.browser
            .expect(Expect::UrlMatches(Regex::new(r"(?i)/dashboard")?))
            .await
    }

    pub async fn expect_not_on_login(&self) -> QaResult<()> {
        self.browser
            .expect(Expect::UrlNotMatches(Regex::new(r"(?i)/login")?))
            .await
    }
}
