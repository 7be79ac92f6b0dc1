//! Browser side of the harness: the Playwright bridge, locators,
//! auto-waiting expectations and the page objects built on them.

pub mod driver;
pub mod expect;
pub mod locator;
pub mod pages;
pub mod selectors;

pub use driver::{Browser, BrowserConfig, LoadState, SelectBy, WaitState};
pub use expect::{EXPECT_TIMEOUT, Expect};
pub use locator::Locator;
