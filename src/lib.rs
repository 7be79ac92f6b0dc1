/// Thin REST clients, one per nursery resource.
pub mod api;
/// Direct MySQL access: end-of-run table reset.
pub mod db;
/// Environment and credential resolution.
pub mod env;
pub mod error;
/// Pretest seeding, the pretest-id store and per-scenario cleanup.
pub mod fixtures;
/// Helpers for reading loosely-shaped JSON responses.
pub mod inspect;
pub mod logging;
/// Request payloads and query types.
pub mod models;
pub mod routes;
/// Playwright bridge, locators and page objects.
pub mod ui;

pub use error::{QaError, QaResult};
