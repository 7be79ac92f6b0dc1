//! Error types shared by the harness.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QaError {
    #[error("missing environment variable: {0}")]
    MissingEnv(String),

    #[error("invalid environment variable {key}: {reason}")]
    InvalidEnv { key: String, reason: String },

    #[error("login failed with status {status}: {body}")]
    Auth { status: u16, body: String },

    #[error("pretest step '{step}' failed with status {status}: {body}")]
    Seed {
        step: String,
        status: u16,
        body: String,
    },

    #[error(
        "no pretest {0} available: tag the scenario with @pretest or run `nqa seed` first to populate the pretest record"
    )]
    PretestMissing(String),

    #[error("no valid pretest record at {}", .0.display())]
    NoPretestRecord(PathBuf),

    #[error("refusing to {0} without --yes")]
    NotConfirmed(String),

    #[error("not a numeric id: {0:?}")]
    InvalidId(String),

    #[error("Playwright not found. Install with: npm install playwright && npx playwright install chromium")]
    PlaywrightNotFound,

    #[error("Playwright error: {0}")]
    Playwright(String),

    #[error("assertion failed: {0}")]
    Assertion(String),

    #[error("timeout waiting for: {0}")]
    Timeout(String),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type QaResult<T> = Result<T, QaError>;
