//! Thin clients for the nursery REST API.
//!
//! Every operation performs exactly one request and returns the status and
//! body as an [`ApiResponse`]. Non-2xx statuses are ordinary values for the
//! caller to assert on; only transport failures become errors.

pub mod auth;
pub mod categories;
pub mod health;
pub mod plants;
pub mod sales;

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde_json::Value;
use tracing::debug;

use crate::env::Env;
use crate::error::QaResult;
use crate::models::id_string;

pub use auth::Auth;
pub use categories::Categories;
pub use health::Health;
pub use plants::Plants;
pub use sales::Sales;

/// Per-request timeout. The runner's step timeout still applies on top.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Status and body of one API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// Parsed JSON body. Non-JSON text is kept as a JSON string, an empty
    /// body is `Null`.
    pub body: Value,
    pub raw: String,
}

impl ApiResponse {
    pub fn from_parts(status: u16, raw: String) -> Self {
        let body = if raw.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&raw).unwrap_or_else(|_| Value::String(raw.clone()))
        };
        ApiResponse { status, body, raw }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The entity id in the body (`id`), as a string.
    pub fn id(&self) -> Option<String> {
        self.body.get("id").and_then(id_string)
    }

    /// Top-level string field, if present.
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.body.get(field).and_then(Value::as_str)
    }

    pub fn pretty_body(&self) -> String {
        serde_json::to_string_pretty(&self.body).unwrap_or_else(|_| self.raw.clone())
    }
}

/// HTTP client bound to the API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> QaResult<Self> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(ApiClient {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_env(env: &Env) -> QaResult<Self> {
        Self::new(env.api_base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn auth(&self) -> Auth<'_> {
        Auth::new(self)
    }

    pub fn categories(&self) -> Categories<'_> {
        Categories::new(self)
    }

    pub fn plants(&self) -> Plants<'_> {
        Plants::new(self)
    }

    pub fn sales(&self) -> Sales<'_> {
        Sales::new(self)
    }

    pub fn health(&self) -> Health<'_> {
        Health::new(self)
    }

    /// `GET` an arbitrary API path, with a bearer token when given.
    pub async fn get_path(&self, token: Option<&str>, path: &str) -> QaResult<ApiResponse> {
        self.send(self.request(Method::GET, path, token)).await
    }

    pub(crate) fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match token {
            Some(t) => builder.bearer_auth(t),
            None => builder,
        }
    }

    pub(crate) async fn send(&self, request: RequestBuilder) -> QaResult<ApiResponse> {
        let response = request.send().await?;
        let url = response.url().to_string();
        let status = response.status().as_u16();
        let raw = response.text().await?;
        debug!(%url, status, "api response");
        Ok(ApiResponse::from_parts(status, raw))
    }
}
