use reqwest::Method;
use reqwest::header::ACCEPT;
use serde_json::Value;

use super::{ApiClient, ApiResponse};
use crate::error::QaResult;
use crate::routes;

/// `/api/health` probe.
pub struct Health<'a> {
    client: &'a ApiClient,
}

impl<'a> Health<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Health { client }
    }

    pub async fn check(&self, token: Option<&str>) -> QaResult<ApiResponse> {
        let request = self
            .client
            .request(Method::GET, routes::HEALTH, token)
            .header(ACCEPT, "*/*");
        self.client.send(request).await
    }
}

/// Whether a health payload reports the application as up.
///
/// Accepts plain text mentioning `healthy`, `ok` or `up`, an object whose
/// `status` is one of those words, or a boolean `healthy`/`ok` flag.
pub fn looks_healthy(payload: &Value) -> bool {
    match payload {
        Value::String(s) => {
            let s = s.to_lowercase();
            s.contains("healthy") || s.contains("ok") || s.contains("up")
        }
        Value::Object(obj) => {
            if let Some(status) = obj.get("status").and_then(Value::as_str) {
                if matches!(status.to_lowercase().as_str(), "up" | "ok" | "healthy") {
                    return true;
                }
            }
            if let Some(flag) = obj.get("healthy").and_then(Value::as_bool) {
                return flag;
            }
            obj.get("ok").and_then(Value::as_bool).unwrap_or(false)
        }
        _ => false,
    }
}
