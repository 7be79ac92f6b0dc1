use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use reqwest::Method;
use serde_json::{Value, json};
use tracing::debug;

use super::{ApiClient, ApiResponse};
use crate::env::{Credentials, Env, Role};
use crate::error::{QaError, QaResult};
use crate::routes;

/// `/api/auth` operations.
pub struct Auth<'a> {
    client: &'a ApiClient,
}

impl<'a> Auth<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Auth { client }
    }

    /// `POST /api/auth/login` with a JSON username/password body.
    pub async fn login(&self, username: &str, password: &str) -> QaResult<ApiResponse> {
        let request = self
            .client
            .request(Method::POST, routes::AUTH_LOGIN, None)
            .json(&json!({ "username": username, "password": password }));
        self.client.send(request).await
    }

    /// Log in with a credential pair and return the bearer token.
    ///
    /// Anything but a 200 carrying a non-empty `token` is an error.
    pub async fn token_for(&self, creds: &Credentials) -> QaResult<String> {
        let response = self.login(&creds.username, &creds.password).await?;
        match (response.status, token_from(&response)) {
            (200, Some(token)) => {
                debug!(username = %creds.username, "authenticated");
                Ok(token)
            }
            (status, _) => Err(QaError::Auth {
                status,
                body: response.raw,
            }),
        }
    }

    /// Log in as the configured `role`.
    pub async fn authenticate(&self, env: &Env, role: Role) -> QaResult<String> {
        self.token_for(env.credentials(role)).await
    }
}

/// The `token` string of a login response, if present and non-empty.
pub fn token_from(response: &ApiResponse) -> Option<String> {
    response
        .str_field("token")
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
}

/// Decode the role claim of a JWT without verifying its signature.
///
/// Looks at `role`, then the first of `roles`, then the first of
/// `authorities` (plain strings or `{"authority": ...}` objects). A `ROLE_`
/// prefix is stripped and the result lowercased.
pub fn token_role(token: &str) -> Option<String> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: Value = serde_json::from_slice(&bytes).ok()?;

    let first = |key: &str| -> Option<Value> { claims.get(key)?.as_array()?.first().cloned() };
    let raw = claims
        .get("role")
        .cloned()
        .or_else(|| first("roles"))
        .or_else(|| first("authorities"))?;

    let role = match raw {
        Value::String(s) => s,
        Value::Object(ref obj) => obj.get("authority")?.as_str()?.to_string(),
        _ => return None,
    };
    let role = role.strip_prefix("ROLE_").unwrap_or(&role);
    Some(role.to_lowercase())
}
