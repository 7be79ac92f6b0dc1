use reqwest::Method;
use serde_json::json;

use super::{ApiClient, ApiResponse};
use crate::error::QaResult;
use crate::inspect;
use crate::models::{CategoryQuery, id_string};
use crate::routes;

/// `/api/categories` operations.
pub struct Categories<'a> {
    client: &'a ApiClient,
}

impl<'a> Categories<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Categories { client }
    }

    pub async fn list(&self, token: &str, query: &CategoryQuery) -> QaResult<ApiResponse> {
        let request = self
            .client
            .request(Method::GET, routes::CATEGORIES, Some(token))
            .query(&query.to_params());
        self.client.send(request).await
    }

    /// Id of the category named exactly `name`, looked up through search.
    /// `Ok(None)` when the search answers but lists no such category.
    pub async fn find_by_name(&self, token: &str, name: &str) -> QaResult<Option<String>> {
        let query = CategoryQuery {
            search: Some(name.to_string()),
            ..Default::default()
        };
        let response = self.list(token, &query).await?;
        let id = inspect::items(&response.body).and_then(|items| {
            items
                .iter()
                .find(|c| c.get("name").and_then(|n| n.as_str()) == Some(name))
                .and_then(|c| c.get("id"))
                .and_then(id_string)
        });
        Ok(id)
    }

    pub async fn list_unauthenticated(&self) -> QaResult<ApiResponse> {
        self.client.get_path(None, routes::CATEGORIES).await
    }

    pub async fn get(&self, token: &str, id: &str) -> QaResult<ApiResponse> {
        self.client
            .get_path(Some(token), &format!("{}/{id}", routes::CATEGORIES))
            .await
    }

    pub async fn summary(&self, token: &str) -> QaResult<ApiResponse> {
        self.client
            .get_path(Some(token), routes::CATEGORIES_SUMMARY)
            .await
    }

    /// `GET /api/categories/main`: top-level categories only.
    pub async fn main(&self, token: &str) -> QaResult<ApiResponse> {
        self.client.get_path(Some(token), routes::CATEGORIES_MAIN).await
    }

    /// Create a category with just a name.
    pub async fn create(&self, token: &str, name: &str) -> QaResult<ApiResponse> {
        self.post(token, json!({ "name": name })).await
    }

    /// Create a root category (explicit `parent: null`).
    pub async fn create_root(&self, token: &str, name: &str) -> QaResult<ApiResponse> {
        self.post(token, json!({ "name": name, "parent": null })).await
    }

    /// Create a subcategory under `parent_id`.
    pub async fn create_sub(&self, token: &str, name: &str, parent_id: &str) -> QaResult<ApiResponse> {
        let parent = parent_id
            .parse::<i64>()
            .map(serde_json::Value::from)
            .unwrap_or_else(|_| json!(parent_id));
        self.post(token, json!({ "name": name, "parent": { "id": parent } }))
            .await
    }

    /// Create a category from an arbitrary JSON body (test-data templates).
    pub async fn create_raw(&self, token: &str, body: serde_json::Value) -> QaResult<ApiResponse> {
        self.post(token, body).await
    }

    pub async fn update(&self, token: &str, id: &str, name: &str) -> QaResult<ApiResponse> {
        let request = self
            .client
            .request(Method::PUT, &format!("{}/{id}", routes::CATEGORIES), Some(token))
            .json(&json!({ "name": name }));
        self.client.send(request).await
    }

    pub async fn delete(&self, token: &str, id: &str) -> QaResult<ApiResponse> {
        let request = self.client.request(
            Method::DELETE,
            &format!("{}/{id}", routes::CATEGORIES),
            Some(token),
        );
        self.client.send(request).await
    }

    async fn post(&self, token: &str, body: serde_json::Value) -> QaResult<ApiResponse> {
        let request = self
            .client
            .request(Method::POST, routes::CATEGORIES, Some(token))
            .json(&body);
        self.client.send(request).await
    }
}
