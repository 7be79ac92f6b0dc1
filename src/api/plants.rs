use reqwest::Method;

use super::{ApiClient, ApiResponse};
use crate::error::QaResult;
use crate::models::{NewPlant, PlantUpdate};
use crate::routes;

/// `/api/plants` operations.
pub struct Plants<'a> {
    client: &'a ApiClient,
}

impl<'a> Plants<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Plants { client }
    }

    pub async fn list(&self, token: &str) -> QaResult<ApiResponse> {
        self.client.get_path(Some(token), routes::PLANTS).await
    }

    pub async fn get(&self, token: &str, id: &str) -> QaResult<ApiResponse> {
        self.client
            .get_path(Some(token), &format!("{}/{id}", routes::PLANTS))
            .await
    }

    /// Plants assigned to one category.
    pub async fn by_category(&self, token: &str, category_id: &str) -> QaResult<ApiResponse> {
        self.client
            .get_path(
                Some(token),
                &format!("{}/{category_id}", routes::PLANTS_BY_CATEGORY),
            )
            .await
    }

    pub async fn summary(&self, token: &str) -> QaResult<ApiResponse> {
        self.client.get_path(Some(token), routes::PLANTS_SUMMARY).await
    }

    /// `POST /api/plants/category/{id}`. The category comes from the path, so
    /// any `category_id` on the payload is left out of the body.
    pub async fn create_in_category(
        &self,
        token: &str,
        category_id: &str,
        plant: &NewPlant,
    ) -> QaResult<ApiResponse> {
        let body = NewPlant {
            category_id: None,
            ..plant.clone()
        };
        let request = self
            .client
            .request(
                Method::POST,
                &format!("{}/{category_id}", routes::PLANTS_BY_CATEGORY),
                Some(token),
            )
            .json(&body);
        self.client.send(request).await
    }

    /// `POST /api/plants` with `categoryId` in the body. A plant without a
    /// category is posted as is and left for the server to reject.
    pub async fn create(&self, token: &str, plant: &NewPlant) -> QaResult<ApiResponse> {
        let request = self
            .client
            .request(Method::POST, routes::PLANTS, Some(token))
            .json(plant);
        self.client.send(request).await
    }

    pub async fn update(&self, token: &str, id: &str, update: &PlantUpdate) -> QaResult<ApiResponse> {
        let request = self
            .client
            .request(Method::PUT, &format!("{}/{id}", routes::PLANTS), Some(token))
            .json(update);
        self.client.send(request).await
    }

    pub async fn delete(&self, token: &str, id: &str) -> QaResult<ApiResponse> {
        let request = self
            .client
            .request(Method::DELETE, &format!("{}/{id}", routes::PLANTS), Some(token));
        self.client.send(request).await
    }

    /// `GET` any path without a bearer token.
    pub async fn get_path_unauthenticated(&self, path: &str) -> QaResult<ApiResponse> {
        self.client.get_path(None, path).await
    }
}
