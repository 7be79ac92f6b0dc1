use reqwest::Method;
use reqwest::header::ACCEPT;

use super::{ApiClient, ApiResponse};
use crate::error::QaResult;
use crate::models::SalesPageQuery;
use crate::routes;

/// `/api/sales` operations.
pub struct Sales<'a> {
    client: &'a ApiClient,
}

impl<'a> Sales<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Sales { client }
    }

    /// Sell `quantity` units of a plant: `POST /api/sales/plant/{id}?quantity=N`
    /// with no body.
    pub async fn sell(&self, token: &str, plant_id: &str, quantity: i64) -> QaResult<ApiResponse> {
        let request = self
            .client
            .request(
                Method::POST,
                &format!("{}/{plant_id}", routes::SALES_PLANT),
                Some(token),
            )
            .query(&[("quantity", quantity)])
            .header(ACCEPT, "*/*");
        self.client.send(request).await
    }

    pub async fn list(&self, token: &str) -> QaResult<ApiResponse> {
        self.client.get_path(Some(token), routes::SALES).await
    }

    pub async fn get(&self, token: &str, id: &str) -> QaResult<ApiResponse> {
        self.client
            .get_path(Some(token), &format!("{}/{id}", routes::SALES))
            .await
    }

    pub async fn delete(&self, token: &str, id: &str) -> QaResult<ApiResponse> {
        let request = self
            .client
            .request(Method::DELETE, &format!("{}/{id}", routes::SALES), Some(token));
        self.client.send(request).await
    }

    pub async fn page(&self, token: &str, query: &SalesPageQuery) -> QaResult<ApiResponse> {
        let request = self
            .client
            .request(Method::GET, routes::SALES_PAGE, Some(token))
            .query(&query.to_params());
        self.client.send(request).await
    }
}
