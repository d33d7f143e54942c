//! Order history endpoints.

use shopfront_core::{Order, OrderId, OrderStatus};
use tracing::instrument;

use crate::error::ApiError;
use crate::http::HttpClient;

#[derive(Debug, Clone, Copy)]
pub struct OrdersApi<'a> {
    http: &'a HttpClient,
}

impl<'a> OrdersApi<'a> {
    pub(crate) const fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Order>, ApiError> {
        self.http.get("/orders/").await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn get(&self, id: OrderId) -> Result<Order, ApiError> {
        self.http.get(&format!("/orders/{id}")).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn by_status(&self, status: OrderStatus) -> Result<Vec<Order>, ApiError> {
        self.http.get(&format!("/orders/status/{status}")).await
    }

    /// Cancel an order. Only pending and paid orders can be canceled.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn cancel(&self, id: OrderId) -> Result<(), ApiError> {
        self.http.patch_empty(&format!("/orders/cancel/{id}")).await
    }
}
