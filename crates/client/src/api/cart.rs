//! Cart line endpoints.

use shopfront_core::{CartItem, CartItemCreate, CartItemId, CartItemUpdate};
use tracing::instrument;

use crate::error::ApiError;
use crate::http::HttpClient;

/// Cart endpoints. The backend scopes every call to the authenticated user.
#[derive(Debug, Clone, Copy)]
pub struct CartApi<'a> {
    http: &'a HttpClient,
}

impl<'a> CartApi<'a> {
    pub(crate) const fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<CartItem>, ApiError> {
        self.http.get("/cart_items/").await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn get(&self, id: CartItemId) -> Result<CartItem, ApiError> {
        self.http.get(&format!("/cart_items/{id}")).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn add(&self, item: CartItemCreate) -> Result<CartItem, ApiError> {
        self.http.post("/cart_items/", &item).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn update(&self, id: CartItemId, quantity: u32) -> Result<CartItem, ApiError> {
        self.http
            .patch(&format!("/cart_items/{id}"), &CartItemUpdate { quantity })
            .await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn remove(&self, id: CartItemId) -> Result<(), ApiError> {
        self.http.delete(&format!("/cart_items/{id}")).await
    }
}
