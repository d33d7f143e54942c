//! Product catalog endpoints.
//!
//! Listing is public. Creating, updating and deleting require a vendor or
//! admin account; the backend enforces this.

use shopfront_core::{Product, ProductCreate, ProductFilter, ProductId, ProductPage, ProductUpdate};
use tracing::instrument;

use crate::error::ApiError;
use crate::http::HttpClient;

#[derive(Debug, Clone, Copy)]
pub struct ProductsApi<'a> {
    http: &'a HttpClient,
}

impl<'a> ProductsApi<'a> {
    pub(crate) const fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// One page of the catalog. Unset filter fields are not sent.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn list(&self, filter: &ProductFilter) -> Result<ProductPage, ApiError> {
        self.http.get_with_query("/products/", filter).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn get(&self, id: ProductId) -> Result<Product, ApiError> {
        self.http.get(&format!("/products/{id}")).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip_all, fields(name = %data.name))]
    pub async fn create(&self, data: &ProductCreate) -> Result<Product, ApiError> {
        self.http.post("/products/", data).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self, data))]
    pub async fn update(&self, id: ProductId, data: &ProductUpdate) -> Result<Product, ApiError> {
        self.http.put(&format!("/products/{id}"), data).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> Result<(), ApiError> {
        self.http.delete(&format!("/products/{id}")).await
    }
}
