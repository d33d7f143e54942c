//! Backend API modules.
//!
//! Each module is a thin, stateless mapping from a domain operation to a verb,
//! a path and a payload. All transport concerns (authorization, error
//! classification, notifications) live in [`HttpClient`].

mod auth;
mod cart;
mod orders;
mod products;

pub use auth::AuthApi;
pub use cart::CartApi;
pub use orders::OrdersApi;
pub use products::ProductsApi;

use crate::http::HttpClient;

/// All API modules over one shared [`HttpClient`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
}

impl ApiClient {
    #[must_use]
    pub const fn new(http: HttpClient) -> Self {
        Self { http }
    }

    #[must_use]
    pub const fn http(&self) -> &HttpClient {
        &self.http
    }

    #[must_use]
    pub const fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(&self.http)
    }

    #[must_use]
    pub const fn cart(&self) -> CartApi<'_> {
        CartApi::new(&self.http)
    }

    #[must_use]
    pub const fn orders(&self) -> OrdersApi<'_> {
        OrdersApi::new(&self.http)
    }

    #[must_use]
    pub const fn products(&self) -> ProductsApi<'_> {
        ProductsApi::new(&self.http)
    }
}
