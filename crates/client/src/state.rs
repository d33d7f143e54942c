//! Application state wiring every client component together.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::notify::Notifier;
use crate::router::Router;
use crate::storage::{KeyValueStore, TokenStorage};
use crate::store::{AuthStore, CartStore};

/// Client state shared by a host.
///
/// This struct is cheaply cloneable via `Arc`. The [`Router`] doubles as the
/// navigator the HTTP layer and stores redirect through.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ClientConfig,
    router: Router,
    api: ApiClient,
    auth: AuthStore,
    cart: CartStore,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .field("auth", &self.inner.auth)
            .field("cart", &self.inner.cart)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Client configuration
    /// * `store` - Durable key-value storage holding the token pair
    /// * `notifier` - Sink for user-facing notifications
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        config: ClientConfig,
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ApiError> {
        let tokens = TokenStorage::new(store);
        let router = Router::new(tokens.clone(), config.locale);
        let http = crate::http::HttpClient::new(
            config.clone(),
            tokens,
            notifier,
            Arc::new(router.clone()),
        )?;
        let api = ApiClient::new(http);
        let auth = AuthStore::new(api.clone());
        let cart = CartStore::new(api.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                router,
                api,
                auth,
                cart,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn router(&self) -> &Router {
        &self.inner.router
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    #[must_use]
    pub fn auth(&self) -> &AuthStore {
        &self.inner.auth
    }

    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }
}
