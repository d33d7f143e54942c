//! Shopping cart store.
//!
//! The server owns the cart. Every successful mutation is followed by one full
//! refetch; nothing is updated optimistically.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use rust_decimal::Decimal;
use shopfront_core::{CartItem, CartItemCreate, CartItemId};
use tracing::{debug, instrument, warn};

use super::Loading;
use crate::api::ApiClient;
use crate::error::ApiError;
use crate::messages::Message;

/// Cart lines and actions. Cloning is cheap and clones share state.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    api: ApiClient,
    items: RwLock<Vec<CartItem>>,
    loading: Loading,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.read_items().len())
            .field("loading", &self.is_loading())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            inner: Arc::new(CartStoreInner {
                api,
                items: RwLock::new(Vec::new()),
                loading: Loading::default(),
            }),
        }
    }

    /// Snapshot of the cart lines as last fetched.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.read_items().clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.loading.is_active()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.read_items().iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.read_items().iter().map(CartItem::line_total).sum()
    }

    /// Replace the lines with the server's. Failures are logged and the
    /// current lines kept.
    #[instrument(skip(self))]
    pub async fn fetch_cart_items(&self) {
        let _loading = self.inner.loading.begin();

        match self.inner.api.cart().list().await {
            Ok(items) => {
                debug!(lines = items.len(), "cart refreshed");
                *self.inner.items.write().unwrap_or_else(PoisonError::into_inner) = items;
            }
            Err(e) => warn!(error = %e, "failed to fetch cart items"),
        }
    }

    /// # Errors
    ///
    /// Returns the API error after notifying the user; the cart is not refetched.
    #[instrument(skip(self))]
    pub async fn add_to_cart(&self, item: CartItemCreate) -> Result<CartItem, ApiError> {
        let _loading = self.inner.loading.begin();

        let added = self
            .inner
            .api
            .cart()
            .add(item)
            .await
            .map_err(|e| self.fail(e, Message::CartAddFailed))?;

        self.fetch_cart_items().await;
        self.notify_success(Message::CartAdded);
        Ok(added)
    }

    /// # Errors
    ///
    /// Returns the API error after notifying the user; the cart is not refetched.
    #[instrument(skip(self))]
    pub async fn update_cart_item(
        &self,
        id: CartItemId,
        quantity: u32,
    ) -> Result<CartItem, ApiError> {
        let _loading = self.inner.loading.begin();

        let updated = self
            .inner
            .api
            .cart()
            .update(id, quantity)
            .await
            .map_err(|e| self.fail(e, Message::CartUpdateFailed))?;

        self.fetch_cart_items().await;
        self.notify_success(Message::CartUpdated);
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns the API error after notifying the user; the cart is not refetched.
    #[instrument(skip(self))]
    pub async fn remove_from_cart(&self, id: CartItemId) -> Result<(), ApiError> {
        let _loading = self.inner.loading.begin();

        self.inner
            .api
            .cart()
            .remove(id)
            .await
            .map_err(|e| self.fail(e, Message::CartRemoveFailed))?;

        self.fetch_cart_items().await;
        self.notify_success(Message::CartRemoved);
        Ok(())
    }

    /// Drop all lines locally. The server cart is untouched.
    pub fn clear_cart(&self) {
        self.inner
            .items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn read_items(&self) -> std::sync::RwLockReadGuard<'_, Vec<CartItem>> {
        self.inner
            .items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn notify_success(&self, message: Message) {
        let http = self.inner.api.http();
        http.notifier().success(message.text(http.locale()));
    }

    fn fail(&self, e: ApiError, fallback: Message) -> ApiError {
        let http = self.inner.api.http();
        let text = e.detail().unwrap_or_else(|| fallback.text(http.locale()));
        http.notifier().error(text);
        e
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use shopfront_core::ProductId;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    use super::*;
    use crate::messages::Locale;
    use crate::notify::Level;
    use crate::test_support::TestBackend;

    fn line(id: i32, quantity: u32, price: f64) -> serde_json::Value {
        json!({
            "id": id,
            "product_id": id * 10,
            "quantity": quantity,
            "price": price,
            "user_id": 1
        })
    }

    #[tokio::test]
    async fn test_totals_follow_fetched_lines() {
        let backend = TestBackend::start().await;
        backend.login();
        Mock::given(method("GET"))
            .and(path("/api/cart_items/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([line(1, 2, 9.99), line(2, 1, 0.5)])),
            )
            .mount(&backend.server)
            .await;

        let cart = CartStore::new(backend.api.clone());
        cart.fetch_cart_items().await;

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), Decimal::new(2048, 2));
        assert!(!cart.is_loading());

        cart.clear_cart();
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_add_refetches_once_then_notifies() {
        let backend = TestBackend::start().await;
        backend.login();
        Mock::given(method("POST"))
            .and(path("/api/cart_items/"))
            .and(body_json(json!({"product_id": 10, "quantity": 2})))
            .respond_with(ResponseTemplate::new(200).set_body_json(line(1, 2, 4.0)))
            .expect(1)
            .mount(&backend.server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/cart_items/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([line(1, 2, 4.0)])))
            .expect(1)
            .mount(&backend.server)
            .await;

        let cart = CartStore::new(backend.api.clone());
        cart.add_to_cart(CartItemCreate {
            product_id: ProductId::new(10),
            quantity: 2,
        })
        .await
        .unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total_price(), Decimal::new(8, 0));
        assert_eq!(
            backend.notifier.messages(Level::Success),
            vec![Message::CartAdded.text(Locale::En).to_string()]
        );
    }

    #[tokio::test]
    async fn test_failed_update_notifies_detail_without_refetch() {
        let backend = TestBackend::start().await;
        backend.login();
        Mock::given(method("PATCH"))
            .and(path("/api/cart_items/3"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"detail": "Not enough stock"})),
            )
            .mount(&backend.server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/cart_items/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&backend.server)
            .await;

        let cart = CartStore::new(backend.api.clone());
        let err = cart
            .update_cart_item(CartItemId::new(3), 99)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(400));
        assert_eq!(
            backend.notifier.messages(Level::Error).last().map(String::as_str),
            Some("Not enough stock")
        );
        assert!(backend.notifier.messages(Level::Success).is_empty());
    }

    #[tokio::test]
    async fn test_failed_remove_without_detail_uses_fallback() {
        let backend = TestBackend::start().await;
        backend.login();
        Mock::given(method("DELETE"))
            .and(path("/api/cart_items/4"))
            .respond_with(ResponseTemplate::new(409))
            .mount(&backend.server)
            .await;

        let cart = CartStore::new(backend.api.clone());
        cart.remove_from_cart(CartItemId::new(4)).await.unwrap_err();

        assert_eq!(
            backend.notifier.messages(Level::Error).last().map(String::as_str),
            Some(Message::CartRemoveFailed.text(Locale::En))
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_current_lines() {
        let backend = TestBackend::start().await;
        backend.login();
        Mock::given(method("GET"))
            .and(path("/api/cart_items/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([line(1, 1, 1.0)])))
            .up_to_n_times(1)
            .mount(&backend.server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/cart_items/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&backend.server)
            .await;

        let cart = CartStore::new(backend.api.clone());
        cart.fetch_cart_items().await;
        cart.fetch_cart_items().await;

        assert_eq!(cart.total_items(), 1);
    }
}
