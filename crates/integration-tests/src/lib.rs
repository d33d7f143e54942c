//! Integration tests for Shopfront.
//!
//! Tests wire a full [`AppState`] (router, HTTP client, stores) against a
//! `wiremock` backend. Nothing external needs to be running.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `http_client` - Bearer header injection and error handling
//! - `auth_flow` - Login, logout and session expiry
//! - `cart_flow` - Cart mutations, refetch and totals
//! - `navigation` - Route guard through the router

#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use std::sync::Arc;

use serde_json::{Value, json};
use shopfront_client::{AppState, ClientConfig, MemoryNotifier, MemoryStore, TokenStorage};
use shopfront_core::TokenPair;
use wiremock::MockServer;

/// Access token stored by [`TestContext::sign_in`].
pub const ACCESS_TOKEN: &str = "access-token-1";

/// Refresh token stored by [`TestContext::sign_in`].
pub const REFRESH_TOKEN: &str = "refresh-token-1";

/// A client wired against a mock backend.
pub struct TestContext {
    pub server: MockServer,
    pub state: AppState,
    pub store: MemoryStore,
    pub notifier: MemoryNotifier,
}

impl TestContext {
    /// Start a mock backend and build client state pointing at its `/api`.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let config = ClientConfig::new(&format!("{}/api", server.uri()))
            .expect("mock server URI is a valid base URL");
        let store = MemoryStore::new();
        let notifier = MemoryNotifier::new();
        let state = AppState::new(config, Arc::new(store.clone()), Arc::new(notifier.clone()))
            .expect("Failed to build client state");

        Self {
            server,
            state,
            store,
            notifier,
        }
    }

    /// Token storage over the same backing store the client uses.
    #[must_use]
    pub fn tokens(&self) -> TokenStorage {
        TokenStorage::new(Arc::new(self.store.clone()))
    }

    /// Seed storage with a token pair, as a previous session would have.
    pub fn sign_in(&self) {
        self.tokens()
            .save(&TokenPair {
                access_token: ACCESS_TOKEN.to_string(),
                refresh_token: REFRESH_TOKEN.to_string(),
            })
            .expect("Failed to seed tokens");
    }
}

/// Profile body as returned by `/users/me`.
#[must_use]
pub fn user_body(role: &str) -> Value {
    json!({
        "id": 7,
        "username": "grace",
        "name": "Grace",
        "surname": "Hopper",
        "email": "grace@example.com",
        "phone_number": "+15550199",
        "image_url": null,
        "sensitive_info": {"country": "US", "city": "Arlington"},
        "role": role
    })
}

/// Cart line body.
#[must_use]
pub fn cart_line(id: i32, product_id: i32, quantity: u32, price: f64) -> Value {
    json!({
        "id": id,
        "product_id": product_id,
        "quantity": quantity,
        "price": price,
        "user_id": 7
    })
}
