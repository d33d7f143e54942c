//! Shared fixtures for unit tests.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use serde_json::json;
use shopfront_core::TokenPair;
use wiremock::MockServer;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::http::HttpClient;
use crate::notify::MemoryNotifier;
use crate::router::MemoryNavigator;
use crate::storage::{KeyValueStore, MemoryStore, TokenStorage};

pub struct TestBackend {
    pub server: MockServer,
    pub api: ApiClient,
    pub tokens: TokenStorage,
    pub notifier: MemoryNotifier,
    pub navigator: MemoryNavigator,
}

impl TestBackend {
    pub async fn start() -> Self {
        Self::with_store(Arc::new(MemoryStore::new())).await
    }

    pub async fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        let server = MockServer::start().await;
        let config = ClientConfig::new(&format!("{}/api", server.uri())).unwrap();
        let tokens = TokenStorage::new(store);
        let notifier = MemoryNotifier::new();
        let navigator = MemoryNavigator::new();
        let http = HttpClient::new(
            config,
            tokens.clone(),
            Arc::new(notifier.clone()),
            Arc::new(navigator.clone()),
        )
        .unwrap();

        Self {
            server,
            api: ApiClient::new(http),
            tokens,
            notifier,
            navigator,
        }
    }

    /// Store a token pair as if a login had succeeded.
    pub fn login(&self) {
        self.tokens
            .save(&TokenPair {
                access_token: "A1".to_string(),
                refresh_token: "R1".to_string(),
            })
            .unwrap();
    }
}

pub fn user_json(role: &str) -> serde_json::Value {
    json!({
        "id": 1,
        "username": "ada",
        "name": "Ada",
        "surname": "Lovelace",
        "email": "ada@example.com",
        "phone_number": "+15550100",
        "role": role
    })
}
