//! Shopfront client library.
//!
//! Everything a storefront host needs to talk to the backend:
//!
//! - [`http`] - Shared HTTP client with bearer-token injection and centralized
//!   error notifications
//! - [`api`] - Auth, cart, order and product endpoints
//! - [`store`] - Auth and cart state with their actions
//! - [`router`] - Route table and navigation guard
//! - [`storage`], [`notify`] - Capabilities a host injects
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shopfront_client::{AppState, ClientConfig, FileStore, TracingNotifier};
//!
//! let state = AppState::new(
//!     ClientConfig::from_env()?,
//!     Arc::new(FileStore::open(".shopfront-tokens.json")?),
//!     Arc::new(TracingNotifier),
//! )?;
//!
//! state.auth().check_auth().await;
//! state.cart().fetch_cart_items().await;
//! println!("{} items, {}", state.cart().total_items(), state.cart().total_price());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod messages;
pub mod notify;
pub mod router;
pub mod state;
pub mod storage;
pub mod store;

#[cfg(test)]
mod test_support;

pub use api::ApiClient;
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use http::HttpClient;
pub use messages::{Locale, Message};
pub use notify::{Level, MemoryNotifier, Notification, Notifier, TracingNotifier};
pub use router::{MemoryNavigator, NavigationDecision, NavigationOutcome, Navigator, Router};
pub use state::AppState;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, TokenStorage};
pub use store::{AuthError, AuthPhase, AuthStore, CartStore};
