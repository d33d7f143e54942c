//! Shopfront Core - Shared DTO types.
//!
//! This crate provides the data shapes exchanged with the storefront backend:
//! - `shopfront-client` - HTTP client, API modules, stores and router
//! - `shopfront-cli` - Command-line host for the client
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Every entity
//! here is a mirror of server state; the server is authoritative and the
//! client never merges or diffs.
//!
//! # Modules
//!
//! - [`types`] - IDs, emails, statuses, and the user/product/cart/order DTOs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
