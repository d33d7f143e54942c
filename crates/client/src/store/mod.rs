//! Client-side state stores.
//!
//! Stores own in-memory state behind `std::sync` locks and drive the API
//! modules. Locks are never held across an `.await`.

mod auth;
mod cart;

pub use auth::{AuthError, AuthPhase, AuthStore, LoginFailure, RegistrationFailure};
pub use cart::CartStore;

use std::sync::atomic::{AtomicUsize, Ordering};

/// In-flight action counter backing a store's loading flag.
#[derive(Debug, Default)]
pub(crate) struct Loading {
    in_flight: AtomicUsize,
}

impl Loading {
    /// Mark an action as started; it ends when the guard drops.
    pub fn begin(&self) -> LoadingGuard<'_> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        LoadingGuard { loading: self }
    }

    pub fn is_active(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }
}

pub(crate) struct LoadingGuard<'a> {
    loading: &'a Loading,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.loading.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_nests() {
        let loading = Loading::default();
        assert!(!loading.is_active());

        let outer = loading.begin();
        {
            let _inner = loading.begin();
            assert!(loading.is_active());
        }
        assert!(loading.is_active());

        drop(outer);
        assert!(!loading.is_active());
    }
}
