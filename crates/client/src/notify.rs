//! User-facing notifications ("toasts").
//!
//! The client never renders anything itself. Hosts inject a [`Notifier`] and
//! decide how a notification reaches the shopper.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Success,
    Warning,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// A notification as delivered to a [`Notifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    /// Deliver one notification.
    fn notify(&self, level: Level, message: &str);

    fn success(&self, message: &str) {
        self.notify(Level::Success, message);
    }

    fn warning(&self, message: &str) {
        self.notify(Level::Warning, message);
    }

    fn error(&self, message: &str) {
        self.notify(Level::Error, message);
    }
}

/// Writes notifications to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: Level, message: &str) {
        match level {
            Level::Success => tracing::info!(target: "shopfront::notify", "{message}"),
            Level::Warning => tracing::warn!(target: "shopfront::notify", "{message}"),
            Level::Error => tracing::error!(target: "shopfront::notify", "{message}"),
        }
    }
}

/// Keeps every notification in memory, in delivery order.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    delivered: Arc<Mutex<Vec<Notification>>>,
}

impl MemoryNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything delivered so far.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drain and return everything delivered so far.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.delivered.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Messages delivered at `level`.
    #[must_use]
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.notifications()
            .into_iter()
            .filter(|n| n.level == level)
            .map(|n| n.message)
            .collect()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, level: Level, message: &str) {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Notification {
                level,
                message: message.to_owned(),
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_notifier_records_in_order() {
        let notifier = MemoryNotifier::new();
        notifier.success("saved");
        notifier.error("boom");
        notifier.warning("careful");

        let levels: Vec<Level> = notifier.notifications().iter().map(|n| n.level).collect();
        assert_eq!(levels, vec![Level::Success, Level::Error, Level::Warning]);
        assert_eq!(notifier.messages(Level::Error), vec!["boom".to_owned()]);
    }

    #[test]
    fn test_take_drains() {
        let notifier = MemoryNotifier::new();
        notifier.success("one");
        assert_eq!(notifier.take().len(), 1);
        assert!(notifier.notifications().is_empty());
    }
}
