//! Errors returned by the HTTP layer.
//!
//! Every failure has already been surfaced to the user (and, for 401, the
//! session cleared) by the time the caller sees an [`ApiError`]. Callers only
//! add local handling.

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when calling the storefront backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received (connection refused, timeout, broken body).
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The request could not be constructed.
    #[error("request setup error: {0}")]
    RequestSetup(String),

    /// The backend answered with an error status.
    #[error("HTTP {status}: {}", summary(.message.as_deref(), .detail.as_deref()))]
    Status {
        status: u16,
        /// The body's `message` field, if any.
        message: Option<String>,
        /// The body's `detail` field, flattened to text.
        detail: Option<String>,
    },

    /// A successful response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

fn summary<'a>(message: Option<&'a str>, detail: Option<&'a str>) -> &'a str {
    message.or(detail).unwrap_or("no details")
}

impl ApiError {
    /// HTTP status, for status failures.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Backend `detail` text, for status failures.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }

    /// True when no response reached the client.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Error body shape shared by the backend's handlers.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Parse an error body; anything that is not a JSON object yields an empty body.
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// `detail` as text. Validation errors arrive as a list of `{msg}`
    /// objects; the first message is used.
    pub fn detail_text(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(items) => items.first().and_then(message_of),
            other => message_of(other).or_else(|| Some(other.to_string())),
        }
    }
}

fn message_of(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Object(map) => map
            .get("msg")
            .or_else(|| map.get("message"))
            .and_then(serde_json::Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}
