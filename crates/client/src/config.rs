//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPFRONT_API_BASE_URL` - Backend API root including the `/api` prefix
//!   (default: `http://127.0.0.1:8000/api`)
//! - `SHOPFRONT_TIMEOUT_SECS` - Per-request timeout in seconds (default: 10)
//! - `SHOPFRONT_LOCALE` - `en` or `zh-cn` (default: `en`)

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::messages::Locale;

/// Default backend API root.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid API base URL {0}: {1}")]
    InvalidBaseUrl(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root without a trailing slash, e.g. `https://shop.example/api`
    pub base_url: String,
    /// Fixed timeout applied to every request
    pub timeout: Duration,
    /// Language of user-facing messages
    pub locale: Locale,
}

impl ClientConfig {
    /// Configuration for `base_url` with default timeout and locale.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` unless `base_url` is an absolute
    /// `http` or `https` URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            timeout: DEFAULT_TIMEOUT,
            locale: Locale::default(),
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = get_env_or_default("SHOPFRONT_API_BASE_URL", DEFAULT_API_BASE_URL);
        let timeout_secs = get_env_or_default("SHOPFRONT_TIMEOUT_SECS", "10")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHOPFRONT_TIMEOUT_SECS".to_string(), e.to_string())
            })?;
        let locale = get_env_or_default("SHOPFRONT_LOCALE", "en")
            .parse::<Locale>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOPFRONT_LOCALE".to_string(), e))?;

        Ok(Self::new(&base_url)?
            .with_timeout(Duration::from_secs(timeout_secs))
            .with_locale(locale))
    }

    /// Full URL for an API path such as `/cart_items/`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed)
        .map_err(|e| ConfigError::InvalidBaseUrl(raw.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl(
            raw.to_string(),
            format!("unsupported scheme {}", url.scheme()),
        ));
    }

    Ok(trimmed.to_string())
}

/// Get an optional environment variable, treating empty values as unset.
#[must_use]
pub fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
#[must_use]
pub fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = ClientConfig::new("https://shop.example/api/").unwrap();
        assert_eq!(config.base_url, "https://shop.example/api");
        assert_eq!(
            config.endpoint("/cart_items/"),
            "https://shop.example/api/cart_items/"
        );
    }

    #[test]
    fn test_new_rejects_relative_and_non_http() {
        assert!(matches!(
            ClientConfig::new("/api"),
            Err(ConfigError::InvalidBaseUrl(..))
        ));
        assert!(matches!(
            ClientConfig::new("ftp://shop.example/api"),
            Err(ConfigError::InvalidBaseUrl(..))
        ));
    }

    #[test]
    fn test_builders() {
        let config = ClientConfig::new(DEFAULT_API_BASE_URL)
            .unwrap()
            .with_timeout(Duration::from_secs(3))
            .with_locale(Locale::ZhCn);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.locale, Locale::ZhCn);
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidEnvVar(
            "SHOPFRONT_TIMEOUT_SECS".to_string(),
            "invalid digit found in string".to_string(),
        );
        assert_eq!(
            err.to_string(),
            "Invalid environment variable SHOPFRONT_TIMEOUT_SECS: invalid digit found in string"
        );
    }
}
