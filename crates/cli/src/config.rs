//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All client variables (see `shopfront_client::config`), plus:
//! - `SHOPFRONT_TOKEN_FILE` - Where the token pair is persisted
//!   (default: `.shopfront-tokens.json`)
//! - `SENTRY_DSN` - Sentry DSN for error tracking (optional)

use std::path::PathBuf;

use shopfront_client::config::{get_env_or_default, get_optional_env};
use shopfront_client::{ClientConfig, ConfigError};

/// Default location of the token file.
pub const DEFAULT_TOKEN_FILE: &str = ".shopfront-tokens.json";

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub client: ClientConfig,
    pub token_file: PathBuf,
    pub sentry_dsn: Option<String>,
}

impl CliConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` if a client variable is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let client = ClientConfig::from_env()?;

        Ok(Self {
            client,
            token_file: PathBuf::from(get_env_or_default(
                "SHOPFRONT_TOKEN_FILE",
                DEFAULT_TOKEN_FILE,
            )),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
        })
    }
}
