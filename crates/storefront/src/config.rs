//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ROCKETSHOES_API_URL` - Base URL of the stock/catalog API (default: <http://localhost:3333>)
//! - `ROCKETSHOES_API_TOKEN` - Bearer token sent with every API request
//! - `ROCKETSHOES_STORAGE_PATH` - Durable storage file (default: .rocketshoes/storage.json)
//! - `ROCKETSHOES_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: 10)
//! - `ROCKETSHOES_PRODUCT_CACHE_TTL_SECS` - Product cache TTL (default: 300)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:3333";
const DEFAULT_STORAGE_PATH: &str = ".rocketshoes/storage.json";
const DEFAULT_REQUEST_TIMEOUT_SECS: &str = "10";
const DEFAULT_PRODUCT_CACHE_TTL_SECS: &str = "300";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Stock/catalog API configuration
    pub api: ApiConfig,
    /// File backing durable local storage
    pub storage_path: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Stock/catalog API configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct ApiConfig {
    /// Base URL, always ending in `/` so relative paths join beneath it
    pub base_url: Url,
    /// Optional bearer token
    pub token: Option<SecretString>,
    /// Timeout applied to every request
    pub request_timeout: Duration,
    /// How long catalog products stay cached
    pub product_cache_ttl: Duration,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("request_timeout", &self.request_timeout)
            .field("product_cache_ttl", &self.product_cache_ttl)
            .finish()
    }
}

impl ApiConfig {
    /// Build an API configuration for `base_url` with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("ROCKETSHOES_API_URL", base_url)?,
            token: None,
            request_timeout: Duration::from_secs(10),
            product_cache_ttl: Duration::from_secs(300),
        })
    }
}

impl StorefrontConfig {
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

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let base_url = parse_base_url(
            "ROCKETSHOES_API_URL",
            &get_or("ROCKETSHOES_API_URL", DEFAULT_API_URL),
        )?;
        let token = lookup("ROCKETSHOES_API_TOKEN")
            .filter(|t| !t.is_empty())
            .map(SecretString::from);
        let request_timeout = parse_secs(
            "ROCKETSHOES_REQUEST_TIMEOUT_SECS",
            &get_or("ROCKETSHOES_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
        )?;
        let product_cache_ttl = parse_secs(
            "ROCKETSHOES_PRODUCT_CACHE_TTL_SECS",
            &get_or(
                "ROCKETSHOES_PRODUCT_CACHE_TTL_SECS",
                DEFAULT_PRODUCT_CACHE_TTL_SECS,
            ),
        )?;
        let storage_path = PathBuf::from(get_or("ROCKETSHOES_STORAGE_PATH", DEFAULT_STORAGE_PATH));

        Ok(Self {
            api: ApiConfig {
                base_url,
                token,
                request_timeout,
                product_cache_ttl,
            },
            storage_path,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a base URL, appending a trailing slash when missing.
fn parse_base_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be a hierarchical URL such as http://host:port".to_string(),
        ));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

/// Parse a whole number of seconds.
fn parse_secs(key: &str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
