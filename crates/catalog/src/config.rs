//! Catalog server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CATALOG_HOST` - Bind address (default: 127.0.0.1)
//! - `CATALOG_PORT` - Listen port (default: 3333)
//! - `CATALOG_DATA_PATH` - Seed document (default: crates/catalog/data/server.json)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog server configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// JSON document with products and stock
    pub data_path: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `CATALOG_HOST` or `CATALOG_PORT` is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("CATALOG_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("CATALOG_PORT", "3333")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_PORT".to_string(), e.to_string()))?;
        let data_path = PathBuf::from(get_env_or_default(
            "CATALOG_DATA_PATH",
            "crates/catalog/data/server.json",
        ));
        let sentry_dsn = std::env::var("SENTRY_DSN").ok().filter(|dsn| !dsn.is_empty());

        Ok(Self {
            host,
            port,
            data_path,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
