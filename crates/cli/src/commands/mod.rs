//! Command implementations.

pub mod cart;
pub mod products;

use rocketshoes_storefront::{
    ApiClient, ApiError, CartError, CartManager, ConfigError, FileStorage, Notice,
    StorageError, StorefrontConfig, TracingNotifier,
};
use thiserror::Error;

/// Cart manager wired to the catalog API and the storage file.
pub type CliCart = CartManager<ApiClient, FileStorage, TracingNotifier>;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog API request failed.
    #[error("Catalog error: {0}")]
    Api(#[from] ApiError),

    /// Storage file could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Cart could not be loaded.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// The cart refused the operation.
    #[error("{0}")]
    Rejected(Notice),
}

/// Build the API client from configuration.
///
/// # Errors
///
/// Returns `CommandError::Api` if the client cannot be built.
pub fn api_client(config: &StorefrontConfig) -> Result<ApiClient, CommandError> {
    Ok(ApiClient::new(&config.api)?)
}

/// Open the cart stored at the configured path.
///
/// # Errors
///
/// Returns `CommandError` if the API client, storage file or stored cart
/// cannot be loaded.
pub fn open_cart(config: &StorefrontConfig) -> Result<CliCart, CommandError> {
    let api = api_client(config)?;
    let storage = FileStorage::open(&config.storage_path)?;
    tracing::debug!(path = %storage.path().display(), "Opened cart storage");

    Ok(CartManager::new(api, storage, TracingNotifier)?)
}
