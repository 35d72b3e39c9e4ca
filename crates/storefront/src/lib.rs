//! RocketShoes Storefront - client-side cart state management.
//!
//! # Architecture
//!
//! - [`cart::CartManager`] owns the cart and is handed explicitly to every
//!   front end that needs it (no global state)
//! - Every mutation is validated against live stock from the catalog API,
//!   persisted to durable storage, then published to subscribers
//! - Shopper-facing conditions go to an injected [`notify::Notifier`]
//!
//! # Example
//!
//! ```rust,ignore
//! use rocketshoes_storefront::{ApiClient, CartManager, FileStorage, TracingNotifier};
//!
//! let config = StorefrontConfig::from_env()?;
//! let api = ApiClient::new(&config.api)?;
//! let storage = FileStorage::open(&config.storage_path)?;
//! let cart = CartManager::new(api, storage, TracingNotifier)?;
//!
//! cart.add_product(ProductId::new(1)).await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod config;
pub mod error;
pub mod notify;
pub mod storage;

pub use api::{ApiClient, ApiError, Catalog};
pub use cart::{
    CART_STORAGE_KEY, Cart, CartItem, CartManager, CartOutcome, InvalidCart, UpdateProductAmount,
};
pub use config::{ApiConfig, ConfigError, StorefrontConfig};
pub use error::CartError;
pub use notify::{ChannelNotifier, Notice, Notifier, TracingNotifier};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
