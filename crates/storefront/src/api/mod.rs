//! Stock and product catalog API client.
//!
//! # Architecture
//!
//! - Plain REST over `reqwest`, one request per call, no retries
//! - The catalog API is the source of truth for stock; stock is never cached
//! - Product records are cached in-memory via `moka` (5 minute TTL by default)
//!
//! # Endpoints
//!
//! ```text
//! GET /stock/{id}     - { "id": 1, "amount": 3 }
//! GET /products       - [Product]
//! GET /products/{id}  - Product
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use rocketshoes_storefront::api::ApiClient;
//!
//! let client = ApiClient::new(&config.api)?;
//! let stock = client.get_stock(ProductId::new(1)).await?;
//! ```

mod cache;
mod client;

pub use client::ApiClient;

use std::future::Future;

use rocketshoes_core::{Product, ProductId, Stock};
use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configured token is not a valid header value.
    #[error("Invalid API token: {0}")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Source of stock and catalog data for the cart.
///
/// [`ApiClient`] is the production implementation; tests substitute an
/// in-memory catalog.
pub trait Catalog: Send + Sync {
    /// Fetch current stock for a product.
    fn stock(&self, id: ProductId) -> impl Future<Output = Result<Stock, ApiError>> + Send;

    /// Fetch a product's catalog record.
    fn product(&self, id: ProductId) -> impl Future<Output = Result<Product, ApiError>> + Send;
}

impl Catalog for ApiClient {
    async fn stock(&self, id: ProductId) -> Result<Stock, ApiError> {
        self.get_stock(id).await
    }

    async fn product(&self, id: ProductId) -> Result<Product, ApiError> {
        self.get_product(id).await
    }
}
