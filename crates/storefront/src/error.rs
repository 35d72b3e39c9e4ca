//! Cart error handling with Sentry integration.
//!
//! Cart operations work with `CartError` internally and translate it into a
//! [`Notice`] at the operation boundary. Unexpected failures are captured to
//! Sentry before they are swallowed.

use rocketshoes_core::ProductId;
use thiserror::Error;

use crate::api::ApiError;
use crate::notify::Notice;
use crate::storage::StorageError;

/// Errors raised while validating or applying a cart mutation.
#[derive(Debug, Error)]
pub enum CartError {
    /// Stock or catalog lookup failed.
    #[error("Catalog error: {0}")]
    Api(#[from] ApiError),

    /// Durable storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The persisted cart snapshot could not be decoded or encoded.
    #[error("Cart snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Requested quantity exceeds available stock.
    #[error("Product {product_id} out of stock: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: i32,
        available: i32,
    },

    /// Product is not in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),
}

impl CartError {
    /// Whether this is an infrastructure failure rather than a rejected request.
    #[must_use]
    pub const fn is_unexpected(&self) -> bool {
        matches!(self, Self::Api(_) | Self::Storage(_) | Self::Snapshot(_))
    }

    /// The notice shown for this error, with `fallback` covering failures
    /// that have no dedicated message.
    #[must_use]
    pub const fn notice(&self, fallback: Notice) -> Notice {
        match self {
            Self::OutOfStock { .. } => Notice::OutOfStock,
            Self::NotInCart(_) => Notice::RemoveFailed,
            Self::Api(_) | Self::Storage(_) | Self::Snapshot(_) => fallback,
        }
    }

    /// Log the error, capturing unexpected failures to Sentry.
    pub fn report(&self) {
        if self.is_unexpected() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Cart operation failed"
            );
        } else {
            tracing::info!(error = %self, "Cart operation rejected");
        }
    }
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;

/// Add a breadcrumb for cart actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of cart
/// actions leading up to an error.
pub fn add_breadcrumb(message: &str, product_id: ProductId) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some("cart".to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    breadcrumb.data.insert(
        "product_id".to_string(),
        serde_json::Value::from(product_id.as_i32()),
    );

    sentry::add_breadcrumb(breadcrumb);
}
