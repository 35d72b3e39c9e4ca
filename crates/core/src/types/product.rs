//! Catalog product and stock records.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product as served by the catalog API.
///
/// Only `id` matters to cart logic; the display fields are carried along
/// unchanged so the cart can render without another catalog round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Product image URL.
    pub image: String,
}

/// Purchasable stock for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stock {
    /// Product this record belongs to.
    pub id: ProductId,
    /// Maximum purchasable quantity.
    pub amount: i32,
}

impl Stock {
    /// Whether `quantity` units can be purchased.
    #[must_use]
    pub const fn covers(&self, quantity: i32) -> bool {
        quantity <= self.amount
    }
}
