//! Shopping cart state.
//!
//! - [`Cart`] / [`CartItem`] - the ordered, id-unique list of line items
//! - [`CartManager`] - the store object that validates, persists and
//!   publishes every mutation
//!
//! The cart is persisted as a JSON array under [`CART_STORAGE_KEY`].

mod manager;
mod snapshot;

pub use manager::{CartManager, CartOutcome, UpdateProductAmount};
pub use snapshot::CART_STORAGE_KEY;

use rocketshoes_core::{Price, Product, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A product in the cart with its requested quantity.
///
/// Serializes flat: `{"id":1,"title":"…","price":179.9,"image":"…","amount":2}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    /// Requested quantity, at least 1.
    pub amount: i32,
}

impl CartItem {
    /// Create a line item.
    #[must_use]
    pub const fn new(product: Product, amount: i32) -> Self {
        Self { product, amount }
    }

    /// Product identifier.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product.price.times(self.amount)
    }
}

/// A line item list that breaks the cart invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidCart {
    #[error("product {0} appears more than once")]
    DuplicateProduct(ProductId),

    #[error("product {product_id} has quantity {amount}, expected at least 1")]
    NonPositiveAmount { product_id: ProductId, amount: i32 },
}

/// Ordered cart contents, at most one line item per product.
///
/// Mutating helpers return a new `Cart` so callers can validate and persist
/// the result before it replaces the current state. Deserialization rejects
/// repeated products and quantities below 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<CartItem>", try_from = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Iterate over line items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, CartItem> {
        self.items.iter()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Line item for `id`, if present.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Whether `id` is in the cart.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|item| i64::from(item.amount)).sum()
    }

    /// Sum of all line subtotals.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// A copy with `item` appended, or `None` if its product is already present.
    #[must_use]
    pub fn with_item(&self, item: CartItem) -> Option<Self> {
        if self.contains(item.id()) {
            return None;
        }

        let mut items = self.items.clone();
        items.push(item);
        Some(Self { items })
    }

    /// A copy with the quantity for `id` set to `amount`, or `None` if the
    /// product is absent or already has that quantity.
    #[must_use]
    pub fn with_amount(&self, id: ProductId, amount: i32) -> Option<Self> {
        let position = self.items.iter().position(|item| item.id() == id)?;

        let mut items = self.items.clone();
        let item = items.get_mut(position)?;
        if item.amount == amount {
            return None;
        }
        item.amount = amount;

        Some(Self { items })
    }

    /// A copy without `id`, or `None` if it was not in the cart.
    #[must_use]
    pub fn without(&self, id: ProductId) -> Option<Self> {
        let items: Vec<CartItem> = self
            .items
            .iter()
            .filter(|item| item.id() != id)
            .cloned()
            .collect();

        (items.len() != self.items.len()).then_some(Self { items })
    }
}

impl TryFrom<Vec<CartItem>> for Cart {
    type Error = InvalidCart;

    fn try_from(items: Vec<CartItem>) -> Result<Self, Self::Error> {
        for (index, item) in items.iter().enumerate() {
            if item.amount < 1 {
                return Err(InvalidCart::NonPositiveAmount {
                    product_id: item.id(),
                    amount: item.amount,
                });
            }
            if items.iter().skip(index + 1).any(|other| other.id() == item.id()) {
                return Err(InvalidCart::DuplicateProduct(item.id()));
            }
        }
        Ok(Self { items })
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<CartItem> for Cart {
    fn from_iter<I: IntoIterator<Item = CartItem>>(iter: I) -> Self {
        let mut cart = Self::new();
        for item in iter {
            match cart.items.iter_mut().find(|existing| existing.id() == item.id()) {
                Some(existing) => {
                    existing.amount = existing.amount.saturating_add(item.amount);
                }
                None => cart.items.push(item),
            }
        }
        cart
    }
}
