//! Persisted cart snapshot.

use crate::error::Result;
use crate::storage::Storage;

use super::Cart;

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Read the persisted cart. A missing or blank entry is an empty cart.
///
/// A cart with repeated products or quantities below 1 is rejected as a
/// snapshot error.
pub(super) fn load<S: Storage + ?Sized>(storage: &S) -> Result<Cart> {
    match storage.get_item(CART_STORAGE_KEY)? {
        Some(json) if !json.trim().is_empty() => Ok(serde_json::from_str(&json)?),
        _ => Ok(Cart::new()),
    }
}

/// Drop the persisted cart entirely.
pub(super) fn clear<S: Storage + ?Sized>(storage: &S) -> Result<()> {
    storage.remove_item(CART_STORAGE_KEY)?;
    Ok(())
}

/// Overwrite the persisted cart.
pub(super) fn save<S: Storage + ?Sized>(storage: &S, cart: &Cart) -> Result<()> {
    let json = serde_json::to_string(cart)?;
    storage.set_item(CART_STORAGE_KEY, &json)?;
    Ok(())
}
