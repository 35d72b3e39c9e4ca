//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! rs-cli cart show
//! rs-cli cart add 3
//! rs-cli cart update 3 2
//! rs-cli cart remove 3
//! ```

use rocketshoes_core::ProductId;
use rocketshoes_storefront::{Cart, CartOutcome, UpdateProductAmount};

use super::{CliCart, CommandError};

/// Print the cart contents and totals.
pub fn show(cart: &Cart) {
    if cart.is_empty() {
        tracing::info!("Cart is empty");
        return;
    }

    for item in cart {
        tracing::info!(
            "#{:<4} {:>3} x {:>10} = {:>10}  {}",
            item.id(),
            item.amount,
            item.product.price.to_string(),
            item.subtotal().to_string(),
            item.product.title
        );
    }

    tracing::info!(
        "{} products, {} items, total {}",
        cart.len(),
        cart.total_quantity(),
        cart.total()
    );
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns `CommandError::Rejected` if the cart refused the change.
pub async fn add(manager: &CliCart, product_id: ProductId) -> Result<(), CommandError> {
    let outcome = manager.add_product(product_id).await;
    report(manager, outcome)
}

/// Remove a product.
///
/// # Errors
///
/// Returns `CommandError::Rejected` if the product is not in the cart.
pub fn remove(manager: &CliCart, product_id: ProductId) -> Result<(), CommandError> {
    let outcome = manager.remove_product(product_id);
    report(manager, outcome)
}

/// Empty the cart.
///
/// # Errors
///
/// Returns `CommandError::Rejected` if storage could not be cleared.
pub fn clear(manager: &CliCart) -> Result<(), CommandError> {
    let outcome = manager.clear();
    report(manager, outcome)
}

/// Set a product's quantity.
///
/// # Errors
///
/// Returns `CommandError::Rejected` if the cart refused the change.
pub async fn update(
    manager: &CliCart,
    product_id: ProductId,
    amount: i32,
) -> Result<(), CommandError> {
    let outcome = manager
        .update_product_amount(UpdateProductAmount { product_id, amount })
        .await;
    report(manager, outcome)
}

fn report(manager: &CliCart, outcome: CartOutcome) -> Result<(), CommandError> {
    match outcome {
        CartOutcome::Applied => {
            show(&manager.cart());
            Ok(())
        }
        CartOutcome::Unchanged => {
            tracing::info!("Cart unchanged");
            Ok(())
        }
        CartOutcome::Rejected(notice) => Err(CommandError::Rejected(notice)),
    }
}
