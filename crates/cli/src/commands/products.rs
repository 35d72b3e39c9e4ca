//! Catalog browsing commands.

use rocketshoes_storefront::ApiClient;

use super::CommandError;

/// List every product with its price and current stock.
///
/// # Errors
///
/// Returns `CommandError::Api` if the catalog cannot be reached.
pub async fn list(api: &ApiClient) -> Result<(), CommandError> {
    let products = api.list_products().await?;

    if products.is_empty() {
        tracing::info!("Catalog is empty");
        return Ok(());
    }

    for product in &products {
        let stock = api.get_stock(product.id).await?;
        tracing::info!(
            "#{:<4} {:>10}  {:>3} in stock  {}",
            product.id,
            product.price.to_string(),
            stock.amount,
            product.title
        );
    }

    Ok(())
}
