//! HTTP route handlers for the catalog API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health          - Health check
//! GET  /products        - Product listing
//! GET  /products/{id}   - Product detail
//! GET  /stock/{id}      - Stock for a product
//! ```

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use rocketshoes_core::{Product, ProductId, Stock};
use tracing::instrument;

use crate::data::CatalogData;
use crate::error::{CatalogError, Result};

/// Shared, read-only catalog.
pub type CatalogState = Arc<CatalogData>;

/// Create the catalog API router.
pub fn routes() -> Router<CatalogState> {
    Router::new()
        .route("/health", get(health))
        .route("/products", get(list_products))
        .route("/products/{id}", get(show_product))
        .route("/stock/{id}", get(show_stock))
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List all products.
async fn list_products(State(data): State<CatalogState>) -> Json<Vec<Product>> {
    Json(data.products().to_vec())
}

/// Show a single product.
#[instrument(skip(data))]
async fn show_product(
    State(data): State<CatalogState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let id = parse_id(&id)?;
    data.product(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| CatalogError::NotFound(format!("product {id}")))
}

/// Show stock for a product.
#[instrument(skip(data))]
async fn show_stock(
    State(data): State<CatalogState>,
    Path(id): Path<String>,
) -> Result<Json<Stock>> {
    let id = parse_id(&id)?;
    data.stock(id)
        .map(Json)
        .ok_or_else(|| CatalogError::NotFound(format!("stock for product {id}")))
}

fn parse_id(raw: &str) -> Result<ProductId> {
    raw.parse()
        .map_err(|_| CatalogError::BadRequest(format!("invalid product id: {raw}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use rocketshoes_core::Price;
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        let data = CatalogData::new(
            vec![Product {
                id: ProductId::new(7),
                title: "Runner".to_string(),
                price: Price::from_cents(13990),
                image: "https://cdn.example.com/7.jpg".to_string(),
            }],
            vec![Stock {
                id: ProductId::new(7),
                amount: 3,
            }],
        )
        .unwrap();

        routes().with_state(Arc::new(data))
    }

    async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_stock() {
        let (status, json) = get("/stock/7").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!({ "id": 7, "amount": 3 }));
    }

    #[tokio::test]
    async fn test_product() {
        let (status, json) = get("/products/7").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["title"], "Runner");
        assert_eq!(json["price"], 139.9);
    }

    #[tokio::test]
    async fn test_product_listing() {
        let (status, json) = get("/products").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        assert_eq!(get("/stock/9").await.0, StatusCode::NOT_FOUND);
        assert_eq!(get("/products/9").await.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_id_is_bad_request() {
        let (status, json) = get("/stock/seven").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Bad request: invalid product id: seven");
    }
}
