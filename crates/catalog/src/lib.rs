//! RocketShoes Catalog - stock and product catalog API.
//!
//! Serves the read-only product and stock records the storefront cart
//! validates against. Data comes from a JSON seed document loaded at startup.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod data;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use config::CatalogConfig;
pub use data::{CatalogData, DataError};

/// Build the catalog application with request tracing.
pub fn app(data: CatalogData) -> Router {
    routes::routes()
        .with_state(Arc::new(data))
        .layer(TraceLayer::new_for_http())
}
