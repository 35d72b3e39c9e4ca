//! HTTP error responses for the catalog API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Catalog API error type.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        tracing::debug!(error = %self, status = %status, "Request rejected");

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// Result type alias for `CatalogError`.
pub type Result<T> = std::result::Result<T, CatalogError>;
