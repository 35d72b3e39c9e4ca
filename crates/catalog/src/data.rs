//! Catalog seed data: products and their stock.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rocketshoes_core::{Product, ProductId, Stock};
use serde::Deserialize;
use thiserror::Error;

/// Errors loading the seed document.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate {kind} record for product {id}")]
    Duplicate { kind: &'static str, id: ProductId },

    #[error("Negative stock for product {0}")]
    NegativeStock(ProductId),
}

/// On-disk document layout.
#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    stock: Vec<Stock>,
}

/// Immutable, indexed catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogData {
    products: Vec<Product>,
    product_index: HashMap<ProductId, usize>,
    stock: HashMap<ProductId, Stock>,
}

impl CatalogData {
    /// Load the catalog from a JSON document on disk.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the file cannot be read or fails validation.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let contents = std::fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Parse and validate a catalog document.
    ///
    /// # Errors
    ///
    /// Returns `DataError` on malformed JSON, duplicate ids or negative stock.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let document: Document = serde_json::from_str(json)?;
        Self::new(document.products, document.stock)
    }

    /// Build a catalog from records.
    ///
    /// Product order is preserved for listings.
    ///
    /// # Errors
    ///
    /// Returns `DataError` on duplicate ids or negative stock.
    pub fn new(products: Vec<Product>, stock: Vec<Stock>) -> Result<Self, DataError> {
        let mut product_index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if product_index.insert(product.id, position).is_some() {
                return Err(DataError::Duplicate {
                    kind: "product",
                    id: product.id,
                });
            }
        }

        let mut stock_index = HashMap::with_capacity(stock.len());
        for record in stock {
            if record.amount < 0 {
                return Err(DataError::NegativeStock(record.id));
            }
            if stock_index.insert(record.id, record).is_some() {
                return Err(DataError::Duplicate {
                    kind: "stock",
                    id: record.id,
                });
            }
        }

        Ok(Self {
            products,
            product_index,
            stock: stock_index,
        })
    }

    /// All products in document order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// A single product.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.product_index
            .get(&id)
            .and_then(|&position| self.products.get(position))
    }

    /// Stock for a product.
    #[must_use]
    pub fn stock(&self, id: ProductId) -> Option<Stock> {
        self.stock.get(&id).copied()
    }
}
