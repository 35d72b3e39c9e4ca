//! REST client implementation for the catalog API.

use std::sync::Arc;

use moka::future::Cache;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use rocketshoes_core::{Product, ProductId, Stock};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::ApiError;
use super::cache::{CacheKey, CacheValue};
use crate::config::ApiConfig;

/// Longest slice of a response body kept in logs and errors.
const BODY_PREVIEW_CHARS: usize = 200;

/// Client for the stock and product catalog API.
///
/// Cheap to clone; clones share the HTTP connection pool and product cache.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Option<Cache<CacheKey, CacheValue>>,
}

impl ApiClient {
    /// Create a new catalog API client.
    ///
    /// # Errors
    ///
    /// Returns error if the token is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();

        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        // A zero TTL disables caching entirely
        let cache = (!config.product_cache_ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(1000)
                .time_to_live(config.product_cache_ttl)
                .build()
        });

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.base_url.clone(),
                cache,
            }),
        })
    }

    /// Base URL all endpoints are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Fetch current stock for a product. Never cached.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the catalog has no stock record for
    /// the product, or another `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn get_stock(&self, id: ProductId) -> Result<Stock, ApiError> {
        self.get_json(&format!("stock/{id}")).await
    }

    /// Fetch a product's catalog record.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the product does not exist, or another
    /// `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        let key = CacheKey::Product(id);

        if let Some(CacheValue::Product(product)) = self.cache_get(&key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product: Product = self.get_json(&format!("products/{id}")).await?;
        self.cache_insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// List every product in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        if let Some(CacheValue::Products(products)) = self.cache_get(&CacheKey::Products).await {
            debug!("Cache hit for product listing");
            return Ok(products);
        }

        let products: Vec<Product> = self.get_json("products").await?;

        for product in &products {
            self.cache_insert(
                CacheKey::Product(product.id),
                CacheValue::Product(Box::new(product.clone())),
            )
            .await;
        }
        self.cache_insert(CacheKey::Products, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// GET `path` relative to the base URL and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.inner.base_url.join(path)?;

        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_string()));
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %preview(&body),
                "Catalog API returned non-success status"
            );
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: preview(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %preview(&body),
                "Failed to parse catalog API response"
            );
            ApiError::Parse(e)
        })
    }

    async fn cache_get(&self, key: &CacheKey) -> Option<CacheValue> {
        match &self.inner.cache {
            Some(cache) => cache.get(key).await,
            None => None,
        }
    }

    async fn cache_insert(&self, key: CacheKey, value: CacheValue) {
        if let Some(cache) = &self.inner.cache {
            cache.insert(key, value).await;
        }
    }
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}
