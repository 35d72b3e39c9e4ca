//! Integration tests for RocketShoes.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rocketshoes-integration-tests
//! ```
//!
//! Each test starts its own catalog server on an ephemeral port, so tests
//! need no external services and can run in parallel.

use std::net::SocketAddr;
use std::path::PathBuf;

use rocketshoes_catalog::CatalogData;
use rocketshoes_core::{Price, Product, ProductId, Stock};
use rocketshoes_storefront::{
    ApiClient, ApiConfig, CartManager, ChannelNotifier, FileStorage, Notice,
};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// Cart manager wired the way front ends wire it, with notices captured.
pub type TestCart = CartManager<ApiClient, FileStorage, ChannelNotifier>;

/// A running catalog server plus a scratch directory for cart storage.
pub struct TestContext {
    pub addr: SocketAddr,
    pub api: ApiClient,
    dir: tempfile::TempDir,
}

impl TestContext {
    /// Start a catalog server seeded with `products` as `(id, cents, stock)`.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn start(products: &[(i32, i64, i32)]) -> Self {
        let (catalog, stock): (Vec<Product>, Vec<Stock>) = products
            .iter()
            .map(|&(id, cents, amount)| {
                (
                    Product {
                        id: ProductId::new(id),
                        title: format!("Shoe {id}"),
                        price: Price::from_cents(cents),
                        image: format!("https://cdn.example.com/{id}.jpg"),
                    },
                    Stock {
                        id: ProductId::new(id),
                        amount,
                    },
                )
            })
            .unzip();

        let data = CatalogData::new(catalog, stock).expect("valid catalog");
        Self::start_with(data).await
    }

    /// Start a catalog server serving `data`.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn start_with(data: CatalogData) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            axum::serve(listener, rocketshoes_catalog::app(data))
                .await
                .expect("catalog server");
        });

        let config = ApiConfig::new(&format!("http://{addr}")).expect("valid url");
        let api = ApiClient::new(&config).expect("api client");

        Self {
            addr,
            api,
            dir: tempfile::tempdir().expect("tempdir"),
        }
    }

    /// Path of the cart storage file for this test.
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        self.dir.path().join("storage.json")
    }

    /// Open (or reopen, simulating a restart) the cart.
    ///
    /// # Panics
    ///
    /// Panics if the storage file or stored cart cannot be loaded.
    #[must_use]
    pub fn open_cart(&self) -> (TestCart, mpsc::UnboundedReceiver<Notice>) {
        let storage = FileStorage::open(self.storage_path()).expect("storage");
        let (notifier, rx) = ChannelNotifier::new();
        let cart = CartManager::new(self.api.clone(), storage, notifier).expect("cart");
        (cart, rx)
    }
}
