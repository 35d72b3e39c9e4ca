//! Cart store: validated, persisted, observable cart mutations.

use rocketshoes_core::ProductId;
use tokio::sync::watch;
use tracing::{debug, info, instrument};

use super::{Cart, CartItem, snapshot};
use crate::api::Catalog;
use crate::error::{CartError, Result, add_breadcrumb};
use crate::notify::{Notice, Notifier};
use crate::storage::Storage;

/// Arguments for [`CartManager::update_product_amount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i32,
}

/// What a cart operation did.
///
/// Every rejection has already been delivered to the [`Notifier`]; the
/// outcome lets programmatic callers tell results apart without reading
/// notice text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOutcome {
    /// The cart changed and was persisted.
    Applied,
    /// Nothing to do; the cart is untouched and nothing was shown.
    Unchanged,
    /// The operation was refused or failed; the cart is untouched.
    Rejected(Notice),
}

impl CartOutcome {
    /// Whether the cart changed.
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }

    /// The notice raised, if any.
    #[must_use]
    pub const fn notice(self) -> Option<Notice> {
        match self {
            Self::Rejected(notice) => Some(notice),
            Self::Applied | Self::Unchanged => None,
        }
    }
}

/// Owns the cart and mediates every change to it.
///
/// Each mutation is validated against live stock, written to storage, and
/// only then published to subscribers. A failure at any step leaves both
/// memory and storage as they were.
///
/// Stock lookups run outside any lock. The final apply step re-reads the
/// latest cart under the state lock, so overlapping operations on the same
/// product compose instead of overwriting each other.
pub struct CartManager<C, S, N> {
    catalog: C,
    storage: S,
    notifier: N,
    state: watch::Sender<Cart>,
}

impl<C, S, N> CartManager<C, S, N>
where
    C: Catalog,
    S: Storage,
    N: Notifier,
{
    /// Create a manager, rehydrating the cart from `storage`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if storage cannot be read, or
    /// `CartError::Snapshot` if the persisted cart is not valid JSON or repeats
    /// a product or holds a quantity below 1.
    pub fn new(catalog: C, storage: S, notifier: N) -> Result<Self> {
        let cart = snapshot::load(&storage)?;
        info!(items = cart.len(), "Cart loaded from storage");

        let (state, _) = watch::channel(cart);

        Ok(Self {
            catalog,
            storage,
            notifier,
            state,
        })
    }

    /// Snapshot of the current cart.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.state.borrow().clone()
    }

    /// Receiver that observes every published cart.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.subscribe()
    }

    /// The stock and catalog source.
    #[must_use]
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Add one unit of a product, appending it if new.
    #[instrument(skip(self))]
    pub async fn add_product(&self, product_id: ProductId) -> CartOutcome {
        add_breadcrumb("Add product", product_id);
        let result = self.try_add_product(product_id).await;
        self.finish(result, Notice::AddFailed)
    }

    /// Remove a product's line item.
    #[instrument(skip(self))]
    pub fn remove_product(&self, product_id: ProductId) -> CartOutcome {
        add_breadcrumb("Remove product", product_id);
        let result = self.commit(|cart| {
            cart.without(product_id)
                .map(Some)
                .ok_or(CartError::NotInCart(product_id))
        });
        self.finish(result, Notice::RemoveFailed)
    }

    /// Empty the cart and drop its storage entry.
    #[instrument(skip(self))]
    pub fn clear(&self) -> CartOutcome {
        let mut result = Ok(CartOutcome::Unchanged);

        self.state.send_if_modified(|current| {
            if current.is_empty() {
                return false;
            }
            if let Err(err) = snapshot::clear(&self.storage) {
                result = Err(err);
                return false;
            }
            *current = Cart::new();
            result = Ok(CartOutcome::Applied);
            true
        });

        self.finish(result, Notice::RemoveFailed)
    }

    /// Set a product's quantity. Amounts below 1 are ignored.
    #[instrument(skip(self))]
    pub async fn update_product_amount(&self, update: UpdateProductAmount) -> CartOutcome {
        if update.amount < 1 {
            debug!("Ignoring non-positive amount");
            return CartOutcome::Unchanged;
        }

        add_breadcrumb("Update product amount", update.product_id);
        let result = self.try_update_product_amount(update).await;
        self.finish(result, Notice::UpdateFailed)
    }

    async fn try_add_product(&self, product_id: ProductId) -> Result<CartOutcome> {
        let stock = self.catalog.stock(product_id).await?;

        // Reuse the catalog record already in the cart when there is one
        let known = self
            .state
            .borrow()
            .get(product_id)
            .map(|item| item.product.clone());

        let product = match known {
            Some(product) => product,
            None => {
                if !stock.covers(1) {
                    return Err(CartError::OutOfStock {
                        product_id,
                        requested: 1,
                        available: stock.amount,
                    });
                }
                self.catalog.product(product_id).await?
            }
        };

        self.commit(move |cart| {
            let requested = match cart.get(product_id) {
                Some(item) => item.amount.checked_add(1).ok_or(CartError::OutOfStock {
                    product_id,
                    requested: item.amount,
                    available: stock.amount,
                })?,
                None => 1,
            };

            if !stock.covers(requested) {
                return Err(CartError::OutOfStock {
                    product_id,
                    requested,
                    available: stock.amount,
                });
            }

            let next = if cart.contains(product_id) {
                cart.with_amount(product_id, requested)
            } else {
                cart.with_item(CartItem::new(product, requested))
            };
            Ok(next)
        })
    }

    async fn try_update_product_amount(&self, update: UpdateProductAmount) -> Result<CartOutcome> {
        let UpdateProductAmount { product_id, amount } = update;
        let stock = self.catalog.stock(product_id).await?;

        if !stock.covers(amount) {
            return Err(CartError::OutOfStock {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        self.commit(|cart| Ok(cart.with_amount(product_id, amount)))
    }

    /// Compute the next cart from the latest state, persist it, then publish.
    ///
    /// `mutate` returns `Ok(None)` when there is nothing to change. Nothing
    /// is published unless the write to storage succeeded.
    fn commit(&self, mutate: impl FnOnce(&Cart) -> Result<Option<Cart>>) -> Result<CartOutcome> {
        let mut result = Ok(CartOutcome::Unchanged);

        self.state.send_if_modified(|current| {
            let next = match mutate(current) {
                Ok(Some(next)) => next,
                Ok(None) => return false,
                Err(err) => {
                    result = Err(err);
                    return false;
                }
            };

            if let Err(err) = snapshot::save(&self.storage, &next) {
                result = Err(err);
                return false;
            }

            *current = next;
            result = Ok(CartOutcome::Applied);
            true
        });

        result
    }

    /// Translate an internal result into an outcome, notifying on failure.
    fn finish(&self, result: Result<CartOutcome>, fallback: Notice) -> CartOutcome {
        match result {
            Ok(outcome) => {
                debug!(?outcome, "Cart operation finished");
                outcome
            }
            Err(err) => {
                err.report();
                let notice = err.notice(fallback);
                self.notifier.notify(notice);
                CartOutcome::Rejected(notice)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use rocketshoes_core::{Product, Stock};
    use tokio::sync::mpsc;

    use super::*;
    use crate::api::ApiError;
    use crate::cart::CART_STORAGE_KEY;
    use crate::cart::tests::{item, product};
    use crate::notify::ChannelNotifier;
    use crate::storage::{MemoryStorage, StorageError};

    /// In-memory catalog with switchable failure.
    #[derive(Default)]
    struct StaticCatalog {
        stock: HashMap<ProductId, i32>,
        products: HashMap<ProductId, Product>,
        offline: AtomicBool,
        product_calls: AtomicUsize,
    }

    impl StaticCatalog {
        fn with(entries: &[(i32, i32)]) -> Self {
            let mut catalog = Self::default();
            for &(id, amount) in entries {
                catalog.stock.insert(ProductId::new(id), amount);
                catalog
                    .products
                    .insert(ProductId::new(id), product(id, 10_000));
            }
            catalog
        }

        fn go_offline(&self) {
            self.offline.store(true, Ordering::SeqCst);
        }

        fn check_online(&self) -> std::result::Result<(), ApiError> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(ApiError::Api {
                    status: 503,
                    message: "offline".to_string(),
                });
            }
            Ok(())
        }
    }

    impl Catalog for StaticCatalog {
        async fn stock(&self, id: ProductId) -> std::result::Result<Stock, ApiError> {
            self.check_online()?;
            self.stock
                .get(&id)
                .map(|&amount| Stock { id, amount })
                .ok_or_else(|| ApiError::NotFound(format!("stock/{id}")))
        }

        async fn product(&self, id: ProductId) -> std::result::Result<Product, ApiError> {
            self.check_online()?;
            self.product_calls.fetch_add(1, Ordering::SeqCst);
            self.products
                .get(&id)
                .cloned()
                .ok_or_else(|| ApiError::NotFound(format!("products/{id}")))
        }
    }

    /// Storage whose writes always fail.
    struct ReadOnlyStorage(MemoryStorage);

    impl Storage for ReadOnlyStorage {
        fn get_item(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
            self.0.get_item(key)
        }

        fn set_item(&self, _key: &str, _value: &str) -> std::result::Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }

        fn remove_item(&self, _key: &str) -> std::result::Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }
    }

    type TestManager<S = Arc<MemoryStorage>> = CartManager<StaticCatalog, S, ChannelNotifier>;

    fn seeded_storage(items: Vec<CartItem>) -> Arc<MemoryStorage> {
        let storage = Arc::new(MemoryStorage::new());
        let cart: Cart = items.into_iter().collect();
        storage
            .set_item(CART_STORAGE_KEY, &serde_json::to_string(&cart).unwrap())
            .unwrap();
        storage
    }

    fn manager(
        catalog: StaticCatalog,
        items: Vec<CartItem>,
    ) -> (TestManager, Arc<MemoryStorage>, mpsc::UnboundedReceiver<Notice>) {
        let storage = seeded_storage(items);
        let (notifier, rx) = ChannelNotifier::new();
        let manager = CartManager::new(catalog, Arc::clone(&storage), notifier).unwrap();
        (manager, storage, rx)
    }

    fn persisted(storage: &MemoryStorage) -> Cart {
        serde_json::from_str(&storage.get_item(CART_STORAGE_KEY).unwrap().unwrap()).unwrap()
    }

    fn amount_of(cart: &Cart, id: i32) -> Option<i32> {
        cart.get(ProductId::new(id)).map(|item| item.amount)
    }

    // =========================================================================
    // add_product
    // =========================================================================

    #[tokio::test]
    async fn test_add_new_product_to_empty_cart() {
        let (manager, storage, mut rx) = manager(StaticCatalog::with(&[(7, 3)]), vec![]);

        let outcome = manager.add_product(ProductId::new(7)).await;

        assert_eq!(outcome, CartOutcome::Applied);
        let cart = manager.cart();
        assert_eq!(cart.len(), 1);
        assert_eq!(amount_of(&cart, 7), Some(1));
        assert_eq!(cart.get(ProductId::new(7)).unwrap().product.title, "Shoe 7");
        assert_eq!(persisted(&storage), cart);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_add_existing_product_increments() {
        let (manager, storage, mut rx) =
            manager(StaticCatalog::with(&[(1, 5), (7, 3)]), vec![item(1, 1), item(7, 2)]);

        let outcome = manager.add_product(ProductId::new(7)).await;

        assert_eq!(outcome, CartOutcome::Applied);
        let cart = manager.cart();
        assert_eq!(cart.len(), 2);
        assert_eq!(amount_of(&cart, 7), Some(3));
        assert_eq!(amount_of(&cart, 1), Some(1));
        assert_eq!(persisted(&storage), cart);
        assert_eq!(manager.catalog().product_calls.load(Ordering::SeqCst), 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_add_at_capacity_is_out_of_stock() {
        let (manager, storage, mut rx) = manager(StaticCatalog::with(&[(7, 3)]), vec![item(7, 3)]);
        let before = manager.cart();

        let outcome = manager.add_product(ProductId::new(7)).await;

        assert_eq!(outcome, CartOutcome::Rejected(Notice::OutOfStock));
        assert_eq!(manager.cart(), before);
        assert_eq!(persisted(&storage), before);
        assert_eq!(rx.try_recv().unwrap(), Notice::OutOfStock);
    }

    #[tokio::test]
    async fn test_add_new_product_without_stock_is_out_of_stock() {
        let (manager, _storage, mut rx) = manager(StaticCatalog::with(&[(4, 0)]), vec![]);

        let outcome = manager.add_product(ProductId::new(4)).await;

        assert_eq!(outcome.notice(), Some(Notice::OutOfStock));
        assert!(manager.cart().is_empty());
        assert_eq!(rx.try_recv().unwrap(), Notice::OutOfStock);
        assert_eq!(manager.catalog().product_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_add_unknown_product_fails() {
        let (manager, _storage, mut rx) = manager(StaticCatalog::with(&[]), vec![item(1, 1)]);
        let before = manager.cart();

        let outcome = manager.add_product(ProductId::new(99)).await;

        assert_eq!(outcome, CartOutcome::Rejected(Notice::AddFailed));
        assert_eq!(manager.cart(), before);
        assert_eq!(rx.try_recv().unwrap(), Notice::AddFailed);
    }

    #[tokio::test]
    async fn test_add_while_offline_fails() {
        let catalog = StaticCatalog::with(&[(7, 3)]);
        catalog.go_offline();
        let (manager, _storage, mut rx) = manager(catalog, vec![]);

        let outcome = manager.add_product(ProductId::new(7)).await;

        assert_eq!(outcome, CartOutcome::Rejected(Notice::AddFailed));
        assert!(manager.cart().is_empty());
        assert_eq!(rx.try_recv().unwrap(), Notice::AddFailed);
    }

    #[tokio::test]
    async fn test_add_storage_failure_leaves_state_unchanged() {
        let backing = MemoryStorage::new();
        let (notifier, mut rx) = ChannelNotifier::new();
        let manager: TestManager<ReadOnlyStorage> = CartManager::new(
            StaticCatalog::with(&[(7, 3)]),
            ReadOnlyStorage(backing),
            notifier,
        )
        .unwrap();
        let mut updates = manager.subscribe();

        let outcome = manager.add_product(ProductId::new(7)).await;

        assert_eq!(outcome, CartOutcome::Rejected(Notice::AddFailed));
        assert!(manager.cart().is_empty());
        assert!(!updates.has_changed().unwrap());
        assert_eq!(rx.try_recv().unwrap(), Notice::AddFailed);
    }

    #[tokio::test]
    async fn test_concurrent_adds_both_apply() {
        let (manager, storage, _rx) = manager(StaticCatalog::with(&[(7, 5)]), vec![item(7, 1)]);

        let (first, second) = tokio::join!(
            manager.add_product(ProductId::new(7)),
            manager.add_product(ProductId::new(7)),
        );

        assert!(first.is_applied());
        assert!(second.is_applied());
        assert_eq!(amount_of(&manager.cart(), 7), Some(3));
        assert_eq!(persisted(&storage), manager.cart());
    }

    #[tokio::test]
    async fn test_concurrent_adds_respect_stock() {
        let (manager, _storage, mut rx) =
            manager(StaticCatalog::with(&[(7, 2)]), vec![item(7, 1)]);

        let (first, second) = tokio::join!(
            manager.add_product(ProductId::new(7)),
            manager.add_product(ProductId::new(7)),
        );

        let applied = [first, second].iter().filter(|o| o.is_applied()).count();
        assert_eq!(applied, 1);
        assert_eq!(amount_of(&manager.cart(), 7), Some(2));
        assert_eq!(rx.try_recv().unwrap(), Notice::OutOfStock);
    }

    // =========================================================================
    // remove_product
    // =========================================================================

    #[tokio::test]
    async fn test_remove_present_product() {
        let (manager, storage, mut rx) =
            manager(StaticCatalog::with(&[]), vec![item(5, 2), item(6, 1)]);

        let outcome = manager.remove_product(ProductId::new(5));

        assert_eq!(outcome, CartOutcome::Applied);
        let cart = manager.cart();
        assert_eq!(cart.len(), 1);
        assert!(!cart.contains(ProductId::new(5)));
        assert_eq!(persisted(&storage), cart);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_remove_absent_product_fails() {
        let (manager, storage, mut rx) = manager(StaticCatalog::with(&[]), vec![item(5, 2)]);
        let before = manager.cart();

        let outcome = manager.remove_product(ProductId::new(9));

        assert_eq!(outcome, CartOutcome::Rejected(Notice::RemoveFailed));
        assert_eq!(manager.cart(), before);
        assert_eq!(persisted(&storage), before);
        assert_eq!(rx.try_recv().unwrap(), Notice::RemoveFailed);
    }

    // =========================================================================
    // update_product_amount
    // =========================================================================

    #[tokio::test]
    async fn test_update_below_one_is_silent_noop() {
        let catalog = StaticCatalog::with(&[(5, 10)]);
        // Offline proves no stock lookup happens
        catalog.go_offline();
        let (manager, _storage, mut rx) = manager(catalog, vec![item(5, 2)]);
        let before = manager.cart();

        for amount in [0, -3] {
            let outcome = manager
                .update_product_amount(UpdateProductAmount {
                    product_id: ProductId::new(5),
                    amount,
                })
                .await;
            assert_eq!(outcome, CartOutcome::Unchanged);
        }

        assert_eq!(manager.cart(), before);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_update_within_stock_sets_amount() {
        let (manager, storage, mut rx) = manager(StaticCatalog::with(&[(5, 10)]), vec![item(5, 2)]);

        let outcome = manager
            .update_product_amount(UpdateProductAmount {
                product_id: ProductId::new(5),
                amount: 10,
            })
            .await;

        assert_eq!(outcome, CartOutcome::Applied);
        assert_eq!(amount_of(&manager.cart(), 5), Some(10));
        assert_eq!(persisted(&storage), manager.cart());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_update_beyond_stock_is_out_of_stock() {
        let (manager, _storage, mut rx) = manager(StaticCatalog::with(&[(5, 10)]), vec![item(5, 2)]);

        let outcome = manager
            .update_product_amount(UpdateProductAmount {
                product_id: ProductId::new(5),
                amount: 11,
            })
            .await;

        assert_eq!(outcome, CartOutcome::Rejected(Notice::OutOfStock));
        assert_eq!(amount_of(&manager.cart(), 5), Some(2));
        assert_eq!(rx.try_recv().unwrap(), Notice::OutOfStock);
    }

    #[tokio::test]
    async fn test_update_absent_product_is_noop() {
        let (manager, _storage, mut rx) = manager(StaticCatalog::with(&[(8, 10)]), vec![item(5, 2)]);
        let before = manager.cart();

        let outcome = manager
            .update_product_amount(UpdateProductAmount {
                product_id: ProductId::new(8),
                amount: 3,
            })
            .await;

        assert_eq!(outcome, CartOutcome::Unchanged);
        assert_eq!(manager.cart(), before);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_update_lookup_failure() {
        let (manager, _storage, mut rx) = manager(StaticCatalog::with(&[]), vec![item(5, 2)]);

        let outcome = manager
            .update_product_amount(UpdateProductAmount {
                product_id: ProductId::new(5),
                amount: 3,
            })
            .await;

        assert_eq!(outcome, CartOutcome::Rejected(Notice::UpdateFailed));
        assert_eq!(amount_of(&manager.cart(), 5), Some(2));
        assert_eq!(rx.try_recv().unwrap(), Notice::UpdateFailed);
    }

    // =========================================================================
    // State publication and persistence
    // =========================================================================

    #[tokio::test]
    async fn test_subscribers_observe_changes() {
        let (manager, _storage, _rx) = manager(StaticCatalog::with(&[(7, 3)]), vec![]);
        let mut updates = manager.subscribe();

        manager.add_product(ProductId::new(7)).await;

        assert!(updates.has_changed().unwrap());
        assert_eq!(amount_of(&updates.borrow_and_update(), 7), Some(1));

        manager.remove_product(ProductId::new(9));
        assert!(!updates.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_rehydrate_after_restart() {
        let catalog = StaticCatalog::with(&[(1, 5), (2, 5), (3, 5)]);
        let (manager, storage, _rx) = manager(catalog, vec![]);

        for id in [3, 1, 2, 1] {
            manager.add_product(ProductId::new(id)).await;
        }
        let before = manager.cart();
        drop(manager);

        let (notifier, _rx) = ChannelNotifier::new();
        let restarted: TestManager =
            CartManager::new(StaticCatalog::default(), storage, notifier).unwrap();

        assert_eq!(restarted.cart(), before);
        let ids: Vec<i32> = restarted.cart().iter().map(|i| i.id().as_i32()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_new_rejects_corrupt_snapshot() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(CART_STORAGE_KEY, "not json").unwrap();
        let (notifier, _rx) = ChannelNotifier::new();

        let result: Result<TestManager> = CartManager::new(StaticCatalog::default(), storage, notifier);
        assert!(matches!(result, Err(CartError::Snapshot(_))));
    }

    #[test]
    fn test_new_rejects_repeated_product_in_snapshot() {
        let storage = Arc::new(MemoryStorage::new());
        let json = serde_json::to_string(&[item(1, 1), item(1, 0)]).unwrap();
        storage.set_item(CART_STORAGE_KEY, &json).unwrap();
        let (notifier, _rx) = ChannelNotifier::new();

        let result: Result<TestManager> = CartManager::new(StaticCatalog::default(), storage, notifier);
        assert!(matches!(result, Err(CartError::Snapshot(_))));
    }

    #[tokio::test]
    async fn test_add_at_max_quantity_is_out_of_stock() {
        let catalog = StaticCatalog::with(&[(1, i32::MAX)]);
        let (manager, storage, mut rx) = manager(catalog, vec![item(1, i32::MAX)]);

        let outcome = manager.add_product(ProductId::new(1)).await;

        assert_eq!(outcome, CartOutcome::Rejected(Notice::OutOfStock));
        assert_eq!(amount_of(&manager.cart(), 1), Some(i32::MAX));
        assert_eq!(amount_of(&persisted(&storage), 1), Some(i32::MAX));
        assert_eq!(rx.try_recv().ok(), Some(Notice::OutOfStock));
    }

    // =========================================================================
    // clear
    // =========================================================================

    #[test]
    fn test_clear_empties_cart_and_storage() {
        let catalog = StaticCatalog::default();
        let (manager, storage, mut rx) = manager(catalog, vec![item(1, 2), item(2, 1)]);
        let mut updates = manager.subscribe();

        assert_eq!(manager.clear(), CartOutcome::Applied);
        assert!(manager.cart().is_empty());
        assert_eq!(storage.get_item(CART_STORAGE_KEY).unwrap(), None);
        assert!(updates.has_changed().unwrap());

        updates.mark_unchanged();
        assert_eq!(manager.clear(), CartOutcome::Unchanged);
        assert!(!updates.has_changed().unwrap());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_clear_storage_failure_keeps_items() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                CART_STORAGE_KEY,
                &serde_json::to_string(&[item(1, 2)]).unwrap(),
            )
            .unwrap();
        let (notifier, mut rx) = ChannelNotifier::new();
        let manager: TestManager<ReadOnlyStorage> =
            CartManager::new(StaticCatalog::default(), ReadOnlyStorage(storage), notifier).unwrap();

        assert_eq!(
            manager.clear(),
            CartOutcome::Rejected(Notice::RemoveFailed)
        );
        assert_eq!(amount_of(&manager.cart(), 1), Some(2));
        assert_eq!(rx.try_recv().ok(), Some(Notice::RemoveFailed));
    }
}
