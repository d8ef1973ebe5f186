//! Shopping cart state container.

use wildflour_core::{CartLineItem, ProductId, ProductSnapshot};

use crate::persistence::{self, StateStorage, keys};
use crate::subscribe::{Subscribers, SubscriptionId};

/// Tracks the line items a shopper intends to purchase, and exposes derived
/// aggregates.
///
/// The collection is owned exclusively by the store and mutated only through
/// its operations. After every effective mutation the full collection is
/// serialized and written to the backing storage best-effort, then
/// subscribers are notified with the new collection. Persistence failures
/// never surface to callers; the in-memory collection remains the source of
/// truth for the session.
///
/// A line item is either absent or present with quantity >= 1. Adding moves
/// absent to present with quantity 1, or increments the existing quantity;
/// removing deletes the line; setting a quantity of zero or less removes the
/// line rather than keeping it at an invalid quantity.
pub struct CartStore<S> {
    items: Vec<CartLineItem>,
    storage: S,
    subscribers: Subscribers<[CartLineItem]>,
}

impl<S: StateStorage> CartStore<S> {
    /// Open a cart over `storage`, restoring any previously persisted state.
    ///
    /// Absent, corrupt, or version-mismatched persisted state yields an
    /// empty cart.
    pub fn open(storage: S) -> Self {
        let items = persistence::restore(&storage, keys::CART);
        Self {
            items,
            storage,
            subscribers: Subscribers::new(),
        }
    }

    /// Add one unit of `product`.
    ///
    /// Inserts a new line with quantity 1, or increments the existing line
    /// for the same product ID. Always succeeds.
    pub fn add_item(&mut self, product: &ProductSnapshot) {
        match self.items.iter_mut().find(|line| line.id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.items.push(CartLineItem::new(product)),
        }
        self.commit();
    }

    /// Remove the line for `id`. No-op if absent.
    pub fn remove_item(&mut self, id: &ProductId) {
        let before = self.items.len();
        self.items.retain(|line| line.id != *id);
        if self.items.len() != before {
            self.commit();
        }
    }

    /// Set the quantity of the line for `id`.
    ///
    /// A quantity of zero or less behaves as [`Self::remove_item`]. No-op if
    /// the line is absent.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }
        if let Some(line) = self.items.iter_mut().find(|line| line.id == *id) {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            self.commit();
        }
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) {
        self.items.clear();
        self.commit();
    }

    /// Current line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all line items.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    /// Sum of `price * quantity` across all line items.
    #[must_use]
    pub fn total_price(&self) -> f64 {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Register a listener invoked with the collection after each effective
    /// mutation.
    pub fn subscribe(&mut self, listener: impl Fn(&[CartLineItem]) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(Box::new(listener))
    }

    /// Remove a previously registered listener.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.unsubscribe(id);
    }

    /// Persist the collection best-effort, then notify subscribers.
    fn commit(&mut self) {
        persistence::persist(&mut self.storage, keys::CART, &self.items);
        self.subscribers.notify(&self.items);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::persistence::{MemoryStorage, StorageError};

    use super::*;

    fn croissant() -> ProductSnapshot {
        ProductSnapshot::new("croissant", "Croissant", 3.5, "croissant.jpg")
    }

    fn baguette() -> ProductSnapshot {
        ProductSnapshot::new("baguette", "Baguette", 4.25, "baguette.jpg")
    }

    /// Backend whose writes always fail, for exercising best-effort commits.
    struct FailingStorage;

    impl StateStorage for FailingStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io("quota exceeded".to_owned()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Io("quota exceeded".to_owned()))
        }
    }

    #[test]
    fn test_open_empty_storage_yields_empty_cart() {
        let cart = CartStore::open(MemoryStorage::new());
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn test_add_same_product_increments_quantity() {
        let mut cart = CartStore::open(MemoryStorage::new());
        cart.add_item(&croissant());
        cart.add_item(&croissant());

        assert_eq!(cart.len(), 1);
        let line = cart.items().first().unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(cart.total_items(), 2);
        assert!((cart.total_price() - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_add_distinct_products_creates_lines() {
        let mut cart = CartStore::open(MemoryStorage::new());
        cart.add_item(&croissant());
        cart.add_item(&baguette());

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total_items(), 2);
        assert!((cart.total_price() - 7.75).abs() < 1e-9);
    }

    #[test]
    fn test_remove_item_deletes_line() {
        let mut cart = CartStore::open(MemoryStorage::new());
        cart.add_item(&croissant());
        cart.add_item(&baguette());
        cart.remove_item(&ProductId::new("croissant"));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items().first().unwrap().id, ProductId::new("baguette"));
    }

    #[test]
    fn test_remove_absent_item_is_noop() {
        let mut cart = CartStore::open(MemoryStorage::new());
        cart.add_item(&croissant());
        cart.remove_item(&ProductId::new("rye-loaf"));

        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut cart = CartStore::open(MemoryStorage::new());
        cart.add_item(&croissant());
        cart.update_quantity(&ProductId::new("croissant"), 5);

        assert_eq!(cart.total_items(), 5);
        assert!((cart.total_price() - 17.5).abs() < 1e-9);
    }

    #[test]
    fn test_update_quantity_zero_removes_line() {
        let mut cart = CartStore::open(MemoryStorage::new());
        cart.add_item(&croissant());
        cart.add_item(&baguette());
        cart.update_quantity(&ProductId::new("croissant"), 0);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), 1);
        assert_eq!(cart.items().first().unwrap().id, ProductId::new("baguette"));
    }

    #[test]
    fn test_update_quantity_negative_removes_line() {
        let mut cart = CartStore::open(MemoryStorage::new());
        cart.add_item(&croissant());
        cart.update_quantity(&ProductId::new("croissant"), -3);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_absent_is_noop() {
        let mut cart = CartStore::open(MemoryStorage::new());
        cart.add_item(&croissant());
        cart.update_quantity(&ProductId::new("rye-loaf"), 4);

        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut cart = CartStore::open(MemoryStorage::new());
        cart.add_item(&croissant());
        cart.clear();
        assert!(cart.is_empty());
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals_track_interleaved_mutations() {
        let mut cart = CartStore::open(MemoryStorage::new());
        cart.add_item(&croissant());
        cart.add_item(&baguette());
        cart.add_item(&croissant());
        cart.update_quantity(&ProductId::new("baguette"), 3);
        cart.remove_item(&ProductId::new("croissant"));

        assert_eq!(cart.total_items(), 3);
        assert!((cart.total_price() - 12.75).abs() < 1e-9);
    }

    #[test]
    fn test_state_survives_reopen_over_shared_storage() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::open(storage.clone());
        cart.add_item(&croissant());
        cart.add_item(&croissant());
        cart.add_item(&baguette());
        drop(cart);

        let reopened = CartStore::open(storage);
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.total_items(), 3);
        assert!((reopened.total_price() - 11.25).abs() < 1e-9);
    }

    #[test]
    fn test_corrupt_persisted_state_yields_empty_cart() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::open(storage.clone());
        cart.add_item(&croissant());
        drop(cart);

        let mut raw_storage = storage.clone();
        let raw = raw_storage.get(keys::CART).unwrap().unwrap();
        let truncated: String = raw.chars().take(raw.len() / 2).collect();
        raw_storage.set(keys::CART, &truncated).unwrap();

        let reopened = CartStore::open(storage);
        assert!(reopened.is_empty());
        assert_eq!(reopened.total_items(), 0);
    }

    #[test]
    fn test_version_mismatch_yields_empty_cart() {
        let mut storage = MemoryStorage::new();
        storage
            .set(
                keys::CART,
                "{\"version\":2,\"items\":[{\"id\":\"croissant\",\"name\":\"Croissant\",\"price\":3.5,\"image\":\"x\",\"quantity\":1}]}",
            )
            .unwrap();

        let cart = CartStore::open(storage);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_write_failure_keeps_in_memory_state() {
        let mut cart = CartStore::open(FailingStorage);
        cart.add_item(&croissant());
        cart.add_item(&croissant());

        assert_eq!(cart.total_items(), 2);
        assert!((cart.total_price() - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_subscribers_observe_mutations() {
        let mut cart = CartStore::open(MemoryStorage::new());
        let observed = Rc::new(Cell::new(0_u32));

        let observed_total = Rc::clone(&observed);
        cart.subscribe(move |items| {
            observed_total.set(items.iter().map(|line| line.quantity).sum());
        });

        cart.add_item(&croissant());
        assert_eq!(observed.get(), 1);
        cart.add_item(&croissant());
        assert_eq!(observed.get(), 2);
        cart.clear();
        assert_eq!(observed.get(), 0);
    }

    #[test]
    fn test_noop_mutations_do_not_notify() {
        let mut cart = CartStore::open(MemoryStorage::new());
        cart.add_item(&croissant());

        let calls = Rc::new(Cell::new(0_u32));
        let call_count = Rc::clone(&calls);
        cart.subscribe(move |_| call_count.set(call_count.get() + 1));

        cart.remove_item(&ProductId::new("rye-loaf"));
        cart.update_quantity(&ProductId::new("rye-loaf"), 2);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut cart = CartStore::open(MemoryStorage::new());
        let calls = Rc::new(Cell::new(0_u32));

        let call_count = Rc::clone(&calls);
        let id = cart.subscribe(move |_| call_count.set(call_count.get() + 1));

        cart.add_item(&croissant());
        cart.unsubscribe(id);
        cart.add_item(&croissant());

        assert_eq!(calls.get(), 1);
    }
}
