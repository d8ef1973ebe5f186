//! Favorites (wishlist) state container.

use chrono::Utc;
use wildflour_core::{FavoriteItem, ProductId, ProductSnapshot};

use crate::persistence::{self, StateStorage, keys};
use crate::subscribe::{Subscribers, SubscriptionId};

/// Tracks a deduplicated, insertion-ordered wishlist with timestamps.
///
/// Each product appears at most once. An entry's `date_added` is stamped at
/// insertion and never changes afterwards; re-adding an existing product is
/// a no-op. As with the cart, mutations change memory first, persist
/// best-effort under the favorites storage key, and then notify
/// subscribers.
pub struct FavoritesStore<S> {
    items: Vec<FavoriteItem>,
    storage: S,
    subscribers: Subscribers<[FavoriteItem]>,
}

impl<S: StateStorage> FavoritesStore<S> {
    /// Open a favorites list over `storage`, restoring any previously
    /// persisted state.
    ///
    /// Absent, corrupt, or version-mismatched persisted state yields an
    /// empty list.
    pub fn open(storage: S) -> Self {
        let items = persistence::restore(&storage, keys::FAVORITES);
        Self {
            items,
            storage,
            subscribers: Subscribers::new(),
        }
    }

    /// Save `product` to the favorites list, stamped with the current time.
    ///
    /// Idempotent: adding an already-favorited product changes nothing and
    /// keeps the original `date_added`.
    pub fn add(&mut self, product: &ProductSnapshot) {
        if self.is_favorite(&product.id) {
            return;
        }
        self.items.push(FavoriteItem::new(product, Utc::now()));
        self.commit();
    }

    /// Remove the entry for `id`. No-op if absent.
    pub fn remove(&mut self, id: &ProductId) {
        let before = self.items.len();
        self.items.retain(|entry| entry.id != *id);
        if self.items.len() != before {
            self.commit();
        }
    }

    /// Add `product` if absent, remove it if present.
    ///
    /// Returns whether the product is a favorite afterwards.
    pub fn toggle(&mut self, product: &ProductSnapshot) -> bool {
        if self.is_favorite(&product.id) {
            self.remove(&product.id);
            false
        } else {
            self.add(product);
            true
        }
    }

    /// Whether an entry for `id` currently exists.
    #[must_use]
    pub fn is_favorite(&self, id: &ProductId) -> bool {
        self.items.iter().any(|entry| entry.id == *id)
    }

    /// All entries, most recently added first.
    ///
    /// A read-only projection: the stored insertion order is untouched.
    #[must_use]
    pub fn favorites(&self) -> Vec<FavoriteItem> {
        let mut sorted = self.items.clone();
        sorted.sort_by(|a, b| b.date_added.cmp(&a.date_added));
        sorted
    }

    /// Current entries, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[FavoriteItem] {
        &self.items
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Empty the list unconditionally.
    pub fn clear(&mut self) {
        self.items.clear();
        self.commit();
    }

    /// Register a listener invoked with the collection after each effective
    /// mutation.
    pub fn subscribe(&mut self, listener: impl Fn(&[FavoriteItem]) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(Box::new(listener))
    }

    /// Remove a previously registered listener.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.unsubscribe(id);
    }

    /// Persist the collection best-effort, then notify subscribers.
    fn commit(&mut self) {
        persistence::persist(&mut self.storage, keys::FAVORITES, &self.items);
        self.subscribers.notify(&self.items);
    }
}
