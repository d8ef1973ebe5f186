//! Wildflour Store - client-side cart and favorites state containers.
//!
//! Two independent, symmetric state containers back the storefront UI:
//!
//! - [`CartStore`] - the shopper's pending line items, with derived totals
//! - [`FavoritesStore`] - a deduplicated, timestamped wishlist
//!
//! Both are plain values constructed over an injected [`StateStorage`]
//! backend; there is no global singleton. Mutations are synchronous and
//! infallible: state changes in memory first, the full collection is then
//! serialized and written to storage best-effort, and subscribers are
//! notified last. Reads never touch storage.
//!
//! # Persistence
//!
//! Each store writes its collection under a fixed namespaced key
//! ([`persistence::keys`]) as a JSON envelope tagged with
//! [`SCHEMA_VERSION`]. On open, absent, unreadable, or version-mismatched
//! state falls back to an empty collection rather than surfacing an error,
//! and a failed write never rolls back the in-memory change.
//!
//! # Concurrency
//!
//! Everything here assumes a single logical thread of control: operations
//! run synchronously in response to discrete user actions, listeners are
//! invoked inline, and backends are not required to be `Send`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod favorites;
pub mod persistence;
pub mod subscribe;

pub use cart::CartStore;
pub use favorites::FavoritesStore;
pub use persistence::{FileStorage, MemoryStorage, SCHEMA_VERSION, StateStorage, StorageError};
pub use subscribe::SubscriptionId;
