//! Durable key-value persistence for store state.
//!
//! Stores persist their full collection after each mutation as a JSON
//! envelope `{ "version": <n>, "items": [...] }` under a fixed namespaced
//! key. Persistence is best-effort in both directions: unreadable or
//! version-mismatched state restores as an empty collection, and write
//! failures are logged and dropped without touching the in-memory state.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod file;
mod memory;

pub use file::{DEFAULT_STATE_DIR, FileStorage, STATE_DIR_ENV};
pub use memory::MemoryStorage;

/// Version tag written into every persisted envelope.
///
/// Restoring state with any other version discards it; there is no
/// migration logic at version 1.
pub const SCHEMA_VERSION: u32 = 1;

/// Storage keys for persisted collections, one per store.
pub mod keys {
    /// Key for the persisted cart collection.
    pub const CART: &str = "wildflour.cart";

    /// Key for the persisted favorites collection.
    pub const FAVORITES: &str = "wildflour.favorites";
}

/// Storage backend errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(String),
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// A durable, same-device key-value store.
///
/// Backends hold opaque strings per key. They are not required to be
/// `Send`; all access happens on a single logical thread.
pub trait StateStorage {
    /// Read the value for `key`, or `None` if it was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value for `key`. Deleting an absent key succeeds.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Serialized envelope for a persisted collection.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedState<T> {
    version: u32,
    items: Vec<T>,
}

/// Restore a collection from `storage`, falling back to empty.
///
/// Read errors, parse errors, and version mismatches all yield an empty
/// collection; none of them surface to the caller.
pub(crate) fn restore<T: DeserializeOwned>(storage: &impl StateStorage, key: &str) -> Vec<T> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::debug!(key, error = %e, "storage read failed, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<PersistedState<T>>(&raw) {
        Ok(state) if state.version == SCHEMA_VERSION => state.items,
        Ok(state) => {
            tracing::debug!(
                key,
                version = state.version,
                "discarding persisted state with unknown schema version"
            );
            Vec::new()
        }
        Err(e) => {
            tracing::debug!(key, error = %e, "discarding unreadable persisted state");
            Vec::new()
        }
    }
}

/// Serialize a collection and attempt to write it to `storage`.
///
/// Failures are logged at `warn` and dropped; the in-memory collection
/// remains the source of truth for the session.
pub(crate) fn persist<T: Serialize + Clone>(
    storage: &mut impl StateStorage,
    key: &str,
    items: &[T],
) {
    let state = PersistedState {
        version: SCHEMA_VERSION,
        items: items.to_vec(),
    };

    let raw = match serde_json::to_string(&state) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to serialize state, keeping in-memory copy only");
            return;
        }
    };

    if let Err(e) = storage.set(key, &raw) {
        tracing::warn!(key, error = %e, "failed to persist state, keeping in-memory copy only");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_absent_key_is_empty() {
        let storage = MemoryStorage::new();
        let items: Vec<u32> = restore(&storage, keys::CART);
        assert!(items.is_empty());
    }

    #[test]
    fn test_persist_then_restore_roundtrip() {
        let mut storage = MemoryStorage::new();
        persist(&mut storage, keys::CART, &[1u32, 2, 3]);

        let items: Vec<u32> = restore(&storage, keys::CART);
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_restore_corrupt_payload_is_empty() {
        let mut storage = MemoryStorage::new();
        storage.set(keys::CART, "{\"version\":1,\"items\":[1,").unwrap();

        let items: Vec<u32> = restore(&storage, keys::CART);
        assert!(items.is_empty());
    }

    #[test]
    fn test_restore_version_mismatch_is_empty() {
        let mut storage = MemoryStorage::new();
        storage
            .set(keys::CART, "{\"version\":2,\"items\":[1,2,3]}")
            .unwrap();

        let items: Vec<u32> = restore(&storage, keys::CART);
        assert!(items.is_empty());
    }

    #[test]
    fn test_restore_missing_fields_is_empty() {
        let mut storage = MemoryStorage::new();
        storage.set(keys::CART, "{\"items\":[1]}").unwrap();

        let items: Vec<u32> = restore(&storage, keys::CART);
        assert!(items.is_empty());
    }

    #[test]
    fn test_envelope_carries_version() {
        let mut storage = MemoryStorage::new();
        persist(&mut storage, keys::FAVORITES, &[42u32]);

        let raw = storage.get(keys::FAVORITES).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], SCHEMA_VERSION);
        assert_eq!(value["items"], serde_json::json!([42]));
    }
}
