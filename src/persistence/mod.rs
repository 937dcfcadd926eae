//! Durable key-value persistence
//!
//! Features:
//! - `KeyValueStore` seam over LocalStorage (web) or memory (native/tests)
//! - Best score stored as a base-10 string under a single key
//! - Every failure is swallowed: the game stays playable without storage

pub mod best_score;
#[cfg(target_arch = "wasm32")]
pub mod local;

use std::collections::HashMap;

pub use best_score::{BestScore, RunSummary};
#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

/// Storage failures. Never fatal; callers log and carry on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// String key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-process store (native builds, tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store
    pub fn with(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.values.remove(key);
        Ok(())
    }
}

/// A store that fails every call (private browsing, disabled storage)
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

/// Read `key`, treating any storage error as absence
pub fn read_or_none(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Failed to read {key}: {e}");
            None
        }
    }
}

/// Best-effort write; failures are logged and dropped
pub fn write_best_effort(store: &mut dyn KeyValueStore, key: &str, value: &str) {
    if let Err(e) = store.set(key, value) {
        log::warn!("Failed to write {key}: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_helpers_swallow_errors() {
        let mut store = UnavailableStore;
        assert_eq!(read_or_none(&store, "k"), None);
        write_best_effort(&mut store, "k", "v");
    }
}
