//! Browser LocalStorage backend (wasm32 only)

use super::{KeyValueStore, StorageError};

/// `window.localStorage`, resolved per call so a storage that appears or
/// disappears mid-session (privacy modes) is handled gracefully
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)
    }
}

fn js_error(e: wasm_bindgen::JsValue) -> StorageError {
    StorageError::Backend(format!("{e:?}"))
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        Self::storage()?.remove_item(key).map_err(js_error)
    }
}
