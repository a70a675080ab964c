//! Browser `localStorage` backend for WASM.

use super::{KeyValueStore, StorageError, StorageResult};
use wasm_bindgen::JsValue;

/// Wraps the window's `localStorage`.
pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

fn js_error(e: JsValue) -> StorageError {
    StorageError::Other(format!("{:?}", e))
}

impl LocalStorageStore {
    /// Open `window.localStorage`.
    pub fn from_window() -> StorageResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("No window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        // Quota errors surface here
        self.storage.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.storage.remove_item(key).map_err(js_error)
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let len = self.storage.length().map_err(js_error)?;
        let mut keys = Vec::with_capacity(len as usize);
        for i in 0..len {
            if let Some(key) = self.storage.key(i).map_err(js_error)? {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}
