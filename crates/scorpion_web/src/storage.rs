//! `window.localStorage`

use scorpion_core::{HostError, KeyValueStore, Result};
use wasm_bindgen::JsValue;

fn describe(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// Key-value storage on `window.localStorage`.
///
/// Private browsing and sandboxed frames may deny access entirely; every call
/// then fails with [`HostError::StorageUnavailable`].
#[derive(Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Result<web_sys::Storage> {
        let window = web_sys::window()
            .ok_or_else(|| HostError::StorageUnavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| HostError::StorageUnavailable(describe(e)))?
            .ok_or_else(|| HostError::StorageUnavailable("localStorage is disabled".to_string()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| HostError::StorageRead {
                key: key.to_string(),
                reason: describe(e),
            })
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| HostError::StorageWrite {
                key: key.to_string(),
                reason: describe(e),
            })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| HostError::StorageWrite {
                key: key.to_string(),
                reason: describe(e),
            })
    }
}
