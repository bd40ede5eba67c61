//! Persistent key-value storage
//!
//! The browser host backs this with `window.localStorage`, the CLI with a JSON
//! file. [`MemoryStore`] is the headless implementation.

use std::cell::{Cell, RefCell};

use rustc_hash::FxHashMap;

use crate::error::{HostError, Result};

/// Process-wide string key-value storage that survives restarts.
///
/// Methods take `&self`: hosts are shared behind `Rc` on a single-threaded
/// event loop and use interior mutability.
pub trait KeyValueStore {
    /// Read a key. `Ok(None)` means the key was never stored.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a key, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory storage with optional simulated write failures.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<FxHashMap<String, String>>,
    fail_writes: Cell<bool>,
    unavailable: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        store.entries.borrow_mut().extend(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into())),
        );
        store
    }

    /// Make every subsequent `set`/`remove` fail, as a full quota would
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Make every operation fail, as disabled storage would
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }

    /// Direct read that bypasses failure simulation
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.get() {
            return Err(HostError::StorageUnavailable(
                "memory store disabled".to_string(),
            ));
        }
        Ok(())
    }

    fn check_writable(&self, key: &str) -> Result<()> {
        self.check_available()?;
        if self.fail_writes.get() {
            return Err(HostError::StorageWrite {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            });
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.check_available()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_writable(key)?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.check_writable(key)?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
