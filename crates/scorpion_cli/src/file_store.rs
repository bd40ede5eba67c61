//! JSON file backed key-value storage

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use scorpion_core::{HostError, KeyValueStore, Result};
use tracing::trace;

/// Persists every key to one JSON object on disk.
///
/// The file is read once on open and rewritten after each change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RefCell<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| HostError::StorageUnavailable(format!("{}: {e}", path.display())))?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|e| {
                    HostError::Serialization(format!("{}: {e}", path.display()))
                })?
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries: RefCell::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored entries, sorted by key
    pub fn entries(&self) -> BTreeMap<String, String> {
        self.entries.borrow().clone()
    }

    fn flush(&self, key: &str) -> Result<()> {
        let write_error = |reason: String| HostError::StorageWrite {
            key: key.to_string(),
            reason,
        };

        let json = serde_json::to_string_pretty(&*self.entries.borrow())
            .map_err(|e| HostError::Serialization(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
        }
        fs::write(&self.path, json).map_err(|e| write_error(e.to_string()))?;
        trace!(path = %self.path.display(), key, "storage flushed");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let previous = self
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        if previous.as_deref() == Some(value) {
            return Ok(());
        }
        self.flush(key)
    }

    fn remove(&self, key: &str) -> Result<()> {
        if self.entries.borrow_mut().remove(key).is_none() {
            return Ok(());
        }
        self.flush(key)
    }
}
