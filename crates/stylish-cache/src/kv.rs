//! Key-value store wrapper with automatic serialization.

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Type-safe cache backed by a JSON file.
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. The whole store is read once on
/// open and written back on every mutation.
#[derive(Debug)]
pub struct Cache {
    path: Option<PathBuf>,
    entries: BTreeMap<String, Value>,
}

impl Cache {
    /// Open a file-backed store, creating it on first write.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// let cache = stylish_cache::Cache::open("storage.json")?;
    /// # Ok::<(), stylish_cache::CacheError>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)
                .map_err(|e| CacheError::OpenError(format!("{}: {}", path.display(), e)))?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw)
                    .map_err(|e| CacheError::OpenError(format!("{}: {}", path.display(), e)))?
            }
        } else {
            BTreeMap::new()
        };

        debug!(path = %path.display(), keys = entries.len(), "opened store");

        Ok(Self {
            path: Some(path),
            entries,
        })
    }

    /// Open a store that lives only as long as this value.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: BTreeMap::new(),
        }
    }

    /// Location of the backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.entries.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    ///
    /// The value is only kept if it was written to disk.
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), CacheError> {
        let value = serde_json::to_value(value)?;
        let mut entries = self.entries.clone();
        entries.insert(key.to_string(), value);
        self.commit(entries)
    }

    /// Delete a value from the cache.
    ///
    /// The value is only dropped if its removal was written to disk.
    pub fn delete(&mut self, key: &str) -> Result<(), CacheError> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut entries = self.entries.clone();
        entries.remove(key);
        self.commit(entries)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn commit(&mut self, entries: BTreeMap<String, Value>) -> Result<(), CacheError> {
        self.flush(&entries)?;
        self.entries = entries;
        Ok(())
    }

    fn flush(&self, entries: &BTreeMap<String, Value>) -> Result<(), CacheError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| CacheError::StoreError(e.to_string()))?;
            }
        }

        // Write then rename so a crash never leaves a half-written file.
        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(entries)?;
        fs::write(&tmp, bytes).map_err(|e| CacheError::StoreError(e.to_string()))?;
        fs::rename(&tmp, path).map_err(|e| CacheError::StoreError(e.to_string()))?;

        debug!(path = %path.display(), keys = entries.len(), "flushed store");
        Ok(())
    }
}
