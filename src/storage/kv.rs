//! Key-value persistence port
//!
//! The ledger hydrates itself from, and writes each mutation back to, a
//! store that only knows how to load and save JSON values by key. The file
//! store keeps one JSON document per key under the data directory.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde_json::Value;

use crate::error::LedgerError;

use super::file_io::{read_json, remove_if_exists, write_json_atomic};

/// Minimal persistence contract used by [`super::Storage`]
pub trait KeyValueStore: Send + Sync {
    /// Load the value stored under `key`, if any
    fn load(&self, key: &str) -> Result<Option<Value>, LedgerError>;

    /// Store `value` under `key`, replacing what was there
    fn save(&self, key: &str, value: &Value) -> Result<(), LedgerError>;

    /// Forget `key`
    fn remove(&self, key: &str) -> Result<(), LedgerError>;
}

/// One `<key>.json` file per key, written atomically
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<Value>, LedgerError> {
        read_json(self.path_for(key))
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), LedgerError> {
        write_json_atomic(self.path_for(key), value)
    }

    fn remove(&self, key: &str) -> Result<(), LedgerError> {
        remove_if_exists(self.path_for(key))
    }
}

/// Process-local store, for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Value>, LedgerError> {
        let data = self.data.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(key).cloned())
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), LedgerError> {
        let mut data = self.data.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), LedgerError> {
        let mut data = self.data.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn exercise(store: &dyn KeyValueStore) {
        assert!(store.load("wallets").unwrap().is_none());

        store.save("wallets", &json!([{"name": "Cash"}])).unwrap();
        assert_eq!(
            store.load("wallets").unwrap(),
            Some(json!([{"name": "Cash"}]))
        );

        store.save("wallets", &json!([])).unwrap();
        assert_eq!(store.load("wallets").unwrap(), Some(json!([])));

        store.remove("wallets").unwrap();
        assert!(store.load("wallets").unwrap().is_none());
    }

    #[test]
    fn test_memory_store() {
        exercise(&MemoryStore::new());
    }

    #[test]
    fn test_json_file_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("data"));
        exercise(&store);
    }

    #[test]
    fn test_json_file_store_writes_one_file_per_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().to_path_buf());

        store.save("budget_method", &json!("ENVELOPE")).unwrap();
        assert!(temp_dir.path().join("budget_method.json").exists());
    }
}
