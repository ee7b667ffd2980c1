//! Pluggable persistence backends
//!
//! State is persisted as a handful of named JSON blobs. A backend only knows
//! how to load and save a blob by key; repositories own the shape of what's
//! inside.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::file_io::{read_json, write_json_atomic, write_json_batch};
use crate::error::{FlowError, FlowResult};

/// Blob keys, one per persisted store
pub mod keys {
    pub const BUDGET: &str = "budget";
    pub const WANT_WALLET: &str = "want_wallet";
    pub const GOALS: &str = "goals";
    pub const ACHIEVEMENTS: &str = "achievements";
    pub const BANK: &str = "bank";
    pub const INCOME: &str = "income";

    pub const ALL: [&str; 6] = [BUDGET, WANT_WALLET, GOALS, ACHIEVEMENTS, BANK, INCOME];
}

/// Key/value persistence for state blobs
pub trait StorageBackend: Send + Sync {
    /// Load the blob stored under `key`, `None` if nothing was ever saved
    fn load(&self, key: &str) -> FlowResult<Option<Value>>;

    /// Replace the blob stored under `key`
    fn save(&self, key: &str, value: &Value) -> FlowResult<()>;

    /// Replace several blobs as one unit
    ///
    /// The default saves one blob after another and stops at the first
    /// failure. Backends that can stage writes override it so that a failure
    /// leaves every blob as it was.
    fn save_many(&self, blobs: &[(&str, Value)]) -> FlowResult<()> {
        for (key, value) in blobs {
            self.save(key, value)?;
        }
        Ok(())
    }
}

/// One pretty-printed `<key>.json` file per blob
pub struct JsonFileBackend {
    data_dir: PathBuf,
}

impl JsonFileBackend {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for JsonFileBackend {
    fn load(&self, key: &str) -> FlowResult<Option<Value>> {
        read_json(self.path_for(key))
    }

    fn save(&self, key: &str, value: &Value) -> FlowResult<()> {
        write_json_atomic(self.path_for(key), value)
    }

    fn save_many(&self, blobs: &[(&str, Value)]) -> FlowResult<()> {
        let files: Vec<(PathBuf, &Value)> = blobs
            .iter()
            .map(|(key, value)| (self.path_for(key), value))
            .collect();
        write_json_batch(&files)
    }
}

/// Keeps blobs in memory; nothing touches the disk
#[derive(Default)]
pub struct MemoryBackend {
    blobs: RwLock<BTreeMap<String, Value>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self, key: &str) -> FlowResult<Option<Value>> {
        let blobs = self
            .blobs
            .read()
            .map_err(|e| FlowError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(blobs.get(key).cloned())
    }

    fn save(&self, key: &str, value: &Value) -> FlowResult<()> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|e| FlowError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        blobs.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn save_many(&self, batch: &[(&str, Value)]) -> FlowResult<()> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|e| FlowError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        for (key, value) in batch {
            blobs.insert(key.to_string(), value.clone());
        }
        Ok(())
    }
}

/// In-memory backend that refuses to save the given keys
#[cfg(test)]
pub(crate) struct FailingBackend {
    inner: MemoryBackend,
    failing_keys: Vec<&'static str>,
}

#[cfg(test)]
impl FailingBackend {
    pub(crate) fn new(failing_keys: &[&'static str]) -> Self {
        Self {
            inner: MemoryBackend::new(),
            failing_keys: failing_keys.to_vec(),
        }
    }
}

#[cfg(test)]
impl StorageBackend for FailingBackend {
    fn load(&self, key: &str) -> FlowResult<Option<Value>> {
        self.inner.load(key)
    }

    fn save(&self, key: &str, value: &Value) -> FlowResult<()> {
        if self.failing_keys.iter().any(|failing| *failing == key) {
            return Err(FlowError::Storage(format!("Disk full while saving {}", key)));
        }
        self.inner.save(key, value)
    }
}

/// Load and decode a blob, falling back to `T::default()` when it is missing,
/// unreadable or doesn't match the expected shape
pub fn load_or_default<T>(backend: &dyn StorageBackend, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match backend.load(key) {
        Ok(Some(value)) => match serde_json::from_value(value) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!(key, error = %e, "Stored data has an unexpected shape, using defaults");
                T::default()
            }
        },
        Ok(None) => {
            debug!(key, "No stored data, using defaults");
            T::default()
        }
        Err(e) => {
            warn!(key, error = %e, "Failed to load stored data, using defaults");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use tempfile::TempDir;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct BankBlob {
        bank_balance: i64,
    }

    #[test]
    fn test_memory_backend_round_trip() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.load(keys::BANK).unwrap(), None);

        backend.save(keys::BANK, &json!({"bank_balance": 88000})).unwrap();
        assert_eq!(
            backend.load(keys::BANK).unwrap(),
            Some(json!({"bank_balance": 88000}))
        );
    }

    #[test]
    fn test_file_backend_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(temp_dir.path().to_path_buf());

        backend
            .save(
                keys::BANK,
                &serde_json::to_value(BankBlob { bank_balance: 500 }).unwrap(),
            )
            .unwrap();
        assert!(temp_dir.path().join("bank.json").exists());

        let loaded: BankBlob = load_or_default(&backend, keys::BANK);
        assert_eq!(loaded.bank_balance, 500);
    }

    #[test]
    fn test_file_backend_save_many() {
        let temp_dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(temp_dir.path().to_path_buf());

        backend
            .save_many(&[
                (keys::BANK, json!({"bank_balance": 88000})),
                (keys::WANT_WALLET, json!({"balance": 18000})),
            ])
            .unwrap();

        assert_eq!(
            backend.load(keys::BANK).unwrap(),
            Some(json!({"bank_balance": 88000}))
        );
        assert_eq!(
            backend.load(keys::WANT_WALLET).unwrap(),
            Some(json!({"balance": 18000}))
        );
    }

    #[test]
    fn test_default_save_many_stops_at_first_failure() {
        let backend = FailingBackend::new(&[keys::WANT_WALLET]);

        let result = backend.save_many(&[
            (keys::BANK, json!({"bank_balance": 1})),
            (keys::WANT_WALLET, json!({"balance": 1})),
            (keys::GOALS, json!({"goals": []})),
        ]);

        assert!(matches!(result, Err(FlowError::Storage(_))));
        assert!(backend.load(keys::BANK).unwrap().is_some());
        assert!(backend.load(keys::WANT_WALLET).unwrap().is_none());
        assert!(backend.load(keys::GOALS).unwrap().is_none());
    }

    #[test]
    fn test_malformed_blob_falls_back_to_default() {
        let temp_dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(temp_dir.path().to_path_buf());
        std::fs::write(backend.path_for(keys::BANK), "garbage").unwrap();

        let loaded: BankBlob = load_or_default(&backend, keys::BANK);
        assert_eq!(loaded, BankBlob::default());
    }

    #[test]
    fn test_wrong_shape_falls_back_to_default() {
        let backend = MemoryBackend::new();
        backend
            .save(keys::BANK, &json!({"bank_balance": "lots"}))
            .unwrap();

        let loaded: BankBlob = load_or_default(&backend, keys::BANK);
        assert_eq!(loaded, BankBlob::default());
    }
}
