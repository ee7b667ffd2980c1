//! Bank balance repository
//!
//! A single running total, only moved by month rollover.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::backend::{keys, load_or_default, StorageBackend};
use crate::error::{FlowError, FlowResult};
use crate::models::Money;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct BankData {
    #[serde(default)]
    bank_balance: Money,
}

pub struct BankRepository {
    backend: Arc<dyn StorageBackend>,
    balance: RwLock<Money>,
}

impl BankRepository {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            balance: RwLock::new(Money::zero()),
        }
    }

    pub fn load(&self) -> FlowResult<()> {
        let file_data: BankData = load_or_default(self.backend.as_ref(), keys::BANK);
        self.set(file_data.bank_balance)
    }

    pub fn save(&self) -> FlowResult<()> {
        self.backend.save(keys::BANK, &self.blob()?)
    }

    pub fn blob(&self) -> FlowResult<Value> {
        let file_data = BankData {
            bank_balance: self.balance()?,
        };
        Ok(serde_json::to_value(file_data)?)
    }

    pub fn balance(&self) -> FlowResult<Money> {
        let balance = self
            .balance
            .read()
            .map_err(|e| FlowError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(*balance)
    }

    pub fn set(&self, amount: Money) -> FlowResult<()> {
        let mut balance = self
            .balance
            .write()
            .map_err(|e| FlowError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *balance = amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::backend::MemoryBackend;

    #[test]
    fn test_defaults_to_zero() {
        let repo = BankRepository::new(Arc::new(MemoryBackend::new()));
        repo.load().unwrap();
        assert_eq!(repo.balance().unwrap(), Money::zero());
    }

    #[test]
    fn test_save_and_reload() {
        let backend = Arc::new(MemoryBackend::new());
        let repo = BankRepository::new(backend.clone());
        repo.set(Money::from_dollars(880)).unwrap();
        repo.save().unwrap();

        let reloaded = BankRepository::new(backend);
        reloaded.load().unwrap();
        assert_eq!(reloaded.balance().unwrap(), Money::from_dollars(880));
    }
}
