//! Income source repository
//!
//! Handles persistence of how the monthly income was entered.

use std::sync::{Arc, RwLock};

use serde_json::Value;

use super::backend::{keys, load_or_default, StorageBackend};
use crate::error::{FlowError, FlowResult};
use crate::models::IncomeConfig;

pub struct IncomeRepository {
    backend: Arc<dyn StorageBackend>,
    config: RwLock<IncomeConfig>,
}

impl IncomeRepository {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            config: RwLock::new(IncomeConfig::default()),
        }
    }

    pub fn load(&self) -> FlowResult<()> {
        let loaded: IncomeConfig = load_or_default(self.backend.as_ref(), keys::INCOME);
        self.set(loaded)
    }

    pub fn save(&self) -> FlowResult<()> {
        self.backend.save(keys::INCOME, &self.blob()?)
    }

    pub fn blob(&self) -> FlowResult<Value> {
        let config = self
            .config
            .read()
            .map_err(|e| FlowError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(serde_json::to_value(&*config)?)
    }

    pub fn get(&self) -> FlowResult<IncomeConfig> {
        let config = self
            .config
            .read()
            .map_err(|e| FlowError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(config.clone())
    }

    pub fn set(&self, income: IncomeConfig) -> FlowResult<()> {
        let mut config = self
            .config
            .write()
            .map_err(|e| FlowError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *config = income;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::FnpfRates;
    use crate::models::{IncomeSource, Money};
    use crate::storage::backend::MemoryBackend;

    #[test]
    fn test_empty_by_default() {
        let repo = IncomeRepository::new(Arc::new(MemoryBackend::new()));
        repo.load().unwrap();
        assert!(repo.get().unwrap().source.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let backend = Arc::new(MemoryBackend::new());

        {
            let repo = IncomeRepository::new(backend.clone());
            repo.set(IncomeConfig {
                source: Some(IncomeSource::Salary {
                    gross_monthly: Money::from_dollars(1000),
                    rates: FnpfRates::default(),
                    voluntary_amount: Money::zero(),
                }),
                updated_at: None,
            })
            .unwrap();
            repo.save().unwrap();
        }

        {
            let repo = IncomeRepository::new(backend);
            repo.load().unwrap();
            let source = repo.get().unwrap().source.unwrap();
            assert_eq!(source.net_monthly_income().unwrap(), Money::from_dollars(920));
        }
    }
}
