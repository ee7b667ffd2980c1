//! Budget repository
//!
//! Owns the `budget` blob: allocation settings, the active transaction
//! ledger and the monthly archive (newest first).

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use serde_json::Value;

use super::backend::{keys, load_or_default, StorageBackend};
use crate::error::{FlowError, FlowResult};
use crate::models::{AllocationSettings, MonthlyArchiveEntry, Transaction, TransactionId};

/// Everything persisted under the `budget` key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetState {
    pub budget_settings: AllocationSettings,
    pub transactions: Vec<Transaction>,
    pub monthly_archive: Vec<MonthlyArchiveEntry>,
}

pub struct BudgetRepository {
    backend: Arc<dyn StorageBackend>,
    state: RwLock<BudgetState>,
}

impl BudgetRepository {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            state: RwLock::new(BudgetState::default()),
        }
    }

    pub fn load(&self) -> FlowResult<()> {
        let loaded: BudgetState = load_or_default(self.backend.as_ref(), keys::BUDGET);
        *self.write()? = loaded;
        Ok(())
    }

    pub fn save(&self) -> FlowResult<()> {
        self.backend.save(keys::BUDGET, &self.blob()?)
    }

    /// The state as it would be persisted
    pub fn blob(&self) -> FlowResult<Value> {
        Ok(serde_json::to_value(&*self.read()?)?)
    }

    /// Copy of the whole state
    pub fn snapshot(&self) -> FlowResult<BudgetState> {
        Ok(self.read()?.clone())
    }

    /// Replace the whole state in one step
    pub fn replace(&self, state: BudgetState) -> FlowResult<()> {
        *self.write()? = state;
        Ok(())
    }

    pub fn settings(&self) -> FlowResult<AllocationSettings> {
        Ok(self.read()?.budget_settings.clone())
    }

    pub fn set_settings(&self, settings: AllocationSettings) -> FlowResult<()> {
        self.write()?.budget_settings = settings;
        Ok(())
    }

    /// Active transactions, oldest date first
    pub fn transactions(&self) -> FlowResult<Vec<Transaction>> {
        let mut list = self.read()?.transactions.clone();
        list.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        Ok(list)
    }

    pub fn get_transaction(&self, id: TransactionId) -> FlowResult<Option<Transaction>> {
        Ok(self.read()?.transactions.iter().find(|t| t.id == id).cloned())
    }

    /// Resolve a full UUID or short `txn-` reference
    pub fn find_transaction(&self, reference: &str) -> FlowResult<Option<Transaction>> {
        Ok(self
            .read()?
            .transactions
            .iter()
            .find(|t| t.id.matches(reference))
            .cloned())
    }

    pub fn insert_transaction(&self, transaction: Transaction) -> FlowResult<()> {
        self.write()?.transactions.push(transaction);
        Ok(())
    }

    pub fn remove_transaction(&self, id: TransactionId) -> FlowResult<Option<Transaction>> {
        let mut state = self.write()?;
        let position = state.transactions.iter().position(|t| t.id == id);
        Ok(position.map(|index| state.transactions.remove(index)))
    }

    pub fn transaction_count(&self) -> FlowResult<usize> {
        Ok(self.read()?.transactions.len())
    }

    /// Archive entries, newest first
    pub fn archive(&self) -> FlowResult<Vec<MonthlyArchiveEntry>> {
        Ok(self.read()?.monthly_archive.clone())
    }

    pub fn archive_len(&self) -> FlowResult<usize> {
        Ok(self.read()?.monthly_archive.len())
    }

    fn read(&self) -> FlowResult<std::sync::RwLockReadGuard<'_, BudgetState>> {
        self.state
            .read()
            .map_err(|e| FlowError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> FlowResult<std::sync::RwLockWriteGuard<'_, BudgetState>> {
        self.state
            .write()
            .map_err(|e| FlowError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetCategory, Money};
    use crate::storage::backend::MemoryBackend;
    use chrono::NaiveDate;

    fn repo() -> (BudgetRepository, Arc<MemoryBackend>) {
        let backend = Arc::new(MemoryBackend::new());
        (BudgetRepository::new(backend.clone()), backend)
    }

    fn lunch(day: u32) -> Transaction {
        Transaction::new(
            Money::from_dollars(12),
            "Lunch",
            BudgetCategory::Wants,
            NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
        )
    }

    #[test]
    fn test_defaults_when_empty() {
        let (repo, _) = repo();
        repo.load().unwrap();

        let settings = repo.settings().unwrap();
        assert_eq!(settings.monthly_income, Money::zero());
        assert_eq!(settings.needs_percentage, 50.0);
        assert!(repo.transactions().unwrap().is_empty());
        assert!(repo.archive().unwrap().is_empty());
    }

    #[test]
    fn test_insert_find_remove() {
        let (repo, _) = repo();
        let txn = lunch(3);
        let id = txn.id;
        repo.insert_transaction(txn).unwrap();

        assert!(repo.get_transaction(id).unwrap().is_some());
        assert!(repo.find_transaction(&id.short()).unwrap().is_some());

        let removed = repo.remove_transaction(id).unwrap();
        assert_eq!(removed.map(|t| t.id), Some(id));
        assert!(repo.remove_transaction(id).unwrap().is_none());
    }

    #[test]
    fn test_transactions_sorted_by_date() {
        let (repo, _) = repo();
        repo.insert_transaction(lunch(20)).unwrap();
        repo.insert_transaction(lunch(2)).unwrap();

        let list = repo.transactions().unwrap();
        assert_eq!(list[0].date.format("%d").to_string(), "02");
    }

    #[test]
    fn test_save_and_reload() {
        let (repo, backend) = repo();
        repo.set_settings(AllocationSettings::with_income(Money::from_dollars(1000)))
            .unwrap();
        repo.insert_transaction(lunch(5)).unwrap();
        repo.save().unwrap();

        let reloaded = BudgetRepository::new(backend);
        reloaded.load().unwrap();
        assert_eq!(
            reloaded.settings().unwrap().monthly_income,
            Money::from_dollars(1000)
        );
        assert_eq!(reloaded.transaction_count().unwrap(), 1);
    }
}
