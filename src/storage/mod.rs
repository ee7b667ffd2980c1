//! Storage layer for FinanceFlow
//!
//! Repositories hold the in-memory state behind locks and persist it through
//! a [`StorageBackend`]. File-backed storage also keeps the audit log.

pub mod achievements;
pub mod backend;
pub mod bank;
pub mod budget;
pub mod file_io;
pub mod goals;
pub mod income;
pub mod wallet;

pub use achievements::AchievementRepository;
pub use backend::{keys, JsonFileBackend, MemoryBackend, StorageBackend};
pub use bank::BankRepository;
pub use budget::{BudgetRepository, BudgetState};
pub use goals::GoalRepository;
pub use income::IncomeRepository;
pub use wallet::WalletRepository;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::FlowPaths;
use crate::error::{FlowError, FlowResult};
use crate::models::{Achievement, FinancialGoal, IncomeConfig, Money, WantWalletState};

/// In-memory copy of every store
struct StoreSnapshot {
    budget: BudgetState,
    wallet: WantWalletState,
    goals: Vec<FinancialGoal>,
    achievements: Vec<Achievement>,
    bank: Money,
    income: IncomeConfig,
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: Option<FlowPaths>,
    backend: Arc<dyn StorageBackend>,
    audit: Option<AuditLogger>,
    pub budget: BudgetRepository,
    pub wallet: WalletRepository,
    pub goals: GoalRepository,
    pub achievements: AchievementRepository,
    pub bank: BankRepository,
    pub income: IncomeRepository,
}

impl Storage {
    /// File-backed storage under the given paths, with audit logging
    pub fn new(paths: FlowPaths) -> FlowResult<Self> {
        paths.ensure_directories()?;

        let backend = Arc::new(JsonFileBackend::new(paths.data_dir()));
        let mut storage = Self::with_backend(backend);
        storage.audit = Some(AuditLogger::new(paths.audit_log()));
        storage.paths = Some(paths);
        Ok(storage)
    }

    /// Storage over any backend. No audit log is kept.
    pub fn with_backend(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            paths: None,
            audit: None,
            budget: BudgetRepository::new(backend.clone()),
            wallet: WalletRepository::new(backend.clone()),
            goals: GoalRepository::new(backend.clone()),
            achievements: AchievementRepository::new(backend.clone()),
            bank: BankRepository::new(backend.clone()),
            income: IncomeRepository::new(backend.clone()),
            backend,
        }
    }

    /// Volatile storage for tests and headless use
    pub fn in_memory() -> Self {
        Self::with_backend(Arc::new(MemoryBackend::new()))
    }

    /// Paths, for file-backed storage
    pub fn paths(&self) -> Option<&FlowPaths> {
        self.paths.as_ref()
    }

    pub fn backend(&self) -> &dyn StorageBackend {
        self.backend.as_ref()
    }

    pub fn audit_logger(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Load every store. Missing or malformed blobs come back as defaults.
    pub fn load_all(&self) -> FlowResult<()> {
        self.budget.load()?;
        self.wallet.load()?;
        self.goals.load()?;
        self.achievements.load()?;
        self.bank.load()?;
        self.income.load()?;
        debug!("Loaded all stores");
        Ok(())
    }

    pub fn save_all(&self) -> FlowResult<()> {
        self.commit(&keys::ALL)
    }

    /// Persist the named stores as one unit
    pub fn commit(&self, stores: &[&str]) -> FlowResult<()> {
        let blobs = stores
            .iter()
            .map(|key| Ok((*key, self.blob(key)?)))
            .collect::<FlowResult<Vec<_>>>()?;
        self.backend.save_many(&blobs)
    }

    /// Apply a change in memory, then persist the named stores together
    ///
    /// If the change or the save fails, every store is put back to how it
    /// was before and the pre-change state is saved again.
    pub fn atomically<T>(
        &self,
        stores: &[&str],
        apply: impl FnOnce() -> FlowResult<T>,
    ) -> FlowResult<T> {
        let before = self.snapshot()?;
        let outcome = apply().and_then(|value| self.commit(stores).map(|()| value));

        if let Err(e) = &outcome {
            warn!(error = %e, stores = ?stores, "Commit failed, rolling back");
            if let Err(revert) = self.restore_snapshot(before).and_then(|()| self.commit(stores)) {
                warn!(error = %revert, "Failed to persist rolled back state");
            }
        }
        outcome
    }

    fn blob(&self, key: &str) -> FlowResult<serde_json::Value> {
        match key {
            keys::BUDGET => self.budget.blob(),
            keys::WANT_WALLET => self.wallet.blob(),
            keys::GOALS => self.goals.blob(),
            keys::ACHIEVEMENTS => self.achievements.blob(),
            keys::BANK => self.bank.blob(),
            keys::INCOME => self.income.blob(),
            other => Err(FlowError::Storage(format!("Unknown store: {}", other))),
        }
    }

    fn snapshot(&self) -> FlowResult<StoreSnapshot> {
        Ok(StoreSnapshot {
            budget: self.budget.snapshot()?,
            wallet: self.wallet.get()?,
            goals: self.goals.get_all()?,
            achievements: self.achievements.get_all()?,
            bank: self.bank.balance()?,
            income: self.income.get()?,
        })
    }

    fn restore_snapshot(&self, snapshot: StoreSnapshot) -> FlowResult<()> {
        self.budget.replace(snapshot.budget)?;
        self.wallet.set(snapshot.wallet)?;
        self.goals.replace_all(snapshot.goals)?;
        self.achievements.replace_all(snapshot.achievements)?;
        self.bank.set(snapshot.bank)?;
        self.income.set(snapshot.income)
    }

    /// Persist every store and return the blobs as saved
    pub fn persisted_blobs(&self) -> FlowResult<BTreeMap<String, serde_json::Value>> {
        self.save_all()?;

        let mut blobs = BTreeMap::new();
        for key in keys::ALL {
            if let Some(value) = self.backend.load(key)? {
                blobs.insert(key.to_string(), value);
            }
        }
        Ok(blobs)
    }

    /// Overwrite every store from a set of blobs and persist them
    pub fn restore_blobs(&self, blobs: &BTreeMap<String, serde_json::Value>) -> FlowResult<()> {
        for (key, value) in blobs {
            self.backend.save(key, value)?;
        }
        self.load_all()
    }

    fn audit(&self, entry: AuditEntry) -> FlowResult<()> {
        match &self.audit {
            Some(logger) => logger.log(&entry),
            None => Ok(()),
        }
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> FlowResult<()> {
        self.audit(AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Log an update. Without an explicit summary a field diff is generated.
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> FlowResult<()> {
        if self.audit.is_none() {
            return Ok(());
        }

        let diff_summary = diff_summary.or_else(|| {
            let before = serde_json::to_value(before).ok()?;
            let after = serde_json::to_value(after).ok()?;
            generate_diff(&before, &after)
        });

        self.audit(AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> FlowResult<()> {
        self.audit(AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }

    /// Append several entries at once
    pub fn log_batch(&self, entries: &[AuditEntry]) -> FlowResult<()> {
        match &self.audit {
            Some(logger) => logger.log_batch(entries),
            None => Ok(()),
        }
    }
}
