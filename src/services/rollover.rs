//! Month rollover
//!
//! Closes the active month: archives the ledger, settles the wants
//! allocation against the Want Wallet, carries the remaining salary into the
//! bank balance and starts a fresh ledger. Every new state is built on
//! copies first and committed together. A failed validation or a failed save
//! leaves all stores exactly as they were.

use std::path::PathBuf;

use chrono::Utc;
use tracing::{info, warn};

use crate::audit::{AuditEntry, EntityType};
use crate::backup::BackupManager;
use crate::error::{FlowError, FlowResult};
use crate::models::{
    Achievement, AchievementStats, MonthPeriod, MonthlyArchiveEntry, Money, WalletTransaction,
    WalletTransactionKind,
};
use crate::services::{achievement, calculator};
use crate::storage::{keys, BudgetState, Storage};

/// What a rollover did
#[derive(Debug, Clone)]
pub struct RolloverReport {
    pub entry: MonthlyArchiveEntry,
    /// Allocated minus spent wants; positive went into the wallet
    pub wants_delta: Money,
    pub bank_balance: Money,
    pub want_wallet_balance: Money,
    pub new_achievements: Vec<Achievement>,
    /// Backup written before the rollover was committed
    pub backup: Option<PathBuf>,
}

pub struct RolloverService<'a> {
    storage: &'a Storage,
    backup: Option<BackupManager>,
}

impl<'a> RolloverService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            backup: None,
        }
    }

    /// Write a backup of the persisted state before committing
    pub fn with_backup(mut self, manager: BackupManager) -> Self {
        self.backup = Some(manager);
        self
    }

    /// Close the given month, or the current one
    pub fn reset_month(&self, period: Option<MonthPeriod>) -> FlowResult<RolloverReport> {
        let period = period.unwrap_or_else(MonthPeriod::current);
        let label = period.to_string();

        let budget = self.storage.budget.snapshot()?;
        budget
            .budget_settings
            .validate()
            .map_err(|e| FlowError::Validation(format!("Cannot close {}: {}", label, e)))?;

        let summary = calculator::summarize(&budget.budget_settings, &budget.transactions);
        let wants_delta = summary.wants_delta();

        let entry = MonthlyArchiveEntry::new(
            period,
            budget.transactions.clone(),
            budget.budget_settings.clone(),
            summary.total_spent,
            summary.remaining_salary,
        );

        let mut monthly_archive = Vec::with_capacity(budget.monthly_archive.len() + 1);
        monthly_archive.push(entry.clone());
        monthly_archive.extend(budget.monthly_archive.iter().cloned());
        let new_budget = BudgetState {
            budget_settings: budget.budget_settings.clone(),
            transactions: Vec::new(),
            monthly_archive,
        };

        let mut wallet = self.storage.wallet.get()?;
        let wallet_entry = if wants_delta.is_positive() {
            Some(
                WalletTransaction::new(
                    WalletTransactionKind::Accumulation,
                    wants_delta,
                    format!("Unspent wants from {}", label),
                )
                .from_month(label.clone()),
            )
        } else if wants_delta.is_negative() {
            Some(
                WalletTransaction::new(
                    WalletTransactionKind::Withdrawal,
                    wants_delta.abs(),
                    format!("Wants overspend in {}", label),
                )
                .from_month(label.clone()),
            )
        } else {
            None
        };
        if let Some(wallet_entry) = &wallet_entry {
            wallet.record(wallet_entry.clone());
        }

        let bank_before = self.storage.bank.balance()?;
        let bank_balance = bank_before + summary.remaining_salary;

        let stats = AchievementStats {
            want_wallet_balance: wallet.balance,
            goals_completed: self.storage.goals.completed_count()?,
            goals_created: self.storage.goals.count()?,
            months_tracked: new_budget.monthly_archive.len(),
        };
        let new_achievements = achievement::evaluate(
            &stats,
            &self.storage.achievements.unlocked_ids()?,
            Utc::now(),
        );

        let backup = match &self.backup {
            Some(manager) => Some(manager.create_backup(self.storage)?),
            None => None,
        };

        let want_wallet_balance = wallet.balance;
        self.storage.atomically(
            &[keys::BUDGET, keys::WANT_WALLET, keys::BANK, keys::ACHIEVEMENTS],
            || {
                self.storage.budget.replace(new_budget)?;
                self.storage.wallet.set(wallet)?;
                self.storage.bank.set(bank_balance)?;
                self.storage.achievements.insert_new(&new_achievements)?;
                Ok(())
            },
        )?;

        self.log_rollover(&entry, wallet_entry.as_ref(), bank_before, bank_balance, &new_achievements);

        if want_wallet_balance.is_negative() {
            warn!(balance = %want_wallet_balance, "Want Wallet is overdrawn");
        }
        info!(
            month = %label,
            wants_delta = %wants_delta,
            bank_balance = %bank_balance,
            "Month closed"
        );

        Ok(RolloverReport {
            entry,
            wants_delta,
            bank_balance,
            want_wallet_balance,
            new_achievements,
            backup,
        })
    }

    /// Audit entries for one rollover. State is already committed, so a
    /// failure to write the log is reported but not returned.
    fn log_rollover(
        &self,
        entry: &MonthlyArchiveEntry,
        wallet_entry: Option<&WalletTransaction>,
        bank_before: Money,
        bank_after: Money,
        new_achievements: &[Achievement],
    ) {
        let mut entries = vec![AuditEntry::create(
            EntityType::MonthlyArchive,
            entry.id.to_string(),
            Some(entry.label()),
            entry,
        )];
        if let Some(wallet_entry) = wallet_entry {
            entries.push(AuditEntry::create(
                EntityType::WantWallet,
                wallet_entry.id.to_string(),
                Some(wallet_entry.description.clone()),
                wallet_entry,
            ));
        }
        entries.push(AuditEntry::update(
            EntityType::BankBalance,
            "bank",
            None,
            &bank_before,
            &bank_after,
            Some(format!("bank_balance: {} -> {}", bank_before, bank_after)),
        ));
        for achievement in new_achievements {
            entries.push(AuditEntry::create(
                EntityType::Achievement,
                achievement.id.clone(),
                Some(achievement.name.clone()),
                achievement,
            ));
        }

        if let Err(e) = self.storage.log_batch(&entries) {
            warn!(error = %e, "Failed to write rollover audit entries");
        }
    }
}
