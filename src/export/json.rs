//! JSON Export functionality
//!
//! Exports the complete budgeting state to JSON with schema versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FlowError, FlowResult};
use crate::models::{
    Achievement, AllocationSettings, FinancialGoal, IncomeConfig, Money, MonthlyArchiveEntry,
    Transaction, WantWalletState,
};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full state export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub settings: AllocationSettings,

    /// Active month ledger
    pub transactions: Vec<Transaction>,

    /// Closed months, newest first
    pub archive: Vec<MonthlyArchiveEntry>,

    pub want_wallet: WantWalletState,
    pub goals: Vec<FinancialGoal>,
    pub achievements: Vec<Achievement>,
    pub bank_balance: Money,
    pub income: IncomeConfig,
}

impl FullExport {
    pub fn from_storage(storage: &Storage) -> FlowResult<Self> {
        let state = storage.budget.snapshot()?;

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            settings: state.budget_settings,
            transactions: storage.budget.transactions()?,
            archive: state.monthly_archive,
            want_wallet: storage.wallet.get()?,
            goals: storage.goals.get_all()?,
            achievements: storage.achievements.get_all()?,
            bank_balance: storage.bank.balance()?,
            income: storage.income.get()?,
        })
    }

    /// Check the export is internally consistent
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        self.settings.validate().map_err(|e| e.to_string())?;

        let ledger = self.want_wallet.ledger_balance();
        if ledger != self.want_wallet.balance {
            return Err(format!(
                "Want Wallet balance {} does not match its ledger ({})",
                self.want_wallet.balance, ledger
            ));
        }

        Ok(())
    }
}

/// Export the full state to JSON
pub fn export_full_json<W: Write + ?Sized>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> FlowResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| FlowError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a JSON export
pub fn read_json_export(json_str: &str) -> FlowResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| FlowError::Export(e.to_string()))?;
    export.validate().map_err(FlowError::Export)?;
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetCategory, NewGoal};
    use crate::services::{GoalService, WalletService};
    use chrono::NaiveDate;

    fn populated_storage() -> Storage {
        let storage = Storage::in_memory();
        storage
            .budget
            .insert_transaction(Transaction::new(
                Money::from_dollars(42),
                "Groceries",
                BudgetCategory::Needs,
                NaiveDate::from_ymd_opt(2026, 10, 3).unwrap(),
            ))
            .unwrap();
        WalletService::new(&storage)
            .accumulate(Money::from_dollars(150), "September 2026")
            .unwrap();
        GoalService::new(&storage)
            .add_goal(NewGoal::new("Camera", Money::from_dollars(400)))
            .unwrap();
        storage
    }

    #[test]
    fn test_full_export() {
        let storage = populated_storage();
        let export = FullExport::from_storage(&storage).unwrap();

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.transactions.len(), 1);
        assert_eq!(export.goals.len(), 1);
        assert_eq!(export.want_wallet.balance, Money::from_dollars(150));
        assert!(!export.achievements.is_empty());
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip_validates() {
        let storage = populated_storage();
        let mut buffer = Vec::new();
        export_full_json(&storage, &mut buffer, true).unwrap();

        let json = String::from_utf8(buffer).unwrap();
        assert!(json.contains("\"schema_version\""));
        assert!(json.contains("Camera"));

        let parsed = read_json_export(&json).unwrap();
        assert_eq!(parsed.bank_balance, Money::zero());
    }

    #[test]
    fn test_validate_rejects_stale_wallet_balance() {
        let storage = populated_storage();
        let mut export = FullExport::from_storage(&storage).unwrap();
        export.want_wallet.balance = Money::from_dollars(1);
        assert!(export.validate().is_err());

        export.want_wallet.balance = Money::from_dollars(150);
        export.schema_version = "0.1.0".into();
        assert!(export.validate().unwrap_err().contains("Schema version"));
    }
}
