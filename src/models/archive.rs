//! Monthly archive entries
//!
//! A snapshot of one closed budget month, written once by the rollover and
//! never modified afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::allocation::AllocationSettings;
use super::ids::ArchiveId;
use super::money::Money;
use super::period::MonthPeriod;
use super::transaction::Transaction;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyArchiveEntry {
    pub id: ArchiveId,
    /// Month name, e.g. "October"
    pub month: String,
    pub year: i32,
    pub transactions: Vec<Transaction>,
    pub settings_snapshot: AllocationSettings,
    pub total_spent: Money,
    pub remaining_salary: Money,
    pub archived_at: DateTime<Utc>,
}

impl MonthlyArchiveEntry {
    pub fn new(
        period: MonthPeriod,
        transactions: Vec<Transaction>,
        settings_snapshot: AllocationSettings,
        total_spent: Money,
        remaining_salary: Money,
    ) -> Self {
        Self {
            id: ArchiveId::new(),
            month: period.month_name().to_string(),
            year: period.year,
            transactions,
            settings_snapshot,
            total_spent,
            remaining_salary,
            archived_at: Utc::now(),
        }
    }

    /// Display label, e.g. "October 2026"
    pub fn label(&self) -> String {
        format!("{} {}", self.month, self.year)
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label() {
        let entry = MonthlyArchiveEntry::new(
            MonthPeriod::new(2025, 3).unwrap(),
            Vec::new(),
            AllocationSettings::default(),
            Money::zero(),
            Money::zero(),
        );
        assert_eq!(entry.label(), "March 2025");
        assert_eq!(entry.transaction_count(), 0);
    }
}
