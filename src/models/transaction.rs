//! Transaction model
//!
//! A categorized spending event in the active month's ledger. Transactions
//! are immutable once recorded; the only mutation is deletion.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::BudgetCategory;
use super::ids::TransactionId;
use super::money::Money;

/// A spending transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    /// Amount spent, always positive
    pub amount: Money,

    pub description: String,

    pub category: BudgetCategory,

    /// Date the money was spent
    pub date: NaiveDate,

    /// Reference to a stored receipt image or document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,

    /// When the transaction was recorded
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        amount: Money,
        description: impl Into<String>,
        category: BudgetCategory,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            amount,
            description: description.into().trim().to_string(),
            category,
            date,
            receipt_url: None,
            created_at: Utc::now(),
        }
    }

    /// Attach a receipt reference
    pub fn with_receipt(mut self, receipt_url: impl Into<String>) -> Self {
        let url = receipt_url.into();
        self.receipt_url = if url.trim().is_empty() {
            None
        } else {
            Some(url.trim().to_string())
        };
        self
    }

    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }
        if self.description.is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}] {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.category,
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    EmptyDescription,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Transaction amount must be positive (got {})", amount)
            }
            Self::EmptyDescription => write!(f, "Transaction description cannot be empty"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn test_new_transaction() {
        let txn = Transaction::new(
            Money::from_dollars(120),
            "  Concert tickets ",
            BudgetCategory::Wants,
            date(),
        );
        assert_eq!(txn.description, "Concert tickets");
        assert_eq!(txn.category, BudgetCategory::Wants);
        assert!(txn.receipt_url.is_none());
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let zero = Transaction::new(Money::zero(), "Nothing", BudgetCategory::Needs, date());
        assert_eq!(
            zero.validate(),
            Err(TransactionValidationError::NonPositiveAmount(Money::zero()))
        );

        let unnamed = Transaction::new(Money::from_dollars(5), "", BudgetCategory::Needs, date());
        assert_eq!(
            unnamed.validate(),
            Err(TransactionValidationError::EmptyDescription)
        );
    }

    #[test]
    fn test_receipt_reference() {
        let txn = Transaction::new(Money::from_dollars(40), "Groceries", BudgetCategory::Needs, date())
            .with_receipt("receipts/2025-03-14.jpg");
        assert_eq!(txn.receipt_url.as_deref(), Some("receipts/2025-03-14.jpg"));

        let blank = Transaction::new(Money::from_dollars(40), "Groceries", BudgetCategory::Needs, date())
            .with_receipt("   ");
        assert!(blank.receipt_url.is_none());
    }

    #[test]
    fn test_serialization_omits_missing_receipt() {
        let txn = Transaction::new(Money::from_dollars(10), "Bus", BudgetCategory::Needs, date());
        let json = serde_json::to_string(&txn).unwrap();
        assert!(!json.contains("receipt_url"));
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, txn);
    }
}
