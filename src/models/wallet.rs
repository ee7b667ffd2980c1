//! Want Wallet model
//!
//! The Want Wallet is a persistent savings pool fed by unspent "wants"
//! budget at month end. Its movement ledger is the source of truth: the
//! balance is always the signed sum of the ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{GoalId, WalletEntryId};
use super::money::Money;

/// Kind of Want Wallet movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WalletTransactionKind {
    /// Month-end leftover wants budget flowing in
    Accumulation,
    /// Overspend deductions and manual withdrawals
    Withdrawal,
    /// Money moved into a financial goal
    GoalContribution,
}

impl WalletTransactionKind {
    /// Apply the movement's direction to an amount
    pub fn signed(&self, amount: Money) -> Money {
        match self {
            Self::Accumulation => amount,
            Self::Withdrawal | Self::GoalContribution => -amount,
        }
    }
}

impl fmt::Display for WalletTransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Accumulation => "Accumulation",
            Self::Withdrawal => "Withdrawal",
            Self::GoalContribution => "Goal contribution",
        };
        f.pad(label)
    }
}

/// A single Want Wallet movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletTransaction {
    pub id: WalletEntryId,
    #[serde(rename = "type")]
    pub kind: WalletTransactionKind,
    /// Always positive; direction comes from `kind`
    pub amount: Money,
    pub description: String,
    pub date: DateTime<Utc>,
    /// Month label of the rollover that produced this movement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_month: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<GoalId>,
}

impl WalletTransaction {
    pub fn new(kind: WalletTransactionKind, amount: Money, description: impl Into<String>) -> Self {
        Self {
            id: WalletEntryId::new(),
            kind,
            amount,
            description: description.into(),
            date: Utc::now(),
            from_month: None,
            goal_id: None,
        }
    }

    pub fn from_month(mut self, label: impl Into<String>) -> Self {
        self.from_month = Some(label.into());
        self
    }

    pub fn for_goal(mut self, goal_id: GoalId) -> Self {
        self.goal_id = Some(goal_id);
        self
    }

    /// The movement's effect on the balance
    pub fn signed_amount(&self) -> Money {
        self.kind.signed(self.amount)
    }
}

/// Balance plus the full movement ledger
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WantWalletState {
    pub balance: Money,
    /// Movements in the order they happened
    pub transactions: Vec<WalletTransaction>,
}

impl WantWalletState {
    /// Signed sum of every movement
    pub fn ledger_balance(&self) -> Money {
        self.transactions.iter().map(|t| t.signed_amount()).sum()
    }

    /// Append a movement and bring the balance in line with the ledger
    pub fn record(&mut self, entry: WalletTransaction) {
        self.transactions.push(entry);
        self.balance = self.ledger_balance();
    }

    /// Recompute the balance from the ledger. Returns the stale balance when
    /// it disagreed with the ledger.
    pub fn reconcile(&mut self) -> Option<Money> {
        let ledger = self.ledger_balance();
        if ledger == self.balance {
            None
        } else {
            let stale = self.balance;
            self.balance = ledger;
            Some(stale)
        }
    }

    pub fn total_for(&self, kind: WalletTransactionKind) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.amount)
            .sum()
    }

    /// Movements, newest first
    pub fn history(&self) -> Vec<&WalletTransaction> {
        let mut history: Vec<_> = self.transactions.iter().rev().collect();
        history.sort_by(|a, b| b.date.cmp(&a.date));
        history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_balance_in_sync() {
        let mut wallet = WantWalletState::default();
        wallet.record(WalletTransaction::new(
            WalletTransactionKind::Accumulation,
            Money::from_dollars(180),
            "Leftover wants",
        ));
        wallet.record(WalletTransaction::new(
            WalletTransactionKind::GoalContribution,
            Money::from_dollars(50),
            "Vacation",
        ));
        wallet.record(WalletTransaction::new(
            WalletTransactionKind::Withdrawal,
            Money::from_dollars(200),
            "Overspend",
        ));

        assert_eq!(wallet.balance, Money::from_dollars(-70));
        assert_eq!(
            wallet.total_for(WalletTransactionKind::Accumulation),
            Money::from_dollars(180)
        );
    }

    #[test]
    fn test_reconcile_repairs_stale_balance() {
        let mut wallet = WantWalletState::default();
        wallet.record(WalletTransaction::new(
            WalletTransactionKind::Accumulation,
            Money::from_dollars(10),
            "Leftover",
        ));
        assert_eq!(wallet.reconcile(), None);

        wallet.balance = Money::from_dollars(999);
        assert_eq!(wallet.reconcile(), Some(Money::from_dollars(999)));
        assert_eq!(wallet.balance, Money::from_dollars(10));
    }

    #[test]
    fn test_kind_serializes_kebab_case() {
        let entry = WalletTransaction::new(
            WalletTransactionKind::GoalContribution,
            Money::from_dollars(1),
            "x",
        );
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"type\":\"goal-contribution\""));
    }
}
