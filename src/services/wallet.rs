//! Want Wallet engine
//!
//! Every movement is appended to the wallet ledger and the balance is
//! recomputed from it. Only rollover overspend can push the balance below
//! zero; withdrawals and goal contributions are bounded by the balance.

use chrono::Utc;
use tracing::{debug, info};

use crate::audit::EntityType;
use crate::error::{FlowError, FlowResult};
use crate::models::{
    Achievement, FinancialGoal, GoalId, Money, WalletTransaction, WalletTransactionKind,
};
use crate::services::achievement::AchievementService;
use crate::storage::{keys, Storage};

/// Running totals per movement kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletTotals {
    pub accumulated: Money,
    pub withdrawn: Money,
    pub contributed: Money,
}

/// Outcome of a goal contribution
#[derive(Debug, Clone)]
pub struct GoalContribution {
    pub goal: FinancialGoal,
    pub entry: WalletTransaction,
    /// True when this contribution completed the goal
    pub completed: bool,
    pub new_achievements: Vec<Achievement>,
}

pub struct WalletService<'a> {
    storage: &'a Storage,
}

impl<'a> WalletService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn balance(&self) -> FlowResult<Money> {
        self.storage.wallet.balance()
    }

    /// Movements, newest first
    pub fn history(&self) -> FlowResult<Vec<WalletTransaction>> {
        let wallet = self.storage.wallet.get()?;
        Ok(wallet.history().into_iter().cloned().collect())
    }

    pub fn totals(&self) -> FlowResult<WalletTotals> {
        let wallet = self.storage.wallet.get()?;
        Ok(WalletTotals {
            accumulated: wallet.total_for(WalletTransactionKind::Accumulation),
            withdrawn: wallet.total_for(WalletTransactionKind::Withdrawal),
            contributed: wallet.total_for(WalletTransactionKind::GoalContribution),
        })
    }

    /// Add unspent wants money carried out of a month
    pub fn accumulate(&self, amount: Money, from_month: &str) -> FlowResult<WalletTransaction> {
        require_positive(amount)?;
        let entry = WalletTransaction::new(
            WalletTransactionKind::Accumulation,
            amount,
            format!("Unspent wants from {}", from_month),
        )
        .from_month(from_month);
        self.commit(entry)
    }

    /// Take overspent wants out of the wallet. The balance may go negative.
    pub fn deduct_overspend(&self, amount: Money, from_month: &str) -> FlowResult<WalletTransaction> {
        require_positive(amount)?;
        let entry = WalletTransaction::new(
            WalletTransactionKind::Withdrawal,
            amount,
            format!("Wants overspend in {}", from_month),
        )
        .from_month(from_month);
        self.commit(entry)
    }

    /// Spend from the wallet by hand
    pub fn withdraw(&self, amount: Money, description: &str) -> FlowResult<WalletTransaction> {
        require_positive(amount)?;
        let description = description.trim();
        if description.is_empty() {
            return Err(FlowError::Validation(
                "Withdrawal description cannot be empty".into(),
            ));
        }
        self.require_balance(amount)?;

        let entry = WalletTransaction::new(WalletTransactionKind::Withdrawal, amount, description);
        self.commit(entry)
    }

    /// Move money from the wallet into a goal
    ///
    /// Nothing changes unless the amount is positive, no larger than the
    /// balance and no larger than what the goal still needs.
    pub fn contribute_to_goal(&self, goal_id: GoalId, amount: Money) -> FlowResult<GoalContribution> {
        let mut goal = self
            .storage
            .goals
            .get(goal_id)?
            .ok_or_else(|| FlowError::goal_not_found(goal_id.short()))?;

        goal.check_contribution(amount)
            .map_err(|e| FlowError::Validation(e.to_string()))?;
        self.require_balance(amount)?;

        let before = goal.clone();
        let completed = goal
            .apply_contribution(amount, Utc::now())
            .map_err(|e| FlowError::Validation(e.to_string()))?;

        let entry = WalletTransaction::new(
            WalletTransactionKind::GoalContribution,
            amount,
            format!("Contribution to {}", goal.name),
        )
        .for_goal(goal.id);

        self.storage.atomically(&[keys::WANT_WALLET, keys::GOALS], || {
            self.storage.wallet.record(entry.clone())?;
            self.storage.goals.upsert(goal.clone())
        })?;

        self.storage.log_create(
            EntityType::WantWallet,
            entry.id.to_string(),
            Some(entry.description.clone()),
            &entry,
        )?;
        self.storage.log_update(
            EntityType::Goal,
            goal.id.to_string(),
            Some(goal.name.clone()),
            &before,
            &goal,
            Some(format!(
                "current_amount: {} -> {}",
                before.current_amount, goal.current_amount
            )),
        )?;

        info!(goal = %goal.name, amount = %amount, completed, "Contributed to goal");

        let new_achievements = AchievementService::new(self.storage).check_and_unlock()?;

        Ok(GoalContribution {
            goal,
            entry,
            completed,
            new_achievements,
        })
    }

    fn require_balance(&self, amount: Money) -> FlowResult<()> {
        let available = self.balance()?;
        if amount > available {
            return Err(FlowError::InsufficientFunds {
                needed: amount,
                available,
            });
        }
        Ok(())
    }

    fn commit(&self, entry: WalletTransaction) -> FlowResult<WalletTransaction> {
        let balance = self.storage.wallet.record(entry.clone())?;
        self.storage.wallet.save()?;

        self.storage.log_create(
            EntityType::WantWallet,
            entry.id.to_string(),
            Some(entry.description.clone()),
            &entry,
        )?;
        debug!(kind = ?entry.kind, amount = %entry.amount, balance = %balance, "Wallet movement");

        AchievementService::new(self.storage).check_and_unlock()?;
        Ok(entry)
    }
}

fn require_positive(amount: Money) -> FlowResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(FlowError::Validation(format!(
            "Amount must be greater than zero (got {})",
            amount
        )))
    }
}
