//! Budget service
//!
//! Commands on the allocation settings and the active transaction ledger,
//! plus the derived summary over both.

use tracing::{debug, info};

use crate::audit::EntityType;
use crate::error::{FlowError, FlowResult};
use crate::models::{
    AllocationSettings, BudgetCategory, FixedExpense, FixedExpenseId, Money,
    MonthlyArchiveEntry, Transaction, TransactionId,
};
use crate::services::calculator::{self, BudgetSummary};
use crate::storage::Storage;

const SETTINGS_ENTITY_ID: &str = "allocation";

/// Partial update of the allocation settings; `None` fields stay as they are
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllocationUpdate {
    pub monthly_income: Option<Money>,
    pub needs_percentage: Option<f64>,
    pub wants_percentage: Option<f64>,
    pub responsibilities_percentage: Option<f64>,
}

impl AllocationUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply(&self, settings: &mut AllocationSettings) {
        if let Some(income) = self.monthly_income {
            settings.monthly_income = income;
        }
        if let Some(needs) = self.needs_percentage {
            settings.needs_percentage = needs;
        }
        if let Some(wants) = self.wants_percentage {
            settings.wants_percentage = wants;
        }
        if let Some(responsibilities) = self.responsibilities_percentage {
            settings.responsibilities_percentage = responsibilities;
        }
    }
}

pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn settings(&self) -> FlowResult<AllocationSettings> {
        self.storage.budget.settings()
    }

    /// Derived figures for the active month
    pub fn summary(&self) -> FlowResult<BudgetSummary> {
        let settings = self.storage.budget.settings()?;
        let transactions = self.storage.budget.transactions()?;
        let summary = calculator::summarize(&settings, &transactions);
        debug!(
            total_spent = %summary.total_spent,
            remaining_salary = %summary.remaining_salary,
            "Computed budget summary"
        );
        Ok(summary)
    }

    /// Record a transaction in the active ledger
    pub fn add_transaction(&self, transaction: Transaction) -> FlowResult<Transaction> {
        transaction
            .validate()
            .map_err(|e| FlowError::Validation(e.to_string()))?;

        self.storage.budget.insert_transaction(transaction.clone())?;
        self.storage.budget.save()?;

        self.storage.log_create(
            EntityType::Transaction,
            transaction.id.to_string(),
            Some(transaction.description.clone()),
            &transaction,
        )?;
        info!(
            amount = %transaction.amount,
            category = %transaction.category,
            "Transaction added"
        );

        Ok(transaction)
    }

    /// Remove a transaction. Returns false when no transaction had that id.
    pub fn delete_transaction(&self, id: TransactionId) -> FlowResult<bool> {
        let Some(removed) = self.storage.budget.remove_transaction(id)? else {
            return Ok(false);
        };
        self.storage.budget.save()?;

        self.storage.log_delete(
            EntityType::Transaction,
            removed.id.to_string(),
            Some(removed.description.clone()),
            &removed,
        )?;
        info!(id = %removed.id.short(), "Transaction deleted");
        Ok(true)
    }

    /// Resolve a transaction by full or short id
    pub fn find_transaction(&self, reference: &str) -> FlowResult<Transaction> {
        self.storage
            .budget
            .find_transaction(reference)?
            .ok_or_else(|| FlowError::transaction_not_found(reference))
    }

    /// Active transactions, optionally limited to one category
    pub fn list_transactions(
        &self,
        category: Option<BudgetCategory>,
    ) -> FlowResult<Vec<Transaction>> {
        let transactions = self.storage.budget.transactions()?;
        Ok(match category {
            Some(category) => transactions
                .into_iter()
                .filter(|t| t.category == category)
                .collect(),
            None => transactions,
        })
    }

    /// Change income and/or percentages. Rejected while allocations are
    /// locked; the result must still total 100%.
    pub fn update_allocation_settings(
        &self,
        update: AllocationUpdate,
    ) -> FlowResult<AllocationSettings> {
        let before = self.storage.budget.settings()?;
        if update.is_empty() {
            return Ok(before);
        }
        ensure_unlocked(&before)?;

        let mut after = before.clone();
        update.apply(&mut after);
        after
            .validate()
            .map_err(|e| FlowError::Validation(e.to_string()))?;

        self.commit_settings(&before, &after)?;
        Ok(after)
    }

    /// Set one percentage and redistribute the rest across the other two in
    /// their previous ratio
    pub fn rebalance_allocation(
        &self,
        category: BudgetCategory,
        value: f64,
    ) -> FlowResult<AllocationSettings> {
        let before = self.storage.budget.settings()?;
        ensure_unlocked(&before)?;

        if !(0.0..=100.0).contains(&value) || value.is_nan() {
            return Err(FlowError::Validation(format!(
                "{} percentage must be between 0 and 100 (got {})",
                category, value
            )));
        }

        let mut after = before.clone();
        after.set_percentages(before.percentages().rebalance(category, value));
        after
            .validate()
            .map_err(|e| FlowError::Validation(e.to_string()))?;

        self.commit_settings(&before, &after)?;
        Ok(after)
    }

    pub fn lock_allocations(&self) -> FlowResult<AllocationSettings> {
        self.set_locked(true)
    }

    pub fn unlock_allocations(&self) -> FlowResult<AllocationSettings> {
        self.set_locked(false)
    }

    /// Add a recurring charge against responsibilities. Allowed while locked.
    pub fn add_fixed_expense(&self, name: &str, amount: Money) -> FlowResult<FixedExpense> {
        let expense = FixedExpense::new(name, amount);
        expense
            .validate()
            .map_err(|e| FlowError::Validation(e.to_string()))?;

        let before = self.storage.budget.settings()?;
        let mut after = before.clone();
        after.fixed_expenses.push(expense.clone());
        self.storage.budget.set_settings(after)?;
        self.storage.budget.save()?;

        self.storage.log_create(
            EntityType::FixedExpense,
            expense.id.to_string(),
            Some(expense.name.clone()),
            &expense,
        )?;
        info!(name = %expense.name, amount = %expense.amount, "Fixed expense added");
        Ok(expense)
    }

    /// Remove a fixed expense. Returns false when no expense had that id.
    pub fn delete_fixed_expense(&self, id: FixedExpenseId) -> FlowResult<bool> {
        let mut settings = self.storage.budget.settings()?;
        let Some(index) = settings.fixed_expenses.iter().position(|e| e.id == id) else {
            return Ok(false);
        };
        let removed = settings.fixed_expenses.remove(index);
        self.storage.budget.set_settings(settings)?;
        self.storage.budget.save()?;

        self.storage.log_delete(
            EntityType::FixedExpense,
            removed.id.to_string(),
            Some(removed.name.clone()),
            &removed,
        )?;
        Ok(true)
    }

    /// Resolve a fixed expense by id, short id or name
    pub fn find_fixed_expense(&self, reference: &str) -> FlowResult<FixedExpense> {
        let settings = self.storage.budget.settings()?;
        let wanted = reference.trim().to_lowercase();
        settings
            .fixed_expenses
            .iter()
            .find(|e| e.id.matches(reference))
            .or_else(|| {
                settings
                    .fixed_expenses
                    .iter()
                    .find(|e| e.name.to_lowercase() == wanted)
            })
            .cloned()
            .ok_or_else(|| FlowError::NotFound {
                entity_type: "Fixed expense",
                identifier: reference.to_string(),
            })
    }

    /// Closed months, newest first
    pub fn archive(&self) -> FlowResult<Vec<MonthlyArchiveEntry>> {
        self.storage.budget.archive()
    }

    pub fn bank_balance(&self) -> FlowResult<Money> {
        self.storage.bank.balance()
    }

    fn set_locked(&self, locked: bool) -> FlowResult<AllocationSettings> {
        let before = self.storage.budget.settings()?;
        if before.is_locked == locked {
            return Ok(before);
        }

        let mut after = before.clone();
        after.is_locked = locked;
        self.commit_settings(&before, &after)?;
        info!(locked, "Allocation lock changed");
        Ok(after)
    }

    fn commit_settings(
        &self,
        before: &AllocationSettings,
        after: &AllocationSettings,
    ) -> FlowResult<()> {
        self.storage.budget.set_settings(after.clone())?;
        self.storage.budget.save()?;
        self.storage.log_update(
            EntityType::AllocationSettings,
            SETTINGS_ENTITY_ID,
            None,
            before,
            after,
            None,
        )
    }
}

fn ensure_unlocked(settings: &AllocationSettings) -> FlowResult<()> {
    if settings.is_locked {
        Err(FlowError::Locked(
            "unlock allocations before changing income or percentages".into(),
        ))
    } else {
        Ok(())
    }
}
