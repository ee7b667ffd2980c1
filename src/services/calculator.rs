//! Derived budget figures
//!
//! Everything here is a pure function of the allocation settings and the
//! active ledger. Nothing is cached; callers recompute on every read.

use serde::Serialize;

use crate::models::{AllocationSettings, BudgetCategory, Money, Transaction};

/// Allocated, spent and remaining for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub category: BudgetCategory,
    pub allocated: Money,
    pub spent: Money,
    pub remaining: Money,
}

impl CategorySummary {
    /// Spent as a share of allocated, clamped to 0..=100 for display
    pub fn progress_percent(&self) -> f64 {
        (self.spent.ratio_of(self.allocated) * 100.0).clamp(0.0, 100.0)
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// The whole month at a glance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetSummary {
    pub monthly_income: Money,
    pub needs: CategorySummary,
    pub wants: CategorySummary,
    pub responsibilities: CategorySummary,
    pub fixed_expenses_total: Money,
    /// Transactions plus fixed expenses
    pub total_spent: Money,
    pub remaining_salary: Money,
}

impl BudgetSummary {
    pub fn get(&self, category: BudgetCategory) -> &CategorySummary {
        match category {
            BudgetCategory::Needs => &self.needs,
            BudgetCategory::Wants => &self.wants,
            BudgetCategory::Responsibilities => &self.responsibilities,
        }
    }

    pub fn categories(&self) -> [&CategorySummary; 3] {
        [&self.needs, &self.wants, &self.responsibilities]
    }

    /// Unspent wants, negative when the category was overspent
    pub fn wants_delta(&self) -> Money {
        self.wants.allocated - self.wants.spent
    }
}

/// Sum of transaction amounts in a category
pub fn spent_in(transactions: &[Transaction], category: BudgetCategory) -> Money {
    transactions
        .iter()
        .filter(|t| t.category == category)
        .map(|t| t.amount)
        .sum()
}

/// Compute the full summary
pub fn summarize(settings: &AllocationSettings, transactions: &[Transaction]) -> BudgetSummary {
    let fixed_expenses_total = settings.fixed_expenses_total();

    let category_summary = |category: BudgetCategory| {
        let allocated = settings.allocated(category);
        let spent = spent_in(transactions, category);
        let mut remaining = allocated - spent;
        if category == BudgetCategory::Responsibilities {
            remaining -= fixed_expenses_total;
        }
        CategorySummary {
            category,
            allocated,
            spent,
            remaining,
        }
    };

    let needs = category_summary(BudgetCategory::Needs);
    let wants = category_summary(BudgetCategory::Wants);
    let responsibilities = category_summary(BudgetCategory::Responsibilities);

    let total_spent = needs.spent + wants.spent + responsibilities.spent + fixed_expenses_total;

    BudgetSummary {
        monthly_income: settings.monthly_income,
        needs,
        wants,
        responsibilities,
        fixed_expenses_total,
        total_spent,
        remaining_salary: settings.monthly_income - total_spent,
    }
}
