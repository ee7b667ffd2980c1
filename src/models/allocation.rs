//! Allocation model
//!
//! Monthly income split across needs, wants and responsibilities by
//! percentage, plus the recurring fixed expenses charged against
//! responsibilities. Also home of the one rebalancing algorithm used whenever
//! a single percentage is changed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::BudgetCategory;
use super::ids::FixedExpenseId;
use super::money::Money;

/// Allowed deviation of the percentage total from 100
pub const PERCENTAGE_TOLERANCE: f64 = 0.1;

/// A recurring monthly charge against the responsibilities allocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedExpense {
    pub id: FixedExpenseId,
    pub name: String,
    pub amount: Money,
    pub created_at: DateTime<Utc>,
}

impl FixedExpense {
    pub fn new(name: impl Into<String>, amount: Money) -> Self {
        Self {
            id: FixedExpenseId::new(),
            name: name.into().trim().to_string(),
            amount,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), AllocationValidationError> {
        if self.name.is_empty() {
            return Err(AllocationValidationError::EmptyExpenseName);
        }
        if self.amount.is_negative() {
            return Err(AllocationValidationError::NegativeExpense(self.amount));
        }
        Ok(())
    }
}

/// The three category percentages
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Percentages {
    pub needs: f64,
    pub wants: f64,
    pub responsibilities: f64,
}

impl Percentages {
    pub fn new(needs: f64, wants: f64, responsibilities: f64) -> Self {
        Self {
            needs,
            wants,
            responsibilities,
        }
    }

    pub fn get(&self, category: BudgetCategory) -> f64 {
        match category {
            BudgetCategory::Needs => self.needs,
            BudgetCategory::Wants => self.wants,
            BudgetCategory::Responsibilities => self.responsibilities,
        }
    }

    pub fn set(&mut self, category: BudgetCategory, value: f64) {
        match category {
            BudgetCategory::Needs => self.needs = value,
            BudgetCategory::Wants => self.wants = value,
            BudgetCategory::Responsibilities => self.responsibilities = value,
        }
    }

    pub fn total(&self) -> f64 {
        self.needs + self.wants + self.responsibilities
    }

    /// Check the range of each value and the 100% total
    pub fn validate(&self) -> Result<(), AllocationValidationError> {
        for category in BudgetCategory::ALL {
            let value = self.get(category);
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(AllocationValidationError::PercentageOutOfRange { category, value });
            }
        }

        let total = self.total();
        if (total - 100.0).abs() > PERCENTAGE_TOLERANCE {
            return Err(AllocationValidationError::PercentagesDoNotSum(total));
        }

        Ok(())
    }

    /// Set `changed` to `value` and redistribute the remainder across the
    /// other two categories in proportion to their previous ratio.
    ///
    /// When both other categories were at zero the remainder is split 60/40
    /// in display order.
    ///
    /// ```
    /// use financeflow::models::{BudgetCategory, Percentages};
    /// let p = Percentages::new(50.0, 30.0, 20.0).rebalance(BudgetCategory::Needs, 60.0);
    /// assert_eq!(p, Percentages::new(60.0, 24.0, 16.0));
    /// ```
    pub fn rebalance(&self, changed: BudgetCategory, value: f64) -> Self {
        let value = round2(value.clamp(0.0, 100.0));
        let remaining = 100.0 - value;
        let [first, second] = changed.others();
        let (a, b) = (self.get(first).max(0.0), self.get(second).max(0.0));

        let first_share = if a + b <= 0.0 {
            round2(remaining * 0.6)
        } else {
            round2(remaining * a / (a + b))
        };
        let second_share = round2(remaining - first_share);

        let mut result = *self;
        result.set(changed, value);
        result.set(first, first_share);
        result.set(second, second_share);
        result
    }
}

impl Default for Percentages {
    fn default() -> Self {
        Self::new(
            BudgetCategory::Needs.default_percentage(),
            BudgetCategory::Wants.default_percentage(),
            BudgetCategory::Responsibilities.default_percentage(),
        )
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Income, percentages, lock state and fixed expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationSettings {
    pub monthly_income: Money,
    pub needs_percentage: f64,
    pub wants_percentage: f64,
    pub responsibilities_percentage: f64,
    pub is_locked: bool,
    pub fixed_expenses: Vec<FixedExpense>,
}

impl Default for AllocationSettings {
    fn default() -> Self {
        let defaults = Percentages::default();
        Self {
            monthly_income: Money::zero(),
            needs_percentage: defaults.needs,
            wants_percentage: defaults.wants,
            responsibilities_percentage: defaults.responsibilities,
            is_locked: false,
            fixed_expenses: Vec::new(),
        }
    }
}

impl AllocationSettings {
    /// Settings with the given income and the 50/30/20 defaults
    pub fn with_income(monthly_income: Money) -> Self {
        Self {
            monthly_income,
            ..Self::default()
        }
    }

    pub fn percentages(&self) -> Percentages {
        Percentages::new(
            self.needs_percentage,
            self.wants_percentage,
            self.responsibilities_percentage,
        )
    }

    pub fn set_percentages(&mut self, percentages: Percentages) {
        self.needs_percentage = percentages.needs;
        self.wants_percentage = percentages.wants;
        self.responsibilities_percentage = percentages.responsibilities;
    }

    pub fn percentage(&self, category: BudgetCategory) -> f64 {
        self.percentages().get(category)
    }

    /// Allocated amount for a category, rounded to the cent
    pub fn allocated(&self, category: BudgetCategory) -> Money {
        self.monthly_income.percent(self.percentage(category))
    }

    pub fn fixed_expenses_total(&self) -> Money {
        self.fixed_expenses.iter().map(|e| e.amount).sum()
    }

    /// Validate income, percentages and every fixed expense
    pub fn validate(&self) -> Result<(), AllocationValidationError> {
        if self.monthly_income.is_negative() {
            return Err(AllocationValidationError::NegativeIncome(self.monthly_income));
        }
        self.percentages().validate()?;
        for expense in &self.fixed_expenses {
            expense.validate()?;
        }
        Ok(())
    }
}

/// Validation errors for allocation settings
#[derive(Debug, Clone, PartialEq)]
pub enum AllocationValidationError {
    NegativeIncome(Money),
    PercentageOutOfRange { category: BudgetCategory, value: f64 },
    PercentagesDoNotSum(f64),
    EmptyExpenseName,
    NegativeExpense(Money),
}

impl fmt::Display for AllocationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeIncome(amount) => {
                write!(f, "Monthly income cannot be negative ({})", amount)
            }
            Self::PercentageOutOfRange { category, value } => write!(
                f,
                "{} percentage must be between 0 and 100 (got {})",
                category, value
            ),
            Self::PercentagesDoNotSum(total) => write!(
                f,
                "Percentages must total 100% (currently {:.1}%)",
                total
            ),
            Self::EmptyExpenseName => write!(f, "Fixed expense name cannot be empty"),
            Self::NegativeExpense(amount) => {
                write!(f, "Fixed expense amount cannot be negative ({})", amount)
            }
        }
    }
}

impl std::error::Error for AllocationValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AllocationSettings::default();
        assert_eq!(settings.monthly_income, Money::zero());
        assert_eq!(settings.percentages(), Percentages::new(50.0, 30.0, 20.0));
        assert!(!settings.is_locked);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_allocated_amounts() {
        let settings = AllocationSettings::with_income(Money::from_dollars(1000));
        assert_eq!(settings.allocated(BudgetCategory::Needs), Money::from_dollars(500));
        assert_eq!(settings.allocated(BudgetCategory::Wants), Money::from_dollars(300));
        assert_eq!(
            settings.allocated(BudgetCategory::Responsibilities),
            Money::from_dollars(200)
        );
    }

    #[test]
    fn test_sum_tolerance() {
        assert!(Percentages::new(50.0, 30.0, 20.05).validate().is_ok());
        assert!(Percentages::new(33.34, 33.33, 33.33).validate().is_ok());
        assert_eq!(
            Percentages::new(50.0, 30.0, 25.0).validate(),
            Err(AllocationValidationError::PercentagesDoNotSum(105.0))
        );
    }

    #[test]
    fn test_out_of_range_rejected() {
        let result = Percentages::new(110.0, -5.0, -5.0).validate();
        assert!(matches!(
            result,
            Err(AllocationValidationError::PercentageOutOfRange {
                category: BudgetCategory::Needs,
                ..
            })
        ));
        assert!(Percentages::new(f64::NAN, 50.0, 50.0).validate().is_err());
    }

    #[test]
    fn test_negative_income_rejected() {
        let settings = AllocationSettings::with_income(Money::from_cents(-1));
        assert!(matches!(
            settings.validate(),
            Err(AllocationValidationError::NegativeIncome(_))
        ));
    }

    #[test]
    fn test_rebalance_proportional() {
        let p = Percentages::new(50.0, 30.0, 20.0).rebalance(BudgetCategory::Wants, 40.0);
        assert_eq!(p, Percentages::new(42.86, 40.0, 17.14));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_rebalance_both_others_zero() {
        let p = Percentages::new(100.0, 0.0, 0.0).rebalance(BudgetCategory::Needs, 50.0);
        assert_eq!(p, Percentages::new(50.0, 30.0, 20.0));
    }

    #[test]
    fn test_rebalance_clamps_value() {
        let p = Percentages::default().rebalance(BudgetCategory::Responsibilities, 150.0);
        assert_eq!(p, Percentages::new(0.0, 0.0, 100.0));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_rebalance_always_sums_to_hundred() {
        let mut p = Percentages::default();
        for (category, value) in [
            (BudgetCategory::Needs, 33.33),
            (BudgetCategory::Wants, 12.5),
            (BudgetCategory::Responsibilities, 71.0),
            (BudgetCategory::Needs, 0.0),
        ] {
            p = p.rebalance(category, value);
            assert!((p.total() - 100.0).abs() <= PERCENTAGE_TOLERANCE);
        }
    }

    #[test]
    fn test_fixed_expenses_total() {
        let mut settings = AllocationSettings::default();
        settings
            .fixed_expenses
            .push(FixedExpense::new("Rent", Money::from_dollars(400)));
        settings
            .fixed_expenses
            .push(FixedExpense::new("Phone", Money::from_cents(2550)));
        assert_eq!(settings.fixed_expenses_total(), Money::from_cents(42550));
    }

    #[test]
    fn test_fixed_expense_validation() {
        assert_eq!(
            FixedExpense::new("  ", Money::from_dollars(5)).validate(),
            Err(AllocationValidationError::EmptyExpenseName)
        );
        assert!(FixedExpense::new("Gym", Money::from_cents(-1)).validate().is_err());
    }
}
