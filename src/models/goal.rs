//! Financial goal model
//!
//! Named savings targets funded from the Want Wallet.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::GoalId;
use super::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl GoalPriority {
    /// Sort key, highest priority first
    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

impl fmt::Display for GoalPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };
        f.pad(label)
    }
}

impl FromStr for GoalPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" | "med" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("Unknown priority '{}' (expected low, medium or high)", other)),
        }
    }
}

/// Input for creating a goal
#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: Money,
    pub initial_amount: Money,
    pub description: Option<String>,
    pub category: String,
    pub priority: GoalPriority,
    pub target_date: Option<NaiveDate>,
}

impl NewGoal {
    pub fn new(name: impl Into<String>, target_amount: Money) -> Self {
        Self {
            name: name.into(),
            target_amount,
            initial_amount: Money::zero(),
            description: None,
            category: "General".to_string(),
            priority: GoalPriority::default(),
            target_date: None,
        }
    }

    pub fn initial_amount(mut self, amount: Money) -> Self {
        self.initial_amount = amount;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn priority(mut self, priority: GoalPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn target_date(mut self, date: NaiveDate) -> Self {
        self.target_date = Some(date);
        self
    }
}

/// A savings target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialGoal {
    pub id: GoalId,
    pub name: String,
    pub target_amount: Money,
    pub current_amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: GoalPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    pub is_completed: bool,
    pub created_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,
}

impl FinancialGoal {
    /// Build a goal from validated input; a goal created at or above its
    /// target starts out completed
    pub fn create(new_goal: NewGoal) -> Result<Self, GoalValidationError> {
        let name = new_goal.name.trim().to_string();
        if name.is_empty() {
            return Err(GoalValidationError::EmptyName);
        }
        if !new_goal.target_amount.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget(new_goal.target_amount));
        }
        if new_goal.initial_amount.is_negative() {
            return Err(GoalValidationError::NegativeInitialAmount(new_goal.initial_amount));
        }

        let category = match new_goal.category.trim() {
            "" => "General".to_string(),
            c => c.to_string(),
        };

        let now = Utc::now();
        let mut goal = Self {
            id: GoalId::new(),
            name,
            target_amount: new_goal.target_amount,
            current_amount: new_goal.initial_amount,
            description: new_goal
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            category,
            priority: new_goal.priority,
            target_date: new_goal.target_date,
            is_completed: false,
            created_date: now,
            completed_date: None,
        };
        goal.refresh_completion(now);
        Ok(goal)
    }

    /// Amount still needed, never negative
    pub fn remaining_amount(&self) -> Money {
        let remaining = self.target_amount - self.current_amount;
        if remaining.is_negative() {
            Money::zero()
        } else {
            remaining
        }
    }

    /// Progress toward the target, capped at 100
    pub fn progress_percent(&self) -> f64 {
        self.current_amount.ratio_of(self.target_amount).clamp(0.0, 1.0) * 100.0
    }

    /// Check a contribution against the remaining amount
    pub fn check_contribution(&self, amount: Money) -> Result<(), GoalValidationError> {
        if !amount.is_positive() {
            return Err(GoalValidationError::NonPositiveContribution(amount));
        }
        let remaining = self.remaining_amount();
        if amount > remaining {
            return Err(GoalValidationError::ExceedsRemaining {
                requested: amount,
                remaining,
            });
        }
        Ok(())
    }

    /// Add a checked contribution. Returns true when this contribution
    /// completed the goal.
    pub fn apply_contribution(
        &mut self,
        amount: Money,
        now: DateTime<Utc>,
    ) -> Result<bool, GoalValidationError> {
        self.check_contribution(amount)?;
        let was_completed = self.is_completed;
        self.current_amount += amount;
        self.refresh_completion(now);
        Ok(!was_completed && self.is_completed)
    }

    /// Completion only ever moves from false to true
    fn refresh_completion(&mut self, now: DateTime<Utc>) {
        if !self.is_completed && self.current_amount >= self.target_amount {
            self.is_completed = true;
            self.completed_date = Some(now);
        }
    }
}

/// Validation errors for goals and contributions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyName,
    NonPositiveTarget(Money),
    NegativeInitialAmount(Money),
    NonPositiveContribution(Money),
    ExceedsRemaining { requested: Money, remaining: Money },
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Goal name cannot be empty"),
            Self::NonPositiveTarget(amount) => {
                write!(f, "Goal target must be greater than zero (got {})", amount)
            }
            Self::NegativeInitialAmount(amount) => {
                write!(f, "Goal starting amount cannot be negative (got {})", amount)
            }
            Self::NonPositiveContribution(amount) => {
                write!(f, "Contribution must be greater than zero (got {})", amount)
            }
            Self::ExceedsRemaining {
                requested,
                remaining,
            } => write!(
                f,
                "Contribution of {} exceeds the {} still needed for this goal",
                requested, remaining
            ),
        }
    }
}

impl std::error::Error for GoalValidationError {}
