//! Budget categories of the 50/30/20 model
//!
//! Every transaction belongs to exactly one of the three top-level categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three budget buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetCategory {
    /// Essentials: housing, groceries, utilities
    Needs,
    /// Discretionary spending; underspend feeds the Want Wallet
    Wants,
    /// Savings, debt repayment and fixed obligations
    Responsibilities,
}

impl BudgetCategory {
    /// All categories in display order
    pub const ALL: [BudgetCategory; 3] = [Self::Needs, Self::Wants, Self::Responsibilities];

    /// The 50/30/20 default share for this category
    pub fn default_percentage(&self) -> f64 {
        match self {
            Self::Needs => 50.0,
            Self::Wants => 30.0,
            Self::Responsibilities => 20.0,
        }
    }

    /// The two categories other than this one, in display order
    pub fn others(&self) -> [BudgetCategory; 2] {
        match self {
            Self::Needs => [Self::Wants, Self::Responsibilities],
            Self::Wants => [Self::Needs, Self::Responsibilities],
            Self::Responsibilities => [Self::Needs, Self::Wants],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Needs => "needs",
            Self::Wants => "wants",
            Self::Responsibilities => "responsibilities",
        }
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Needs => "Needs",
            Self::Wants => "Wants",
            Self::Responsibilities => "Responsibilities",
        };
        f.pad(label)
    }
}

impl FromStr for BudgetCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "needs" | "need" | "n" => Ok(Self::Needs),
            "wants" | "want" | "w" => Ok(Self::Wants),
            "responsibilities" | "responsibility" | "resp" | "r" => Ok(Self::Responsibilities),
            other => Err(format!(
                "Unknown category '{}' (expected needs, wants or responsibilities)",
                other
            )),
        }
    }
}
