//! Achievement model and catalog
//!
//! Achievements are never edited directly. They are unlocked by evaluating
//! budget statistics against the fixed [`CATALOG`], and stay unlocked.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementKind {
    Savings,
    Goal,
    Streak,
    Milestone,
}

impl fmt::Display for AchievementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Savings => "Savings",
            Self::Goal => "Goal",
            Self::Streak => "Streak",
            Self::Milestone => "Milestone",
        };
        f.pad(label)
    }
}

/// An unlocked achievement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    /// Catalog key; unique among unlocked achievements
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    #[serde(rename = "type")]
    pub kind: AchievementKind,
    pub unlocked_date: DateTime<Utc>,
}

/// Statistics the catalog rules are evaluated against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AchievementStats {
    pub want_wallet_balance: Money,
    pub goals_completed: usize,
    pub goals_created: usize,
    pub months_tracked: usize,
}

/// Threshold rule of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementRule {
    WalletBalanceAtLeast(Money),
    GoalsCompletedAtLeast(usize),
    GoalsCreatedAtLeast(usize),
    MonthsTrackedAtLeast(usize),
}

impl AchievementRule {
    pub fn is_satisfied(&self, stats: &AchievementStats) -> bool {
        match *self {
            Self::WalletBalanceAtLeast(threshold) => stats.want_wallet_balance >= threshold,
            Self::GoalsCompletedAtLeast(n) => stats.goals_completed >= n,
            Self::GoalsCreatedAtLeast(n) => stats.goals_created >= n,
            Self::MonthsTrackedAtLeast(n) => stats.months_tracked >= n,
        }
    }
}

/// A catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub kind: AchievementKind,
    pub rule: AchievementRule,
}

impl AchievementDefinition {
    pub fn unlock(&self, at: DateTime<Utc>) -> Achievement {
        Achievement {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            icon: self.icon.to_string(),
            kind: self.kind,
            unlocked_date: at,
        }
    }
}

pub const CATALOG: &[AchievementDefinition] = &[
    AchievementDefinition {
        id: "wallet-100",
        name: "Piggy Bank",
        description: "Save $100 in your Want Wallet",
        icon: "🐷",
        kind: AchievementKind::Savings,
        rule: AchievementRule::WalletBalanceAtLeast(Money::from_dollars(100)),
    },
    AchievementDefinition {
        id: "wallet-500",
        name: "Smart Saver",
        description: "Save $500 in your Want Wallet",
        icon: "💰",
        kind: AchievementKind::Savings,
        rule: AchievementRule::WalletBalanceAtLeast(Money::from_dollars(500)),
    },
    AchievementDefinition {
        id: "wallet-1000",
        name: "Wealth Builder",
        description: "Save $1,000 in your Want Wallet",
        icon: "💎",
        kind: AchievementKind::Savings,
        rule: AchievementRule::WalletBalanceAtLeast(Money::from_dollars(1000)),
    },
    AchievementDefinition {
        id: "first-goal",
        name: "Dream Big",
        description: "Create your first financial goal",
        icon: "🎯",
        kind: AchievementKind::Milestone,
        rule: AchievementRule::GoalsCreatedAtLeast(1),
    },
    AchievementDefinition {
        id: "goal-achieved",
        name: "Goal Getter",
        description: "Complete a financial goal",
        icon: "🏆",
        kind: AchievementKind::Goal,
        rule: AchievementRule::GoalsCompletedAtLeast(1),
    },
    AchievementDefinition {
        id: "goal-collector",
        name: "Goal Collector",
        description: "Complete five financial goals",
        icon: "🥇",
        kind: AchievementKind::Goal,
        rule: AchievementRule::GoalsCompletedAtLeast(5),
    },
    AchievementDefinition {
        id: "first-month",
        name: "Month One",
        description: "Close out your first budget month",
        icon: "📅",
        kind: AchievementKind::Milestone,
        rule: AchievementRule::MonthsTrackedAtLeast(1),
    },
    AchievementDefinition {
        id: "streak-3",
        name: "Budget Streak",
        description: "Track your budget for 3 months",
        icon: "🔥",
        kind: AchievementKind::Streak,
        rule: AchievementRule::MonthsTrackedAtLeast(3),
    },
    AchievementDefinition {
        id: "streak-6",
        name: "Half-Year Hero",
        description: "Track your budget for 6 months",
        icon: "⭐",
        kind: AchievementKind::Streak,
        rule: AchievementRule::MonthsTrackedAtLeast(6),
    },
    AchievementDefinition {
        id: "streak-12",
        name: "Budget Master",
        description: "Track your budget for a full year",
        icon: "👑",
        kind: AchievementKind::Streak,
        rule: AchievementRule::MonthsTrackedAtLeast(12),
    },
];
