//! Core data models for FinanceFlow
//!
//! The budgeting domain: allocation settings, the transaction ledger,
//! Want Wallet movements, goals, achievements and monthly archives.

pub mod achievement;
pub mod allocation;
pub mod archive;
pub mod category;
pub mod goal;
pub mod ids;
pub mod income;
pub mod money;
pub mod period;
pub mod transaction;
pub mod wallet;

pub use achievement::{
    Achievement, AchievementDefinition, AchievementKind, AchievementRule, AchievementStats,
    CATALOG,
};
pub use allocation::{AllocationSettings, AllocationValidationError, FixedExpense, Percentages};
pub use archive::MonthlyArchiveEntry;
pub use category::BudgetCategory;
pub use goal::{FinancialGoal, GoalPriority, GoalValidationError, NewGoal};
pub use ids::{ArchiveId, FixedExpenseId, GoalId, TransactionId, WalletEntryId};
pub use income::{IncomeConfig, IncomeSource};
pub use money::Money;
pub use period::MonthPeriod;
pub use transaction::{Transaction, TransactionValidationError};
pub use wallet::{WalletTransaction, WalletTransactionKind, WantWalletState};
