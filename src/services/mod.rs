//! Service layer for FinanceFlow
//!
//! Services borrow the [`Storage`](crate::storage::Storage) coordinator and
//! implement the budgeting commands: validation happens before anything is
//! mutated, every change is written through and audited, and achievements
//! are re-evaluated after operations that can move the stats.

pub mod achievement;
pub mod budget;
pub mod calculator;
pub mod goal;
pub mod income;
pub mod rollover;
pub mod wallet;

pub use achievement::AchievementService;
pub use budget::{AllocationUpdate, BudgetService};
pub use calculator::{summarize, BudgetSummary, CategorySummary};
pub use goal::GoalService;
pub use income::IncomeService;
pub use rollover::{RolloverReport, RolloverService};
pub use wallet::{GoalContribution, WalletService, WalletTotals};
