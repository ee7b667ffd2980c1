//! Display formatting for terminal output
//!
//! Every formatter returns a `String` and takes the currency symbol from
//! the caller, so the CLI decides where and how output is printed.

pub mod achievement;
pub mod archive;
pub mod budget;
pub mod calculator;
pub mod goal;
pub mod report;
pub mod transaction;
pub mod wallet;

pub use achievement::{format_achievements, format_unlocked};
pub use archive::{format_archive, format_rollover_report};
pub use budget::{format_allocation, format_fixed_expenses, format_summary};
pub use calculator::{format_fnpf, format_loan};
pub use goal::{format_goal_details, format_goal_list};
pub use transaction::{format_transaction_details, format_transaction_register};
pub use wallet::format_wallet;
