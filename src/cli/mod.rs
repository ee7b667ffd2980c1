//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod backup;
pub mod budget;
pub mod calculator;
pub mod export;
pub mod goal;
pub mod income;
pub mod rollover;
pub mod transaction;
pub mod wallet;

pub use audit::handle_audit_command;
pub use backup::{handle_backup_command, BackupCommands};
pub use budget::{
    handle_allocation_command, handle_expense_command, handle_history_command,
    handle_summary_command, AllocationCommands, ExpenseCommands,
};
pub use calculator::{handle_fnpf_command, handle_loan_command};
pub use export::{handle_export_command, ExportCommands};
pub use goal::{handle_achievements_command, handle_goal_command, GoalCommands};
pub use income::{handle_income_command, IncomeCommands};
pub use rollover::handle_rollover_command;
pub use transaction::{handle_transaction_command, TransactionCommands};
pub use wallet::{handle_wallet_command, WalletCommands};

use chrono::NaiveDate;

use crate::error::{FlowError, FlowResult};
use crate::models::Money;

/// Parse a user-entered amount such as "10.50", "$10.50" or "10"
pub(crate) fn parse_amount(input: &str) -> FlowResult<Money> {
    Money::parse(input).map_err(|e| {
        FlowError::Validation(format!(
            "Invalid amount format: '{}'. Use a format like '50.00' or '100'. Error: {}",
            input, e
        ))
    })
}

/// Parse a YYYY-MM-DD date, defaulting to today
pub(crate) fn parse_date_or_today(input: Option<&str>) -> FlowResult<NaiveDate> {
    match input {
        Some(date_str) => NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| {
            FlowError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", date_str))
        }),
        None => Ok(chrono::Local::now().date_naive()),
    }
}
