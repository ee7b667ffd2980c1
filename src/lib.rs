//! FinanceFlow - a 50/30/20 budgeting engine
//!
//! Monthly income is split between needs, wants and responsibilities.
//! Unspent wants accumulate in the Want Wallet at month end, and the wallet
//! funds savings goals. Salaried income can be entered gross, with FNPF
//! deductions computed by the payroll calculator.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Error types
//! - `models`: Core data models (allocation, transactions, wallet, goals, ...)
//! - `calculators`: Stateless FNPF and loan calculators
//! - `storage`: Pluggable persistence and the repositories over it
//! - `services`: Budgeting commands and the month rollover
//! - `audit`: Audit logging
//! - `backup`: Backup management
//! - `export`: JSON, YAML and CSV export
//! - `cli` and `display`: The command-line front end
//!
//! # Example
//!
//! ```rust
//! use financeflow::models::{BudgetCategory, Money, Transaction};
//! use financeflow::services::{AllocationUpdate, BudgetService};
//! use financeflow::storage::Storage;
//!
//! let storage = Storage::in_memory();
//! let budget = BudgetService::new(&storage);
//! budget
//!     .update_allocation_settings(AllocationUpdate {
//!         monthly_income: Some(Money::from_dollars(1000)),
//!         ..Default::default()
//!     })
//!     .unwrap();
//! budget
//!     .add_transaction(Transaction::new(
//!         Money::from_dollars(120),
//!         "Dinner out",
//!         BudgetCategory::Wants,
//!         chrono::Local::now().date_naive(),
//!     ))
//!     .unwrap();
//!
//! assert_eq!(budget.summary().unwrap().wants_delta(), Money::from_dollars(180));
//! ```

pub mod audit;
pub mod backup;
pub mod calculators;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{FlowError, FlowResult};
