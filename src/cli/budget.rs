//! Budget CLI commands
//!
//! Summary, allocation settings, fixed expenses and the monthly history.

use clap::Subcommand;

use super::parse_amount;
use crate::config::settings::Settings;
use crate::display;
use crate::error::{FlowError, FlowResult};
use crate::models::BudgetCategory;
use crate::services::{AllocationUpdate, BudgetService};
use crate::storage::Storage;

/// Allocation subcommands
#[derive(Subcommand)]
pub enum AllocationCommands {
    /// Show income, percentages and lock state
    Show,

    /// Set income and/or percentages (the three must add up to 100)
    Set {
        /// Monthly income (e.g., "2500" or "2500.00")
        #[arg(short, long)]
        income: Option<String>,
        /// Needs percentage
        #[arg(short, long)]
        needs: Option<f64>,
        /// Wants percentage
        #[arg(short, long)]
        wants: Option<f64>,
        /// Responsibilities percentage
        #[arg(short, long)]
        responsibilities: Option<f64>,
    },

    /// Set one category's percentage and rebalance the other two
    Rebalance {
        /// Category (needs, wants or responsibilities)
        category: String,
        /// New percentage (0-100)
        percentage: f64,
    },

    /// Lock percentages and income against edits
    Lock,

    /// Unlock percentages and income
    Unlock,
}

/// Fixed expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Add a fixed monthly expense (charged to responsibilities)
    Add {
        /// Expense name
        name: String,
        /// Monthly amount
        amount: String,
    },

    /// List fixed expenses
    List,

    /// Remove a fixed expense
    Remove {
        /// Expense name or ID
        expense: String,
    },
}

pub fn handle_summary_command(storage: &Storage, settings: &Settings) -> FlowResult<()> {
    let service = BudgetService::new(storage);
    let summary = service.summary()?;
    let allocation = service.settings()?;

    print!(
        "{}",
        display::format_summary(&summary, &allocation, &settings.currency_symbol)
    );
    println!(
        "Want Wallet:      {:>12}",
        settings.format_money(storage.wallet.balance()?)
    );
    println!(
        "Bank balance:     {:>12}",
        settings.format_money(service.bank_balance()?)
    );

    Ok(())
}

pub fn handle_allocation_command(
    storage: &Storage,
    settings: &Settings,
    cmd: AllocationCommands,
) -> FlowResult<()> {
    let service = BudgetService::new(storage);
    let currency = &settings.currency_symbol;

    match cmd {
        AllocationCommands::Show => {
            print!("{}", display::format_allocation(&service.settings()?, currency));
        }

        AllocationCommands::Set {
            income,
            needs,
            wants,
            responsibilities,
        } => {
            let update = AllocationUpdate {
                monthly_income: income.as_deref().map(parse_amount).transpose()?,
                needs_percentage: needs,
                wants_percentage: wants,
                responsibilities_percentage: responsibilities,
            };
            if update.is_empty() {
                println!("Nothing to change. Pass --income or percentages.");
                return Ok(());
            }

            let updated = service.update_allocation_settings(update)?;
            println!("Allocation updated.");
            print!("{}", display::format_allocation(&updated, currency));
        }

        AllocationCommands::Rebalance {
            category,
            percentage,
        } => {
            let category: BudgetCategory = category.parse().map_err(FlowError::Validation)?;
            let updated = service.rebalance_allocation(category, percentage)?;
            println!("{} set to {}%; the others were rebalanced.", category, percentage);
            print!("{}", display::format_allocation(&updated, currency));
        }

        AllocationCommands::Lock => {
            service.lock_allocations()?;
            println!("Allocations locked.");
        }

        AllocationCommands::Unlock => {
            service.unlock_allocations()?;
            println!("Allocations unlocked.");
        }
    }

    Ok(())
}

pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> FlowResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        ExpenseCommands::Add { name, amount } => {
            let expense = service.add_fixed_expense(&name, parse_amount(&amount)?)?;
            println!(
                "Added fixed expense '{}' ({}) [{}]",
                expense.name,
                settings.format_money(expense.amount),
                expense.id.short()
            );
        }

        ExpenseCommands::List => {
            let allocation = service.settings()?;
            print!(
                "{}",
                display::format_fixed_expenses(&allocation.fixed_expenses, &settings.currency_symbol)
            );
        }

        ExpenseCommands::Remove { expense } => {
            let expense = service.find_fixed_expense(&expense)?;
            if service.delete_fixed_expense(expense.id)? {
                println!("Removed fixed expense '{}'", expense.name);
            }
        }
    }

    Ok(())
}

pub fn handle_history_command(storage: &Storage, settings: &Settings) -> FlowResult<()> {
    let archive = BudgetService::new(storage).archive()?;
    print!(
        "{}",
        display::format_archive(&archive, &settings.currency_symbol)
    );
    Ok(())
}
