//! Transaction CLI commands

use clap::Subcommand;

use super::{parse_amount, parse_date_or_today};
use crate::config::settings::Settings;
use crate::display;
use crate::error::{FlowError, FlowResult};
use crate::models::{BudgetCategory, Transaction};
use crate::services::BudgetService;
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record spending in the active month
    Add {
        /// Amount spent (positive, e.g., "45.50")
        amount: String,
        /// What the money was spent on
        description: String,
        /// Category (needs, wants or responsibilities)
        #[arg(short, long)]
        category: String,
        /// Transaction date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Receipt path or URL
        #[arg(short, long)]
        receipt: Option<String>,
    },

    /// List the active month's transactions
    List {
        /// Only show one category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show one transaction
    Show {
        /// Transaction ID (full or short)
        transaction: String,
    },

    /// Delete a transaction
    Remove {
        /// Transaction ID (full or short)
        transaction: String,
    },
}

pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> FlowResult<()> {
    let service = BudgetService::new(storage);
    let currency = &settings.currency_symbol;

    match cmd {
        TransactionCommands::Add {
            amount,
            description,
            category,
            date,
            receipt,
        } => {
            let category: BudgetCategory = category.parse().map_err(FlowError::Validation)?;
            let mut txn = Transaction::new(
                parse_amount(&amount)?,
                description,
                category,
                parse_date_or_today(date.as_deref())?,
            );
            if let Some(receipt) = receipt {
                txn = txn.with_receipt(receipt);
            }

            let txn = service.add_transaction(txn)?;
            println!(
                "Recorded {} for '{}' under {} [{}]",
                settings.format_money(txn.amount),
                txn.description,
                txn.category,
                txn.id.short()
            );

            let summary = service.summary()?;
            let cat = summary.get(txn.category);
            if cat.is_over_budget() {
                println!(
                    "Warning: {} is over budget by {}",
                    txn.category,
                    settings.format_money(-cat.remaining)
                );
            }
        }

        TransactionCommands::List { category } => {
            let category = category
                .map(|c| c.parse::<BudgetCategory>().map_err(FlowError::Validation))
                .transpose()?;
            let transactions = service.list_transactions(category)?;
            print!(
                "{}",
                display::format_transaction_register(&transactions, currency)
            );
        }

        TransactionCommands::Show { transaction } => {
            let txn = service.find_transaction(&transaction)?;
            print!("{}", display::format_transaction_details(&txn, currency));
        }

        TransactionCommands::Remove { transaction } => {
            let txn = service.find_transaction(&transaction)?;
            if service.delete_transaction(txn.id)? {
                println!(
                    "Deleted '{}' ({})",
                    txn.description,
                    settings.format_money(txn.amount)
                );
            }
        }
    }

    Ok(())
}
