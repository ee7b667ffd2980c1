//! Want Wallet CLI commands

use clap::Subcommand;

use super::parse_amount;
use crate::config::settings::Settings;
use crate::display;
use crate::error::FlowResult;
use crate::services::WalletService;
use crate::storage::Storage;

/// Want Wallet subcommands
#[derive(Subcommand)]
pub enum WalletCommands {
    /// Show balance and recent movements
    Show {
        /// Number of entries to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Spend money from the wallet
    Withdraw {
        /// Amount to withdraw
        amount: String,
        /// What it was spent on
        description: String,
    },
}

pub fn handle_wallet_command(
    storage: &Storage,
    settings: &Settings,
    cmd: WalletCommands,
) -> FlowResult<()> {
    let service = WalletService::new(storage);

    match cmd {
        WalletCommands::Show { limit } => {
            print!(
                "{}",
                display::format_wallet(
                    service.balance()?,
                    &service.totals()?,
                    &service.history()?,
                    limit,
                    &settings.currency_symbol,
                )
            );
        }

        WalletCommands::Withdraw {
            amount,
            description,
        } => {
            let entry = service.withdraw(parse_amount(&amount)?, &description)?;
            println!(
                "Withdrew {} for '{}'. Balance: {}",
                settings.format_money(entry.amount),
                entry.description,
                settings.format_money(service.balance()?)
            );
        }
    }

    Ok(())
}
