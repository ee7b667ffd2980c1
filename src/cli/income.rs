//! Income CLI commands
//!
//! Sets the monthly income from a salary (after FNPF) or another source.

use clap::Subcommand;

use super::parse_amount;
use crate::calculators::FnpfRates;
use crate::config::settings::Settings;
use crate::display;
use crate::error::FlowResult;
use crate::models::{IncomeSource, Money};
use crate::services::IncomeService;
use crate::storage::Storage;

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Salaried income; FNPF is deducted to get the monthly income
    Salary {
        /// Gross monthly salary
        gross: String,
        /// Voluntary FNPF contribution per month
        #[arg(long)]
        voluntary: Option<String>,
        /// Employee FNPF rate in percent (defaults to the configured rate)
        #[arg(long)]
        employee_rate: Option<f64>,
        /// Employer FNPF rate in percent (defaults to the configured rate)
        #[arg(long)]
        employer_rate: Option<f64>,
    },

    /// Any other income, used as-is
    Other {
        /// Monthly amount
        amount: String,
        /// Where the income comes from
        description: String,
    },

    /// Show the current income source
    Show,
}

/// Handle an income command
pub fn handle_income_command(
    storage: &Storage,
    settings: &Settings,
    cmd: IncomeCommands,
) -> FlowResult<()> {
    let service = IncomeService::new(storage);

    match cmd {
        IncomeCommands::Salary {
            gross,
            voluntary,
            employee_rate,
            employer_rate,
        } => {
            let rates = FnpfRates::new(
                employee_rate.unwrap_or(settings.fnpf_rates.employee_rate),
                employer_rate.unwrap_or(settings.fnpf_rates.employer_rate),
            );
            let voluntary_amount = match voluntary {
                Some(v) => parse_amount(&v)?,
                None => Money::zero(),
            };

            let net = service.set_income(IncomeSource::Salary {
                gross_monthly: parse_amount(&gross)?,
                rates,
                voluntary_amount,
            })?;
            println!("Monthly income set to {} after FNPF.", settings.format_money(net));
        }

        IncomeCommands::Other {
            amount,
            description,
        } => {
            let net = service.set_income(IncomeSource::Other {
                amount: parse_amount(&amount)?,
                description,
            })?;
            println!("Monthly income set to {}.", settings.format_money(net));
        }

        IncomeCommands::Show => {
            let config = service.current()?;
            let Some(source) = &config.source else {
                println!("No income configured.");
                println!("Set one with: financeflow income salary <gross>");
                return Ok(());
            };

            println!("Income: {}", source);
            if let Some(updated) = config.updated_at {
                println!("Updated: {}", updated.format("%Y-%m-%d %H:%M UTC"));
            }
            if let (Some(breakdown), IncomeSource::Salary { rates, .. }) =
                (service.breakdown()?, source)
            {
                println!();
                print!(
                    "{}",
                    display::format_fnpf(&breakdown, rates, &settings.currency_symbol)
                );
            }
        }
    }

    Ok(())
}
