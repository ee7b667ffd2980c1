//! FNPF and loan calculator commands
//!
//! Pure calculations; nothing is stored.

use super::parse_amount;
use crate::calculators::{fnpf, loan, FnpfRates, LoanTerms};
use crate::config::settings::Settings;
use crate::display;
use crate::error::FlowResult;
use crate::models::Money;

pub fn handle_fnpf_command(
    settings: &Settings,
    gross: &str,
    voluntary: Option<&str>,
    employee_rate: Option<f64>,
    employer_rate: Option<f64>,
) -> FlowResult<()> {
    let rates = FnpfRates::new(
        employee_rate.unwrap_or(settings.fnpf_rates.employee_rate),
        employer_rate.unwrap_or(settings.fnpf_rates.employer_rate),
    );
    let voluntary = voluntary.map(parse_amount).transpose()?.unwrap_or(Money::zero());

    let breakdown = fnpf::calculate(parse_amount(gross)?, rates, voluntary)?;
    print!(
        "{}",
        display::format_fnpf(&breakdown, &rates, &settings.currency_symbol)
    );
    Ok(())
}

pub fn handle_loan_command(
    settings: &Settings,
    principal: &str,
    annual_rate: f64,
    term_months: u32,
    show_schedule: bool,
) -> FlowResult<()> {
    let terms = LoanTerms::new(parse_amount(principal)?, annual_rate, term_months);
    let summary = loan::summarize(&terms)?;
    print!(
        "{}",
        display::format_loan(&terms, &summary, show_schedule, &settings.currency_symbol)
    );
    Ok(())
}
