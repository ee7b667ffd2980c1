//! FNPF and loan calculator display

use tabled::{settings::Style, Table, Tabled};

use super::report::format_header;
use crate::calculators::{FnpfBreakdown, FnpfRates, LoanSummary, LoanTerms};

pub fn format_fnpf(breakdown: &FnpfBreakdown, rates: &FnpfRates, currency: &str) -> String {
    let mut output = format_header("FNPF Breakdown");
    let line = |label: &str, amount: crate::models::Money| {
        format!("{:<28} {:>12}\n", label, amount.format_with_symbol(currency))
    };

    output.push_str(&line("Gross salary", breakdown.gross_salary));
    output.push_str(&line(
        &format!("Employee ({}%)", rates.employee_rate),
        breakdown.employee_contribution,
    ));
    if !breakdown.voluntary_contribution.is_zero() {
        output.push_str(&line("Voluntary", breakdown.voluntary_contribution));
    }
    output.push_str(&line("Net salary", breakdown.net_salary));
    output.push('\n');
    output.push_str(&line(
        &format!("Employer ({}%)", rates.employer_rate),
        breakdown.employer_contribution,
    ));
    output.push_str(&line("Total to FNPF", breakdown.total_contribution));

    output
}

#[derive(Tabled)]
struct ScheduleRow {
    #[tabled(rename = "Month")]
    month: u32,
    #[tabled(rename = "Payment")]
    payment: String,
    #[tabled(rename = "Principal")]
    principal: String,
    #[tabled(rename = "Interest")]
    interest: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

/// Loan totals, optionally followed by the amortization schedule
pub fn format_loan(
    terms: &LoanTerms,
    summary: &LoanSummary,
    show_schedule: bool,
    currency: &str,
) -> String {
    let mut output = format_header("Loan");

    output.push_str(&format!(
        "Principal:       {}\n",
        terms.principal.format_with_symbol(currency)
    ));
    output.push_str(&format!("Annual rate:     {}%\n", terms.annual_rate));
    output.push_str(&format!("Term:            {} months\n", terms.term_months));
    output.push_str(&format!(
        "Monthly payment: {}\n",
        summary.monthly_payment.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "Total paid:      {}\n",
        summary.total_paid.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "Total interest:  {}\n",
        summary.total_interest.format_with_symbol(currency)
    ));

    if show_schedule {
        let rows = summary.schedule.iter().map(|row| ScheduleRow {
            month: row.month,
            payment: row.payment.format_with_symbol(currency),
            principal: row.principal.format_with_symbol(currency),
            interest: row.interest.format_with_symbol(currency),
            balance: row.remaining_balance.format_with_symbol(currency),
        });
        let mut table = Table::new(rows);
        table.with(Style::psql());
        output.push('\n');
        output.push_str(&table.to_string());
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::{fnpf, loan};
    use crate::models::Money;

    #[test]
    fn test_format_fnpf() {
        let rates = FnpfRates::default();
        let breakdown = fnpf::calculate(Money::from_dollars(1000), rates, Money::zero()).unwrap();

        let output = format_fnpf(&breakdown, &rates, "$");
        assert!(output.contains("Employee (8%)"));
        assert!(output.contains("$920.00"));
        assert!(output.contains("$160.00"));
        assert!(!output.contains("Voluntary"));
    }

    #[test]
    fn test_format_loan_with_schedule() {
        let terms = LoanTerms::new(Money::from_dollars(10_000), 6.0, 12);
        let summary = loan::summarize(&terms).unwrap();

        let brief = format_loan(&terms, &summary, false, "$");
        assert!(brief.contains("Monthly payment: $860.66"));
        assert!(!brief.contains("9189.34"));

        let full = format_loan(&terms, &summary, true, "$");
        assert!(full.contains("$9189.34"));
        assert!(full.contains("$810.66"));
    }
}
