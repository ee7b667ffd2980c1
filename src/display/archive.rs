//! Monthly archive and rollover display

use tabled::{settings::Style, Table, Tabled};

use super::achievement::format_unlocked;
use super::report::format_header;
use crate::models::MonthlyArchiveEntry;
use crate::services::RolloverReport;

#[derive(Tabled)]
struct ArchiveRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Txns")]
    transactions: usize,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
}

/// Closed months, newest first
pub fn format_archive(archive: &[MonthlyArchiveEntry], currency: &str) -> String {
    if archive.is_empty() {
        return "No months archived yet. Run a rollover at month end.\n".to_string();
    }

    let rows = archive.iter().map(|entry| ArchiveRow {
        month: entry.label(),
        income: entry
            .settings_snapshot
            .monthly_income
            .format_with_symbol(currency),
        transactions: entry.transaction_count(),
        spent: entry.total_spent.format_with_symbol(currency),
        remaining: entry.remaining_salary.format_with_symbol(currency),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n{} month(s) tracked\n", table, archive.len())
}

pub fn format_rollover_report(report: &RolloverReport, currency: &str) -> String {
    let mut output = format_header(&format!("Closed {}", report.entry.label()));

    output.push_str(&format!(
        "Archived transactions: {}\n",
        report.entry.transaction_count()
    ));
    output.push_str(&format!(
        "Total spent:           {}\n",
        report.entry.total_spent.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "Remaining salary:      {}\n",
        report.entry.remaining_salary.format_with_symbol(currency)
    ));

    let wants = if report.wants_delta.is_positive() {
        format!(
            "{} moved to the Want Wallet",
            report.wants_delta.format_with_symbol(currency)
        )
    } else if report.wants_delta.is_negative() {
        format!(
            "{} overspend deducted from the Want Wallet",
            report.wants_delta.abs().format_with_symbol(currency)
        )
    } else {
        "Wants budget spent exactly".to_string()
    };
    output.push_str(&format!("Wants:                 {}\n", wants));
    output.push_str(&format!(
        "Want Wallet balance:   {}\n",
        report.want_wallet_balance.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "Bank balance:          {}\n",
        report.bank_balance.format_with_symbol(currency)
    ));

    if let Some(backup) = &report.backup {
        output.push_str(&format!("Backup:                {}\n", backup.display()));
    }
    output.push_str(&format_unlocked(&report.new_achievements));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AllocationSettings, Money, MonthPeriod};

    fn entry() -> MonthlyArchiveEntry {
        MonthlyArchiveEntry::new(
            MonthPeriod::new(2026, 9).unwrap(),
            Vec::new(),
            AllocationSettings::with_income(Money::from_dollars(1000)),
            Money::from_dollars(120),
            Money::from_dollars(880),
        )
    }

    #[test]
    fn test_format_archive() {
        let output = format_archive(&[entry()], "$");
        assert!(output.contains("September 2026"));
        assert!(output.contains("$880.00"));
        assert!(output.contains("1 month(s) tracked"));
        assert!(format_archive(&[], "$").contains("No months archived"));
    }

    #[test]
    fn test_format_rollover_report() {
        let report = RolloverReport {
            entry: entry(),
            wants_delta: Money::from_dollars(180),
            bank_balance: Money::from_dollars(880),
            want_wallet_balance: Money::from_dollars(180),
            new_achievements: Vec::new(),
            backup: None,
        };

        let output = format_rollover_report(&report, "$");
        assert!(output.starts_with("Closed September 2026"));
        assert!(output.contains("$180.00 moved to the Want Wallet"));
        assert!(output.contains("Bank balance:          $880.00"));

        let overspent = RolloverReport {
            wants_delta: Money::from_dollars(-25),
            ..report
        };
        assert!(format_rollover_report(&overspent, "$")
            .contains("$25.00 overspend deducted"));
    }
}
