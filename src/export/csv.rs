//! CSV Export functionality
//!
//! Exports the active month's transactions and the monthly archive to
//! spreadsheet-friendly CSV.

use std::io::Write;

use crate::error::{FlowError, FlowResult};
use crate::models::Money;
use crate::storage::Storage;

fn csv_err(e: csv::Error) -> FlowError {
    FlowError::Export(e.to_string())
}

fn amount(money: Money) -> String {
    format!("{:.2}", money.as_f64())
}

/// Export the active month's transactions, oldest first
pub fn export_transactions_csv<W: Write + ?Sized>(
    storage: &Storage,
    writer: &mut W,
) -> FlowResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["ID", "Date", "Category", "Description", "Amount", "Receipt"])
        .map_err(csv_err)?;

    for txn in storage.budget.transactions()? {
        csv_writer
            .write_record([
                txn.id.to_string(),
                txn.date.to_string(),
                txn.category.to_string(),
                txn.description.clone(),
                amount(txn.amount),
                txn.receipt_url.clone().unwrap_or_default(),
            ])
            .map_err(csv_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| FlowError::Export(e.to_string()))?;
    Ok(())
}

/// Export one row per archived month, newest first
pub fn export_archive_csv<W: Write + ?Sized>(
    storage: &Storage,
    writer: &mut W,
) -> FlowResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "Month",
            "Year",
            "Income",
            "Needs %",
            "Wants %",
            "Responsibilities %",
            "Transactions",
            "Total Spent",
            "Remaining Salary",
            "Archived At",
        ])
        .map_err(csv_err)?;

    for entry in storage.budget.archive()? {
        let settings = &entry.settings_snapshot;
        csv_writer
            .write_record([
                entry.month.clone(),
                entry.year.to_string(),
                amount(settings.monthly_income),
                format!("{:.1}", settings.needs_percentage),
                format!("{:.1}", settings.wants_percentage),
                format!("{:.1}", settings.responsibilities_percentage),
                entry.transaction_count().to_string(),
                amount(entry.total_spent),
                amount(entry.remaining_salary),
                entry.archived_at.to_rfc3339(),
            ])
            .map_err(csv_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| FlowError::Export(e.to_string()))?;
    Ok(())
}
