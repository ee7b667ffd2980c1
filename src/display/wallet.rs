//! Want Wallet display

use tabled::{settings::Style, Table, Tabled};

use super::report::{format_header, truncate};
use crate::models::{Money, WalletTransaction};
use crate::services::WalletTotals;

#[derive(Tabled)]
struct WalletRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Balance, per-kind totals and the newest `limit` ledger entries
pub fn format_wallet(
    balance: Money,
    totals: &WalletTotals,
    history: &[WalletTransaction],
    limit: usize,
    currency: &str,
) -> String {
    let mut output = format_header("Want Wallet");

    output.push_str(&format!("Balance:       {}\n", balance.format_with_symbol(currency)));
    output.push_str(&format!(
        "Accumulated:   {}\n",
        totals.accumulated.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "Withdrawn:     {}\n",
        totals.withdrawn.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "To goals:      {}\n\n",
        totals.contributed.format_with_symbol(currency)
    ));

    if history.is_empty() {
        output.push_str("No wallet activity yet.\n");
        return output;
    }

    let rows = history.iter().take(limit).map(|entry| WalletRow {
        date: entry.date.format("%Y-%m-%d").to_string(),
        kind: entry.kind.to_string(),
        description: truncate(&entry.description, 36),
        amount: entry.signed_amount().format_with_symbol(currency),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    output.push_str(&table.to_string());
    output.push('\n');

    if history.len() > limit {
        output.push_str(&format!("... and {} older entries\n", history.len() - limit));
    }

    output
}
