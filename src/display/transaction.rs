//! Transaction display formatting

use tabled::{settings::Style, Table, Tabled};

use super::report::truncate;
use crate::models::{Money, Transaction};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format the active ledger as a register
pub fn format_transaction_register(transactions: &[Transaction], currency: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions.iter().map(|txn| TransactionRow {
        id: txn.id.short(),
        date: txn.date.format("%Y-%m-%d").to_string(),
        category: txn.category.to_string(),
        description: truncate(&txn.description, 32),
        amount: txn.amount.format_with_symbol(currency),
    });
    let total: Money = transactions.iter().map(|t| t.amount).sum();

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!(
        "{}\n{} transaction(s), {} total\n",
        table,
        transactions.len(),
        total.format_with_symbol(currency)
    )
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Amount:      {}\n", txn.amount.format_with_symbol(currency)));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!("Description: {}\n", txn.description));

    if let Some(receipt) = &txn.receipt_url {
        output.push_str(&format!("Receipt:     {}\n", receipt));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BudgetCategory;
    use chrono::NaiveDate;

    fn sample() -> Transaction {
        Transaction::new(
            Money::from_cents(5000),
            "Test Store",
            BudgetCategory::Needs,
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        )
    }

    #[test]
    fn test_format_register() {
        let formatted = format_transaction_register(&[sample(), sample()], "$");
        assert!(formatted.contains("2026-01-15"));
        assert!(formatted.contains("Test Store"));
        assert!(formatted.contains("$50.00"));
        assert!(formatted.contains("2 transaction(s), $100.00 total"));
    }

    #[test]
    fn test_format_empty_register() {
        let formatted = format_transaction_register(&[], "$");
        assert!(formatted.contains("No transactions found"));
    }

    #[test]
    fn test_format_transaction_details() {
        let txn = sample().with_receipt("receipts/store.jpg");
        let formatted = format_transaction_details(&txn, "$");
        assert!(formatted.contains("Test Store"));
        assert!(formatted.contains("Needs"));
        assert!(formatted.contains("receipts/store.jpg"));
    }
}
