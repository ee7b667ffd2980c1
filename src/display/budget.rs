//! Budget summary and allocation display

use tabled::{settings::Style, Table, Tabled};

use super::report::{format_bar, format_header, format_percentage};
use crate::models::{AllocationSettings, FixedExpense};
use crate::services::BudgetSummary;

const BAR_WIDTH: usize = 20;

/// Category-by-category view of the current month
pub fn format_summary(
    summary: &BudgetSummary,
    settings: &AllocationSettings,
    currency: &str,
) -> String {
    let mut output = format_header("Budget Summary");

    let lock = if settings.is_locked { "  [locked]" } else { "" };
    output.push_str(&format!(
        "Monthly income: {}{}\n\n",
        summary.monthly_income.format_with_symbol(currency),
        lock
    ));

    output.push_str(&format!(
        "{:<24} {:>12} {:>12} {:>12}  {}\n",
        "Category", "Allocated", "Spent", "Remaining", "Progress"
    ));

    for cat in summary.categories() {
        let label = format!(
            "{} ({})",
            cat.category,
            format_percentage(settings.percentage(cat.category))
        );
        let flag = if cat.is_over_budget() { " OVER" } else { "" };
        output.push_str(&format!(
            "{:<24} {:>12} {:>12} {:>12}  {} {:>3.0}%{}\n",
            label,
            cat.allocated.format_with_symbol(currency),
            cat.spent.format_with_symbol(currency),
            cat.remaining.format_with_symbol(currency),
            format_bar(cat.progress_percent(), BAR_WIDTH),
            cat.progress_percent(),
            flag
        ));
    }

    output.push('\n');
    output.push_str(&format!(
        "Fixed expenses:   {:>12}\n",
        summary.fixed_expenses_total.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "Total spent:      {:>12}\n",
        summary.total_spent.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "Remaining salary: {:>12}\n",
        summary.remaining_salary.format_with_symbol(currency)
    ));

    output
}

/// Percentages, lock state and fixed expenses
pub fn format_allocation(settings: &AllocationSettings, currency: &str) -> String {
    let mut output = format_header("Allocation");

    output.push_str(&format!(
        "Monthly income:   {}\n",
        settings.monthly_income.format_with_symbol(currency)
    ));
    for category in crate::models::BudgetCategory::ALL {
        output.push_str(&format!(
            "{:<17} {:>6}  ({})\n",
            format!("{}:", category),
            format_percentage(settings.percentage(category)),
            settings.allocated(category).format_with_symbol(currency)
        ));
    }
    output.push_str(&format!(
        "Status:           {}\n",
        if settings.is_locked { "Locked" } else { "Unlocked" }
    ));

    if !settings.fixed_expenses.is_empty() {
        output.push('\n');
        output.push_str(&format_fixed_expenses(&settings.fixed_expenses, currency));
    }

    output
}

#[derive(Tabled)]
struct FixedExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Fixed expenses charged against responsibilities
pub fn format_fixed_expenses(expenses: &[FixedExpense], currency: &str) -> String {
    if expenses.is_empty() {
        return "No fixed expenses.\n".to_string();
    }

    let rows = expenses.iter().map(|e| FixedExpenseRow {
        id: e.id.short(),
        name: e.name.clone(),
        amount: e.amount.format_with_symbol(currency),
    });
    let total: crate::models::Money = expenses.iter().map(|e| e.amount).sum();

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\nTotal: {}\n", table, total.format_with_symbol(currency))
}
