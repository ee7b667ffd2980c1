//! Goal display formatting

use tabled::{settings::Style, Table, Tabled};

use super::report::{format_bar, truncate};
use crate::models::FinancialGoal;

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Saved")]
    saved: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Progress")]
    progress: String,
}

pub fn format_goal_list(goals: &[FinancialGoal], currency: &str) -> String {
    if goals.is_empty() {
        return "No goals yet.\n".to_string();
    }

    let rows = goals.iter().map(|goal| GoalRow {
        id: goal.id.short(),
        name: truncate(&goal.name, 24),
        priority: goal.priority.to_string(),
        saved: goal.current_amount.format_with_symbol(currency),
        target: goal.target_amount.format_with_symbol(currency),
        progress: if goal.is_completed {
            "Completed".to_string()
        } else {
            format!(
                "{} {:.0}%",
                format_bar(goal.progress_percent(), 10),
                goal.progress_percent()
            )
        },
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

pub fn format_goal_details(goal: &FinancialGoal, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Goal:      {}\n", goal.name));
    output.push_str(&format!("ID:        {}\n", goal.id));
    output.push_str(&format!("Category:  {}\n", goal.category));
    output.push_str(&format!("Priority:  {}\n", goal.priority));
    output.push_str(&format!(
        "Saved:     {} of {} ({:.1}%)\n",
        goal.current_amount.format_with_symbol(currency),
        goal.target_amount.format_with_symbol(currency),
        goal.progress_percent()
    ));
    output.push_str(&format!(
        "Remaining: {}\n",
        goal.remaining_amount().format_with_symbol(currency)
    ));

    if let Some(date) = goal.target_date {
        output.push_str(&format!("Due:       {}\n", date.format("%Y-%m-%d")));
    }
    if let Some(description) = &goal.description {
        output.push_str(&format!("Notes:     {}\n", description));
    }
    if let Some(completed) = goal.completed_date {
        output.push_str(&format!("Completed: {}\n", completed.format("%Y-%m-%d")));
    }

    output
}
