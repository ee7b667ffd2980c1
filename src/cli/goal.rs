//! Goal and achievement CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::parse_amount;
use crate::config::settings::Settings;
use crate::display;
use crate::error::{FlowError, FlowResult};
use crate::models::{GoalPriority, NewGoal};
use crate::services::{AchievementService, GoalService};
use crate::storage::Storage;

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a savings goal
    Add {
        /// Goal name
        name: String,
        /// Target amount
        target: String,
        /// Amount already saved
        #[arg(long)]
        initial: Option<String>,
        /// Free-form category (e.g., "Travel")
        #[arg(short, long)]
        category: Option<String>,
        /// Priority (low, medium or high)
        #[arg(short, long, default_value = "medium")]
        priority: String,
        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// Notes
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List goals, highest priority first
    List,

    /// Show one goal
    Show {
        /// Goal name or ID
        goal: String,
    },

    /// Move money from the Want Wallet into a goal
    Contribute {
        /// Goal name or ID
        goal: String,
        /// Amount to contribute
        amount: String,
    },

    /// Delete a goal (contributions are not refunded)
    Remove {
        /// Goal name or ID
        goal: String,
    },
}

pub fn handle_goal_command(
    storage: &Storage,
    settings: &Settings,
    cmd: GoalCommands,
) -> FlowResult<()> {
    let service = GoalService::new(storage);
    let currency = &settings.currency_symbol;

    match cmd {
        GoalCommands::Add {
            name,
            target,
            initial,
            category,
            priority,
            due,
            description,
        } => {
            let priority: GoalPriority = priority.parse().map_err(FlowError::Validation)?;
            let mut new_goal = NewGoal::new(name, parse_amount(&target)?).priority(priority);
            if let Some(initial) = initial {
                new_goal = new_goal.initial_amount(parse_amount(&initial)?);
            }
            if let Some(category) = category {
                new_goal = new_goal.category(category);
            }
            if let Some(description) = description {
                new_goal = new_goal.description(description);
            }
            if let Some(due) = due {
                let date = NaiveDate::parse_from_str(&due, "%Y-%m-%d").map_err(|_| {
                    FlowError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", due))
                })?;
                new_goal = new_goal.target_date(date);
            }

            let goal = service.add_goal(new_goal)?;
            println!(
                "Created goal '{}' with target {} [{}]",
                goal.name,
                settings.format_money(goal.target_amount),
                goal.id.short()
            );
            if goal.is_completed {
                println!("Goal already met!");
            }
        }

        GoalCommands::List => {
            let goals = service.list_goals()?;
            print!("{}", display::format_goal_list(&goals, currency));
            if !goals.is_empty() {
                let (target, saved) = service.totals()?;
                println!(
                    "Saved {} of {} across {} goal(s)",
                    settings.format_money(saved),
                    settings.format_money(target),
                    goals.len()
                );
            }
        }

        GoalCommands::Show { goal } => {
            let goal = service.find(&goal)?;
            print!("{}", display::format_goal_details(&goal, currency));
        }

        GoalCommands::Contribute { goal, amount } => {
            let goal = service.find(&goal)?;
            let result = service.contribute(goal.id, parse_amount(&amount)?)?;
            println!(
                "Contributed {} to '{}' ({:.1}% of {})",
                settings.format_money(result.entry.amount),
                result.goal.name,
                result.goal.progress_percent(),
                settings.format_money(result.goal.target_amount)
            );
            if result.completed {
                println!("Goal '{}' completed!", result.goal.name);
            }
            print!("{}", display::format_unlocked(&result.new_achievements));
        }

        GoalCommands::Remove { goal } => {
            let goal = service.find(&goal)?;
            if service.delete_goal(goal.id)? {
                println!("Deleted goal '{}'", goal.name);
            }
        }
    }

    Ok(())
}

pub fn handle_achievements_command(storage: &Storage) -> FlowResult<()> {
    let service = AchievementService::new(storage);
    print!("{}", display::format_achievements(&service.catalog_status()?));
    Ok(())
}
