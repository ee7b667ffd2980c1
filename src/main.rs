use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use financeflow::cli::{
    handle_achievements_command, handle_allocation_command, handle_audit_command,
    handle_backup_command, handle_expense_command, handle_export_command, handle_fnpf_command,
    handle_goal_command, handle_history_command, handle_income_command, handle_loan_command,
    handle_rollover_command, handle_summary_command, handle_transaction_command,
    handle_wallet_command,
};
use financeflow::config::{paths::FlowPaths, settings::Settings};
use financeflow::storage::Storage;

#[derive(Parser)]
#[command(
    name = "financeflow",
    version,
    about = "50/30/20 budgeting with a Want Wallet, goals and FNPF support",
    long_about = "FinanceFlow splits your monthly income into needs, wants and \
                  responsibilities. Unspent wants roll into the Want Wallet at \
                  month end, where they can fund your savings goals."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current month's budget
    Summary,

    /// Allocation percentages, income and lock state
    #[command(subcommand)]
    Allocation(financeflow::cli::AllocationCommands),

    /// Fixed monthly expenses
    #[command(subcommand)]
    Expense(financeflow::cli::ExpenseCommands),

    /// Transactions in the active month
    #[command(subcommand, alias = "txn")]
    Transaction(financeflow::cli::TransactionCommands),

    /// Want Wallet balance and withdrawals
    #[command(subcommand)]
    Wallet(financeflow::cli::WalletCommands),

    /// Savings goals
    #[command(subcommand)]
    Goal(financeflow::cli::GoalCommands),

    /// Show achievements
    Achievements,

    /// Close the month: archive it and settle the wants budget
    Rollover {
        /// Month to label the archive with (e.g., "2026-10" or "October 2026")
        #[arg(short, long)]
        month: Option<String>,
        /// Skip the pre-rollover backup
        #[arg(long)]
        no_backup: bool,
    },

    /// Show archived months
    History,

    /// Monthly income source
    #[command(subcommand)]
    Income(financeflow::cli::IncomeCommands),

    /// Calculate FNPF deductions for a gross salary
    Fnpf {
        /// Gross monthly salary
        gross: String,
        /// Voluntary contribution
        #[arg(long)]
        voluntary: Option<String>,
        /// Employee rate in percent
        #[arg(long)]
        employee_rate: Option<f64>,
        /// Employer rate in percent
        #[arg(long)]
        employer_rate: Option<f64>,
    },

    /// Calculate loan repayments
    Loan {
        /// Amount borrowed
        principal: String,
        /// Annual interest rate in percent
        rate: f64,
        /// Term in months
        months: u32,
        /// Print the full amortization schedule
        #[arg(short, long)]
        schedule: bool,
    },

    /// Export data
    #[command(subcommand)]
    Export(financeflow::cli::ExportCommands),

    /// Backup management
    #[command(subcommand)]
    Backup(financeflow::cli::BackupCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        count: usize,
    },

    /// Show current configuration and paths
    Config {
        /// Write the current settings to the config file
        #[arg(long)]
        save: bool,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("FINANCEFLOW_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let paths = FlowPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Summary) => handle_summary_command(&storage, &settings)?,
        Some(Commands::Allocation(cmd)) => handle_allocation_command(&storage, &settings, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, cmd)?,
        Some(Commands::Transaction(cmd)) => handle_transaction_command(&storage, &settings, cmd)?,
        Some(Commands::Wallet(cmd)) => handle_wallet_command(&storage, &settings, cmd)?,
        Some(Commands::Goal(cmd)) => handle_goal_command(&storage, &settings, cmd)?,
        Some(Commands::Achievements) => handle_achievements_command(&storage)?,
        Some(Commands::Rollover { month, no_backup }) => {
            handle_rollover_command(&storage, &paths, &settings, month.as_deref(), no_backup)?
        }
        Some(Commands::History) => handle_history_command(&storage, &settings)?,
        Some(Commands::Income(cmd)) => handle_income_command(&storage, &settings, cmd)?,
        Some(Commands::Fnpf {
            gross,
            voluntary,
            employee_rate,
            employer_rate,
        }) => handle_fnpf_command(
            &settings,
            &gross,
            voluntary.as_deref(),
            employee_rate,
            employer_rate,
        )?,
        Some(Commands::Loan {
            principal,
            rate,
            months,
            schedule,
        }) => handle_loan_command(&settings, &principal, rate, months, schedule)?,
        Some(Commands::Export(cmd)) => handle_export_command(&storage, cmd)?,
        Some(Commands::Backup(cmd)) => handle_backup_command(&storage, &paths, &settings, cmd)?,
        Some(Commands::Audit { count }) => handle_audit_command(&storage, count)?,
        Some(Commands::Config { save }) => {
            if save {
                settings.save(&paths)?;
                println!("Settings written to {}", paths.settings_file().display());
                println!();
            }
            println!("FinanceFlow Configuration");
            println!("=========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!(
                "  FNPF rates: {}% employee / {}% employer",
                settings.fnpf_rates.employee_rate, settings.fnpf_rates.employer_rate
            );
            println!(
                "  Backup retention: {} daily, {} monthly",
                settings.backup_retention.daily_count, settings.backup_retention.monthly_count
            );
            println!(
                "  Backup before rollover: {}",
                settings.backup_before_rollover
            );
        }
        None => {
            println!("FinanceFlow - 50/30/20 budgeting");
            println!();
            println!("Run 'financeflow --help' for usage information.");
            println!("Run 'financeflow summary' to see this month's budget.");
        }
    }

    Ok(())
}
