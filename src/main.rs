use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use budgetwatch::cli::{
    handle_budget_command, handle_category_command, handle_dashboard_command,
    handle_report_command, handle_transaction_command, BudgetCommands, CategoryCommands,
    ReportCommands, TransactionCommands,
};
use budgetwatch::config::{BudgetPaths, Settings};
use budgetwatch::models::ReportWindow;
use budgetwatch::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "budgetwatch",
    author = "Kaylee Beyene",
    version,
    about = "Per-category budgets with spent/remaining tracking",
    long_about = "budgetwatch tracks spending against per-category budgets. Record \
                  transactions, set monthly or yearly limits, and see what is spent, \
                  what remains and where the money went."
)]
struct Cli {
    /// Data directory (overrides the platform default)
    #[arg(long, env = "BUDGETWATCH_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory, settings and default categories
    Init,

    /// Show configuration
    Config,

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Transaction commands
    #[command(subcommand, alias = "transaction")]
    Txn(TransactionCommands),

    /// Budget status and spending reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Budget status and spending breakdown for one window
    Dashboard {
        /// Window to show (YYYY-MM, YYYY, or YYYY-MM-DD..YYYY-MM-DD; default: this month)
        #[arg(short, long)]
        period: Option<ReportWindow>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn init_logging(settings: &Settings) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => BudgetPaths::with_base_dir(dir),
        None => BudgetPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    init_logging(&settings);

    tracing::debug!(base_dir = %paths.base_dir().display(), "starting");

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing budgetwatch at: {}", paths.base_dir().display());
            let seeded = initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            if seeded {
                println!();
                println!("Default categories have been created:");
                println!(
                    "  Groceries, Transportation, Utilities, Entertainment, Healthcare, Income"
                );
            }
            println!();
            println!("Run 'budgetwatch category list' to see all categories.");
        }
        Some(Commands::Config) => {
            println!("budgetwatch Configuration");
            println!("=========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:       {}", settings.currency_symbol);
            println!("  Date format:           {}", settings.date_format);
            println!("  Warning threshold:     {}%", settings.warning_threshold);
            println!("  Default budget period: {}", settings.default_budget_period);
            println!("  Log filter:            {}", settings.log_filter);
        }
        Some(command) => {
            let storage = Storage::open(paths.clone())
                .with_context(|| format!("Failed to open data in {}", paths.base_dir().display()))?;
            run(&storage, &settings, command)?;
        }
        None => {
            println!("budgetwatch - per-category budget tracking");
            println!();
            println!("Run 'budgetwatch init' to get started.");
            println!("Run 'budgetwatch --help' for usage information.");
        }
    }

    Ok(())
}

fn run(storage: &Storage, settings: &Settings, command: Commands) -> Result<()> {
    match command {
        Commands::Category(cmd) => handle_category_command(storage, cmd)?,
        Commands::Budget(cmd) => handle_budget_command(storage, settings, cmd)?,
        Commands::Txn(cmd) => handle_transaction_command(storage, settings, cmd)?,
        Commands::Report(cmd) => handle_report_command(storage, settings, cmd)?,
        Commands::Dashboard { period, json } => {
            handle_dashboard_command(storage, settings, period, json)?
        }
        Commands::Audit { limit } => {
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("No audit entries yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Commands::Init | Commands::Config => {}
    }
    Ok(())
}
