//! CLI commands for reports

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::Subcommand;
use serde::Serialize;

use crate::config::settings::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::models::ReportWindow;
use crate::reports::{Dashboard, DashboardRow, DataSource, SpendingBreakdown};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Spent, remaining and percentage used for every budget
    Status {
        /// Window to report on (YYYY-MM, YYYY, or YYYY-MM-DD..YYYY-MM-DD; default: this month)
        #[arg(short, long)]
        period: Option<ReportWindow>,
        /// Print JSON instead of a table
        #[arg(long, conflicts_with = "output")]
        json: bool,
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Expense totals per category
    Spending {
        /// Window to report on (default: this month)
        #[arg(short, long)]
        period: Option<ReportWindow>,
        /// Print JSON instead of a table
        #[arg(long, conflicts_with = "output")]
        json: bool,
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also list the N largest categories (text output only)
        #[arg(long, conflicts_with_all = ["json", "output"])]
        top: Option<usize>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> BudgetResult<()> {
    match cmd {
        ReportCommands::Status {
            period,
            json,
            output,
        } => {
            let window = period.unwrap_or_default();
            let dashboard = Dashboard::load(storage, window)?;
            let report = &dashboard.status;

            if json {
                print_json(report)?;
            } else if let Some(path) = output {
                report.export_csv(&dashboard.categories(), create_file(&path)?)?;
                println!("Budget status exported to: {}", path.display());
            } else {
                println!("Budget Status - {}", window.title());
                println!();
                print!(
                    "{}",
                    report.format_terminal(
                        &dashboard.categories(),
                        &settings.currency_symbol,
                        settings.warning_threshold
                    )
                );
            }
        }

        ReportCommands::Spending {
            period,
            json,
            output,
            top,
        } => {
            let window = period.unwrap_or_default();
            let report = spending_for(storage, window)?;

            if json {
                print_json(&report)?;
            } else if let Some(path) = output {
                report.export_csv(create_file(&path)?)?;
                println!("Spending report exported to: {}", path.display());
            } else {
                println!("Spending by Category - {}", window.title());
                println!();
                print!("{}", report.format_terminal(&settings.currency_symbol));

                if let Some(n) = top {
                    println!();
                    println!("Top {}:", n);
                    for slice in report.top(n) {
                        println!(
                            "  {:<24} {:>12}",
                            slice.name,
                            slice.value.format_with_symbol(&settings.currency_symbol)
                        );
                    }
                }
            }
        }
    }

    Ok(())
}

/// Show the dashboard for a window
pub fn handle_dashboard_command(
    storage: &Storage,
    settings: &Settings,
    period: Option<ReportWindow>,
    json: bool,
) -> BudgetResult<()> {
    let dashboard = Dashboard::load(storage, period.unwrap_or_default())?;

    if json {
        #[derive(Serialize)]
        struct DashboardJson<'a> {
            #[serde(flatten)]
            dashboard: &'a Dashboard,
            rows: Vec<DashboardRow>,
        }

        print_json(&DashboardJson {
            dashboard: &dashboard,
            rows: dashboard.rows(settings.warning_threshold),
        })
    } else {
        print!(
            "{}",
            dashboard.format_terminal(&settings.currency_symbol, settings.warning_threshold)
        );
        Ok(())
    }
}

fn spending_for(storage: &Storage, window: ReportWindow) -> BudgetResult<SpendingBreakdown> {
    let categories = storage.fetch_categories()?;
    let transactions =
        storage.fetch_transactions(window.start_date(), window.end_date(), None)?;
    Ok(SpendingBreakdown::from_snapshot(&transactions, &categories))
}

fn create_file(path: &Path) -> BudgetResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        BudgetError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

fn print_json<T: Serialize>(value: &T) -> BudgetResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

