//! Budget CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_budget_list;
use crate::error::BudgetResult;
use crate::models::{BudgetId, BudgetPeriod, CategoryLookup};
use crate::services::{BudgetService, CategoryService, CreateBudgetInput, UpdateBudgetInput};
use crate::storage::Storage;

use super::{parse_amount, parse_date};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// List all budgets
    List,

    /// Create a budget for a category
    Create {
        /// Category name or ID
        category: String,
        /// Budgeted amount (e.g., "500" or "500.00")
        amount: String,
        /// Budget period (monthly or yearly)
        #[arg(short, long)]
        period: Option<BudgetPeriod>,
        /// First day the budget applies (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        start: Option<String>,
        /// Last day the budget applies (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<String>,
    },

    /// Edit a budget
    Edit {
        /// Budget ID
        id: BudgetId,
        /// Move the budget to another category
        #[arg(short, long)]
        category: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New period
        #[arg(short, long)]
        period: Option<BudgetPeriod>,
        /// New start date
        #[arg(short, long)]
        start: Option<String>,
        /// New end date
        #[arg(short, long, conflicts_with = "no_end")]
        end: Option<String>,
        /// Remove the end date
        #[arg(long)]
        no_end: bool,
    },

    /// Delete a budget
    Delete {
        /// Budget ID
        id: BudgetId,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> BudgetResult<()> {
    let service = BudgetService::new(storage);
    let categories = CategoryService::new(storage);

    match cmd {
        BudgetCommands::List => {
            let all_categories = categories.list()?;
            let lookup = CategoryLookup::new(&all_categories);
            print!(
                "{}",
                format_budget_list(&service.list()?, &lookup, &settings.currency_symbol)
            );
        }

        BudgetCommands::Create {
            category,
            amount,
            period,
            start,
            end,
        } => {
            let category = categories.resolve(&category)?;
            let start_date = match start {
                Some(s) => parse_date(&s)?,
                None => chrono::Local::now().date_naive(),
            };

            let budget = service.create(CreateBudgetInput {
                category_id: category.id,
                amount: parse_amount(&amount)?,
                period: period.unwrap_or(settings.default_budget_period),
                start_date,
                end_date: end.as_deref().map(parse_date).transpose()?,
            })?;

            println!(
                "Created {} budget of {} for {}",
                budget.period,
                budget.amount.format_with_symbol(&settings.currency_symbol),
                category.name
            );
            println!("  ID: {}", budget.id);
        }

        BudgetCommands::Edit {
            id,
            category,
            amount,
            period,
            start,
            end,
            no_end,
        } => {
            let category_id = category
                .map(|c| categories.resolve(&c).map(|c| c.id))
                .transpose()?;
            let end_date = if no_end {
                Some(None)
            } else {
                end.as_deref().map(parse_date).transpose()?.map(Some)
            };

            let budget = service.update(
                id,
                UpdateBudgetInput {
                    category_id,
                    amount: amount.as_deref().map(parse_amount).transpose()?,
                    period,
                    start_date: start.as_deref().map(parse_date).transpose()?,
                    end_date,
                },
            )?;
            println!("Updated budget {}", budget.id);
        }

        BudgetCommands::Delete { id } => {
            let budget = service.delete(id)?;
            println!("Deleted budget {}", budget.id);
        }
    }

    Ok(())
}

