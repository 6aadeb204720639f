//! Transaction CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_transaction_list;
use crate::error::BudgetResult;
use crate::models::{CategoryLookup, ReportWindow, TransactionId, TransactionType};
use crate::services::{
    CategoryService, CreateTransactionInput, TransactionService, UpdateTransactionInput,
};
use crate::storage::{Storage, TransactionFilter};

use super::{parse_amount, parse_date};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a transaction
    Add {
        /// Category name or ID
        category: String,
        /// Amount; the sign is set from the type
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// expense, income or transfer
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: TransactionType,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// List transactions, newest first
    List {
        /// Only this category (name or ID)
        #[arg(short, long)]
        category: Option<String>,
        /// Only this window (YYYY-MM, YYYY, or YYYY-MM-DD..YYYY-MM-DD)
        #[arg(short, long)]
        period: Option<ReportWindow>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },

    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: TransactionId,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        #[arg(short = 't', long = "type")]
        kind: Option<TransactionType>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: TransactionId,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> BudgetResult<()> {
    let service = TransactionService::new(storage);
    let categories = CategoryService::new(storage);
    let symbol = &settings.currency_symbol;

    match cmd {
        TransactionCommands::Add {
            category,
            amount,
            kind,
            date,
            description,
        } => {
            let category = categories.resolve(&category)?;
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => chrono::Local::now().date_naive(),
            };

            let txn = service.create(CreateTransactionInput {
                category_id: category.id,
                amount: parse_amount(&amount)?,
                kind,
                date,
                description,
            })?;

            println!(
                "Recorded {} of {} in {} on {}",
                txn.kind,
                txn.amount.format_with_symbol(symbol),
                category.name,
                txn.date
            );
            println!("  ID: {}", txn.id);
        }

        TransactionCommands::List {
            category,
            period,
            limit,
        } => {
            let mut filter = match period {
                Some(window) => TransactionFilter::between(window.start_date(), window.end_date()),
                None => TransactionFilter::default(),
            };
            if let Some(category) = category {
                filter = filter.category(categories.resolve(&category)?.id);
            }

            let transactions = service.list(&filter, Some(limit))?;
            let all_categories = categories.list()?;
            let lookup = CategoryLookup::new(&all_categories);
            print!(
                "{}",
                format_transaction_list(&transactions, &lookup, symbol, &settings.date_format)
            );
        }

        TransactionCommands::Edit {
            id,
            category,
            amount,
            kind,
            date,
            description,
        } => {
            let category_id = category
                .map(|c| categories.resolve(&c).map(|c| c.id))
                .transpose()?;

            let txn = service.update(
                id,
                UpdateTransactionInput {
                    category_id,
                    amount: amount.as_deref().map(parse_amount).transpose()?,
                    kind,
                    date: date.as_deref().map(parse_date).transpose()?,
                    description,
                },
            )?;
            println!("Updated transaction {}", txn.id);
        }

        TransactionCommands::Delete { id } => {
            let txn = service.delete(id)?;
            println!("Deleted transaction {}", txn.id);
        }
    }

    Ok(())
}
