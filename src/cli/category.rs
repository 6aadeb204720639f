//! Category CLI commands

use clap::Subcommand;

use crate::display::category::{format_category_details, format_category_list};
use crate::error::BudgetResult;
use crate::services::{CategoryService, CreateCategoryInput, UpdateCategoryInput};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,

    /// Create a new category
    Create {
        /// Category name
        name: String,
        /// Display color (#RRGGBB)
        #[arg(short, long)]
        color: Option<String>,
        /// Icon (emoji or icon name)
        #[arg(short, long)]
        icon: Option<String>,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },

    /// Edit a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New color (#RRGGBB)
        #[arg(short, long)]
        color: Option<String>,
        /// New icon (empty string clears it)
        #[arg(short, long)]
        icon: Option<String>,
        /// New description (empty string clears it)
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a category
    Delete {
        /// Category name or ID
        category: String,
        /// Delete even if budgets still use it
        #[arg(long)]
        force: bool,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> BudgetResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_list(&service.list()?));
        }

        CategoryCommands::Create {
            name,
            color,
            icon,
            description,
        } => {
            let category = service.create(CreateCategoryInput {
                name,
                description,
                color,
                icon,
            })?;
            println!("Created category: {}", category.name);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::Show { category } => {
            let category = service.resolve(&category)?;
            let budgets = storage.budgets.get_by_category(category.id)?.len();
            let transactions = storage.transactions.count_by_category(category.id)?;
            print!(
                "{}",
                format_category_details(&category, budgets, transactions)
            );
        }

        CategoryCommands::Edit {
            category,
            name,
            color,
            icon,
            description,
        } => {
            let existing = service.resolve(&category)?;
            let updated = service.update(
                existing.id,
                UpdateCategoryInput {
                    name,
                    description,
                    color,
                    icon,
                },
            )?;
            println!("Updated category: {}", updated.name);
        }

        CategoryCommands::Delete { category, force } => {
            let existing = service.resolve(&category)?;
            let deleted = service.delete(existing.id, force)?;
            println!("Deleted category: {}", deleted.name);
        }
    }

    Ok(())
}
