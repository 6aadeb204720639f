//! Category display formatting

use crate::models::Category;

/// Format categories as an aligned list
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'budgetwatch init' to create default categories.\n"
            .to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8} {:<3} {:<24} {:<8} {}\n",
        "ID", "", "Name", "Color", "Description"
    ));
    output.push_str(&"-".repeat(70));
    output.push('\n');

    for category in categories {
        output.push_str(&format!(
            "{:<8} {:<3} {:<24} {:<8} {}\n",
            category.id.to_string(),
            category.icon.as_deref().unwrap_or(""),
            category.name,
            category.color,
            category.description.as_deref().unwrap_or("")
        ));
    }

    output
}

/// Format a single category with its usage counts
pub fn format_category_details(category: &Category, budgets: usize, transactions: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:           {}\n", category.id));
    if let Some(icon) = &category.icon {
        output.push_str(&format!("  Icon:         {}\n", icon));
    }
    output.push_str(&format!("  Color:        {}\n", category.color));
    if let Some(description) = &category.description {
        output.push_str(&format!("  Description:  {}\n", description));
    }
    output.push_str(&format!("  Budgets:      {}\n", budgets));
    output.push_str(&format!("  Transactions: {}\n", transactions));
    output.push_str(&format!(
        "  Created:      {}\n",
        category.created_at.format("%Y-%m-%d %H:%M")
    ));

    output
}
