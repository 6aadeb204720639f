//! Budget tables

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Budget, CategoryLookup};

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
}

pub fn format_budget_list(
    budgets: &[Budget],
    categories: &CategoryLookup<'_>,
    symbol: &str,
) -> String {
    if budgets.is_empty() {
        return "No budgets found.\n".to_string();
    }

    let rows = budgets.iter().map(|b| BudgetRow {
        id: b.id.to_string(),
        category: categories.label(b.category_id).to_string(),
        amount: b.amount.format_with_symbol(symbol),
        period: b.period.to_string(),
        start: b.start_date.to_string(),
        end: b.end_date.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetId, BudgetPeriod, Category, CategoryId, Money};
    use chrono::NaiveDate;

    #[test]
    fn test_budget_table() {
        let categories = vec![Category::new(CategoryId::new(1), "Utilities")];
        let lookup = CategoryLookup::new(&categories);
        let budgets = vec![
            Budget::new(
                BudgetId::new(1),
                CategoryId::new(1),
                Money::from_cents(15000),
                BudgetPeriod::Monthly,
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            ),
            Budget::new(
                BudgetId::new(2),
                CategoryId::new(8),
                Money::from_cents(0),
                BudgetPeriod::Yearly,
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            ),
        ];

        let table = format_budget_list(&budgets, &lookup, "$");
        assert!(table.contains("Utilities"));
        assert!(table.contains("$150.00"));
        assert!(table.contains("Uncategorized"));
        assert!(table.contains("yearly"));
    }
}
