//! Transaction tables

use std::fmt::Write;

use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{CategoryLookup, Transaction};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

pub fn format_transaction_list(
    transactions: &[Transaction],
    categories: &CategoryLookup<'_>,
    symbol: &str,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions.iter().map(|t| TransactionRow {
        id: t.id.to_string(),
        date: format_date(t.date, date_format),
        kind: t.kind.to_string(),
        category: categories.label(t.category_id).to_string(),
        amount: t.amount.format_with_symbol(symbol),
        description: truncate(t.description.as_deref().unwrap_or(""), 30),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

/// Render `date` with `format`, falling back to ISO 8601 if the format can't render a date
fn format_date(date: NaiveDate, format: &str) -> String {
    let mut out = String::new();
    match write!(out, "{}", date.format(format)) {
        Ok(()) => out,
        Err(_) => date.to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryId, Money, TransactionId, TransactionType};

    #[test]
    fn test_transaction_table() {
        let categories = vec![Category::new(CategoryId::new(1), "Groceries")];
        let lookup = CategoryLookup::new(&categories);
        let transactions = vec![Transaction::new(
            TransactionId::new(4),
            CategoryId::new(1),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            Money::from_cents(-4250),
            TransactionType::Expense,
        )
        .with_description("Weekly shop")];

        let table = format_transaction_list(&transactions, &lookup, "$", "%d/%m/%Y");
        assert!(table.contains("txn-4"));
        assert!(table.contains("15/01/2025"));
        assert!(table.contains("-$42.50"));
        assert!(table.contains("Weekly shop"));
    }

    #[test]
    fn test_unrenderable_date_format_falls_back() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(format_date(date, "%d/%m/%Y"), "15/01/2025");
        assert_eq!(format_date(date, "%Q"), "2025-01-15");
        assert_eq!(format_date(date, "%H:%M"), "2025-01-15");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer description", 8), "a much …");
    }
}
