//! Category spending breakdown
//!
//! Groups expense transactions by category label for the spending chart.

use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;

use crate::error::BudgetResult;
use crate::models::money::serialize_as_units;
use crate::models::{Category, CategoryLookup, Money, Transaction};

/// Colours assigned to chart slices, cycled by slice position
pub const CHART_PALETTE: [&str; 10] = [
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#EC4899", "#06B6D4", "#84CC16",
    "#F97316", "#6366F1",
];

/// Total expense magnitude for one category label
///
/// Serializes `value` in currency units so chart consumers read `10.5`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySlice {
    pub name: String,
    #[serde(serialize_with = "serialize_as_units")]
    pub value: Money,
}

/// Expense totals per category, in the order categories were first seen
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SpendingBreakdown {
    pub slices: Vec<CategorySlice>,
    #[serde(serialize_with = "serialize_as_units")]
    pub total: Money,
}

impl SpendingBreakdown {
    /// Aggregate expense transactions by category
    ///
    /// Transactions whose category no longer exists are grouped under
    /// "Uncategorized". Values are held in cents, so they are already exact
    /// to two decimal places.
    pub fn from_snapshot(transactions: &[Transaction], categories: &[Category]) -> Self {
        let lookup = CategoryLookup::new(categories);
        let mut slices: Vec<CategorySlice> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for txn in transactions.iter().filter(|t| t.is_expense()) {
            let label = lookup.label(txn.category_id);
            let i = *index.entry(label).or_insert_with(|| {
                slices.push(CategorySlice {
                    name: label.to_string(),
                    value: Money::zero(),
                });
                slices.len() - 1
            });
            slices[i].value += txn.amount.abs();
        }

        let total = slices.iter().map(|s| s.value).sum();

        tracing::debug!(slices = slices.len(), "computed spending breakdown");

        Self { slices, total }
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Percentage of the total a slice represents
    pub fn share(&self, slice: &CategorySlice) -> f64 {
        if self.total.is_zero() {
            0.0
        } else {
            (slice.value.cents() as f64 * 100.0) / self.total.cents() as f64
        }
    }

    /// Chart colour for the slice at `position`
    pub fn color_for(position: usize) -> &'static str {
        CHART_PALETTE[position % CHART_PALETTE.len()]
    }

    /// The `n` largest slices, ties kept in first-seen order
    pub fn top(&self, n: usize) -> Vec<&CategorySlice> {
        let mut sorted: Vec<&CategorySlice> = self.slices.iter().collect();
        sorted.sort_by(|a, b| b.value.cmp(&a.value));
        sorted.truncate(n);
        sorted
    }

    /// Format the breakdown for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        if self.slices.is_empty() {
            return "No expenses recorded for this period.\n".to_string();
        }

        let mut output = String::new();
        output.push_str(&format!(
            "{:<24} {:>12} {:>8}  {}\n",
            "Category", "Spent", "Share", "Color"
        ));
        output.push_str(&"-".repeat(56));
        output.push('\n');

        for (i, slice) in self.slices.iter().enumerate() {
            output.push_str(&format!(
                "{:<24} {:>12} {:>7.1}%  {}\n",
                slice.name,
                slice.value.format_with_symbol(symbol),
                self.share(slice),
                Self::color_for(i)
            ));
        }

        output.push_str(&"-".repeat(56));
        output.push('\n');
        output.push_str(&format!(
            "{:<24} {:>12}\n",
            "Total",
            self.total.format_with_symbol(symbol)
        ));

        output
    }

    /// Export the breakdown to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> BudgetResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Category", "Spent", "Share", "Color"])?;

        for (i, slice) in self.slices.iter().enumerate() {
            csv.write_record([
                slice.name.clone(),
                format!("{:.2}", slice.value.as_units()),
                format!("{:.2}", self.share(slice)),
                Self::color_for(i).to_string(),
            ])?;
        }

        csv.flush()?;
        Ok(())
    }
}
