//! Dashboard
//!
//! Fetches one window's worth of data and runs both the budget status and
//! the spending breakdown over it.

use serde::Serialize;

use crate::error::BudgetResult;
use crate::models::{Budget, Category, CategoryLookup, ReportWindow, Transaction};

use super::budget_status::{format_percentage, BudgetStatus, BudgetStatusReport, StatusLevel};
use super::source::DataSource;
use super::spending::SpendingBreakdown;

/// A budget status with its category resolved, ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardRow {
    pub category: String,
    pub color: String,
    pub level: StatusLevel,
    /// Progress-bar fill, capped at 100
    pub progress: f64,
    #[serde(flatten)]
    pub status: BudgetStatus,
}

/// Both reports for one window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub window: ReportWindow,
    pub status: BudgetStatusReport,
    pub spending: SpendingBreakdown,
    #[serde(skip)]
    categories: Vec<Category>,
}

impl Dashboard {
    /// Load snapshots from `source` and compute the dashboard for `window`
    pub fn load<S: DataSource + ?Sized>(source: &S, window: ReportWindow) -> BudgetResult<Self> {
        let budgets = source.fetch_budgets()?;
        let categories = source.fetch_categories()?;
        let transactions =
            source.fetch_transactions(window.start_date(), window.end_date(), None)?;

        tracing::debug!(
            window = %window,
            budgets = budgets.len(),
            transactions = transactions.len(),
            "loaded dashboard snapshot"
        );

        Ok(Self::from_snapshot(window, &budgets, &categories, &transactions))
    }

    /// Compute the dashboard from snapshots already in hand
    ///
    /// `transactions` are assumed to be filtered to `window`.
    pub fn from_snapshot(
        window: ReportWindow,
        budgets: &[Budget],
        categories: &[Category],
        transactions: &[Transaction],
    ) -> Self {
        Self {
            window,
            status: BudgetStatusReport::from_snapshot(budgets, transactions),
            spending: SpendingBreakdown::from_snapshot(transactions, categories),
            categories: categories.to_vec(),
        }
    }

    pub fn categories(&self) -> CategoryLookup<'_> {
        CategoryLookup::new(&self.categories)
    }

    pub fn rows(&self, warning_threshold: f64) -> Vec<DashboardRow> {
        let lookup = self.categories();
        self.status
            .statuses
            .iter()
            .map(|status| DashboardRow {
                category: lookup.label(status.budget.category_id).to_string(),
                color: lookup.color(status.budget.category_id).to_string(),
                level: status.level(warning_threshold),
                progress: status.progress(),
                status: status.clone(),
            })
            .collect()
    }

    pub fn format_terminal(&self, symbol: &str, warning_threshold: f64) -> String {
        let rollups = &self.status.rollups;
        let mut output = String::new();

        output.push_str(&format!("Dashboard - {}\n", self.window.title()));
        output.push_str(&"=".repeat(60));
        output.push_str("\n\n");

        output.push_str(&format!(
            "Income: {}   Budgeted: {}   Spent: {}\n\n",
            rollups.total_income.format_with_symbol(symbol),
            rollups.total_budgeted.format_with_symbol(symbol),
            rollups.total_spent.format_with_symbol(symbol)
        ));

        output.push_str("Budgets\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');

        let rows = self.rows(warning_threshold);
        if rows.is_empty() {
            output.push_str("  (no budgets)\n");
        }
        for row in rows {
            let tag = match row.level {
                StatusLevel::OnTrack => "",
                StatusLevel::NearLimit => "  near limit",
                StatusLevel::OverBudget => "  OVER",
            };
            output.push_str(&format!(
                "  {:<20} [{}] {:>7}  {} of {}{}\n",
                row.category,
                progress_bar(row.progress, 20),
                format_percentage(row.status.percentage),
                row.status.spent.format_with_symbol(symbol),
                row.status.budget.amount.format_with_symbol(symbol),
                tag
            ));
        }

        output.push_str("\nSpending by Category\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&self.spending.format_terminal(symbol));

        output
    }
}

fn progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "#".repeat(filled), ".".repeat(width - filled))
}
