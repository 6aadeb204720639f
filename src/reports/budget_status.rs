//! Budget Status Report
//!
//! Reconciles budgets with a windowed transaction snapshot: how much of each
//! budget has been spent, what remains, and portfolio-wide totals.
//!
//! Everything here is a pure function of its inputs. The caller is expected
//! to have filtered transactions to the reporting window already.

use serde::Serialize;
use std::io::Write;

use crate::error::BudgetResult;
use crate::models::{Budget, CategoryLookup, Money, Transaction};

/// Percentage reported for a zero-amount budget that has any spending
///
/// The ratio is undefined there; a saturated finite value keeps sorting and
/// `> 100` comparisons meaningful.
pub const UNBOUNDED_PERCENTAGE: f64 = f64::MAX;

/// Default percentage above which a budget is considered close to its limit
pub const DEFAULT_WARNING_THRESHOLD: f64 = 80.0;

/// How a budget is tracking, for colouring progress indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLevel {
    OnTrack,
    NearLimit,
    OverBudget,
}

/// Spending against a single budget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    /// The budget this status was derived from
    pub budget: Budget,
    /// Sum of expense magnitudes in the budget's category (never negative)
    pub spent: Money,
    /// `amount - spent`; negative when over budget
    pub remaining: Money,
    /// `spent / amount * 100`, see [`UNBOUNDED_PERCENTAGE`] for zero amounts
    pub percentage: f64,
    /// `spent > amount`
    pub is_over_budget: bool,
}

impl BudgetStatus {
    /// Compute the status of one budget against a transaction snapshot
    pub fn compute(budget: &Budget, transactions: &[Transaction]) -> Self {
        let spent: Money = transactions
            .iter()
            .filter(|t| t.category_id == budget.category_id && t.is_expense())
            .map(|t| t.amount.abs())
            .sum();

        Self {
            budget: budget.clone(),
            spent,
            remaining: budget.amount - spent,
            percentage: percentage_used(spent, budget.amount),
            is_over_budget: spent > budget.amount,
        }
    }

    /// True when the budget amount is zero but money was spent against it
    pub fn is_unbounded(&self) -> bool {
        self.percentage == UNBOUNDED_PERCENTAGE
    }

    /// Fill fraction for a progress bar, capped at 100
    pub fn progress(&self) -> f64 {
        self.percentage.clamp(0.0, 100.0)
    }

    pub fn level(&self, warning_threshold: f64) -> StatusLevel {
        if self.is_over_budget {
            StatusLevel::OverBudget
        } else if self.percentage > warning_threshold {
            StatusLevel::NearLimit
        } else {
            StatusLevel::OnTrack
        }
    }
}

fn percentage_used(spent: Money, amount: Money) -> f64 {
    if amount.is_zero() {
        if spent.is_zero() {
            0.0
        } else {
            UNBOUNDED_PERCENTAGE
        }
    } else {
        // scale before dividing so whole-number ratios come out exact
        (spent.cents() as f64 * 100.0) / amount.cents() as f64
    }
}

/// Format a status percentage for display ("40.0%", "∞%")
pub fn format_percentage(percentage: f64) -> String {
    if percentage == UNBOUNDED_PERCENTAGE {
        "∞%".to_string()
    } else {
        format!("{:.1}%", percentage)
    }
}

/// Portfolio-wide totals over the whole transaction snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rollups {
    /// Sum of income amounts, as stored
    pub total_income: Money,
    /// Sum of all budget amounts
    pub total_budgeted: Money,
    /// Sum of expense magnitudes, budgeted category or not
    pub total_spent: Money,
}

impl Rollups {
    pub fn compute(budgets: &[Budget], transactions: &[Transaction]) -> Self {
        Self {
            total_income: transactions
                .iter()
                .filter(|t| t.is_income())
                .map(|t| t.amount)
                .sum(),
            total_budgeted: budgets.iter().map(|b| b.amount).sum(),
            total_spent: transactions
                .iter()
                .filter(|t| t.is_expense())
                .map(|t| t.amount.abs())
                .sum(),
        }
    }
}

/// Budget Status Report
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BudgetStatusReport {
    /// One status per input budget, in input order
    pub statuses: Vec<BudgetStatus>,
    /// Snapshot-wide totals
    pub rollups: Rollups,
}

impl BudgetStatusReport {
    /// Build the report from budget and transaction snapshots
    pub fn from_snapshot(budgets: &[Budget], transactions: &[Transaction]) -> Self {
        let statuses: Vec<BudgetStatus> = budgets
            .iter()
            .map(|b| BudgetStatus::compute(b, transactions))
            .collect();
        let rollups = Rollups::compute(budgets, transactions);

        tracing::debug!(
            budgets = budgets.len(),
            transactions = transactions.len(),
            over_budget = statuses.iter().filter(|s| s.is_over_budget).count(),
            "computed budget status"
        );

        Self { statuses, rollups }
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Get count of budgets that are over their limit
    pub fn over_budget_count(&self) -> usize {
        self.statuses.iter().filter(|s| s.is_over_budget).count()
    }

    /// Get the statuses that are over their limit
    pub fn over_budget(&self) -> Vec<&BudgetStatus> {
        self.statuses.iter().filter(|s| s.is_over_budget).collect()
    }

    /// Format the report for terminal display
    pub fn format_terminal(
        &self,
        categories: &CategoryLookup<'_>,
        symbol: &str,
        warning_threshold: f64,
    ) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Total Income:   {:>12}\n",
            self.rollups.total_income.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Total Budgeted: {:>12}\n",
            self.rollups.total_budgeted.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Total Spent:    {:>12}\n\n",
            self.rollups.total_spent.format_with_symbol(symbol)
        ));

        if self.statuses.is_empty() {
            output.push_str(
                "No budgets created yet. Run 'budgetwatch budget create' to add one.\n",
            );
            return output;
        }

        output.push_str(&format!(
            "{:<24} {:>9} {:>12} {:>12} {:>12} {:>8}\n",
            "Category", "Period", "Budgeted", "Spent", "Remaining", "Used"
        ));
        output.push_str(&"-".repeat(82));
        output.push('\n');

        for status in &self.statuses {
            let marker = match status.level(warning_threshold) {
                StatusLevel::OverBudget => " *",
                StatusLevel::NearLimit => " !",
                StatusLevel::OnTrack => "",
            };

            output.push_str(&format!(
                "{:<24} {:>9} {:>12} {:>12} {:>12} {:>8}{}\n",
                categories.label(status.budget.category_id),
                status.budget.period.to_string(),
                status.budget.amount.format_with_symbol(symbol),
                status.spent.format_with_symbol(symbol),
                status.remaining.format_with_symbol(symbol),
                format_percentage(status.percentage),
                marker
            ));
        }

        output.push_str(&"-".repeat(82));
        output.push('\n');
        output.push_str(&format!(
            "* = Over budget ({}), ! = above {:.0}% of budget\n",
            self.over_budget_count(),
            warning_threshold
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(
        &self,
        categories: &CategoryLookup<'_>,
        writer: W,
    ) -> BudgetResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record([
            "Budget ID",
            "Category",
            "Period",
            "Budgeted",
            "Spent",
            "Remaining",
            "Percentage",
            "Over Budget",
        ])?;

        for status in &self.statuses {
            let percentage = if status.is_unbounded() {
                "inf".to_string()
            } else {
                format!("{:.2}", status.percentage)
            };

            csv.write_record([
                status.budget.id.value().to_string(),
                categories.label(status.budget.category_id).to_string(),
                status.budget.period.to_string(),
                format!("{:.2}", status.budget.amount.as_units()),
                format!("{:.2}", status.spent.as_units()),
                format!("{:.2}", status.remaining.as_units()),
                percentage,
                status.is_over_budget.to_string(),
            ])?;
        }

        csv.flush()?;
        Ok(())
    }
}
