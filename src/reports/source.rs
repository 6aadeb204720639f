//! Snapshot provider consumed by the reports

use chrono::NaiveDate;

use crate::error::BudgetResult;
use crate::models::{Budget, Category, CategoryId, Transaction};

/// Read-only access to the data the reports are computed from
///
/// Each call returns an independent snapshot; the reports never write back.
pub trait DataSource {
    fn fetch_categories(&self) -> BudgetResult<Vec<Category>>;

    fn fetch_budgets(&self) -> BudgetResult<Vec<Budget>>;

    /// Transactions dated within `start..=end`, optionally limited to one category
    fn fetch_transactions(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        category: Option<CategoryId>,
    ) -> BudgetResult<Vec<Transaction>>;
}
