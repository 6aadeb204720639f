//! Core data models for budgetwatch
//!
//! Categories, budgets and transactions as stored, plus the money and
//! reporting-window value types the reports are computed with.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod transaction;
pub mod window;

pub use budget::{Budget, BudgetPeriod};
pub use category::{
    Category, CategoryLookup, DefaultCategory, DEFAULT_CATEGORY_COLOR, UNCATEGORIZED_LABEL,
};
pub use ids::{BudgetId, CategoryId, TransactionId};
pub use money::Money;
pub use transaction::{Transaction, TransactionType};
pub use window::ReportWindow;
