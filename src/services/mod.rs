//! Service layer for budgetwatch
//!
//! Validation, persistence and audit logging on top of the repositories.

pub mod budget;
pub mod category;
pub mod transaction;

pub use budget::{BudgetService, CreateBudgetInput, UpdateBudgetInput};
pub use category::{CategoryService, CreateCategoryInput, UpdateCategoryInput};
pub use transaction::{CreateTransactionInput, TransactionService, UpdateTransactionInput};
