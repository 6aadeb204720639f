//! Display formatting for terminal output

pub mod budget;
pub mod category;
pub mod transaction;

pub use budget::format_budget_list;
pub use category::{format_category_details, format_category_list};
pub use transaction::format_transaction_list;
