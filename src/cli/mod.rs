//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer.

pub mod budget;
pub mod category;
pub mod report;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use report::{handle_dashboard_command, handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;

use crate::error::{BudgetError, BudgetResult};
use crate::models::Money;

/// Parse a user-entered amount such as "42", "42.50" or "$1,200"
pub(crate) fn parse_amount(input: &str) -> BudgetResult<Money> {
    Money::parse(input)
        .map_err(|e| BudgetError::Validation(format!("Invalid amount '{}': {}", input, e)))
}

/// Parse a YYYY-MM-DD date, or "today"
pub(crate) fn parse_date(input: &str) -> BudgetResult<NaiveDate> {
    if input.eq_ignore_ascii_case("today") {
        return Ok(chrono::Local::now().date_naive());
    }
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        BudgetError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", input))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("42.50").unwrap(), Money::from_cents(4250));
        assert!(parse_amount("forty").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-01-15").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
        );
        assert!(parse_date("today").is_ok());
        assert!(parse_date("15/01/2025").unwrap_err().is_validation());
    }
}
