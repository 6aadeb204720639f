//! budgetwatch - per-category budget tracking
//!
//! Users set spending limits ("budgets") per category and record
//! transactions. The reports reconcile the two for a date window: how much of
//! each budget is spent, what remains, portfolio totals, and a breakdown of
//! spending by category.
//!
//! # Architecture
//!
//! - `models`: categories, budgets, transactions, money and report windows
//! - `reports`: the pure aggregation engine plus the dashboard that feeds it
//! - `storage`: JSON file repositories behind the `DataSource` trait
//! - `services`: validated, audited CRUD over the repositories
//! - `audit`: append-only JSONL log of every mutation
//! - `config`: paths and user settings
//! - `cli` / `display`: the `budgetwatch` command line
//!
//! # Example
//!
//! ```rust
//! use budgetwatch::models::{Budget, BudgetId, BudgetPeriod, CategoryId, Money,
//!     Transaction, TransactionId, TransactionType};
//! use budgetwatch::reports::BudgetStatusReport;
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
//! let budget = Budget::new(BudgetId::new(1), CategoryId::new(1),
//!     Money::from_cents(10000), BudgetPeriod::Monthly, date);
//! let spend = Transaction::new(TransactionId::new(1), CategoryId::new(1), date,
//!     Money::from_cents(-4000), TransactionType::Expense);
//!
//! let report = BudgetStatusReport::from_snapshot(&[budget], &[spend]);
//! assert_eq!(report.statuses[0].percentage, 40.0);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{BudgetError, BudgetResult};
