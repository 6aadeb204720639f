//! Reports for budgetwatch
//!
//! The budget status engine and the spending breakdown are pure functions
//! over snapshots; the dashboard ties them to a [`DataSource`] and a window.

pub mod budget_status;
pub mod dashboard;
pub mod source;
pub mod spending;

pub use budget_status::{
    BudgetStatus, BudgetStatusReport, Rollups, StatusLevel, DEFAULT_WARNING_THRESHOLD,
    UNBOUNDED_PERCENTAGE,
};
pub use dashboard::{Dashboard, DashboardRow};
pub use source::DataSource;
pub use spending::{CategorySlice, SpendingBreakdown, CHART_PALETTE};
