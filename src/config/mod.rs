//! Configuration: where files live and user preferences

pub mod paths;
pub mod settings;

pub use paths::BudgetPaths;
pub use settings::Settings;
