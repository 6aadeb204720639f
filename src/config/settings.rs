//! User settings for budgetwatch
//!
//! Stored as `config.json` in the base directory. Every field has a default so
//! older or hand-edited files keep loading.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::BudgetPaths;
use crate::error::BudgetError;
use crate::models::BudgetPeriod;
use crate::reports::DEFAULT_WARNING_THRESHOLD;

/// User settings for budgetwatch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Percentage of a budget above which it is flagged as near its limit
    #[serde(default = "default_warning_threshold")]
    pub warning_threshold: f64,

    /// Period used by `budget create` when none is given
    #[serde(default)]
    pub default_budget_period: BudgetPeriod,

    /// `tracing` filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_warning_threshold() -> f64 {
    DEFAULT_WARNING_THRESHOLD
}

fn default_log_filter() -> String {
    "budgetwatch=info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            warning_threshold: default_warning_threshold(),
            default_budget_period: BudgetPeriod::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    ///
    /// Defaults are not written back; `init` decides when to persist.
    pub fn load_or_create(paths: &BudgetPaths) -> Result<Self, BudgetError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| BudgetError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| BudgetError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), BudgetError> {
        if !(0.0..=100.0).contains(&self.warning_threshold) {
            return Err(BudgetError::Config(format!(
                "warning_threshold must be between 0 and 100 (got {})",
                self.warning_threshold
            )));
        }

        if !is_date_format(&self.date_format) {
            return Err(BudgetError::Config(format!(
                "date_format is not a valid strftime format: {}",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetPaths) -> Result<(), BudgetError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BudgetError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BudgetError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

/// Whether `format` is a strftime string that a plain date can be rendered with
fn is_date_format(format: &str) -> bool {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return false;
    }
    // time-of-day specifiers parse but fail when rendering a date
    let mut rendered = String::new();
    write!(rendered, "{}", NaiveDate::default().format(format)).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.warning_threshold, 80.0);
        assert_eq!(settings.default_budget_period, BudgetPeriod::Monthly);
        assert_eq!(settings.log_filter, "budgetwatch=info");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path());

        let mut settings = Settings::default();
        settings.currency_symbol = "€".to_string();
        settings.warning_threshold = 90.0;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.warning_threshold, 90.0);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path());
        std::fs::write(paths.settings_file(), r#"{"currency_symbol": "£"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "£");
        assert_eq!(loaded.warning_threshold, 80.0);
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path());
        std::fs::write(paths.settings_file(), r#"{"warning_threshold": 150}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, BudgetError::Config(_)));
    }

    #[test]
    fn test_invalid_date_format_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path());
        std::fs::write(paths.settings_file(), r#"{"date_format": "%Q"}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, BudgetError::Config(_)));

        let mut settings = Settings::default();
        settings.date_format = "%d/%m/%Y".to_string();
        assert!(settings.validate().is_ok());
        settings.date_format = "%Y-%".to_string();
        assert!(settings.validate().is_err());
        settings.date_format = "%Y %H:%M".to_string();
        assert!(settings.validate().is_err());
    }
}
