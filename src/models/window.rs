//! Reporting window
//!
//! The inclusive date range a dashboard is computed over. Transactions are
//! filtered to the window before they reach the aggregation engine.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An inclusive date range for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum ReportWindow {
    /// A calendar month (e.g., "2025-01")
    Monthly { year: i32, month: u32 },

    /// A calendar year (e.g., "2025")
    Yearly { year: i32 },

    /// Any inclusive range (e.g., "2025-01-01..2025-03-31")
    Custom { start: NaiveDate, end: NaiveDate },
}

impl ReportWindow {
    /// Create a monthly window
    pub fn monthly(year: i32, month: u32) -> Result<Self, WindowParseError> {
        if !(1..=12).contains(&month) {
            return Err(WindowParseError::InvalidMonth(month));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(WindowParseError::InvalidFormat(format!(
                "{:04}-{:02}",
                year, month
            )));
        }
        Ok(Self::Monthly { year, month })
    }

    /// Create a yearly window
    pub fn yearly(year: i32) -> Result<Self, WindowParseError> {
        if NaiveDate::from_ymd_opt(year, 12, 31).is_none() {
            return Err(WindowParseError::InvalidFormat(year.to_string()));
        }
        Ok(Self::Yearly { year })
    }

    /// Create a custom window
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Result<Self, WindowParseError> {
        if end < start {
            return Err(WindowParseError::EndBeforeStart { start, end });
        }
        Ok(Self::Custom { start, end })
    }

    /// The month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        Self::Monthly {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Get the current monthly window
    pub fn current_month() -> Self {
        Self::month_of(chrono::Local::now().date_naive())
    }

    /// First day of the window
    pub fn start_date(&self) -> NaiveDate {
        match self {
            Self::Monthly { year, month } => NaiveDate::from_ymd_opt(*year, *month, 1),
            Self::Yearly { year } => NaiveDate::from_ymd_opt(*year, 1, 1),
            Self::Custom { start, .. } => Some(*start),
        }
        .unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the window (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        match self {
            Self::Monthly { year, month } => {
                let next_month = if *month == 12 {
                    NaiveDate::from_ymd_opt(*year + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(*year, *month + 1, 1)
                };
                next_month
                    .and_then(|d| d.pred_opt())
                    .or_else(|| NaiveDate::from_ymd_opt(*year, 12, 31))
            }
            Self::Yearly { year } => NaiveDate::from_ymd_opt(*year, 12, 31),
            Self::Custom { end, .. } => Some(*end),
        }
        .unwrap_or(NaiveDate::MAX)
    }

    /// Check if a date falls within this window
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    /// Human-readable title, e.g. "January 2025"
    pub fn title(&self) -> String {
        match self {
            Self::Monthly { .. } => self.start_date().format("%B %Y").to_string(),
            Self::Yearly { year } => year.to_string(),
            Self::Custom { start, end } => format!("{} to {}", start, end),
        }
    }

    /// Parse a window string
    ///
    /// Formats:
    /// - Monthly: "2025-01"
    /// - Yearly: "2025"
    /// - Custom: "2025-01-01..2025-01-15"
    pub fn parse(s: &str) -> Result<Self, WindowParseError> {
        let s = s.trim();
        let invalid = || WindowParseError::InvalidFormat(s.to_string());

        if let Some((start, end)) = s.split_once("..") {
            let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").map_err(|_| invalid())?;
            let end = NaiveDate::parse_from_str(end, "%Y-%m-%d").map_err(|_| invalid())?;
            return Self::custom(start, end);
        }

        if let Some((year, month)) = s.split_once('-') {
            let year: i32 = year.parse().map_err(|_| invalid())?;
            let month: u32 = month.parse().map_err(|_| invalid())?;
            return Self::monthly(year, month);
        }

        let year: i32 = s.parse().map_err(|_| invalid())?;
        Self::yearly(year)
    }
}

impl Default for ReportWindow {
    fn default() -> Self {
        Self::current_month()
    }
}

impl FromStr for ReportWindow {
    type Err = WindowParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ReportWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly { year, month } => write!(f, "{:04}-{:02}", year, month),
            Self::Yearly { year } => write!(f, "{:04}", year),
            Self::Custom { start, end } => write!(
                f,
                "{}..{}",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            ),
        }
    }
}

/// Error type for window parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for WindowParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(
                f,
                "Invalid period format: {}. Use YYYY-MM, YYYY, or YYYY-MM-DD..YYYY-MM-DD",
                s
            ),
            Self::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            Self::EndBeforeStart { start, end } => {
                write!(f, "Window end {} is before start {}", end, start)
            }
        }
    }
}

impl std::error::Error for WindowParseError {}
