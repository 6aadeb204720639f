//! Budget model
//!
//! A budget is a spending limit for one category. The period is a display
//! label; which transactions count is decided by the reporting window the
//! caller chooses, not by the budget.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{BudgetId, CategoryId};
use super::money::Money;

/// How often a budget's limit renews
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    #[default]
    Monthly,
    Yearly,
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for BudgetPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" => Ok(Self::Monthly),
            "yearly" | "year" | "annual" => Ok(Self::Yearly),
            other => Err(format!(
                "Invalid budget period: {}. Must be 'monthly' or 'yearly'",
                other
            )),
        }
    }
}

/// A spending limit for a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// The category this budget limits
    pub category_id: CategoryId,

    /// Target amount; zero is allowed
    pub amount: Money,

    /// Renewal period (display only)
    #[serde(default)]
    pub period: BudgetPeriod,

    /// First day the budget applies
    pub start_date: NaiveDate,

    /// Last day the budget applies, if it ends
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    /// When the budget was created
    pub created_at: DateTime<Utc>,

    /// When the budget was last modified
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a new open-ended budget
    pub fn new(
        id: BudgetId,
        category_id: CategoryId,
        amount: Money,
        period: BudgetPeriod,
        start_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            category_id,
            amount,
            period,
            start_date,
            end_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Whether the budget's validity range covers `date`
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        date >= self.start_date && self.end_date.map_or(true, |end| date <= end)
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.amount.is_negative() {
            return Err(BudgetValidationError::NegativeAmount(self.amount));
        }

        if self.amount.exceeds_limit() {
            return Err(BudgetValidationError::AmountTooLarge(self.amount));
        }

        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(BudgetValidationError::EndBeforeStart {
                    start: self.start_date,
                    end,
                });
            }
        }

        Ok(())
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NegativeAmount(Money),
    AmountTooLarge(Money),
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Budget amount cannot be negative (got {})", amount)
            }
            Self::AmountTooLarge(amount) => write!(
                f,
                "Budget amount {} exceeds the maximum of {}",
                amount,
                Money::MAX_AMOUNT
            ),
            Self::EndBeforeStart { start, end } => {
                write!(f, "Budget end date {} is before start date {}", end, start)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn budget(cents: i64) -> Budget {
        Budget::new(
            BudgetId::new(1),
            CategoryId::new(1),
            Money::from_cents(cents),
            BudgetPeriod::Monthly,
            ymd(2025, 1, 1),
        )
    }

    #[test]
    fn test_zero_amount_is_valid() {
        assert!(budget(0).validate().is_ok());
    }

    #[test]
    fn test_amount_above_limit_rejected() {
        let too_large = Money::MAX_AMOUNT.cents() + 1;
        assert_eq!(
            budget(too_large).validate(),
            Err(BudgetValidationError::AmountTooLarge(Money::from_cents(too_large)))
        );
        assert!(budget(Money::MAX_AMOUNT.cents()).validate().is_ok());
    }

    #[test]
    fn test_negative_amount_rejected() {
        assert_eq!(
            budget(-100).validate(),
            Err(BudgetValidationError::NegativeAmount(Money::from_cents(-100)))
        );
    }

    #[test]
    fn test_end_before_start_rejected() {
        let b = budget(100).with_end_date(ymd(2024, 12, 31));
        assert!(matches!(
            b.validate(),
            Err(BudgetValidationError::EndBeforeStart { .. })
        ));
    }

    #[test]
    fn test_is_active_on() {
        let open = budget(100);
        assert!(!open.is_active_on(ymd(2024, 12, 31)));
        assert!(open.is_active_on(ymd(2030, 6, 1)));

        let closed = budget(100).with_end_date(ymd(2025, 3, 31));
        assert!(closed.is_active_on(ymd(2025, 3, 31)));
        assert!(!closed.is_active_on(ymd(2025, 4, 1)));
    }

    #[test]
    fn test_period_parse_and_display() {
        assert_eq!("Yearly".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::Yearly);
        assert_eq!("month".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::Monthly);
        assert!("weekly".parse::<BudgetPeriod>().is_err());
        assert_eq!(BudgetPeriod::Yearly.to_string(), "yearly");
    }

    #[test]
    fn test_serialization() {
        let b = budget(50000).with_end_date(ymd(2025, 12, 31));
        let value = serde_json::to_value(&b).unwrap();
        assert_eq!(value["amount"], 50000);
        assert_eq!(value["period"], "monthly");
        let back: Budget = serde_json::from_value(value).unwrap();
        assert_eq!(back, b);
    }
}
