//! Strongly-typed ID wrappers for all entity types
//!
//! Entities are keyed by integer identity. Newtype wrappers prevent a budget
//! id from being compared against a category id by accident.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create an ID from its integer value
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Get the underlying integer
            pub const fn value(&self) -> i64 {
                self.0
            }

            /// The ID that follows this one
            pub const fn next(&self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            /// Accepts both the bare integer ("7") and the display form ("cat-7")
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(CategoryId, "cat-");
define_id!(BudgetId, "bud-");
define_id!(TransactionId, "txn-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(CategoryId::new(7).to_string(), "cat-7");
        assert_eq!(BudgetId::new(12).to_string(), "bud-12");
        assert_eq!(TransactionId::new(1).to_string(), "txn-1");
    }

    #[test]
    fn test_id_parse() {
        assert_eq!("7".parse::<CategoryId>().unwrap(), CategoryId::new(7));
        assert_eq!("cat-7".parse::<CategoryId>().unwrap(), CategoryId::new(7));
        assert!("bud-7".parse::<CategoryId>().is_err());
        assert!("groceries".parse::<CategoryId>().is_err());
    }

    #[test]
    fn test_next_id() {
        assert_eq!(BudgetId::new(4).next(), BudgetId::new(5));
    }

    #[test]
    fn test_id_serialization() {
        let id = TransactionId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");
        let deserialized: TransactionId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
