//! Transaction model
//!
//! The stored amount is signed but its sign is not authoritative: reporting
//! code takes magnitudes for expenses and sums income as-is.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{CategoryId, TransactionId};
use super::money::Money;

/// Kind of a transaction
///
/// Only `Expense` and `Income` take part in budget totals. Transfers and any
/// unrecognised value read from disk are carried but excluded from both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    #[default]
    Expense,
    Income,
    Transfer,
    #[serde(other)]
    Other,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "expense"),
            Self::Income => write!(f, "income"),
            Self::Transfer => write!(f, "transfer"),
            Self::Other => write!(f, "other"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            "transfer" => Ok(Self::Transfer),
            other => Err(format!(
                "Invalid transaction type: {}. Must be 'income', 'expense', or 'transfer'",
                other
            )),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Owning category; may point at a category that has since been deleted
    pub category_id: CategoryId,

    /// Signed amount
    pub amount: Money,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Date the transaction occurred
    pub date: NaiveDate,

    /// Expense, income, or something the reports ignore
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// When the transaction was created
    pub created_at: DateTime<Utc>,

    /// When the transaction was last modified
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        id: TransactionId,
        category_id: CategoryId,
        date: NaiveDate,
        amount: Money,
        kind: TransactionType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            category_id,
            amount,
            description: None,
            date,
            kind,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    /// Force the conventional sign for the transaction type
    ///
    /// Expenses become negative and income positive. Other kinds keep
    /// whatever sign they were entered with.
    pub fn normalize_sign(&mut self) {
        match self.kind {
            TransactionType::Expense if self.amount.is_positive() => {
                self.amount = -self.amount;
            }
            TransactionType::Income if self.amount.is_negative() => {
                self.amount = self.amount.abs();
            }
            _ => {}
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.kind, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn txn(amount: i64, kind: TransactionType) -> Transaction {
        Transaction::new(
            TransactionId::new(1),
            CategoryId::new(1),
            date(),
            Money::from_cents(amount),
            kind,
        )
    }

    #[test]
    fn test_kind_predicates() {
        assert!(txn(-100, TransactionType::Expense).is_expense());
        assert!(txn(100, TransactionType::Income).is_income());
        let transfer = txn(100, TransactionType::Transfer);
        assert!(!transfer.is_expense());
        assert!(!transfer.is_income());
    }

    #[test]
    fn test_normalize_sign() {
        let mut expense = txn(2500, TransactionType::Expense);
        expense.normalize_sign();
        assert_eq!(expense.amount.cents(), -2500);

        let mut income = txn(-2500, TransactionType::Income);
        income.normalize_sign();
        assert_eq!(income.amount.cents(), 2500);

        let mut transfer = txn(-2500, TransactionType::Transfer);
        transfer.normalize_sign();
        assert_eq!(transfer.amount.cents(), -2500);
    }

    #[test]
    fn test_type_parse() {
        assert_eq!(
            "Expense".parse::<TransactionType>().unwrap(),
            TransactionType::Expense
        );
        assert_eq!(
            "income".parse::<TransactionType>().unwrap(),
            TransactionType::Income
        );
        assert!("refund".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_unknown_type_deserializes_as_other() {
        let json = r#"{
            "id": 9,
            "category_id": 2,
            "amount": -1200,
            "date": "2025-01-03",
            "type": "refund",
            "created_at": "2025-01-03T00:00:00Z",
            "updated_at": "2025-01-03T00:00:00Z"
        }"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.kind, TransactionType::Other);
        assert!(!txn.is_expense());
        assert!(!txn.is_income());
    }

    #[test]
    fn test_serialization_uses_type_key() {
        let t = txn(-100, TransactionType::Expense).with_description("Coffee");
        let value = serde_json::to_value(&t).unwrap();
        assert_eq!(value["type"], "expense");
        assert_eq!(value["description"], "Coffee");

        let back: Transaction = serde_json::from_value(value).unwrap();
        assert_eq!(back, t);
    }
}
