//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) so sums never drift the way
//! binary floating point does. Rounding to two decimals happens only when a
//! value is formatted. Arithmetic saturates at the `i64` bounds instead of
//! overflowing.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Largest magnitude a single budget or transaction may hold ($100 billion)
    pub const MAX_AMOUNT: Money = Money(10_000_000_000_000);

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use budgetwatch::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// assert_eq!(amount.to_string(), "$10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Whether the magnitude is above [`Money::MAX_AMOUNT`]
    pub const fn exceeds_limit(&self) -> bool {
        self.0.unsigned_abs() > Self::MAX_AMOUNT.0 as u64
    }

    /// The amount as a decimal number of currency units, for CSV and charts
    pub fn as_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "10", "1,250.00".
    /// Digits past the second decimal place are truncated.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        let s = s.strip_prefix('$').unwrap_or(s);
        let cleaned: String = s.chars().filter(|c| *c != ',').collect();
        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        if cleaned.starts_with(['-', '+']) {
            return Err(invalid());
        }

        let cents = match cleaned.split_once('.') {
            Some((whole, frac)) => {
                if frac.contains('.') || !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }

                let dollars: i64 = if whole.is_empty() {
                    0
                } else {
                    whole.parse().map_err(|_| invalid())?
                };

                let cents: i64 = match frac.len() {
                    0 => 0,
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    _ => frac[..2].parse().map_err(|_| invalid())?,
                };

                dollars
                    .checked_mul(100)
                    .and_then(|c| c.checked_add(cents))
                    .ok_or_else(invalid)?
            }
            None => cleaned
                .parse::<i64>()
                .map_err(|_| invalid())?
                .checked_mul(100)
                .ok_or_else(invalid)?,
        };

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!(
                "-{}{}.{:02}",
                symbol,
                self.dollars().abs(),
                self.cents_part()
            )
        } else {
            format!("{}{}.{:02}", symbol, self.dollars(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Serialize an amount as decimal currency units (`10.5`) instead of cents
///
/// For report fields consumed by charts; use with `#[serde(serialize_with)]`.
pub fn serialize_as_units<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(money.as_units())
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.dollars(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "$10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-$10.50");
        assert_eq!(format!("{}", Money::from_cents(5)), "$0.05");
        assert_eq!(format!("{:>8}", Money::from_cents(5)), "   $0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(2500);

        assert_eq!((a + b).cents(), 3500);
        assert_eq!((a - b).cents(), -1500);
        assert_eq!((-a).cents(), -1000);
        assert_eq!((a - b).abs().cents(), 1500);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("-0.50").unwrap().cents(), -50);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
        assert_eq!(Money::parse("1,250.00").unwrap().cents(), 125000);
        assert_eq!(Money::parse("3.999").unwrap().cents(), 399);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("1.x").is_err());
        assert!(Money::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_repeated_sign() {
        assert!(Money::parse("--5").is_err());
        assert!(Money::parse("-$-5").is_err());
        assert!(Money::parse("$+5").is_err());
        assert!(Money::parse("-.-5").is_err());
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(Money::parse("99999999999999999").is_err());
        assert!(Money::parse("92233720368547758.08").is_err());
        assert!(Money::parse("-99999999999999999.99").is_err());
        assert_eq!(
            Money::parse("92233720368547758.07").unwrap(),
            Money::from_cents(i64::MAX)
        );
    }

    #[test]
    fn test_arithmetic_saturates() {
        let big = Money::from_cents(i64::MAX);
        assert_eq!(big + Money::from_cents(1), big);
        assert_eq!(
            Money::from_cents(i64::MIN) - Money::from_cents(1),
            Money::from_cents(i64::MIN)
        );
        assert_eq!(Money::from_cents(i64::MIN).abs(), big);

        let total: Money = [big, big, big].iter().sum();
        assert_eq!(total, big);
    }

    #[test]
    fn test_amount_limit() {
        assert!(!Money::MAX_AMOUNT.exceeds_limit());
        assert!(!(-Money::MAX_AMOUNT).exceeds_limit());
        assert!((Money::MAX_AMOUNT + Money::from_cents(1)).exceeds_limit());
        assert!(Money::from_cents(i64::MIN).exceeds_limit());
    }

    #[test]
    fn test_sums_do_not_drift() {
        // 0.1 + 0.2 style accumulation stays exact in cents
        let total: Money = std::iter::repeat(Money::from_cents(10)).take(3).sum();
        assert_eq!(total, Money::from_cents(30));
        assert_eq!(total.as_units(), 0.3);
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_cents(-2500).format_with_symbol("€"), "-€25.00");
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }

    #[test]
    fn test_serialize_as_units() {
        #[derive(Serialize)]
        struct Point {
            #[serde(serialize_with = "serialize_as_units")]
            value: Money,
        }

        let json = serde_json::to_string(&Point {
            value: Money::from_cents(1050),
        })
        .unwrap();
        assert_eq!(json, r#"{"value":10.5}"#);
    }
}
