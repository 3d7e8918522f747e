//! Money type for representing currency amounts
//!
//! Wraps a `Decimal` so sums keep full precision. Rounding to two decimals
//! happens only when an amount is formatted for display.

use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;
use std::sync::OnceLock;

/// Largest magnitude accepted from text; keeps sums of any realistic history
/// well inside the `Decimal` range
const MAX_WHOLE_UNITS: i64 = 1_000_000_000_000_000;

/// Digits grouped in threes by commas, with an optional fraction
const GROUPED_PATTERN: &str = r"^\d{1,3}(,\d{3})+(\.\d+)?$";

fn grouped_thousands() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(GROUPED_PATTERN).ok()).as_ref()
}

/// A monetary amount in the bookkeeping currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// Create a Money amount from a decimal value
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use gestion_sol::models::Money;
    /// let amount = Money::from_cents(15000);
    /// assert_eq!(amount.to_string(), "$150.00");
    /// ```
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying decimal value
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if the amount is strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Check if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "$1,234.50", "10", "1.5e2".
    /// A comma is only accepted as a thousands separator, so a decimal comma
    /// such as "150,50" is rejected rather than read as 15050.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let invalid = || MoneyParseError::InvalidFormat(s.to_string());
        let trimmed = s.trim();

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let rest = rest.strip_prefix('$').unwrap_or(rest).trim();
        if rest.is_empty() || rest.starts_with(['-', '+']) {
            return Err(invalid());
        }

        let digits = if rest.contains(',') {
            let well_grouped = grouped_thousands().is_some_and(|re| re.is_match(rest));
            if !well_grouped {
                return Err(invalid());
            }
            rest.replace(',', "")
        } else {
            rest.to_string()
        };

        let value = Decimal::from_str(&digits)
            .or_else(|_| Decimal::from_scientific(&digits))
            .map_err(|_| invalid())?;

        if value > Decimal::new(MAX_WHOLE_UNITS, 0) {
            return Err(MoneyParseError::OutOfRange(s.to_string()));
        }

        Ok(Self(if negative { -value } else { value }))
    }

    /// Add two amounts, `None` when the result leaves the `Decimal` range
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Plain decimal text with at least two fractional digits, as written to CSV
    pub fn to_plain_string(&self) -> String {
        let mut value = self.0.normalize();
        if value.scale() < 2 {
            value.rescale(2);
        }
        value.to_string()
    }

    /// Format with a currency symbol, thousands separators and two decimals
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let magnitude = self.0.abs().round_dp(2).to_f64().unwrap_or_default();
        let digits = format_num::format_num!(",.2", magnitude);
        if self.is_negative() {
            format!("-{}{}", symbol, digits)
        } else {
            format!("{}{}", symbol, digits)
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol("$"))
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
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
        *self = *self + other;
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
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    /// Larger than any amount the books accept
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Amount out of range: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "$10.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-$10.50");
        assert_eq!(Money::from_cents(123456789).to_string(), "$1,234,567.89");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap(), Money::from_cents(1050));
        assert_eq!(Money::parse("$10.50").unwrap(), Money::from_cents(1050));
        assert_eq!(Money::parse("-10.50").unwrap(), Money::from_cents(-1050));
        assert_eq!(Money::parse("150").unwrap(), Money::from_cents(15000));
        assert_eq!(Money::parse(" 150.0 ").unwrap(), Money::from_cents(15000));
        assert_eq!(Money::parse("$1,234.50").unwrap(), Money::from_cents(123450));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("").is_err());
        assert!(Money::parse("   ").is_err());
        assert!(Money::parse("$").is_err());
        assert!(Money::parse("--5").is_err());
        assert!(Money::parse("-+5").is_err());
    }

    #[test]
    fn test_parse_rejects_decimal_comma() {
        assert!(Money::parse("150,50").is_err());
        assert!(Money::parse("1,5").is_err());
        assert!(Money::parse("1,23,456").is_err());
        assert_eq!(Money::parse("1,234,567").unwrap(), Money::from_cents(123456700));
        assert_eq!(Money::parse("+5").unwrap(), Money::from_cents(500));
    }

    #[test]
    fn test_parse_rejects_huge_amounts() {
        assert_eq!(
            Money::parse("79228162514264337593543950335"),
            Err(MoneyParseError::OutOfRange(
                "79228162514264337593543950335".into()
            ))
        );
        assert!(Money::parse("1e30").is_err());
        assert!(Money::parse("1000000000000000").is_ok());
    }

    #[test]
    fn test_sum_does_not_overflow() {
        let max = Money::new(Decimal::MAX);
        let total: Money = vec![max, Money::from_cents(100)].into_iter().sum();
        assert_eq!(total, max);
        assert_eq!(max.checked_add(Money::from_cents(100)), None);
    }

    #[test]
    fn test_full_precision_is_kept() {
        let a = Money::parse("0.005").unwrap();
        let total: Money = vec![a, a].into_iter().sum();
        assert_eq!(total, Money::parse("0.01").unwrap());
        assert_eq!(a.to_plain_string(), "0.005");
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(Money::from_cents(15000).to_plain_string(), "150.00");
        assert_eq!(Money::parse("150.5").unwrap().to_plain_string(), "150.50");
    }

    #[test]
    fn test_arithmetic_and_checks() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!(a + b, Money::from_cents(1500));
        assert_eq!(a - b, Money::from_cents(500));
        assert_eq!(-a, Money::from_cents(-1000));
        assert!(a.is_positive());
        assert!(!Money::zero().is_positive());
        assert!((-a).is_negative());
    }
}
