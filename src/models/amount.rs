//! Amount type for representing expense quantities
//!
//! Wraps an exact decimal so sums of user-entered values such as `4.50` and
//! `12.00` come out as `16.50` rather than a binary floating-point
//! approximation. Provides parsing, arithmetic and formatting.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A decimal expense amount in a single implicit currency
///
/// Any finite value is allowed, including zero and negatives (refunds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Create an amount from an existing decimal
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Create an amount from hundredths of the currency unit
    ///
    /// # Examples
    /// ```
    /// use expense_manager::models::Amount;
    /// let amount = Amount::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Create a zero amount
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Check if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Add two amounts, returning `None` when the sum leaves the decimal range
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Add two amounts, clamping at the bounds of the decimal range
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Parse an amount from raw user input
    ///
    /// Accepts a decimal numeral with an optional leading sign and an optional
    /// fractional part: "12", "-4.5", "+0.75", ".5", "3.". Surrounding
    /// whitespace is ignored. Exponents, currency symbols, group separators
    /// and non-finite spellings ("NaN", "inf") are rejected. Fractional digits
    /// beyond the 28 the decimal can hold are rounded; an integer part too
    /// large to represent is rejected.
    pub fn parse(s: &str) -> Result<Self, AmountParseError> {
        let raw = s.trim();
        let invalid = || AmountParseError::InvalidFormat(raw.to_string());

        let (negative, unsigned) = match raw.as_bytes().first() {
            Some(b'-') => (true, &raw[1..]),
            Some(b'+') => (false, &raw[1..]),
            _ => (false, raw),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(invalid());
        }

        let whole = if whole.is_empty() { "0" } else { whole };
        let canonical = if fraction.is_empty() {
            whole.to_string()
        } else {
            format!("{}.{}", whole, fraction)
        };

        let value = Decimal::from_str(&canonical).map_err(|_| invalid())?;
        Ok(Self(if negative { -value } else { value }))
    }

    /// Format with a currency symbol, e.g. "$4.50" or "-$3.00"
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}", symbol, self.abs())
        } else {
            format!("{}{}", symbol, self)
        }
    }
}

impl fmt::Display for Amount {
    /// Two decimal places minimum, more when the value carries them
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.scale() > 2 {
            write!(f, "{}", self.0)
        } else {
            write!(f, "{:.2}", self.0)
        }
    }
}

impl std::iter::Sum for Amount {
    /// Saturates instead of overflowing
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::zero(), Amount::saturating_add)
    }
}

impl<'a> std::iter::Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for amount parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    InvalidFormat(String),
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountParseError::InvalidFormat(s) => write!(f, "Invalid amount format: {}", s),
        }
    }
}

impl std::error::Error for AmountParseError {}
