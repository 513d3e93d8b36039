//! Expense model
//!
//! An expense is one user-entered transaction: a name, an amount and the
//! calendar date it happened on. Records are immutable once built; the only
//! way to obtain one is through validation.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;

use super::amount::Amount;
use crate::error::ValidationError;

/// Fixed raw date format: 4-digit year, 2-digit month, 2-digit day
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expense {
    name: String,
    amount: Amount,
    date: NaiveDate,
}

impl Expense {
    /// Create an expense from typed values
    ///
    /// The name is trimmed and must not be empty.
    pub fn new(
        name: impl AsRef<str>,
        amount: Amount,
        date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        Ok(Self {
            name: name.to_string(),
            amount,
            date,
        })
    }

    /// Validate raw text input and build an expense from it
    ///
    /// Fields are checked in order (name, amount, date) and the first
    /// failure is returned.
    pub fn parse(raw_name: &str, raw_amount: &str, raw_date: &str) -> Result<Self, ValidationError> {
        if raw_name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let amount = Amount::parse(raw_amount)
            .map_err(|_| ValidationError::InvalidAmount(raw_amount.to_string()))?;
        let date = parse_date(raw_date)?;

        Self::new(raw_name, amount, date)
    }

    /// The expense label
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The expense amount
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// The calendar date of the expense
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// (year, month) the expense falls in
    pub fn year_month(&self) -> (i32, u32) {
        (self.date.year(), self.date.month())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date.format(DATE_FORMAT), self.name, self.amount)
    }
}

/// Parse a strict `YYYY-MM-DD` calendar date
///
/// chrono alone accepts unpadded fields ("2024-3-1") and signed or
/// overlong years, so the shape is checked before parsing.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let invalid = || ValidationError::InvalidDate(raw.to_string());

    let bytes = raw.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| invalid())
}
