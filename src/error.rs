//! Custom error types for the expense manager
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Input validation failures have their own
//! type, [`ValidationError`], so the store can report them without dragging in
//! I/O or configuration concerns.

use std::fmt;

use thiserror::Error;

/// The input field that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Amount,
    Date,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Amount => write!(f, "amount"),
            Self::Date => write!(f, "date"),
        }
    }
}

/// Rejection of raw expense input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name was empty or only whitespace
    #[error("expense name must not be empty")]
    EmptyName,

    /// Amount could not be parsed as a finite decimal number
    #[error("invalid amount: '{0}'")]
    InvalidAmount(String),

    /// Date was not a real calendar date in YYYY-MM-DD form
    #[error("invalid date: '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

impl ValidationError {
    /// Which input field was rejected
    pub fn field(&self) -> Field {
        match self {
            Self::EmptyName => Field::Name,
            Self::InvalidAmount(_) => Field::Amount,
            Self::InvalidDate(_) => Field::Date,
        }
    }
}

/// The main error type for expense manager operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV writer errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Rejected expense input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl ExpenseError {
    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for ExpenseError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for expense manager operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;
