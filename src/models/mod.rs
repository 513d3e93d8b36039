//! Core data models for the expense manager
//!
//! This module contains the value types the rest of the crate passes around:
//! expense records and the decimal amount they carry.

pub mod amount;
pub mod expense;

pub use amount::{Amount, AmountParseError};
pub use expense::{parse_date, Expense, DATE_FORMAT};
