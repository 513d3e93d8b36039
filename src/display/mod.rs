//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses for terminal display.

pub mod expense;

pub use expense::{
    format_added_message, format_expense_card, format_expense_register, format_rejection_message,
    DisplayStyle,
};
