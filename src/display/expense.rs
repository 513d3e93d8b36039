//! Expense display formatting
//!
//! Provides utilities for formatting expenses for terminal display: the
//! per-expense card, the register view and the confirmation lines printed by
//! the session.

use std::fmt::Write;

use crate::config::Settings;
use crate::error::ValidationError;
use crate::models::{Amount, Expense, DATE_FORMAT};

/// How amounts and dates are rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayStyle {
    /// Currency symbol prefixed to amounts
    pub currency_symbol: String,
    /// strftime pattern for dates
    pub date_format: String,
}

impl DisplayStyle {
    /// Render an amount with the currency symbol
    pub fn amount(&self, amount: Amount) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// Render a date with the configured pattern
    ///
    /// Falls back to ISO format when the configured pattern is not valid
    /// strftime.
    pub fn date(&self, date: chrono::NaiveDate) -> String {
        let mut rendered = String::new();
        if write!(rendered, "{}", date.format(&self.date_format)).is_err() {
            return date.format(DATE_FORMAT).to_string();
        }
        rendered
    }
}

impl Default for DisplayStyle {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for DisplayStyle {
    fn from(settings: &Settings) -> Self {
        Self {
            currency_symbol: settings.currency_symbol.clone(),
            date_format: settings.date_format.clone(),
        }
    }
}

/// Format a single expense as a three-line card
pub fn format_expense_card(expense: &Expense, style: &DisplayStyle) -> String {
    format!(
        "Name: {}\nAmount: {}\nDate: {}\n",
        expense.name(),
        style.amount(expense.amount()),
        style.date(expense.date())
    )
}

/// Format a list of expenses as a register in insertion order
pub fn format_expense_register(expenses: &[Expense], style: &DisplayStyle) -> String {
    if expenses.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:>3} {:10} {:24} {:>12}\n", "#", "Date", "Name", "Amount"));
    output.push_str(&"-".repeat(52));
    output.push('\n');

    for (i, expense) in expenses.iter().enumerate() {
        output.push_str(&format!(
            "{:>3} {:10} {:24} {:>12}\n",
            i + 1,
            style.date(expense.date()),
            truncate(expense.name(), 24),
            style.amount(expense.amount())
        ));
    }

    output
}

/// Confirmation printed after a successful add
pub fn format_added_message(expense: &Expense, style: &DisplayStyle) -> String {
    format!(
        "Expense added: {} - {}",
        expense.name(),
        style.amount(expense.amount())
    )
}

/// Warning printed after a rejected add
pub fn format_rejection_message(err: &ValidationError) -> String {
    format!("Please enter a valid name, amount, and date ({})", err)
}

/// Truncate a string to a maximum length, adding ellipsis if needed
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
