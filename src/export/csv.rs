//! CSV Export functionality
//!
//! Writes the session's expenses as spreadsheet-compatible rows.

use std::io::Write;

use crate::error::ExpenseResult;
use crate::models::{Expense, DATE_FORMAT};
use crate::reports::MonthLabeler;

/// Export expenses to CSV in insertion order
///
/// Columns: `Name,Date,Amount,Month`. Dates are always ISO so the file can
/// be re-read by other tools regardless of display settings.
pub fn export_expenses_csv<W: Write>(
    expenses: &[Expense],
    labeler: &MonthLabeler,
    writer: W,
) -> ExpenseResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(["Name", "Date", "Amount", "Month"])?;

    for expense in expenses {
        csv_writer.write_record([
            expense.name().to_string(),
            expense.date().format(DATE_FORMAT).to_string(),
            expense.amount().to_string(),
            labeler.label(expense.date()),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}
