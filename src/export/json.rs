//! JSON Export functionality
//!
//! Dumps the session's expenses and their monthly breakdown as a single JSON
//! document with schema versioning. The dump is write-only; nothing reads it
//! back into a store.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ExpenseResult;
use crate::models::{Amount, Expense};
use crate::reports::{MonthGroup, MonthLabeler, MonthlyReport};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full session export structure
#[derive(Debug, Clone, Serialize)]
pub struct SessionExport<'a> {
    /// Schema version for compatibility checking
    pub schema_version: &'static str,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: &'static str,

    /// Locale the month labels were rendered with
    pub locale: &'a str,

    /// All expenses in insertion order
    pub expenses: &'a [Expense],

    /// Monthly breakdown in first-appearance order
    pub months: Vec<MonthGroup>,

    /// Sum of every amount
    pub total: Amount,
}

impl<'a> SessionExport<'a> {
    /// Build an export snapshot of the given expenses
    pub fn new(expenses: &'a [Expense], labeler: &'a MonthLabeler) -> Self {
        let report = MonthlyReport::generate(expenses, labeler);

        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            locale: labeler.code(),
            expenses,
            total: report.total(),
            months: report.groups().to_vec(),
        }
    }
}

/// Export expenses and their monthly breakdown as pretty-printed JSON
pub fn export_session_json<W: Write>(
    expenses: &[Expense],
    labeler: &MonthLabeler,
    mut writer: W,
) -> ExpenseResult<()> {
    let export = SessionExport::new(expenses, labeler);
    serde_json::to_writer_pretty(&mut writer, &export)?;
    writeln!(writer)?;
    Ok(())
}
