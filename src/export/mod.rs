//! Export module for the expense manager
//!
//! Dumps the current session in two formats:
//! - CSV: expense rows for spreadsheets
//! - JSON: expenses plus the monthly breakdown, machine-readable

pub mod csv;
pub mod json;

pub use self::csv::export_expenses_csv;
pub use self::json::{export_session_json, SessionExport, EXPORT_SCHEMA_VERSION};

use std::fmt;
use std::str::FromStr;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Conventional file extension for the format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("Unknown export format: {}", other)),
        }
    }
}
