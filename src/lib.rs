//! Expense Manager - personal expense tracking
//!
//! This library provides the core of a minimal expense tracker: expenses are
//! entered as a name, an amount and a date, appended to an in-memory store,
//! and reported grouped by calendar month with per-month subtotals.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Expense records and decimal amounts
//! - `services`: The session store and its observers
//! - `reports`: Monthly grouping and month labels
//! - `display`: Terminal formatting
//! - `export`: CSV and JSON dumps of a session
//! - `cli`: The interactive session shell
//!
//! # Example
//!
//! ```rust
//! use expense_manager::reports::MonthLabeler;
//! use expense_manager::services::ExpenseStore;
//!
//! let mut store = ExpenseStore::new();
//! store.add("Coffee", "4.50", "2024-03-01").unwrap();
//! store.add("Rent", "900", "2024-04-02").unwrap();
//!
//! let report = store.group_by_month(&MonthLabeler::default());
//! assert_eq!(report.labels().collect::<Vec<_>>(), ["March 2024", "April 2024"]);
//! assert_eq!(store.total().to_string(), "904.50");
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{ExpenseError, ExpenseResult, ValidationError};

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter directives
pub const LOG_ENV_VAR: &str = "EXPENSES_LOG";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber, logging to stderr
///
/// The filter comes from `EXPENSES_LOG` (e.g. `expense_manager=debug`) and
/// defaults to warnings only.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("expense_manager=warn"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
