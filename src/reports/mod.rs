//! Reports module for the expense manager
//!
//! Provides the monthly breakdown of recorded expenses and the month labels
//! it groups by.

pub mod labels;
pub mod monthly;

pub use labels::{MonthLabeler, DEFAULT_LOCALE, MONTH_LABEL_FORMAT};
pub use monthly::{MonthGroup, MonthlyReport};
