//! Month labels
//!
//! Renders the "month year" label used as the grouping key of the monthly
//! report, using chrono's localized month names.

use chrono::{Locale, NaiveDate};

use crate::error::{ExpenseError, ExpenseResult};

/// Format pattern for month labels ("March 2024")
pub const MONTH_LABEL_FORMAT: &str = "%B %Y";

/// Locale code used when none is configured
pub const DEFAULT_LOCALE: &str = "en_US";

/// Renders month labels for a single locale
#[derive(Debug, Clone)]
pub struct MonthLabeler {
    code: String,
    locale: Locale,
}

impl MonthLabeler {
    /// Build a labeler from a locale code such as "en_US" or "fr_FR"
    pub fn from_code(code: &str) -> ExpenseResult<Self> {
        let locale = Locale::try_from(code)
            .map_err(|_| ExpenseError::Config(format!("Unknown locale: {}", code)))?;

        Ok(Self {
            code: code.to_string(),
            locale,
        })
    }

    /// The locale code this labeler renders with
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Render the month label for a date
    pub fn label(&self, date: NaiveDate) -> String {
        date.format_localized(MONTH_LABEL_FORMAT, self.locale).to_string()
    }
}

impl Default for MonthLabeler {
    fn default() -> Self {
        Self {
            code: DEFAULT_LOCALE.to_string(),
            locale: Locale::en_US,
        }
    }
}
