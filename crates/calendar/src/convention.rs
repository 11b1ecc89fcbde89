//! Calendar-year and water-year conventions.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;
use crate::water_year::water_year;

/// How daily records are grouped into 12-month accounting periods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum YearConvention {
    /// January 1 to December 31.
    #[default]
    Calendar,
    /// Twelve months from `start_month` (2..=12), labelled by the ending year.
    WaterYear {
        /// First month of the water year.
        start_month: u32,
    },
}

impl YearConvention {
    /// Creates a water-year convention starting in `start_month`.
    ///
    /// `start_month == 1` collapses to [`YearConvention::Calendar`].
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `start_month` is outside 1..=12.
    pub fn water_year(start_month: u32) -> Result<Self, CalendarError> {
        match start_month {
            1 => Ok(Self::Calendar),
            2..=12 => Ok(Self::WaterYear { start_month }),
            _ => Err(CalendarError::InvalidMonth { month: start_month }),
        }
    }

    /// Returns the first month of the accounting period (1 for calendar years).
    pub fn start_month(self) -> u32 {
        match self {
            Self::Calendar => 1,
            Self::WaterYear { start_month } => start_month,
        }
    }

    /// Returns the year label a date belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if the convention holds an
    /// out-of-range start month (only possible through deserialization).
    pub fn label(self, date: NaiveDate) -> Result<i32, CalendarError> {
        water_year(date.year(), date.month(), self.start_month())
    }

    /// Returns the first day of the period labelled `label` and its length in days.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::YearOutOfRange`] if the span cannot be
    /// represented, or [`CalendarError::InvalidMonth`] for a bad start month.
    pub fn span(self, label: i32) -> Result<(NaiveDate, i64), CalendarError> {
        let start_month = self.start_month();
        if !(1..=12).contains(&start_month) {
            return Err(CalendarError::InvalidMonth { month: start_month });
        }
        let first_year = if start_month == 1 { label } else { label - 1 };
        let first = NaiveDate::from_ymd_opt(first_year, start_month, 1)
            .ok_or(CalendarError::YearOutOfRange { year: label })?;
        let next = NaiveDate::from_ymd_opt(first_year + 1, start_month, 1)
            .ok_or(CalendarError::YearOutOfRange { year: label })?;
        Ok((first, (next - first).num_days()))
    }
}
