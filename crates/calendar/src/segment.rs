//! Complete-year detection over a contiguous daily date axis.

use chrono::{Datelike, NaiveDate};

use crate::convention::YearConvention;
use crate::error::CalendarError;

/// A complete 12-month period within a daily record.
///
/// `start..end` indexes the rows of the original record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearSlice {
    /// Year label under the active convention.
    pub label: i32,
    /// First row (inclusive).
    pub start: usize,
    /// Last row (exclusive).
    pub end: usize,
}

impl YearSlice {
    /// Number of days in the slice.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the slice holds no days.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Returns the calendar day-of-year (1..=366) of `date`.
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

/// Finds every complete year in a sorted, gap-free daily date axis.
///
/// Dates are grouped into consecutive runs sharing a year label. A run is
/// kept only if it begins on the first day of its span and covers every day
/// of it (365 or 366 days). Partial periods at either end of the record are
/// dropped without error.
///
/// # Errors
///
/// Returns [`CalendarError`] only if the convention itself is invalid or a
/// year falls outside chrono's supported range.
pub fn complete_years(
    dates: &[NaiveDate],
    convention: YearConvention,
) -> Result<Vec<YearSlice>, CalendarError> {
    let mut slices = Vec::new();
    let mut run_start = 0;

    while run_start < dates.len() {
        let label = convention.label(dates[run_start])?;
        let mut run_end = run_start + 1;
        while run_end < dates.len() && convention.label(dates[run_end])? == label {
            run_end += 1;
        }

        let (first_day, n_days) = convention.span(label)?;
        if dates[run_start] == first_day && (run_end - run_start) as i64 == n_days {
            slices.push(YearSlice {
                label,
                start: run_start,
                end: run_end,
            });
        }
        run_start = run_end;
    }

    Ok(slices)
}
