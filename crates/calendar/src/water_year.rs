//! Water year labelling.

use crate::error::CalendarError;

/// Returns the water-year label for a calendar `year` and `month`.
///
/// A water year starting in `start_month` is labelled by the calendar year
/// in which it *ends*: every month from `start_month` onward belongs to the
/// following year's label. `start_month == 1` is the calendar year.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` or `start_month` is
/// outside 1..=12.
///
/// # Examples
///
/// ```ignore
/// // October-start water year (US / UK hydrological convention):
/// assert_eq!(water_year(2000, 10, 10).unwrap(), 2001); // Oct 2000 -> WY 2001
/// assert_eq!(water_year(2001, 9, 10).unwrap(), 2001);  // Sep 2001 -> WY 2001
///
/// // Calendar year:
/// assert_eq!(water_year(2000, 6, 1).unwrap(), 2000);
/// ```
pub fn water_year(year: i32, month: u32, start_month: u32) -> Result<i32, CalendarError> {
    for m in [month, start_month] {
        if !(1..=12).contains(&m) {
            return Err(CalendarError::InvalidMonth { month: m });
        }
    }
    if start_month > 1 && month >= start_month {
        Ok(year + 1)
    } else {
        Ok(year)
    }
}
