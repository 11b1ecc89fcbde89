//! Validated daily flow records.

use chrono::NaiveDate;

use crate::error::IhaError;

/// An immutable, strictly daily, non-negative discharge record.
///
/// Only constructible through [`FlowSeries::new`] or
/// [`FlowSeries::from_start`], so every instance has passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSeries {
    dates: Vec<NaiveDate>,
    flows: Vec<f64>,
}

impl FlowSeries {
    /// Validates `dates` and `flows` and wraps them in a series.
    ///
    /// Checks run in this order: equal lengths, finite flows, non-negative
    /// flows, one-day spacing, non-empty.
    ///
    /// # Errors
    ///
    /// - [`IhaError::LengthMismatch`] if the arrays differ in length.
    /// - [`IhaError::NonFiniteFlow`] for NaN or infinite flow.
    /// - [`IhaError::NegativeFlow`] if any flow is below zero.
    /// - [`IhaError::NonDailyTimestep`] if consecutive dates are not one day apart.
    /// - [`IhaError::EmptySeries`] if both arrays are empty.
    pub fn new(dates: Vec<NaiveDate>, flows: Vec<f64>) -> Result<Self, IhaError> {
        if dates.len() != flows.len() {
            return Err(IhaError::LengthMismatch {
                n_dates: dates.len(),
                n_flows: flows.len(),
            });
        }

        if let Some(position) = flows.iter().position(|q| !q.is_finite()) {
            return Err(IhaError::NonFiniteFlow { position });
        }

        let n_negative = flows.iter().filter(|&&q| q < 0.0).count();
        if n_negative > 0 {
            let min_value = flows.iter().copied().fold(f64::INFINITY, f64::min);
            return Err(IhaError::NegativeFlow {
                n_negative,
                min_value,
            });
        }

        for (position, pair) in dates.windows(2).enumerate() {
            let gap_days = (pair[1] - pair[0]).num_days();
            if gap_days != 1 {
                return Err(IhaError::NonDailyTimestep { position, gap_days });
            }
        }

        if flows.is_empty() {
            return Err(IhaError::EmptySeries);
        }

        Ok(Self { dates, flows })
    }

    /// Builds a series whose first value falls on `start`, one value per day.
    ///
    /// # Errors
    ///
    /// Same as [`FlowSeries::new`]; additionally fails with
    /// [`IhaError::InvalidConfig`] if the date axis would run past chrono's
    /// maximum date.
    pub fn from_start(start: NaiveDate, flows: Vec<f64>) -> Result<Self, IhaError> {
        let dates: Vec<NaiveDate> = start.iter_days().take(flows.len()).collect();
        if dates.len() != flows.len() {
            return Err(IhaError::InvalidConfig {
                reason: format!(
                    "date axis starting {start} cannot hold {} days",
                    flows.len()
                ),
            });
        }
        Self::new(dates, flows)
    }

    /// Dates of the record.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Daily discharge values.
    pub fn flows(&self) -> &[f64] {
        &self.flows
    }

    /// Number of days.
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    /// Always `false` for a validated series.
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// First date of the record.
    pub fn start_date(&self) -> NaiveDate {
        self.dates[0]
    }

    /// Last date of the record.
    pub fn end_date(&self) -> NaiveDate {
        self.dates[self.dates.len() - 1]
    }
}
