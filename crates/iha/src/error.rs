//! Error types for the eflow-iha crate.

use eflow_calendar::CalendarError;

/// Error type for all fallible operations in the eflow-iha crate.
///
/// Covers input validation of the daily record, pulse threshold derivation,
/// and construction of the parameter matrix.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IhaError {
    /// Date handling error.
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// Returned when the date and flow arrays differ in length.
    #[error("date and flow arrays differ in length: {n_dates} dates vs {n_flows} flows")]
    LengthMismatch {
        /// Number of dates supplied.
        n_dates: usize,
        /// Number of flow values supplied.
        n_flows: usize,
    },

    /// Returned when a flow value is NaN or infinite.
    #[error("non-finite flow value at position {position}")]
    NonFiniteFlow {
        /// Index of the first offending value.
        position: usize,
    },

    /// Returned when the record contains negative discharge.
    #[error("flow record contains {n_negative} negative value(s) (minimum {min_value})")]
    NegativeFlow {
        /// Number of negative values.
        n_negative: usize,
        /// Most negative value found.
        min_value: f64,
    },

    /// Returned when two consecutive dates are not exactly one day apart.
    #[error("non-daily timestep at position {position}: gap of {gap_days} day(s)")]
    NonDailyTimestep {
        /// Index of the first date of the offending pair.
        position: usize,
        /// Observed gap in days.
        gap_days: i64,
    },

    /// Returned when the record holds no values.
    #[error("flow record is empty")]
    EmptySeries,

    /// Returned when too few complete years survive segmentation.
    #[error(
        "insufficient data: {n_years} complete year(s) in {n_days} days, at least {min_years} required"
    )]
    InsufficientData {
        /// Number of days in the record.
        n_days: usize,
        /// Number of complete years found.
        n_years: usize,
        /// Minimum required.
        min_years: usize,
    },

    /// Returned when the 25th and 75th percentiles of a record coincide.
    #[error("degenerate pulse thresholds: Q25 ({q25}) is not below Q75 ({q75})")]
    DegeneratePulseThresholds {
        /// 25th percentile of the record.
        q25: f64,
        /// 75th percentile of the record.
        q75: f64,
    },

    /// Returned when supplied pulse thresholds violate `0 <= low < high`.
    #[error("invalid pulse thresholds: need 0 <= low < high, got low={low}, high={high}")]
    InvalidPulseThresholds {
        /// Low threshold.
        low: f64,
        /// High threshold.
        high: f64,
    },

    /// Returned when an extraction setting is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What was wrong.
        reason: String,
    },

    /// Returned when a parameter matrix does not have the expected shape.
    #[error("parameter matrix shape mismatch: {n_rows}x{n_cols} values for {n_years} year label(s)")]
    MatrixShape {
        /// Rows in the value array.
        n_rows: usize,
        /// Columns in the value array.
        n_cols: usize,
        /// Number of year labels.
        n_years: usize,
    },
}
