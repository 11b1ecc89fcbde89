//! Error types for the eflow-calendar crate.

/// Error type for all fallible operations in the eflow-calendar crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum CalendarError {
    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u32,
    },

    /// Returned when a year span cannot be represented by chrono.
    #[error("year {year} is outside the supported date range")]
    YearOutOfRange {
        /// The year label that could not be converted.
        year: i32,
    },
}
