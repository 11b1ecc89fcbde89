//! Error types for the eflow-iari crate.

use eflow_iha::{Conventions, PulseThresholds};

/// Error type for all fallible operations in the eflow-iari crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IariError {
    /// Returned when either matrix does not have 33 parameter columns.
    #[error(
        "incompatible parameter matrices: natural has {natural_n_params} parameters, impacted has {impacted_n_params} (both must have 33)"
    )]
    IncompatibleMatrices {
        /// Columns in the natural matrix.
        natural_n_params: usize,
        /// Columns in the impacted matrix.
        impacted_n_params: usize,
    },

    /// Returned when a matrix has fewer years than required.
    #[error("insufficient years in {series} series: found {n_years}, need at least {min_years}")]
    InsufficientYears {
        /// Which side of the comparison: `"natural"` or `"impacted"`.
        series: &'static str,
        /// Years found.
        n_years: usize,
        /// Years required.
        min_years: usize,
    },

    /// Returned when bands are requested from a matrix without recorded pulse thresholds.
    #[error("natural parameter matrix has no recorded pulse thresholds; re-extract with explicit thresholds")]
    MissingPulseThresholds,

    /// Returned when the impacted matrix was extracted under different conventions.
    #[error("convention mismatch: natural {natural:?} vs impacted {impacted:?}")]
    ConventionMismatch {
        /// Conventions of the natural matrix or bands.
        natural: Conventions,
        /// Conventions of the impacted matrix.
        impacted: Conventions,
    },

    /// Returned when the impacted matrix used different pulse thresholds.
    #[error("pulse threshold mismatch: natural {natural:?} vs impacted {impacted:?}")]
    PulseThresholdMismatch {
        /// Thresholds of the natural matrix or bands.
        natural: PulseThresholds,
        /// Thresholds recorded on the impacted matrix.
        impacted: Option<PulseThresholds>,
    },

    /// Returned when the impacted matrix used a different zero-flow threshold.
    #[error("zero-flow threshold mismatch: natural {natural} vs impacted {impacted}")]
    ZeroFlowThresholdMismatch {
        /// Threshold recorded on the natural matrix or bands.
        natural: f64,
        /// Threshold recorded on the impacted matrix.
        impacted: f64,
    },

    /// Returned when band vectors are malformed.
    #[error("invalid natural bands: {reason}")]
    InvalidBands {
        /// What was wrong.
        reason: String,
    },
}
