//! Error types for the eflow-dhram crate.

use eflow_iha::{Conventions, PulseThresholds};

/// Error type for all fallible operations in the eflow-dhram crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DhramError {
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

    /// Returned when the two matrices were extracted under different conventions.
    #[error("convention mismatch: natural {natural:?} vs impacted {impacted:?}")]
    ConventionMismatch {
        /// Conventions of the natural matrix.
        natural: Conventions,
        /// Conventions of the impacted matrix.
        impacted: Conventions,
    },

    /// Returned when the two matrices used different pulse thresholds.
    #[error("pulse threshold mismatch: natural {natural:?} vs impacted {impacted:?}")]
    PulseThresholdMismatch {
        /// Thresholds recorded on the natural matrix.
        natural: Option<PulseThresholds>,
        /// Thresholds recorded on the impacted matrix.
        impacted: Option<PulseThresholds>,
    },

    /// Returned when the two matrices used different zero-flow thresholds.
    #[error("zero-flow threshold mismatch: natural {natural} vs impacted {impacted}")]
    ZeroFlowThresholdMismatch {
        /// Threshold recorded on the natural matrix.
        natural: f64,
        /// Threshold recorded on the impacted matrix.
        impacted: f64,
    },

    /// Returned when a scoring threshold triple is not ordered.
    #[error(
        "invalid scoring thresholds: need 0 <= lower <= intermediate <= upper, got {lower}/{intermediate}/{upper}"
    )]
    InvalidThresholds {
        /// 1-point boundary.
        lower: f64,
        /// 2-point boundary.
        intermediate: f64,
        /// 3-point boundary.
        upper: f64,
    },

    /// Returned when a classification setting is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What was wrong.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_incompatible() {
        let err = DhramError::IncompatibleMatrices {
            natural_n_params: 33,
            impacted_n_params: 30,
        };
        let msg = err.to_string();
        assert!(msg.contains("natural has 33"));
        assert!(msg.contains("impacted has 30"));
    }

    #[test]
    fn error_insufficient_years() {
        let err = DhramError::InsufficientYears {
            series: "impacted",
            n_years: 1,
            min_years: 3,
        };
        assert_eq!(
            err.to_string(),
            "insufficient years in impacted series: found 1, need at least 3"
        );
    }

    #[test]
    fn error_invalid_thresholds() {
        let err = DhramError::InvalidThresholds {
            lower: 5.0,
            intermediate: 2.0,
            upper: 9.0,
        };
        assert!(err.to_string().contains("5/2/9"));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<DhramError>();
    }
}
