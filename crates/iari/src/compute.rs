//! IARI scoring of an impacted regime against natural interquartile bands.

use eflow_iha::{N_PARAMS, ParameterMatrix};
use tracing::{debug, info_span};

use crate::deviation::{bands_from_matrix, compute_deviations, overall_score, per_year_scores};
use crate::error::IariError;
use crate::types::{IariClass, IariResult, NaturalBands};

/// Configuration for [`compute_iari`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IariConfig {
    min_years: usize,
}

impl IariConfig {
    /// Set the minimum years required on each side. 0 is treated as 1.
    pub fn with_min_years(mut self, min_years: usize) -> Self {
        self.min_years = min_years;
        self
    }

    /// Minimum years required on each side (at least 1).
    pub fn min_years(&self) -> usize {
        self.min_years.max(1)
    }
}

/// Checks that `impacted` was extracted the way `bands` expects.
///
/// # Errors
///
/// [`IariError::IncompatibleMatrices`], [`IariError::ConventionMismatch`],
/// [`IariError::PulseThresholdMismatch`] or
/// [`IariError::ZeroFlowThresholdMismatch`].
pub fn check_against_bands(impacted: &ParameterMatrix, bands: &NaturalBands) -> Result<(), IariError> {
    if impacted.n_params() != N_PARAMS {
        return Err(IariError::IncompatibleMatrices {
            natural_n_params: N_PARAMS,
            impacted_n_params: impacted.n_params(),
        });
    }
    if impacted.conventions() != bands.conventions() {
        return Err(IariError::ConventionMismatch {
            natural: bands.conventions(),
            impacted: impacted.conventions(),
        });
    }
    if impacted.pulse_thresholds() != Some(bands.pulse_thresholds()) {
        return Err(IariError::PulseThresholdMismatch {
            natural: bands.pulse_thresholds(),
            impacted: impacted.pulse_thresholds(),
        });
    }
    if impacted.zero_flow_threshold() != bands.zero_flow_threshold() {
        return Err(IariError::ZeroFlowThresholdMismatch {
            natural: bands.zero_flow_threshold(),
            impacted: impacted.zero_flow_threshold(),
        });
    }
    Ok(())
}

/// Scores `impacted` against pre-computed `bands`: grand mean of per-year
/// mean deviations.
///
/// # Errors
///
/// Same as [`check_against_bands`].
pub fn score_against_bands(impacted: &ParameterMatrix, bands: &NaturalBands) -> Result<f64, IariError> {
    check_against_bands(impacted, bands)?;
    let deviations = compute_deviations(impacted.values(), bands);
    Ok(overall_score(&per_year_scores(deviations.view())))
}

/// Computes the IARI of `impacted` relative to `natural`.
///
/// # Errors
///
/// - [`IariError::IncompatibleMatrices`] if either matrix is not 33 wide.
/// - [`IariError::InsufficientYears`] if either side has too few years.
/// - [`IariError::MissingPulseThresholds`] if `natural` has no recorded
///   pulse thresholds.
/// - [`IariError::ConventionMismatch`],
///   [`IariError::PulseThresholdMismatch`] or
///   [`IariError::ZeroFlowThresholdMismatch`] if `impacted` was extracted
///   differently.
pub fn compute_iari(
    natural: &ParameterMatrix,
    impacted: &ParameterMatrix,
    config: &IariConfig,
) -> Result<IariResult, IariError> {
    let _span = info_span!("compute_iari").entered();

    if natural.n_params() != N_PARAMS || impacted.n_params() != N_PARAMS {
        return Err(IariError::IncompatibleMatrices {
            natural_n_params: natural.n_params(),
            impacted_n_params: impacted.n_params(),
        });
    }
    let min_years = config.min_years();
    for (series, m) in [("natural", natural), ("impacted", impacted)] {
        if m.n_years() < min_years {
            return Err(IariError::InsufficientYears {
                series,
                n_years: m.n_years(),
                min_years,
            });
        }
    }

    let bands = bands_from_matrix(natural)?;
    check_against_bands(impacted, &bands)?;

    let deviations = compute_deviations(impacted.values(), &bands);
    let per_year = per_year_scores(deviations.view());
    let overall = overall_score(&per_year);
    let class = IariClass::from_score(overall);
    debug!(overall, %class, n_years = per_year.len(), "scored");

    Ok(IariResult {
        deviations,
        years: impacted.years().to_vec(),
        per_year,
        overall,
        class,
        bands,
        natural_years: natural.n_years(),
        impacted_years: impacted.n_years(),
    })
}
