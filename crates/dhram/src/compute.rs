//! DHRAM classification of an impacted regime against its natural reference.

use eflow_iha::{N_PARAMS, ParameterMatrix};
use tracing::{debug, info_span};

use crate::error::DhramError;
use crate::indicators::summary_indicators;
use crate::types::{DhramResult, ScoredParameters, ThresholdVariant};

/// Configuration for [`compute_dhram`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DhramConfig {
    threshold_variant: ThresholdVariant,
    scored_parameters: ScoredParameters,
    flow_cessation: bool,
    subdaily_oscillation: bool,
    min_years: usize,
}

impl DhramConfig {
    /// Set the threshold table.
    pub fn with_threshold_variant(mut self, variant: ThresholdVariant) -> Self {
        self.threshold_variant = variant;
        self
    }

    /// Set which group 2 parameters are scored.
    pub fn with_scored_parameters(mut self, scored: ScoredParameters) -> Self {
        self.scored_parameters = scored;
        self
    }

    /// Flag anthropogenic flow cessation (one class down).
    pub fn with_flow_cessation(mut self, flag: bool) -> Self {
        self.flow_cessation = flag;
        self
    }

    /// Flag sub-daily oscillation above the reference (one class down).
    pub fn with_subdaily_oscillation(mut self, flag: bool) -> Self {
        self.subdaily_oscillation = flag;
        self
    }

    /// Set the minimum years required on each side. 0 is treated as 1.
    pub fn with_min_years(mut self, min_years: usize) -> Self {
        self.min_years = min_years;
        self
    }

    /// Threshold table used for scoring.
    pub fn threshold_variant(&self) -> ThresholdVariant {
        self.threshold_variant
    }

    /// Which group 2 parameters are scored.
    pub fn scored_parameters(&self) -> ScoredParameters {
        self.scored_parameters
    }

    /// Whether anthropogenic flow cessation is flagged.
    pub fn flow_cessation(&self) -> bool {
        self.flow_cessation
    }

    /// Whether sub-daily oscillation is flagged.
    pub fn subdaily_oscillation(&self) -> bool {
        self.subdaily_oscillation
    }

    /// Minimum years required on each side (at least 1).
    pub fn min_years(&self) -> usize {
        self.min_years.max(1)
    }
}

fn check_inputs(
    natural: &ParameterMatrix,
    impacted: &ParameterMatrix,
    min_years: usize,
) -> Result<(), DhramError> {
    if natural.n_params() != N_PARAMS || impacted.n_params() != N_PARAMS {
        return Err(DhramError::IncompatibleMatrices {
            natural_n_params: natural.n_params(),
            impacted_n_params: impacted.n_params(),
        });
    }
    for (series, m) in [("natural", natural), ("impacted", impacted)] {
        if m.n_years() < min_years {
            return Err(DhramError::InsufficientYears {
                series,
                n_years: m.n_years(),
                min_years,
            });
        }
    }
    if natural.conventions() != impacted.conventions() {
        return Err(DhramError::ConventionMismatch {
            natural: natural.conventions(),
            impacted: impacted.conventions(),
        });
    }
    if natural.pulse_thresholds() != impacted.pulse_thresholds() {
        return Err(DhramError::PulseThresholdMismatch {
            natural: natural.pulse_thresholds(),
            impacted: impacted.pulse_thresholds(),
        });
    }
    if natural.zero_flow_threshold() != impacted.zero_flow_threshold() {
        return Err(DhramError::ZeroFlowThresholdMismatch {
            natural: natural.zero_flow_threshold(),
            impacted: impacted.zero_flow_threshold(),
        });
    }
    Ok(())
}

/// Classifies the alteration of `impacted` relative to `natural`.
///
/// Computes ten summary indicators (mean change and CV change per group),
/// scores them against the configured threshold table, maps the point total
/// to a class and applies the supplementary downgrades.
///
/// # Errors
///
/// - [`DhramError::IncompatibleMatrices`] if either matrix is not 33 wide.
/// - [`DhramError::InsufficientYears`] if either side has too few years.
/// - [`DhramError::ConventionMismatch`] if the matrices were extracted under
///   different conventions.
/// - [`DhramError::PulseThresholdMismatch`] or
///   [`DhramError::ZeroFlowThresholdMismatch`] if they used different pulse
///   or zero-flow thresholds.
pub fn compute_dhram(
    natural: &ParameterMatrix,
    impacted: &ParameterMatrix,
    config: &DhramConfig,
) -> Result<DhramResult, DhramError> {
    let _span = info_span!("compute_dhram").entered();
    check_inputs(natural, impacted, config.min_years())?;

    let indicators = summary_indicators(
        natural,
        impacted,
        config.scored_parameters(),
        config.threshold_variant().table(),
    );
    for ind in &indicators {
        debug!(indicator = ind.name(), value = ind.value(), points = ind.points(), "scored");
    }

    let result = DhramResult::from_indicators(
        indicators,
        config.flow_cessation(),
        config.subdaily_oscillation(),
        config.threshold_variant(),
        config.scored_parameters(),
        natural.n_years(),
        impacted.n_years(),
        natural.conventions(),
    );
    debug!(
        total_points = result.total_points(),
        final_class = result.final_class(),
        "classified"
    );
    Ok(result)
}
