//! Interquartile bands and band-distance deviations.

use eflow_iha::{N_PARAMS, Param, ParameterMatrix};
use eflow_stats::{finite, quantile, sorted};
use ndarray::{Array2, ArrayView2, Axis};
use tracing::warn;

use crate::error::IariError;
use crate::types::{DEGENERATE_WIDTH, NaturalBands};

/// Builds the per-parameter 25th/75th percentile bands of a natural matrix.
///
/// Missing (NaN) years are ignored; a parameter with no finite value gets an
/// undefined (NaN) band. The matrix's own quantile method is used.
///
/// # Errors
///
/// Returns [`IariError::MissingPulseThresholds`] if the matrix has no
/// recorded pulse thresholds.
pub fn bands_from_matrix(natural: &ParameterMatrix) -> Result<NaturalBands, IariError> {
    let pulse_thresholds = natural
        .pulse_thresholds()
        .ok_or(IariError::MissingPulseThresholds)?;
    let method = natural.conventions().quantile_method;

    let mut q25 = Vec::with_capacity(N_PARAMS);
    let mut q75 = Vec::with_capacity(N_PARAMS);
    for param in Param::ALL {
        let values = sorted(&finite(natural.param(param).iter().copied()));
        if values.is_empty() {
            q25.push(f64::NAN);
            q75.push(f64::NAN);
        } else {
            q25.push(quantile(&values, 0.25, method));
            q75.push(quantile(&values, 0.75, method));
        }
    }

    NaturalBands::new(
        q25,
        q75,
        pulse_thresholds,
        natural.conventions(),
        natural.zero_flow_threshold(),
    )
}

/// Deviation of one value from a band `[q25, q75]`.
///
/// - 0 inside the band (edges included).
/// - Distance to the nearer edge divided by the width otherwise.
/// - Degenerate band: 0 if inside, else exactly 1.
/// - Undefined band (NaN): 0 for a missing value, 1 for any finite value.
/// - Missing value against a defined band: 1.
pub fn deviation(value: f64, q25: f64, q75: f64) -> f64 {
    let width = q75 - q25;
    if !width.is_finite() {
        return if value.is_finite() { 1.0 } else { 0.0 };
    }
    if !value.is_finite() {
        return 1.0;
    }
    let outside = if value < q25 {
        q25 - value
    } else if value > q75 {
        value - q75
    } else {
        return 0.0;
    };
    if width <= DEGENERATE_WIDTH {
        1.0
    } else {
        outside / width
    }
}

/// Deviation matrix of impacted values, `(n_years, 33)`, against `bands`.
pub fn compute_deviations(impacted: ArrayView2<'_, f64>, bands: &NaturalBands) -> Array2<f64> {
    let degenerate = bands.degenerate_params();
    if !degenerate.is_empty() {
        let names: Vec<&str> = degenerate.iter().map(|p| p.name()).collect();
        warn!(params = ?names, "degenerate natural bands, scoring as 0/1");
    }

    let (q25, q75) = (bands.q25(), bands.q75());
    let mut out = impacted.to_owned();
    for mut row in out.rows_mut() {
        for (j, v) in row.iter_mut().enumerate() {
            *v = deviation(*v, q25[j], q75[j]);
        }
    }
    out
}

/// Mean over parameters of each year's deviations.
pub fn per_year_scores(deviations: ArrayView2<'_, f64>) -> Vec<f64> {
    deviations
        .mean_axis(Axis(1))
        .map(|m| m.to_vec())
        .unwrap_or_default()
}

/// Grand mean of per-year scores; 0.0 for no years.
pub fn overall_score(per_year: &[f64]) -> f64 {
    eflow_stats::mean(per_year)
}
