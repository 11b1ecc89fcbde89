//! Per-parameter changes and the ten summary indicators.

use eflow_iha::{Group, Param, ParameterMatrix};
use eflow_stats::{NEAR_ZERO, circular_distance, circular_mean, coefficient_of_variation, finite, mean};

use crate::types::{Indicator, ScoredParameters, ScoringThresholds, Statistic, N_INDICATORS};

/// Length of the year used for circular day-of-year statistics.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Change reported when the natural value is zero but the impacted is not.
pub const MAX_CHANGE: f64 = 100.0;

/// Absolute percentage change from `natural` to `impacted`.
///
/// A near-zero natural value gives 0 when the impacted value is near zero
/// too, otherwise [`MAX_CHANGE`].
pub fn percent_change(natural: f64, impacted: f64) -> f64 {
    if natural.abs() < NEAR_ZERO {
        if impacted.abs() < NEAR_ZERO { 0.0 } else { MAX_CHANGE }
    } else {
        (impacted - natural).abs() / natural.abs() * 100.0
    }
}

/// Shift of the circular mean day of year, as a percentage of the year.
fn timing_change(natural: &[f64], impacted: &[f64]) -> f64 {
    let nat = circular_mean(natural, DAYS_PER_YEAR);
    let imp = circular_mean(impacted, DAYS_PER_YEAR);
    circular_distance(nat, imp, DAYS_PER_YEAR) / DAYS_PER_YEAR * 100.0
}

/// Mean change and CV change for one parameter. Non-finite years are ignored.
pub fn parameter_changes(param: Param, natural: &ParameterMatrix, impacted: &ParameterMatrix) -> (f64, f64) {
    let nat = finite(natural.param(param).iter().copied());
    let imp = finite(impacted.param(param).iter().copied());
    match (nat.is_empty(), imp.is_empty()) {
        (true, true) => return (0.0, 0.0),
        (true, false) | (false, true) => return (MAX_CHANGE, MAX_CHANGE),
        (false, false) => {}
    }

    let mean_change = if param.is_timing() {
        timing_change(&nat, &imp)
    } else {
        percent_change(mean(&nat), mean(&imp))
    };
    let cv_change = percent_change(coefficient_of_variation(&nat), coefficient_of_variation(&imp));
    (mean_change, cv_change)
}

/// Computes and scores the ten summary indicators, 1a to 5b.
pub fn summary_indicators(
    natural: &ParameterMatrix,
    impacted: &ParameterMatrix,
    scored: ScoredParameters,
    table: &[ScoringThresholds; N_INDICATORS],
) -> Vec<Indicator> {
    let mut out = Vec::with_capacity(N_INDICATORS);
    for (g, group) in Group::ALL.into_iter().enumerate() {
        let params = scored.params(group);
        let (mean_sum, cv_sum) = params
            .iter()
            .map(|&p| parameter_changes(p, natural, impacted))
            .fold((0.0, 0.0), |(a, b), (m, c)| (a + m, b + c));
        let n = params.len() as f64;
        out.push(Indicator::new(group, Statistic::Mean, mean_sum / n, table[2 * g]));
        out.push(Indicator::new(group, Statistic::Cv, cv_sum / n, table[2 * g + 1]));
    }
    out
}
