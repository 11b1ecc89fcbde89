//! Per-reach comparison of a natural and an impacted flow source.

use std::collections::{BTreeMap, BTreeSet};

use eflow_dhram::{DhramConfig, DhramResult, compute_dhram};
use eflow_iari::{IariConfig, IariResult, compute_iari};
use eflow_iha::{ParameterMatrix, compute_iha, pulse_thresholds_from_record};
use rayon::prelude::*;
use tracing::{debug, info, info_span, warn};

use crate::config::EvaluateConfig;
use crate::error::EvaluateError;
use crate::source::FlowSource;

/// Results of a multi-reach run: successes and per-reach failures.
///
/// Always holds at least one result; a run where every reach fails is an
/// [`EvaluateError::AllReachesFailed`] instead.
#[derive(Debug, Clone, PartialEq)]
pub struct ReachEvaluation<T> {
    results: BTreeMap<String, T>,
    failures: BTreeMap<String, EvaluateError>,
}

impl<T> ReachEvaluation<T> {
    /// Successful results keyed by reach id.
    pub fn results(&self) -> &BTreeMap<String, T> {
        &self.results
    }

    /// Reaches that were skipped, with the reason.
    pub fn failures(&self) -> &BTreeMap<String, EvaluateError> {
        &self.failures
    }

    pub fn get(&self, reach_id: &str) -> Option<&T> {
        self.results.get(reach_id)
    }

    /// True when no reach failed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn into_parts(self) -> (BTreeMap<String, T>, BTreeMap<String, EvaluateError>) {
        (self.results, self.failures)
    }
}

/// Classifies every selected reach with DHRAM.
///
/// # Errors
///
/// - [`EvaluateError::InvalidConfig`] or [`EvaluateError::Iha`] for bad settings.
/// - [`EvaluateError::NonDailyFrequency`] / [`EvaluateError::MissingStartDate`]
///   if either source fails its daily check.
/// - [`EvaluateError::NoCommonReaches`] if nothing is selected.
/// - [`EvaluateError::AllReachesFailed`] if no reach could be classified.
pub fn evaluate_dhram<N, I>(
    natural: &N,
    impacted: &I,
    config: &EvaluateConfig,
    dhram: &DhramConfig,
) -> Result<ReachEvaluation<DhramResult>, EvaluateError>
where
    N: FlowSource + ?Sized,
    I: FlowSource + ?Sized,
{
    let _span = info_span!("evaluate_dhram").entered();
    evaluate_reaches(natural, impacted, config, |nat, imp| {
        Ok(compute_dhram(nat, imp, dhram)?)
    })
}

/// Scores every selected reach with IARI.
///
/// # Errors
///
/// Same as [`evaluate_dhram`].
pub fn evaluate_iari<N, I>(
    natural: &N,
    impacted: &I,
    config: &EvaluateConfig,
    iari: &IariConfig,
) -> Result<ReachEvaluation<IariResult>, EvaluateError>
where
    N: FlowSource + ?Sized,
    I: FlowSource + ?Sized,
{
    let _span = info_span!("evaluate_iari").entered();
    evaluate_reaches(natural, impacted, config, |nat, imp| {
        Ok(compute_iari(nat, imp, iari)?)
    })
}

/// Reaches to visit: the explicit list, else the sorted intersection.
///
/// # Errors
///
/// [`EvaluateError::NoCommonReaches`] if the selection is empty.
pub fn select_reaches<N, I>(
    natural: &N,
    impacted: &I,
    config: &EvaluateConfig,
) -> Result<Vec<String>, EvaluateError>
where
    N: FlowSource + ?Sized,
    I: FlowSource + ?Sized,
{
    let selected: Vec<String> = match config.reach_ids() {
        Some(ids) => {
            let mut seen = BTreeSet::new();
            ids.iter()
                .filter(|id| seen.insert(id.as_str()))
                .cloned()
                .collect()
        }
        None => {
            let nat: BTreeSet<String> = natural.reach_ids().into_iter().collect();
            impacted
                .reach_ids()
                .into_iter()
                .filter(|id| nat.contains(id))
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        }
    };
    if selected.is_empty() {
        return Err(EvaluateError::NoCommonReaches {
            natural: natural.reach_ids(),
            impacted: impacted.reach_ids(),
        });
    }
    Ok(selected)
}

/// Extracts both matrices of one reach with pulse thresholds taken from the
/// natural record.
///
/// # Errors
///
/// Any lookup or extraction error of either side.
pub fn paired_matrices<N, I>(
    natural: &N,
    impacted: &I,
    reach_id: &str,
    config: &EvaluateConfig,
) -> Result<(ParameterMatrix, ParameterMatrix), EvaluateError>
where
    N: FlowSource + ?Sized,
    I: FlowSource + ?Sized,
{
    let natural_series = natural.flow_series(reach_id)?;
    let thresholds =
        pulse_thresholds_from_record(&natural_series, config.conventions().quantile_method)?;
    let iha = config.iha_config(Some(thresholds));
    let natural_matrix = compute_iha(&natural_series, &iha)?;
    let impacted_series = impacted.flow_series(reach_id)?;
    let impacted_matrix = compute_iha(&impacted_series, &iha)?;
    Ok((natural_matrix, impacted_matrix))
}

fn evaluate_reaches<N, I, T, F>(
    natural: &N,
    impacted: &I,
    config: &EvaluateConfig,
    compare: F,
) -> Result<ReachEvaluation<T>, EvaluateError>
where
    N: FlowSource + ?Sized,
    I: FlowSource + ?Sized,
    T: Send,
    F: Fn(&ParameterMatrix, &ParameterMatrix) -> Result<T, EvaluateError> + Sync,
{
    config.validate()?;
    natural.check_daily()?;
    impacted.check_daily()?;
    let selected = select_reaches(natural, impacted, config)?;
    info!(n_reaches = selected.len(), "evaluating reaches");

    let outcomes: Vec<(String, Result<T, EvaluateError>)> = selected
        .par_iter()
        .map(|reach_id| {
            let outcome = paired_matrices(natural, impacted, reach_id, config)
                .and_then(|(nat, imp)| compare(&nat, &imp));
            (reach_id.clone(), outcome)
        })
        .collect();

    let mut results = BTreeMap::new();
    let mut failures = BTreeMap::new();
    for (reach_id, outcome) in outcomes {
        match outcome {
            Ok(result) => {
                debug!(reach = %reach_id, "reach evaluated");
                results.insert(reach_id, result);
            }
            Err(err) => {
                warn!(reach = %reach_id, error = %err, "reach skipped");
                failures.insert(reach_id, err);
            }
        }
    }

    if results.is_empty() {
        return Err(EvaluateError::AllReachesFailed { failures });
    }
    Ok(ReachEvaluation { results, failures })
}
