//! Evaluation error types.

use std::collections::BTreeMap;

use eflow_dhram::DhramError;
use eflow_iari::IariError;
use eflow_iha::IhaError;

use crate::source::Frequency;

/// Errors that can occur while evaluating flow sources.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluateError {
    /// The source is not sampled once per day.
    #[error("flow source must be daily, got {frequency} timesteps")]
    NonDailyFrequency { frequency: Frequency },

    /// The source has no start date, so its timesteps cannot be dated.
    #[error("flow source has no start date")]
    MissingStartDate,

    /// The requested reach does not exist in the source.
    #[error("reach '{reach_id}' not found (available: {})", .available.join(", "))]
    ReachNotFound {
        reach_id: String,
        available: Vec<String>,
    },

    /// The reach exists but recorded no flow.
    #[error("reach '{reach_id}' has an empty flow trace")]
    EmptyTrace { reach_id: String },

    /// Natural and impacted sources share no reach to evaluate.
    #[error(
        "no common reaches: natural has [{}], impacted has [{}]",
        .natural.join(", "),
        .impacted.join(", ")
    )]
    NoCommonReaches {
        natural: Vec<String>,
        impacted: Vec<String>,
    },

    /// Every selected reach failed.
    #[error("all {} reaches failed: {}", .failures.len(), describe_failures(.failures))]
    AllReachesFailed {
        failures: BTreeMap<String, EvaluateError>,
    },

    /// Evaluation settings are inconsistent.
    #[error("invalid evaluation config: {reason}")]
    InvalidConfig { reason: String },

    #[error(transparent)]
    Iha(#[from] IhaError),

    #[error(transparent)]
    Dhram(#[from] DhramError),

    #[error(transparent)]
    Iari(#[from] IariError),

    /// JSON serialization failed.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

fn describe_failures(failures: &BTreeMap<String, EvaluateError>) -> String {
    failures
        .iter()
        .map(|(reach, err)| format!("{reach}: {err}"))
        .collect::<Vec<_>>()
        .join("; ")
}
