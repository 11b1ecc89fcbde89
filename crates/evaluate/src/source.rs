//! Flow sources: anything that can hand out a dated daily series per reach.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use eflow_iha::{FlowSeries, IhaConfig, IhaError, ParameterMatrix, compute_iha};
use serde::{Deserialize, Serialize};

use crate::error::EvaluateError;

/// Timestep of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    /// Any other fixed step, in days.
    Other(u32),
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => f.write_str("daily"),
            Self::Weekly => f.write_str("weekly"),
            Self::Monthly => f.write_str("monthly"),
            Self::Other(days) => write!(f, "{days}-day"),
        }
    }
}

/// A collection of per-reach flow records.
///
/// `Sync` so reaches can be extracted in parallel.
pub trait FlowSource: Sync {
    /// Fails if the source as a whole cannot produce daily dated series.
    fn check_daily(&self) -> Result<(), EvaluateError> {
        Ok(())
    }

    /// Reach ids known to the source, sorted.
    fn reach_ids(&self) -> Vec<String>;

    /// The validated daily series of one reach.
    ///
    /// # Errors
    ///
    /// [`EvaluateError::ReachNotFound`], [`EvaluateError::EmptyTrace`], or
    /// the series validation error.
    fn flow_series(&self, reach_id: &str) -> Result<FlowSeries, EvaluateError>;
}

/// Undated per-reach outputs of a simulation run.
///
/// Each trace holds one value per timestep, starting at `start_date`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedTraces {
    frequency: Frequency,
    start_date: Option<NaiveDate>,
    reaches: BTreeMap<String, Vec<f64>>,
}

impl SimulatedTraces {
    pub fn new(frequency: Frequency, start_date: Option<NaiveDate>) -> Self {
        Self {
            frequency,
            start_date,
            reaches: BTreeMap::new(),
        }
    }

    /// Add (or replace) the trace of `reach_id`.
    pub fn with_reach(mut self, reach_id: impl Into<String>, flows: Vec<f64>) -> Self {
        self.insert(reach_id, flows);
        self
    }

    pub fn insert(&mut self, reach_id: impl Into<String>, flows: Vec<f64>) {
        self.reaches.insert(reach_id.into(), flows);
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Raw trace of `reach_id`, if present.
    pub fn trace(&self, reach_id: &str) -> Option<&[f64]> {
        self.reaches.get(reach_id).map(Vec::as_slice)
    }
}

impl FlowSource for SimulatedTraces {
    fn check_daily(&self) -> Result<(), EvaluateError> {
        if self.frequency != Frequency::Daily {
            return Err(EvaluateError::NonDailyFrequency {
                frequency: self.frequency,
            });
        }
        if self.start_date.is_none() {
            return Err(EvaluateError::MissingStartDate);
        }
        Ok(())
    }

    fn reach_ids(&self) -> Vec<String> {
        self.reaches.keys().cloned().collect()
    }

    fn flow_series(&self, reach_id: &str) -> Result<FlowSeries, EvaluateError> {
        self.check_daily()?;
        let start = self.start_date.ok_or(EvaluateError::MissingStartDate)?;
        let flows = self
            .reaches
            .get(reach_id)
            .ok_or_else(|| EvaluateError::ReachNotFound {
                reach_id: reach_id.to_string(),
                available: self.reach_ids(),
            })?;
        if flows.is_empty() {
            return Err(EvaluateError::EmptyTrace {
                reach_id: reach_id.to_string(),
            });
        }
        Ok(FlowSeries::from_start(start, flows.clone())?)
    }
}

/// Already-dated series, e.g. read from a file.
impl FlowSource for BTreeMap<String, FlowSeries> {
    fn reach_ids(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }

    fn flow_series(&self, reach_id: &str) -> Result<FlowSeries, EvaluateError> {
        let series = self
            .get(reach_id)
            .ok_or_else(|| EvaluateError::ReachNotFound {
                reach_id: reach_id.to_string(),
                available: self.reach_ids(),
            })?;
        non_empty(reach_id, series)
    }
}

/// Per-reach outcomes of reading dated records. A reach whose rows failed
/// validation keeps its id, so it is reported as a failure of that reach
/// only.
impl FlowSource for BTreeMap<String, Result<FlowSeries, IhaError>> {
    fn reach_ids(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }

    fn flow_series(&self, reach_id: &str) -> Result<FlowSeries, EvaluateError> {
        match self.get(reach_id) {
            Some(Ok(series)) => non_empty(reach_id, series),
            Some(Err(err)) => Err(EvaluateError::Iha(err.clone())),
            None => Err(EvaluateError::ReachNotFound {
                reach_id: reach_id.to_string(),
                available: self.reach_ids(),
            }),
        }
    }
}

fn non_empty(reach_id: &str, series: &FlowSeries) -> Result<FlowSeries, EvaluateError> {
    if series.is_empty() {
        return Err(EvaluateError::EmptyTrace {
            reach_id: reach_id.to_string(),
        });
    }
    Ok(series.clone())
}

/// Extracts the parameter matrix of one reach.
///
/// # Errors
///
/// Source-level checks first ([`FlowSource::check_daily`]), then the reach
/// lookup, then any [`eflow_iha::IhaError`].
pub fn iha_from_reach<S: FlowSource + ?Sized>(
    source: &S,
    reach_id: &str,
    config: &IhaConfig,
) -> Result<ParameterMatrix, EvaluateError> {
    source.check_daily()?;
    let series = source.flow_series(reach_id)?;
    Ok(compute_iha(&series, config)?)
}
