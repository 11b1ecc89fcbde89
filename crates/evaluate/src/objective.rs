//! IARI as an optimisation objective.
//!
//! Natural bands are computed once; each candidate system is then scored by
//! extracting one reach and measuring it against those bands.

use eflow_iari::{NaturalBands, score_against_bands};
use eflow_iha::IhaConfig;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::EvaluateError;
use crate::source::{FlowSource, iha_from_reach};

/// Whether an optimiser should push an objective down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Minimize,
    Maximize,
}

/// A named scalar score of a flow source.
pub trait Objective {
    fn name(&self) -> String;

    fn direction(&self) -> Direction;

    /// Relative weight for the optimiser; higher goes first.
    fn priority(&self) -> u32;

    /// Scores `source`.
    fn evaluate(&self, source: &dyn FlowSource) -> Result<f64, EvaluateError>;
}

/// Minimises the IARI of one reach against fixed natural bands.
#[derive(Debug, Clone, PartialEq)]
pub struct IariObjective {
    bands: NaturalBands,
    reach_id: String,
    priority: u32,
    min_years: usize,
}

impl IariObjective {
    /// Objective for `reach_id`, requiring at least one complete year.
    pub fn new(bands: NaturalBands, reach_id: impl Into<String>) -> Self {
        Self {
            bands,
            reach_id: reach_id.into(),
            priority: 1,
            min_years: 1,
        }
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_min_years(mut self, min_years: usize) -> Self {
        self.min_years = min_years;
        self
    }

    pub fn reach_id(&self) -> &str {
        &self.reach_id
    }

    pub fn bands(&self) -> &NaturalBands {
        &self.bands
    }

    /// Extraction settings matching the bands: their conventions, pulse
    /// thresholds and zero-flow threshold.
    pub fn iha_config(&self) -> IhaConfig {
        IhaConfig::default()
            .with_conventions(self.bands.conventions())
            .with_pulse_thresholds(self.bands.pulse_thresholds())
            .with_zero_flow_threshold(self.bands.zero_flow_threshold())
            .with_min_years(self.min_years)
    }
}

impl Objective for IariObjective {
    fn name(&self) -> String {
        format!("{}.iari", self.reach_id)
    }

    fn direction(&self) -> Direction {
        Direction::Minimize
    }

    fn priority(&self) -> u32 {
        self.priority
    }

    fn evaluate(&self, source: &dyn FlowSource) -> Result<f64, EvaluateError> {
        let matrix = iha_from_reach(source, &self.reach_id, &self.iha_config())?;
        Ok(score_against_bands(&matrix, &self.bands)?)
    }
}

/// Mean IARI over several reaches.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeIariObjective {
    name: String,
    members: Vec<IariObjective>,
    priority: u32,
}

impl CompositeIariObjective {
    /// # Errors
    ///
    /// [`EvaluateError::InvalidConfig`] if `members` is empty.
    pub fn new(name: impl Into<String>, members: Vec<IariObjective>) -> Result<Self, EvaluateError> {
        if members.is_empty() {
            return Err(EvaluateError::InvalidConfig {
                reason: "composite objective needs at least one reach".to_string(),
            });
        }
        Ok(Self {
            name: name.into(),
            members,
            priority: 1,
        })
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    pub fn members(&self) -> &[IariObjective] {
        &self.members
    }
}

impl Objective for CompositeIariObjective {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn direction(&self) -> Direction {
        Direction::Minimize
    }

    fn priority(&self) -> u32 {
        self.priority
    }

    /// Fails on the first reach that cannot be scored.
    fn evaluate(&self, source: &dyn FlowSource) -> Result<f64, EvaluateError> {
        let scores = self
            .members
            .par_iter()
            .map(|member| member.evaluate(source))
            .collect::<Result<Vec<f64>, EvaluateError>>()?;
        Ok(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}
