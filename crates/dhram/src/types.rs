//! Scoring tables, indicator records and the classification result.

use std::fmt;

use eflow_iha::{Conventions, Group, Param};
use serde::{Deserialize, Serialize};

use crate::error::DhramError;

/// Number of summary indicators (two per group).
pub const N_INDICATORS: usize = 10;

/// Highest possible point total.
pub const MAX_POINTS: u8 = 30;

/// Inclusive lower point bound of classes 1 to 5.
pub const CLASS_LOWER_BOUNDS: [u8; 5] = [0, 1, 5, 11, 21];

/// Three-tier deviation thresholds for one indicator, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoringThresholds {
    lower: f64,
    intermediate: f64,
    upper: f64,
}

impl ScoringThresholds {
    /// Creates a threshold triple.
    ///
    /// # Errors
    ///
    /// Returns [`DhramError::InvalidThresholds`] unless
    /// `0 <= lower <= intermediate <= upper`.
    pub fn new(lower: f64, intermediate: f64, upper: f64) -> Result<Self, DhramError> {
        if !(0.0 <= lower && lower <= intermediate && intermediate <= upper) {
            return Err(DhramError::InvalidThresholds {
                lower,
                intermediate,
                upper,
            });
        }
        Ok(Self {
            lower,
            intermediate,
            upper,
        })
    }

    const fn fixed(lower: f64, intermediate: f64, upper: f64) -> Self {
        Self {
            lower,
            intermediate,
            upper,
        }
    }

    /// Points for a deviation `value`: 0 below `lower`, 1 below
    /// `intermediate`, 2 below `upper`, otherwise 3.
    pub fn score(&self, value: f64) -> u8 {
        if value >= self.upper {
            3
        } else if value >= self.intermediate {
            2
        } else if value >= self.lower {
            1
        } else {
            0
        }
    }

    /// 1-point boundary.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// 2-point boundary.
    pub fn intermediate(&self) -> f64 {
        self.intermediate
    }

    /// 3-point boundary.
    pub fn upper(&self) -> f64 {
        self.upper
    }
}

/// Empirical thresholds of Black et al. (2005), indicators 1a to 5b.
pub const EMPIRICAL_THRESHOLDS: [ScoringThresholds; N_INDICATORS] = [
    ScoringThresholds::fixed(19.9, 43.7, 67.5),
    ScoringThresholds::fixed(29.4, 97.6, 165.7),
    ScoringThresholds::fixed(42.9, 88.2, 133.4),
    ScoringThresholds::fixed(84.5, 122.7, 160.8),
    ScoringThresholds::fixed(7.0, 21.2, 35.5),
    ScoringThresholds::fixed(33.4, 50.3, 67.3),
    ScoringThresholds::fixed(36.4, 65.1, 93.8),
    ScoringThresholds::fixed(30.5, 76.1, 121.6),
    ScoringThresholds::fixed(46.0, 82.7, 119.4),
    ScoringThresholds::fixed(49.1, 79.9, 110.6),
];

/// Uniform 10/30/50 % thresholds.
pub const SIMPLIFIED_THRESHOLDS: [ScoringThresholds; N_INDICATORS] =
    [ScoringThresholds::fixed(10.0, 30.0, 50.0); N_INDICATORS];

/// Which threshold table scores the indicators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdVariant {
    #[default]
    Empirical,
    Simplified,
}

impl ThresholdVariant {
    /// The ten threshold triples of this variant, indicators 1a to 5b.
    pub fn table(self) -> &'static [ScoringThresholds; N_INDICATORS] {
        match self {
            Self::Empirical => &EMPIRICAL_THRESHOLDS,
            Self::Simplified => &SIMPLIFIED_THRESHOLDS,
        }
    }
}

/// Which group 2 parameters enter the scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoredParameters {
    /// Excludes zero-flow days and baseflow index.
    #[default]
    ThirtyOne,
    /// Excludes zero-flow days only.
    ThirtyTwo,
}

impl ScoredParameters {
    /// Returns `true` if `param` is scored under this set.
    pub fn includes(self, param: Param) -> bool {
        match param {
            Param::ZeroFlowDays => false,
            Param::BaseFlowIndex => self == Self::ThirtyTwo,
            _ => true,
        }
    }

    /// Scored parameters of `group`, in column order.
    pub fn params(self, group: Group) -> Vec<Param> {
        group
            .params()
            .iter()
            .copied()
            .filter(|&p| self.includes(p))
            .collect()
    }

    /// Total number of scored parameters.
    pub fn count(self) -> usize {
        Param::ALL.iter().filter(|&&p| self.includes(p)).count()
    }
}

/// Which statistic an indicator summarises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    /// Change in the multi-year mean ("a" indicators).
    Mean,
    /// Change in the coefficient of variation ("b" indicators).
    Cv,
}

impl Statistic {
    fn suffix(self) -> char {
        match self {
            Self::Mean => 'a',
            Self::Cv => 'b',
        }
    }
}

/// One scored summary indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Indicator {
    name: String,
    group: Group,
    statistic: Statistic,
    value: f64,
    points: u8,
    thresholds: ScoringThresholds,
}

impl Indicator {
    /// Scores `value` against `thresholds`.
    pub fn new(group: Group, statistic: Statistic, value: f64, thresholds: ScoringThresholds) -> Self {
        Self {
            name: format!("{}{}", group.number(), statistic.suffix()),
            group,
            statistic,
            value,
            points: thresholds.score(value),
            thresholds,
        }
    }

    /// Indicator name, `"1a"` to `"5b"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// IHA group the indicator summarises.
    pub fn group(&self) -> Group {
        self.group
    }

    /// Mean change or CV change.
    pub fn statistic(&self) -> Statistic {
        self.statistic
    }

    /// Average percentage change over the group's scored parameters.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Points awarded, 0 to 3.
    pub fn points(&self) -> u8 {
        self.points
    }

    /// Thresholds the value was scored against.
    pub fn thresholds(&self) -> ScoringThresholds {
        self.thresholds
    }
}

/// Water Framework Directive status for a final class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum WfdStatus {
    High,
    Good,
    Moderate,
    Poor,
    Bad,
}

impl WfdStatus {
    /// Status for class 1 to 5; values above 5 map to `Bad`.
    pub fn from_class(class: u8) -> Self {
        match class {
            0 | 1 => Self::High,
            2 => Self::Good,
            3 => Self::Moderate,
            4 => Self::Poor,
            _ => Self::Bad,
        }
    }

    /// Status name, e.g. `"Moderate"`.
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
            Self::Bad => "Bad",
        }
    }
}

impl fmt::Display for WfdStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps a point total to the preliminary class 1 to 5.
pub fn classify(total_points: u8) -> u8 {
    CLASS_LOWER_BOUNDS
        .iter()
        .rposition(|&lb| total_points >= lb)
        .map_or(1, |i| i as u8 + 1)
}

/// Adds one class per supplementary flag, capped at 5.
pub fn apply_supplementary(preliminary: u8, flow_cessation: bool, subdaily_oscillation: bool) -> u8 {
    (preliminary + u8::from(flow_cessation) + u8::from(subdaily_oscillation)).min(5)
}

/// Outcome of a DHRAM classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DhramResult {
    pub(crate) indicators: Vec<Indicator>,
    pub(crate) total_points: u8,
    pub(crate) preliminary_class: u8,
    pub(crate) flow_cessation: bool,
    pub(crate) subdaily_oscillation: bool,
    pub(crate) final_class: u8,
    pub(crate) wfd_status: WfdStatus,
    pub(crate) threshold_variant: ThresholdVariant,
    pub(crate) scored_parameters: ScoredParameters,
    pub(crate) natural_years: usize,
    pub(crate) impacted_years: usize,
    pub(crate) conventions: Conventions,
}

impl DhramResult {
    /// Assembles a result from scored indicators and the supplementary flags.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_indicators(
        indicators: Vec<Indicator>,
        flow_cessation: bool,
        subdaily_oscillation: bool,
        threshold_variant: ThresholdVariant,
        scored_parameters: ScoredParameters,
        natural_years: usize,
        impacted_years: usize,
        conventions: Conventions,
    ) -> Self {
        let total_points: u8 = indicators.iter().map(Indicator::points).sum();
        let preliminary_class = classify(total_points);
        let final_class = apply_supplementary(preliminary_class, flow_cessation, subdaily_oscillation);
        Self {
            indicators,
            total_points,
            preliminary_class,
            flow_cessation,
            subdaily_oscillation,
            final_class,
            wfd_status: WfdStatus::from_class(final_class),
            threshold_variant,
            scored_parameters,
            natural_years,
            impacted_years,
            conventions,
        }
    }

    /// The ten indicators, 1a to 5b.
    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    /// Indicator by name (`"1a"` .. `"5b"`).
    pub fn indicator(&self, name: &str) -> Option<&Indicator> {
        self.indicators.iter().find(|i| i.name == name)
    }

    /// Points of both indicators of `group`.
    pub fn group_points(&self, group: Group) -> u8 {
        self.indicators
            .iter()
            .filter(|i| i.group == group)
            .map(Indicator::points)
            .sum()
    }

    /// Sum of indicator points, 0 to 30.
    pub fn total_points(&self) -> u8 {
        self.total_points
    }

    /// Class before the supplementary flags.
    pub fn preliminary_class(&self) -> u8 {
        self.preliminary_class
    }

    /// Whether the flow cessation flag was applied.
    pub fn flow_cessation(&self) -> bool {
        self.flow_cessation
    }

    /// Whether the sub-daily oscillation flag was applied.
    pub fn subdaily_oscillation(&self) -> bool {
        self.subdaily_oscillation
    }

    /// Class after the supplementary flags, 1 to 5.
    pub fn final_class(&self) -> u8 {
        self.final_class
    }

    /// WFD status of the final class.
    pub fn wfd_status(&self) -> WfdStatus {
        self.wfd_status
    }

    /// Threshold table used for scoring.
    pub fn threshold_variant(&self) -> ThresholdVariant {
        self.threshold_variant
    }

    /// Which group 2 parameters were scored.
    pub fn scored_parameters(&self) -> ScoredParameters {
        self.scored_parameters
    }

    /// Complete years in the natural matrix.
    pub fn natural_years(&self) -> usize {
        self.natural_years
    }

    /// Complete years in the impacted matrix.
    pub fn impacted_years(&self) -> usize {
        self.impacted_years
    }

    /// Conventions shared by both matrices.
    pub fn conventions(&self) -> Conventions {
        self.conventions
    }

    /// Plain-text report of the classification.
    pub fn summary(&self) -> String {
        let rule = "-".repeat(60);
        let mut lines = vec![
            format!(
                "DHRAM classification: class {} ({})",
                self.final_class, self.wfd_status
            ),
            format!("Total impact points: {}/{}", self.total_points, MAX_POINTS),
            format!("Threshold variant: {:?}", self.threshold_variant),
            format!(
                "Years analysed: {} natural, {} impacted",
                self.natural_years, self.impacted_years
            ),
            String::new(),
            format!("{:<12}{:<12}{:<8}Thresholds (L/M/U)", "Indicator", "Value (%)", "Points"),
            rule.clone(),
        ];
        for ind in &self.indicators {
            let t = ind.thresholds;
            lines.push(format!(
                "{:<12}{:<12.1}{:<8}{:.1}/{:.1}/{:.1}",
                ind.name, ind.value, ind.points, t.lower, t.intermediate, t.upper
            ));
        }
        lines.push(rule);
        lines.push(format!("Preliminary class: {}", self.preliminary_class));
        let mut flags = Vec::new();
        if self.flow_cessation {
            flags.push("flow cessation (+1)");
        }
        if self.subdaily_oscillation {
            flags.push("sub-daily oscillation (+1)");
        }
        if !flags.is_empty() {
            lines.push(format!("Supplementary adjustments: {}", flags.join(", ")));
        }
        lines.push(format!(
            "Final class: {} ({})",
            self.final_class, self.wfd_status
        ));
        lines.join("\n")
    }
}
