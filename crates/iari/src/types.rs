//! Natural bands, alteration classes and the scoring result.

use std::fmt;

use eflow_iha::{Conventions, N_PARAMS, Param, PulseThresholds};
use ndarray::{Array2, ArrayView1, ArrayView2};
use serde::Serialize;

use crate::error::IariError;

/// Overall scores at or below this are `Excellent`.
pub const EXCELLENT_THRESHOLD: f64 = 0.05;

/// Overall scores at or below this (and above [`EXCELLENT_THRESHOLD`]) are `Good`.
pub const GOOD_THRESHOLD: f64 = 0.15;

/// Bands narrower than this are degenerate.
pub const DEGENERATE_WIDTH: f64 = 1e-10;

/// Interquartile band of every parameter over the natural years.
///
/// Also carries the pulse thresholds and conventions of the natural
/// extraction so that an impacted record can be extracted the same way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NaturalBands {
    q25: Vec<f64>,
    q75: Vec<f64>,
    pulse_thresholds: PulseThresholds,
    conventions: Conventions,
    zero_flow_threshold: f64,
}

impl NaturalBands {
    /// Creates bands from per-parameter quartiles.
    ///
    /// A parameter whose natural values were all missing has NaN quartiles
    /// and counts as undefined.
    ///
    /// # Errors
    ///
    /// Returns [`IariError::InvalidBands`] if either vector does not hold 33
    /// entries or a defined band has `q25 > q75`.
    pub fn new(
        q25: Vec<f64>,
        q75: Vec<f64>,
        pulse_thresholds: PulseThresholds,
        conventions: Conventions,
        zero_flow_threshold: f64,
    ) -> Result<Self, IariError> {
        if q25.len() != N_PARAMS || q75.len() != N_PARAMS {
            return Err(IariError::InvalidBands {
                reason: format!(
                    "expected {N_PARAMS} entries, got q25={} q75={}",
                    q25.len(),
                    q75.len()
                ),
            });
        }
        let inverted: Vec<&str> = Param::ALL
            .iter()
            .filter(|p| q25[p.index()] > q75[p.index()])
            .map(|p| p.name())
            .collect();
        if !inverted.is_empty() {
            return Err(IariError::InvalidBands {
                reason: format!("q25 > q75 for {}", inverted.join(", ")),
            });
        }
        Ok(Self {
            q25,
            q75,
            pulse_thresholds,
            conventions,
            zero_flow_threshold,
        })
    }

    /// 25th percentiles, in column order.
    pub fn q25(&self) -> &[f64] {
        &self.q25
    }

    /// 75th percentiles, in column order.
    pub fn q75(&self) -> &[f64] {
        &self.q75
    }

    /// Band width of `param` (NaN when undefined).
    pub fn width(&self, param: Param) -> f64 {
        self.q75[param.index()] - self.q25[param.index()]
    }

    /// Returns `true` if the natural values of `param` were all missing.
    pub fn is_undefined(&self, param: Param) -> bool {
        !self.width(param).is_finite()
    }

    /// Returns `true` if the band of `param` has (near) zero width.
    pub fn is_degenerate(&self, param: Param) -> bool {
        self.width(param) <= DEGENERATE_WIDTH
    }

    /// Parameters with degenerate bands.
    pub fn degenerate_params(&self) -> Vec<Param> {
        Param::ALL
            .into_iter()
            .filter(|&p| self.is_degenerate(p))
            .collect()
    }

    /// Pulse thresholds of the natural extraction.
    pub fn pulse_thresholds(&self) -> PulseThresholds {
        self.pulse_thresholds
    }

    /// Conventions of the natural extraction.
    pub fn conventions(&self) -> Conventions {
        self.conventions
    }

    /// Zero-flow threshold of the natural extraction.
    pub fn zero_flow_threshold(&self) -> f64 {
        self.zero_flow_threshold
    }
}

/// Three-tier label for an overall IARI score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum IariClass {
    Excellent,
    Good,
    Poor,
}

impl IariClass {
    /// Label for `score`: `Excellent` up to 0.05, `Good` up to 0.15, else `Poor`.
    pub fn from_score(score: f64) -> Self {
        if score <= EXCELLENT_THRESHOLD {
            Self::Excellent
        } else if score <= GOOD_THRESHOLD {
            Self::Good
        } else {
            Self::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Poor => "Poor",
        }
    }
}

impl fmt::Display for IariClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of an IARI comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct IariResult {
    pub(crate) deviations: Array2<f64>,
    pub(crate) years: Vec<i32>,
    pub(crate) per_year: Vec<f64>,
    pub(crate) overall: f64,
    pub(crate) class: IariClass,
    pub(crate) bands: NaturalBands,
    pub(crate) natural_years: usize,
    pub(crate) impacted_years: usize,
}

impl IariResult {
    /// Deviation of every impacted year and parameter, `(n_years, 33)`.
    pub fn deviations(&self) -> ArrayView2<'_, f64> {
        self.deviations.view()
    }

    /// Impacted year labels.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Mean deviation of each impacted year.
    pub fn per_year(&self) -> &[f64] {
        &self.per_year
    }

    /// Mean of the per-year scores.
    pub fn overall(&self) -> f64 {
        self.overall
    }

    pub fn class(&self) -> IariClass {
        self.class
    }

    /// Bands the impacted years were scored against.
    pub fn bands(&self) -> &NaturalBands {
        &self.bands
    }

    /// Parameters whose natural band had zero width.
    pub fn degenerate_params(&self) -> Vec<Param> {
        self.bands.degenerate_params()
    }

    pub fn natural_years(&self) -> usize {
        self.natural_years
    }

    pub fn impacted_years(&self) -> usize {
        self.impacted_years
    }

    /// Deviations of one impacted year, or `None` if absent.
    pub fn year_row(&self, year: i32) -> Option<ArrayView1<'_, f64>> {
        self.years
            .iter()
            .position(|&y| y == year)
            .map(|i| self.deviations.row(i))
    }

    /// Deviations of one parameter across impacted years.
    pub fn param_deviation(&self, param: Param) -> ArrayView1<'_, f64> {
        self.deviations.column(param.index())
    }

    /// Plain-text report of the score.
    pub fn summary(&self) -> String {
        let degenerate = self.degenerate_params();
        let degenerate = if degenerate.is_empty() {
            "none".to_string()
        } else {
            degenerate
                .iter()
                .map(|p| p.name())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let rule = "-".repeat(20);
        let mut lines = vec![
            format!("IARI score: {:.4} ({})", self.overall, self.class),
            format!(
                "Years analysed: {} natural, {} impacted",
                self.natural_years, self.impacted_years
            ),
            format!("Degenerate parameters: {degenerate}"),
            String::new(),
            format!("{:<8}{:<10}", "Year", "IARI"),
            rule.clone(),
        ];
        for (year, score) in self.years.iter().zip(&self.per_year) {
            lines.push(format!("{year:<8}{score:<10.4}"));
        }
        lines.push(rule);
        lines.push(format!("Overall: {:.4} ({})", self.overall, self.class));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bands(q25: Vec<f64>, q75: Vec<f64>) -> Result<NaturalBands, IariError> {
        NaturalBands::new(
            q25,
            q75,
            PulseThresholds::new(1.0, 2.0).unwrap(),
            Conventions::default(),
            0.001,
        )
    }

    #[test]
    fn class_breakpoints_inclusive() {
        assert_eq!(IariClass::from_score(0.0), IariClass::Excellent);
        assert_eq!(IariClass::from_score(0.05), IariClass::Excellent);
        assert_eq!(IariClass::from_score(0.0500001), IariClass::Good);
        assert_eq!(IariClass::from_score(0.15), IariClass::Good);
        assert_eq!(IariClass::from_score(0.16), IariClass::Poor);
        assert_eq!(IariClass::from_score(12.0).to_string(), "Poor");
    }

    #[test]
    fn bands_require_33_entries() {
        assert!(matches!(
            bands(vec![0.0; 32], vec![1.0; 32]),
            Err(IariError::InvalidBands { .. })
        ));
    }

    #[test]
    fn bands_reject_inverted_quartiles() {
        let mut q25 = vec![0.0; N_PARAMS];
        q25[Param::Feb.index()] = 5.0;
        let err = bands(q25, vec![1.0; N_PARAMS]).unwrap_err();
        assert!(err.to_string().contains("feb"));
    }

    #[test]
    fn degenerate_and_undefined_flags() {
        let mut q25 = vec![0.0; N_PARAMS];
        let mut q75 = vec![1.0; N_PARAMS];
        q75[Param::ZeroFlowDays.index()] = 0.0;
        q25[Param::BaseFlowIndex.index()] = f64::NAN;
        q75[Param::BaseFlowIndex.index()] = f64::NAN;
        let b = bands(q25, q75).unwrap();
        assert_eq!(b.degenerate_params(), vec![Param::ZeroFlowDays]);
        assert!(b.is_undefined(Param::BaseFlowIndex));
        assert!(!b.is_degenerate(Param::BaseFlowIndex));
        assert_eq!(b.width(Param::Jan), 1.0);
    }
}
