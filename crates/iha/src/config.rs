//! Extraction settings and the conventions recorded on every matrix.

use eflow_calendar::YearConvention;
use eflow_stats::{QuantileMethod, mean, median, sorted};
use serde::{Deserialize, Serialize};

use crate::error::IhaError;
use crate::thresholds::PulseThresholds;

/// Default flow below which a day counts as a zero-flow day.
pub const ZERO_FLOW_THRESHOLD: f64 = 0.001;

/// Statistic used to summarise pulse durations or daily rates of change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CentralTendency {
    Mean,
    Median,
}

impl CentralTendency {
    /// Applies the statistic; an empty input yields 0.0.
    pub fn apply(self, values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        match self {
            Self::Mean => mean(values),
            Self::Median => median(&sorted(values)),
        }
    }
}

/// How the fall rate is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallRateSign {
    /// Negative, as the raw day-to-day difference.
    #[default]
    Signed,
    /// Absolute value.
    Magnitude,
}

/// Every convention that must agree between two matrices being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Conventions {
    /// Year grouping.
    pub year_convention: YearConvention,
    /// Percentile rule for pulse thresholds and natural bands.
    pub quantile_method: QuantileMethod,
    /// Statistic over pulse durations.
    pub duration_statistic: CentralTendency,
    /// Statistic over rises and falls.
    pub rate_statistic: CentralTendency,
    /// Sign of the fall rate.
    pub fall_rate_sign: FallRateSign,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            year_convention: YearConvention::Calendar,
            quantile_method: QuantileMethod::Type7,
            duration_statistic: CentralTendency::Mean,
            rate_statistic: CentralTendency::Median,
            fall_rate_sign: FallRateSign::Signed,
        }
    }
}

/// Configuration for [`compute_iha`](crate::compute_iha).
#[derive(Debug, Clone, PartialEq)]
pub struct IhaConfig {
    zero_flow_threshold: f64,
    pulse_thresholds: Option<PulseThresholds>,
    min_years: usize,
    conventions: Conventions,
}

impl Default for IhaConfig {
    fn default() -> Self {
        Self {
            zero_flow_threshold: ZERO_FLOW_THRESHOLD,
            pulse_thresholds: None,
            min_years: 1,
            conventions: Conventions::default(),
        }
    }
}

impl IhaConfig {
    /// Set the flow below which a day counts as zero flow.
    pub fn with_zero_flow_threshold(mut self, threshold: f64) -> Self {
        self.zero_flow_threshold = threshold;
        self
    }

    /// Use externally supplied pulse thresholds instead of deriving them.
    pub fn with_pulse_thresholds(mut self, thresholds: PulseThresholds) -> Self {
        self.pulse_thresholds = Some(thresholds);
        self
    }

    /// Set the minimum number of complete years.
    pub fn with_min_years(mut self, min_years: usize) -> Self {
        self.min_years = min_years;
        self
    }

    /// Set the year convention.
    pub fn with_year_convention(mut self, convention: YearConvention) -> Self {
        self.conventions.year_convention = convention;
        self
    }

    /// Set the percentile rule.
    pub fn with_quantile_method(mut self, method: QuantileMethod) -> Self {
        self.conventions.quantile_method = method;
        self
    }

    /// Set the statistic over pulse durations.
    pub fn with_duration_statistic(mut self, statistic: CentralTendency) -> Self {
        self.conventions.duration_statistic = statistic;
        self
    }

    /// Set the statistic over daily rises and falls.
    pub fn with_rate_statistic(mut self, statistic: CentralTendency) -> Self {
        self.conventions.rate_statistic = statistic;
        self
    }

    /// Set the fall-rate sign convention.
    pub fn with_fall_rate_sign(mut self, sign: FallRateSign) -> Self {
        self.conventions.fall_rate_sign = sign;
        self
    }

    /// Replace all conventions at once.
    pub fn with_conventions(mut self, conventions: Conventions) -> Self {
        self.conventions = conventions;
        self
    }

    /// Returns the zero-flow threshold.
    pub fn zero_flow_threshold(&self) -> f64 {
        self.zero_flow_threshold
    }

    /// Returns the supplied pulse thresholds, if any.
    pub fn pulse_thresholds(&self) -> Option<PulseThresholds> {
        self.pulse_thresholds
    }

    /// Returns the minimum number of complete years.
    pub fn min_years(&self) -> usize {
        self.min_years
    }

    /// Returns the conventions.
    pub fn conventions(&self) -> Conventions {
        self.conventions
    }

    /// Checks the settings.
    ///
    /// # Errors
    ///
    /// Returns [`IhaError::InvalidConfig`] for a negative or non-finite
    /// zero-flow threshold or `min_years == 0`.
    pub fn validate(&self) -> Result<(), IhaError> {
        if !(self.zero_flow_threshold.is_finite() && self.zero_flow_threshold >= 0.0) {
            return Err(IhaError::InvalidConfig {
                reason: format!(
                    "zero_flow_threshold must be finite and >= 0, got {}",
                    self.zero_flow_threshold
                ),
            });
        }
        if self.min_years == 0 {
            return Err(IhaError::InvalidConfig {
                reason: "min_years must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = IhaConfig::default();
        assert_eq!(config.zero_flow_threshold(), 0.001);
        assert_eq!(config.pulse_thresholds(), None);
        assert_eq!(config.min_years(), 1);
        let c = config.conventions();
        assert_eq!(c.year_convention, YearConvention::Calendar);
        assert_eq!(c.quantile_method, QuantileMethod::Type7);
        assert_eq!(c.duration_statistic, CentralTendency::Mean);
        assert_eq!(c.rate_statistic, CentralTendency::Median);
        assert_eq!(c.fall_rate_sign, FallRateSign::Signed);
    }

    #[test]
    fn test_builder_methods() {
        let t = PulseThresholds::new(1.0, 5.0).unwrap();
        let config = IhaConfig::default()
            .with_zero_flow_threshold(0.01)
            .with_pulse_thresholds(t)
            .with_min_years(3)
            .with_year_convention(YearConvention::WaterYear { start_month: 10 })
            .with_quantile_method(QuantileMethod::Type6)
            .with_duration_statistic(CentralTendency::Median)
            .with_rate_statistic(CentralTendency::Mean)
            .with_fall_rate_sign(FallRateSign::Magnitude);

        assert_eq!(config.zero_flow_threshold(), 0.01);
        assert_eq!(config.pulse_thresholds(), Some(t));
        assert_eq!(config.min_years(), 3);
        let c = config.conventions();
        assert_eq!(c.year_convention.start_month(), 10);
        assert_eq!(c.quantile_method, QuantileMethod::Type6);
        assert_eq!(c.duration_statistic, CentralTendency::Median);
        assert_eq!(c.rate_statistic, CentralTendency::Mean);
        assert_eq!(c.fall_rate_sign, FallRateSign::Magnitude);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(
            IhaConfig::default()
                .with_zero_flow_threshold(-1.0)
                .validate()
                .is_err()
        );
        assert!(
            IhaConfig::default()
                .with_zero_flow_threshold(f64::NAN)
                .validate()
                .is_err()
        );
        assert!(IhaConfig::default().with_min_years(0).validate().is_err());
    }

    #[test]
    fn central_tendency_apply() {
        assert_eq!(CentralTendency::Mean.apply(&[]), 0.0);
        assert_eq!(CentralTendency::Median.apply(&[]), 0.0);
        assert_eq!(CentralTendency::Mean.apply(&[1.0, 2.0, 6.0]), 3.0);
        assert_eq!(CentralTendency::Median.apply(&[6.0, 1.0, 2.0]), 2.0);
    }
}
