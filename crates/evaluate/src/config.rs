//! Evaluation configuration.

use eflow_iha::{Conventions, IhaConfig, PulseThresholds, ZERO_FLOW_THRESHOLD};

use crate::error::EvaluateError;

/// Configuration shared by [`evaluate_dhram`](crate::evaluate_dhram) and
/// [`evaluate_iari`](crate::evaluate_iari): which reaches to visit and how
/// to extract their parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluateConfig {
    reach_ids: Option<Vec<String>>,
    zero_flow_threshold: f64,
    min_years: usize,
    conventions: Conventions,
}

impl Default for EvaluateConfig {
    fn default() -> Self {
        Self {
            reach_ids: None,
            zero_flow_threshold: ZERO_FLOW_THRESHOLD,
            min_years: 1,
            conventions: Conventions::default(),
        }
    }
}

impl EvaluateConfig {
    /// Evaluate exactly these reaches instead of every shared one.
    pub fn with_reach_ids<I, S>(mut self, reach_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reach_ids = Some(reach_ids.into_iter().map(Into::into).collect());
        self
    }

    /// Set the flow below which a day counts as zero flow.
    pub fn with_zero_flow_threshold(mut self, threshold: f64) -> Self {
        self.zero_flow_threshold = threshold;
        self
    }

    /// Set the minimum complete years each extraction needs.
    pub fn with_min_years(mut self, min_years: usize) -> Self {
        self.min_years = min_years;
        self
    }

    /// Set the extraction conventions used on both sides.
    pub fn with_conventions(mut self, conventions: Conventions) -> Self {
        self.conventions = conventions;
        self
    }

    /// Returns the explicit reach selection, if any.
    pub fn reach_ids(&self) -> Option<&[String]> {
        self.reach_ids.as_deref()
    }

    /// Returns the zero-flow threshold.
    pub fn zero_flow_threshold(&self) -> f64 {
        self.zero_flow_threshold
    }

    /// Returns the minimum number of complete years.
    pub fn min_years(&self) -> usize {
        self.min_years
    }

    /// Returns the extraction conventions.
    pub fn conventions(&self) -> Conventions {
        self.conventions
    }

    /// Extraction settings for one side of a comparison.
    pub fn iha_config(&self, pulse_thresholds: Option<PulseThresholds>) -> IhaConfig {
        let config = IhaConfig::default()
            .with_zero_flow_threshold(self.zero_flow_threshold)
            .with_min_years(self.min_years)
            .with_conventions(self.conventions);
        match pulse_thresholds {
            Some(t) => config.with_pulse_thresholds(t),
            None => config,
        }
    }

    /// Checks the settings.
    ///
    /// # Errors
    ///
    /// [`EvaluateError::InvalidConfig`] for a blank reach id, or the
    /// extraction config's own validation error.
    pub fn validate(&self) -> Result<(), EvaluateError> {
        if let Some(ids) = &self.reach_ids {
            if ids.iter().any(|id| id.trim().is_empty()) {
                return Err(EvaluateError::InvalidConfig {
                    reason: "reach ids must not be blank".to_string(),
                });
            }
        }
        self.iha_config(None).validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eflow_iha::{FallRateSign, IhaError, QuantileMethod};

    #[test]
    fn test_default_values() {
        let config = EvaluateConfig::default();
        assert_eq!(config.reach_ids(), None);
        assert_eq!(config.zero_flow_threshold(), 0.001);
        assert_eq!(config.min_years(), 1);
        assert_eq!(config.conventions(), Conventions::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let conventions = Conventions {
            quantile_method: QuantileMethod::Type6,
            fall_rate_sign: FallRateSign::Magnitude,
            ..Conventions::default()
        };
        let config = EvaluateConfig::default()
            .with_reach_ids(["a", "b"])
            .with_zero_flow_threshold(0.05)
            .with_min_years(3)
            .with_conventions(conventions);
        assert_eq!(config.reach_ids(), Some(&["a".to_string(), "b".to_string()][..]));
        assert_eq!(config.zero_flow_threshold(), 0.05);
        assert_eq!(config.min_years(), 3);
        assert_eq!(config.conventions(), conventions);
    }

    #[test]
    fn test_iha_config_carries_settings() {
        let thresholds = PulseThresholds::new(1.0, 2.0).unwrap();
        let iha = EvaluateConfig::default()
            .with_min_years(2)
            .iha_config(Some(thresholds));
        assert_eq!(iha.min_years(), 2);
        assert_eq!(iha.pulse_thresholds(), Some(thresholds));
    }

    #[test]
    fn test_validate_rejects_blank_reach() {
        let config = EvaluateConfig::default().with_reach_ids(["a", " "]);
        assert!(matches!(
            config.validate(),
            Err(EvaluateError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_min_years() {
        let config = EvaluateConfig::default().with_min_years(0);
        assert!(matches!(
            config.validate(),
            Err(EvaluateError::Iha(IhaError::InvalidConfig { .. }))
        ));
    }
}
