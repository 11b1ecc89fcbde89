//! Pulse thresholds for the group 4 parameters.

use eflow_stats::{QuantileMethod, quantile, sorted};
use serde::Serialize;

use crate::error::IhaError;
use crate::series::FlowSeries;

/// Low/high flow thresholds delimiting low and high pulses.
///
/// Invariant: `0 <= low < high`, both finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PulseThresholds {
    low: f64,
    high: f64,
}

impl PulseThresholds {
    /// Creates thresholds after checking `0 <= low < high`.
    ///
    /// # Errors
    ///
    /// Returns [`IhaError::InvalidPulseThresholds`] otherwise.
    pub fn new(low: f64, high: f64) -> Result<Self, IhaError> {
        if !(low.is_finite() && high.is_finite() && low >= 0.0 && low < high) {
            return Err(IhaError::InvalidPulseThresholds { low, high });
        }
        Ok(Self { low, high })
    }

    /// Flow below which a day is part of a low pulse.
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Flow above which a day is part of a high pulse.
    pub fn high(&self) -> f64 {
        self.high
    }
}

/// Where the pulse thresholds recorded on a parameter matrix came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdSource {
    /// Passed in by the caller, typically derived from a natural record.
    Supplied,
    /// Derived from the record being extracted.
    Derived,
}

/// Derives pulse thresholds from the 25th and 75th percentiles of a full record.
///
/// Call this once on the natural record and pass the result to both the
/// natural and the impacted extraction.
///
/// # Errors
///
/// Returns [`IhaError::DegeneratePulseThresholds`] if the two percentiles
/// coincide (e.g. a constant record).
pub fn pulse_thresholds_from_record(
    series: &FlowSeries,
    method: QuantileMethod,
) -> Result<PulseThresholds, IhaError> {
    let sorted_flows = sorted(series.flows());
    let q25 = quantile(&sorted_flows, 0.25, method);
    let q75 = quantile(&sorted_flows, 0.75, method);
    if q25 >= q75 {
        return Err(IhaError::DegeneratePulseThresholds { q25, q75 });
    }
    PulseThresholds::new(q25, q75)
}
