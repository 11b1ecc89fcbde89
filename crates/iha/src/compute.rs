//! Extraction engine: validated series in, parameter matrix out.

use chrono::Datelike;
use eflow_calendar::{YearSlice, complete_years, day_of_year};
use ndarray::Array2;
use rayon::prelude::*;
use tracing::{debug, info_span};

use crate::config::{Conventions, IhaConfig};
use crate::error::IhaError;
use crate::groups::{extremes, monthly_means, pulses, rate_of_change, timing};
use crate::matrix::ParameterMatrix;
use crate::param::{Group, N_PARAMS};
use crate::series::FlowSeries;
use crate::thresholds::{PulseThresholds, ThresholdSource, pulse_thresholds_from_record};

/// Computes the 33 IHA parameters for every complete year of `series`.
///
/// Pulse thresholds come from `config` when supplied, otherwise from the
/// quartiles of the whole record. Years are reduced in parallel; rows come
/// back in chronological order.
///
/// # Errors
///
/// - [`IhaError::InvalidConfig`] if `config` fails validation.
/// - [`IhaError::InsufficientData`] if fewer than `config.min_years()`
///   complete years are found.
/// - [`IhaError::DegeneratePulseThresholds`] if thresholds must be derived
///   and the record's quartiles coincide.
/// - [`IhaError::Calendar`] for an invalid year convention.
pub fn compute_iha(series: &FlowSeries, config: &IhaConfig) -> Result<ParameterMatrix, IhaError> {
    config.validate()?;
    let _span = info_span!("compute_iha", n_days = series.len()).entered();

    let conventions = config.conventions();
    let slices = complete_years(series.dates(), conventions.year_convention)?;
    if slices.len() < config.min_years() {
        return Err(IhaError::InsufficientData {
            n_days: series.len(),
            n_years: slices.len(),
            min_years: config.min_years(),
        });
    }

    let (thresholds, source) = match config.pulse_thresholds() {
        Some(t) => (t, ThresholdSource::Supplied),
        None => (
            pulse_thresholds_from_record(series, conventions.quantile_method)?,
            ThresholdSource::Derived,
        ),
    };
    debug!(
        n_years = slices.len(),
        low = thresholds.low(),
        high = thresholds.high(),
        ?source,
        "extracting parameters"
    );

    let months: Vec<u32> = series.dates().iter().map(|d| d.month()).collect();
    let doy: Vec<u32> = series.dates().iter().map(|&d| day_of_year(d)).collect();
    let year = YearInputs {
        flows: series.flows(),
        months: &months,
        day_of_year: &doy,
        thresholds: &thresholds,
        zero_flow_threshold: config.zero_flow_threshold(),
        conventions: &conventions,
    };

    let rows: Vec<[f64; N_PARAMS]> = slices.par_iter().map(|s| year.reduce(s)).collect();

    let mut values = Array2::zeros((rows.len(), N_PARAMS));
    for (mut out, row) in values.rows_mut().into_iter().zip(&rows) {
        out.assign(&ndarray::aview1(row));
    }
    let years = slices.iter().map(|s| s.label).collect();

    ParameterMatrix::new(
        values,
        years,
        config.zero_flow_threshold(),
        Some((thresholds, source)),
        conventions,
    )
}

/// Shared read-only inputs for the per-year reducers.
struct YearInputs<'a> {
    flows: &'a [f64],
    months: &'a [u32],
    day_of_year: &'a [u32],
    thresholds: &'a PulseThresholds,
    zero_flow_threshold: f64,
    conventions: &'a Conventions,
}

impl YearInputs<'_> {
    fn reduce(&self, slice: &YearSlice) -> [f64; N_PARAMS] {
        let range = slice.start..slice.end;
        let q = &self.flows[range.clone()];
        let c = self.conventions;

        let mut row = [0.0; N_PARAMS];
        row[Group::Monthly.columns()].copy_from_slice(&monthly_means(q, &self.months[range.clone()]));
        row[Group::Extremes.columns()].copy_from_slice(&extremes(q, self.zero_flow_threshold));
        row[Group::Timing.columns()].copy_from_slice(&timing(q, &self.day_of_year[range]));
        row[Group::Pulses.columns()]
            .copy_from_slice(&pulses(q, self.thresholds, c.duration_statistic));
        row[Group::RateOfChange.columns()]
            .copy_from_slice(&rate_of_change(q, c.rate_statistic, c.fall_rate_sign));

        debug!(year = slice.label, n_days = q.len(), "year reduced");
        row
    }
}
