//! JSON output structures for extraction and evaluation results.

use std::collections::BTreeMap;

use eflow_dhram::DhramResult;
use eflow_iari::{IariClass, IariResult};
use eflow_iha::{Conventions, Param, ParameterMatrix, PulseThresholds, ThresholdSource};
use serde::Serialize;

use crate::error::EvaluateError;
use crate::reach::ReachEvaluation;

/// Extracted parameters of one record, column by column.
///
/// Non-finite values serialize as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct ParameterReport {
    pub years: Vec<i32>,
    pub zero_flow_threshold: f64,
    pub pulse_thresholds: Option<PulseThresholds>,
    pub threshold_source: Option<ThresholdSource>,
    pub conventions: Conventions,
    pub parameters: Vec<ParameterColumn>,
}

/// One parameter across all years.
#[derive(Debug, Clone, Serialize)]
pub struct ParameterColumn {
    pub name: &'static str,
    pub group: u8,
    pub values: Vec<f64>,
}

impl From<&ParameterMatrix> for ParameterReport {
    fn from(matrix: &ParameterMatrix) -> Self {
        let parameters = Param::ALL
            .iter()
            .map(|&p| ParameterColumn {
                name: p.name(),
                group: p.group().number(),
                values: matrix.param(p).to_vec(),
            })
            .collect();
        Self {
            years: matrix.years().to_vec(),
            zero_flow_threshold: matrix.zero_flow_threshold(),
            pulse_thresholds: matrix.pulse_thresholds(),
            threshold_source: matrix.threshold_source(),
            conventions: matrix.conventions(),
            parameters,
        }
    }
}

/// DHRAM results of a multi-reach run.
#[derive(Debug, Clone, Serialize)]
pub struct DhramReport {
    pub reaches: BTreeMap<String, DhramResult>,
    pub failures: BTreeMap<String, String>,
}

impl From<&ReachEvaluation<DhramResult>> for DhramReport {
    fn from(evaluation: &ReachEvaluation<DhramResult>) -> Self {
        Self {
            reaches: evaluation.results().clone(),
            failures: failure_messages(evaluation),
        }
    }
}

/// IARI results of a multi-reach run.
#[derive(Debug, Clone, Serialize)]
pub struct IariReport {
    pub reaches: BTreeMap<String, IariReachReport>,
    pub failures: BTreeMap<String, String>,
}

/// IARI of one reach.
#[derive(Debug, Clone, Serialize)]
pub struct IariReachReport {
    pub overall: f64,
    pub class: IariClass,
    pub natural_years: usize,
    pub impacted_years: usize,
    pub per_year: Vec<YearScore>,
    pub degenerate_params: Vec<&'static str>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct YearScore {
    pub year: i32,
    pub score: f64,
}

impl From<&IariResult> for IariReachReport {
    fn from(result: &IariResult) -> Self {
        Self {
            overall: result.overall(),
            class: result.class(),
            natural_years: result.natural_years(),
            impacted_years: result.impacted_years(),
            per_year: result
                .years()
                .iter()
                .zip(result.per_year())
                .map(|(&year, &score)| YearScore { year, score })
                .collect(),
            degenerate_params: result
                .degenerate_params()
                .into_iter()
                .map(Param::name)
                .collect(),
        }
    }
}

impl From<&ReachEvaluation<IariResult>> for IariReport {
    fn from(evaluation: &ReachEvaluation<IariResult>) -> Self {
        Self {
            reaches: evaluation
                .results()
                .iter()
                .map(|(reach, result)| (reach.clone(), IariReachReport::from(result)))
                .collect(),
            failures: failure_messages(evaluation),
        }
    }
}

fn failure_messages<T>(evaluation: &ReachEvaluation<T>) -> BTreeMap<String, String> {
    evaluation
        .failures()
        .iter()
        .map(|(reach, err)| (reach.clone(), err.to_string()))
        .collect()
}

/// Serialize any report to a pretty JSON string.
pub fn to_json<T: Serialize>(output: &T) -> Result<String, EvaluateError> {
    serde_json::to_string_pretty(output).map_err(|e| EvaluateError::Serialization {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use eflow_iha::{FlowSeries, IhaConfig, compute_iha};

    fn matrix() -> ParameterMatrix {
        let start = NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
        let flows = (0..365).map(|i| 5.0 + (i % 20) as f64).collect();
        let series = FlowSeries::from_start(start, flows).unwrap();
        compute_iha(&series, &IhaConfig::default()).unwrap()
    }

    #[test]
    fn test_parameter_report_has_every_column() {
        let report = ParameterReport::from(&matrix());
        assert_eq!(report.years, vec![2001]);
        assert_eq!(report.parameters.len(), 33);
        assert_eq!(report.parameters[0].name, "jan");
        assert_eq!(report.parameters[32].group, 5);
        assert_eq!(report.threshold_source, Some(ThresholdSource::Derived));
    }

    #[test]
    fn test_parameter_report_json() {
        let json = to_json(&ParameterReport::from(&matrix())).unwrap();
        assert!(json.contains("\"years\": ["));
        assert!(json.contains("\"name\": \"reversals\""));
        assert!(json.contains("\"pulse_thresholds\""));
    }

    #[test]
    fn test_year_score_serializes() {
        let json = serde_json::to_string(&YearScore {
            year: 1999,
            score: 0.25,
        })
        .unwrap();
        assert_eq!(json, "{\"year\":1999,\"score\":0.25}");
    }

    #[test]
    fn test_nan_serializes_as_null() {
        let column = ParameterColumn {
            name: "base_flow_index",
            group: 2,
            values: vec![f64::NAN, 0.5],
        };
        let json = serde_json::to_string(&column).unwrap();
        assert!(json.contains("[null,0.5]"));
    }
}
