use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG: &str = "eflow.toml";

/// Top-level eflow configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EflowConfig {
    /// Parameter extraction settings.
    #[serde(default)]
    pub iha: IhaToml,

    /// DHRAM classification settings.
    #[serde(default)]
    pub dhram: DhramToml,

    /// IARI scoring settings.
    #[serde(default)]
    pub iari: IariToml,

    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,
}

impl EflowConfig {
    /// Reads `path`, or `./eflow.toml` if it exists, or falls back to
    /// defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path: PathBuf = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG);
                if !default.exists() {
                    debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };
        let toml_str = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IhaToml {
    #[serde(default = "default_zero_flow_threshold")]
    pub zero_flow_threshold: f64,
    #[serde(default = "default_min_years")]
    pub min_years: usize,
    /// First month of the accounting year; 1 means calendar years.
    #[serde(default = "default_year_start_month")]
    pub year_start_month: u32,
    #[serde(default = "default_quantile_method")]
    pub quantile_method: String,
    #[serde(default = "default_duration_statistic")]
    pub duration_statistic: String,
    #[serde(default = "default_rate_statistic")]
    pub rate_statistic: String,
    #[serde(default = "default_fall_rate_sign")]
    pub fall_rate_sign: String,
    /// Fixed pulse thresholds for `eflow iha`; derived from the record if unset.
    #[serde(default)]
    pub pulse_thresholds: Option<PulseToml>,
}

impl Default for IhaToml {
    fn default() -> Self {
        Self {
            zero_flow_threshold: default_zero_flow_threshold(),
            min_years: default_min_years(),
            year_start_month: default_year_start_month(),
            quantile_method: default_quantile_method(),
            duration_statistic: default_duration_statistic(),
            rate_statistic: default_rate_statistic(),
            fall_rate_sign: default_fall_rate_sign(),
            pulse_thresholds: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PulseToml {
    pub low: f64,
    pub high: f64,
}

fn default_zero_flow_threshold() -> f64 {
    eflow_iha::ZERO_FLOW_THRESHOLD
}
fn default_min_years() -> usize {
    1
}
fn default_year_start_month() -> u32 {
    1
}
fn default_quantile_method() -> String {
    "type7".to_string()
}
fn default_duration_statistic() -> String {
    "mean".to_string()
}
fn default_rate_statistic() -> String {
    "median".to_string()
}
fn default_fall_rate_sign() -> String {
    "signed".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DhramToml {
    #[serde(default = "default_threshold_variant")]
    pub threshold_variant: String,
    /// 31 or 32 scored parameters.
    #[serde(default = "default_scored_parameters")]
    pub scored_parameters: u8,
    #[serde(default)]
    pub flow_cessation: bool,
    #[serde(default)]
    pub subdaily_oscillation: bool,
    #[serde(default = "default_min_years")]
    pub min_years: usize,
}

impl Default for DhramToml {
    fn default() -> Self {
        Self {
            threshold_variant: default_threshold_variant(),
            scored_parameters: default_scored_parameters(),
            flow_cessation: false,
            subdaily_oscillation: false,
            min_years: default_min_years(),
        }
    }
}

fn default_threshold_variant() -> String {
    "empirical".to_string()
}
fn default_scored_parameters() -> u8 {
    31
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IariToml {
    #[serde(default = "default_min_years")]
    pub min_years: usize,
}

impl Default for IariToml {
    fn default() -> Self {
        Self {
            min_years: default_min_years(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    #[serde(default = "default_compression")]
    pub compression: String,
    #[serde(default = "default_row_group_size")]
    pub row_group_size: usize,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            compression: default_compression(),
            row_group_size: default_row_group_size(),
        }
    }
}

fn default_compression() -> String {
    "snappy".to_string()
}
fn default_row_group_size() -> usize {
    1_000_000
}
