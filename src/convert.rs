//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use crate::config::*;

use eflow_dhram::{DhramConfig, ScoredParameters, ThresholdVariant};
use eflow_evaluate::EvaluateConfig;
use eflow_iari::IariConfig;
use eflow_iha::{
    CentralTendency, Conventions, FallRateSign, IhaConfig, PulseThresholds, QuantileMethod,
    YearConvention,
};
use eflow_io::{Compression, WriterConfig};

/// Parses a quantile rule name ("type6" or "type7").
pub fn parse_quantile_method(s: &str) -> Result<QuantileMethod> {
    match s.to_lowercase().as_str() {
        "type6" | "weibull" => Ok(QuantileMethod::Type6),
        "type7" | "linear" => Ok(QuantileMethod::Type7),
        other => bail!("unknown quantile method: {other:?}"),
    }
}

/// Parses "mean" or "median".
pub fn parse_central_tendency(s: &str) -> Result<CentralTendency> {
    match s.to_lowercase().as_str() {
        "mean" => Ok(CentralTendency::Mean),
        "median" => Ok(CentralTendency::Median),
        other => bail!("unknown statistic: {other:?}"),
    }
}

/// Parses "signed" or "magnitude".
pub fn parse_fall_rate_sign(s: &str) -> Result<FallRateSign> {
    match s.to_lowercase().as_str() {
        "signed" => Ok(FallRateSign::Signed),
        "magnitude" => Ok(FallRateSign::Magnitude),
        other => bail!("unknown fall rate sign: {other:?}"),
    }
}

/// Parses "empirical" or "simplified".
pub fn parse_threshold_variant(s: &str) -> Result<ThresholdVariant> {
    match s.to_lowercase().as_str() {
        "empirical" => Ok(ThresholdVariant::Empirical),
        "simplified" => Ok(ThresholdVariant::Simplified),
        other => bail!("unknown threshold variant: {other:?}"),
    }
}

/// Maps 31 or 32 to the scored parameter set.
pub fn parse_scored_parameters(n: u8) -> Result<ScoredParameters> {
    match n {
        31 => Ok(ScoredParameters::ThirtyOne),
        32 => Ok(ScoredParameters::ThirtyTwo),
        other => bail!("scored_parameters must be 31 or 32, got {other}"),
    }
}

/// Parses a compression algorithm name string into the corresponding enum variant.
pub fn parse_compression(s: &str) -> Result<Compression> {
    match s.to_lowercase().as_str() {
        "none" => Ok(Compression::None),
        "snappy" => Ok(Compression::Snappy),
        "zstd" => Ok(Compression::Zstd),
        other => bail!("unknown compression: {other:?}"),
    }
}

/// Builds the extraction conventions from the `[iha]` section.
pub fn build_conventions(iha: &IhaToml) -> Result<Conventions> {
    Ok(Conventions {
        year_convention: YearConvention::water_year(iha.year_start_month)
            .context("invalid [iha].year_start_month")?,
        quantile_method: parse_quantile_method(&iha.quantile_method)?,
        duration_statistic: parse_central_tendency(&iha.duration_statistic)?,
        rate_statistic: parse_central_tendency(&iha.rate_statistic)?,
        fall_rate_sign: parse_fall_rate_sign(&iha.fall_rate_sign)?,
    })
}

/// Builds an [`IhaConfig`] from the `[iha]` section, including any fixed
/// pulse thresholds.
pub fn build_iha_config(iha: &IhaToml) -> Result<IhaConfig> {
    let mut cfg = IhaConfig::default()
        .with_zero_flow_threshold(iha.zero_flow_threshold)
        .with_min_years(iha.min_years)
        .with_conventions(build_conventions(iha)?);
    if let Some(ref p) = iha.pulse_thresholds {
        let thresholds =
            PulseThresholds::new(p.low, p.high).context("invalid [iha].pulse_thresholds")?;
        cfg = cfg.with_pulse_thresholds(thresholds);
    }
    cfg.validate()?;
    Ok(cfg)
}

/// Builds an [`EvaluateConfig`] from the `[iha]` section and the reaches
/// named on the command line.
///
/// Fixed pulse thresholds are rejected: comparisons always derive them from
/// each natural record.
pub fn build_evaluate_config(iha: &IhaToml, reaches: &[String]) -> Result<EvaluateConfig> {
    if iha.pulse_thresholds.is_some() {
        bail!("[iha].pulse_thresholds only applies to `eflow iha`; comparisons derive them from the natural record");
    }
    let mut cfg = EvaluateConfig::default()
        .with_zero_flow_threshold(iha.zero_flow_threshold)
        .with_min_years(iha.min_years)
        .with_conventions(build_conventions(iha)?);
    if !reaches.is_empty() {
        cfg = cfg.with_reach_ids(reaches.iter().cloned());
    }
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`DhramConfig`] from the `[dhram]` section.
pub fn build_dhram_config(dhram: &DhramToml) -> Result<DhramConfig> {
    Ok(DhramConfig::default()
        .with_threshold_variant(parse_threshold_variant(&dhram.threshold_variant)?)
        .with_scored_parameters(parse_scored_parameters(dhram.scored_parameters)?)
        .with_flow_cessation(dhram.flow_cessation)
        .with_subdaily_oscillation(dhram.subdaily_oscillation)
        .with_min_years(dhram.min_years))
}

/// Builds an [`IariConfig`] from the `[iari]` section.
pub fn build_iari_config(iari: &IariToml) -> IariConfig {
    IariConfig::default().with_min_years(iari.min_years)
}

/// Builds a [`WriterConfig`] from the `[io]` section.
pub fn build_writer_config(io: &IoToml) -> Result<WriterConfig> {
    let compression = parse_compression(&io.compression)?;
    Ok(WriterConfig::default()
        .with_compression(compression)
        .with_row_group_size(io.row_group_size))
}
