//! High-level Parquet writer configuration and orchestration.

use std::collections::BTreeMap;
use std::path::Path;

use eflow_iha::{FlowSeries, ParameterMatrix};
use parquet::file::properties::WriterProperties;
use tracing::info;

use crate::error::IoError;
use crate::parquet_write;

/// Compression algorithm for Parquet output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// No compression.
    None,
    /// Snappy compression (fast, moderate ratio).
    #[default]
    Snappy,
    /// Zstd compression (slower, better ratio).
    Zstd,
}

impl Compression {
    /// Converts to the corresponding `parquet::basic::Compression` variant.
    fn to_parquet(self) -> Result<parquet::basic::Compression, IoError> {
        Ok(match self {
            Self::None => parquet::basic::Compression::UNCOMPRESSED,
            Self::Snappy => parquet::basic::Compression::SNAPPY,
            Self::Zstd => {
                let level =
                    parquet::basic::ZstdLevel::try_new(3).map_err(|e| IoError::Parquet {
                        reason: e.to_string(),
                    })?;
                parquet::basic::Compression::ZSTD(level)
            }
        })
    }
}

/// Configuration for Parquet output.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    compression: Compression,
    /// Maximum number of rows per row group.
    row_group_size: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression: Compression::default(),
            row_group_size: 1_000_000,
        }
    }
}

impl WriterConfig {
    /// Sets the compression algorithm.
    pub fn with_compression(mut self, comp: Compression) -> Self {
        self.compression = comp;
        self
    }

    /// Sets the maximum number of rows per row group.
    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    pub fn row_group_size(&self) -> usize {
        self.row_group_size
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if `row_group_size` is zero.
    fn validate(&self) -> Result<(), IoError> {
        if self.row_group_size == 0 {
            return Err(IoError::Validation {
                count: 1,
                details: "row_group_size must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    fn properties(&self) -> Result<WriterProperties, IoError> {
        self.validate()?;
        Ok(WriterProperties::builder()
            .set_compression(self.compression.to_parquet()?)
            .set_max_row_group_size(self.row_group_size)
            .build())
    }
}

/// Write per-reach daily flows to a Parquet file, one batch per reach.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if the configuration is invalid, or
/// [`IoError::Parquet`] if batch conversion or file I/O fails.
pub fn write_flows(
    path: &Path,
    flows: &BTreeMap<String, FlowSeries>,
    config: &WriterConfig,
) -> Result<(), IoError> {
    let props = config.properties()?;
    let schema = parquet_write::flow_schema();

    let batches: Vec<_> = flows
        .iter()
        .map(|(reach, series)| parquet_write::flows_to_record_batch(reach, series, &schema))
        .collect::<Result<Vec<_>, _>>()?;

    parquet_write::write_batches(path, &batches, &schema, props)?;
    info!(path = %path.display(), n_reaches = flows.len(), "wrote flows");
    Ok(())
}

/// Write a parameter table: `year` then the 33 parameters, one row per year.
///
/// # Errors
///
/// Same as [`write_flows`].
pub fn write_parameters(
    path: &Path,
    matrix: &ParameterMatrix,
    config: &WriterConfig,
) -> Result<(), IoError> {
    let props = config.properties()?;
    let schema = parquet_write::parameter_schema();
    let batch = parquet_write::parameters_to_record_batch(matrix, &schema)?;
    parquet_write::write_batches(path, &[batch], &schema, props)?;
    info!(path = %path.display(), n_years = matrix.n_years(), "wrote parameters");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = WriterConfig::default();
        assert_eq!(config.compression(), Compression::Snappy);
        assert_eq!(config.row_group_size(), 1_000_000);
    }

    #[test]
    fn builder_methods() {
        let config = WriterConfig::default()
            .with_compression(Compression::Zstd)
            .with_row_group_size(500);
        assert_eq!(config.compression(), Compression::Zstd);
        assert_eq!(config.row_group_size(), 500);
    }

    #[test]
    fn validate_zero_row_group_size() {
        let config = WriterConfig::default().with_row_group_size(0);
        let err = config.validate().unwrap_err();
        match err {
            IoError::Validation { count, details } => {
                assert_eq!(count, 1);
                assert!(details.contains("row_group_size"));
            }
            _ => panic!("expected Validation error"),
        }
    }

    #[test]
    fn every_compression_maps() {
        for c in [Compression::None, Compression::Snappy, Compression::Zstd] {
            assert!(c.to_parquet().is_ok());
        }
    }
}
