//! Error types for eflow-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the eflow-io crate.
///
/// Covers file-system and Parquet failures and schema problems. Reaches whose
/// rows fail series validation are not errors of the file; see
/// [`crate::read_flows`].
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the Parquet or Arrow libraries.
    #[error("parquet error: {reason}")]
    Parquet {
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when one or more schema or content checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when a stored date cannot be represented.
    #[error("invalid date: {reason}")]
    InvalidDate { reason: String },
}

impl From<parquet::errors::ParquetError> for IoError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<arrow::error::ArrowError> for IoError {
    fn from(e: arrow::error::ArrowError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/tmp/missing.parquet"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.parquet");
    }

    #[test]
    fn display_parquet() {
        let err = IoError::Parquet {
            reason: "corrupt footer".to_string(),
        };
        assert_eq!(err.to_string(), "parquet error: corrupt footer");
    }

    #[test]
    fn display_validation() {
        let err = IoError::Validation {
            count: 3,
            details: "a; b; c".to_string(),
        };
        assert_eq!(err.to_string(), "3 validation error(s): a; b; c");
    }
}
