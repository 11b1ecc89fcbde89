//! Low-level Parquet reading and column extraction.

use std::collections::BTreeMap;
use std::path::Path;

use arrow::array::{Array, AsArray, RecordBatch};
use arrow::datatypes::{DataType, Date32Type, Float64Type, Schema};
use chrono::{Datelike, NaiveDate};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::IoError;

/// Days from 0001-01-01 (CE day 1) to the Unix epoch.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Required flow columns with their Arrow types.
pub(crate) const FLOW_COLUMNS: [(&str, DataType); 3] = [
    ("reach", DataType::Utf8),
    ("date", DataType::Date32),
    ("flow", DataType::Float64),
];

/// Positions of the flow columns within a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FlowColumns {
    pub reach: usize,
    pub date: usize,
    pub flow: usize,
}

/// Dated flow rows of one reach, in file order.
pub(crate) type ReachRows = (Vec<NaiveDate>, Vec<f64>);

/// Reads all record batches from a Parquet file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist, or
/// [`IoError::Parquet`] if the file cannot be opened or read.
pub(crate) fn read_batches(path: &Path) -> Result<Vec<RecordBatch>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = std::fs::File::open(path).map_err(|e| IoError::Parquet {
        reason: e.to_string(),
    })?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let reader = builder.build()?;

    let batches: Vec<RecordBatch> =
        reader
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| IoError::Parquet {
                reason: e.to_string(),
            })?;

    Ok(batches)
}

/// Locates the `reach`, `date` and `flow` columns by name and checks their
/// types. Extra columns are ignored.
///
/// # Errors
///
/// Returns [`IoError::Validation`] listing every missing or mistyped column.
pub(crate) fn validate_schema(schema: &Schema) -> Result<FlowColumns, IoError> {
    let mut mismatches: Vec<String> = Vec::new();
    let mut found = [0usize; 3];

    for (slot, (name, expected)) in found.iter_mut().zip(FLOW_COLUMNS.iter()) {
        match schema.index_of(name) {
            Ok(i) => {
                let actual = schema.field(i).data_type();
                if actual != expected {
                    mismatches.push(format!(
                        "column '{name}': expected {expected}, got {actual}"
                    ));
                }
                *slot = i;
            }
            Err(_) => mismatches.push(format!("missing column '{name}'")),
        }
    }

    if !mismatches.is_empty() {
        return Err(IoError::Validation {
            count: mismatches.len(),
            details: mismatches.join("; "),
        });
    }

    Ok(FlowColumns {
        reach: found[0],
        date: found[1],
        flow: found[2],
    })
}

/// Converts an Arrow `Date32` (days since the Unix epoch) to a date.
pub(crate) fn date_from_date32(days: i32) -> Result<NaiveDate, IoError> {
    days.checked_add(EPOCH_DAYS_FROM_CE)
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or_else(|| IoError::InvalidDate {
            reason: format!("{days} days from 1970-01-01 is out of range"),
        })
}

/// Converts a date to Arrow `Date32`.
pub(crate) fn date_to_date32(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - EPOCH_DAYS_FROM_CE
}

/// Groups rows by reach. Within a reach, rows keep file order.
///
/// # Errors
///
/// Returns [`IoError::Validation`] for null cells or a batch whose columns
/// cannot be read with the expected types.
pub(crate) fn group_by_reach(
    batches: &[RecordBatch],
    columns: FlowColumns,
) -> Result<BTreeMap<String, ReachRows>, IoError> {
    let mut groups: BTreeMap<String, ReachRows> = BTreeMap::new();

    for batch in batches {
        let reach_col = batch
            .column(columns.reach)
            .as_string_opt::<i32>()
            .ok_or_else(|| type_error("reach"))?;
        let date_col = batch
            .column(columns.date)
            .as_primitive_opt::<Date32Type>()
            .ok_or_else(|| type_error("date"))?;
        let flow_col = batch
            .column(columns.flow)
            .as_primitive_opt::<Float64Type>()
            .ok_or_else(|| type_error("flow"))?;

        let nulls: Vec<String> = [
            ("reach", reach_col.null_count()),
            ("date", date_col.null_count()),
            ("flow", flow_col.null_count()),
        ]
        .into_iter()
        .filter(|&(_, n)| n > 0)
        .map(|(name, n)| format!("column '{name}' has {n} null value(s)"))
        .collect();
        if !nulls.is_empty() {
            return Err(IoError::Validation {
                count: nulls.len(),
                details: nulls.join("; "),
            });
        }

        for row in 0..batch.num_rows() {
            let entry = groups.entry(reach_col.value(row).to_string()).or_default();
            entry.0.push(date_from_date32(date_col.value(row))?);
            entry.1.push(flow_col.value(row));
        }
    }

    Ok(groups)
}

fn type_error(name: &str) -> IoError {
    IoError::Validation {
        count: 1,
        details: format!("column '{name}' could not be read with its expected type"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::Field;

    fn schema(fields: Vec<(&str, DataType)>) -> Schema {
        Schema::new(
            fields
                .into_iter()
                .map(|(n, t)| Field::new(n, t, false))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn epoch_conversion() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(date_to_date32(epoch), 0);
        assert_eq!(date_from_date32(0).unwrap(), epoch);
        let d = NaiveDate::from_ymd_opt(2000, 3, 1).unwrap();
        assert_eq!(date_from_date32(date_to_date32(d)).unwrap(), d);
        assert_eq!(date_to_date32(NaiveDate::from_ymd_opt(1969, 12, 31).unwrap()), -1);
    }

    #[test]
    fn out_of_range_date() {
        assert!(matches!(
            date_from_date32(i32::MAX),
            Err(IoError::InvalidDate { .. })
        ));
    }

    #[test]
    fn schema_in_any_order() {
        let s = schema(vec![
            ("flow", DataType::Float64),
            ("extra", DataType::Int32),
            ("date", DataType::Date32),
            ("reach", DataType::Utf8),
        ]);
        let cols = validate_schema(&s).unwrap();
        assert_eq!(
            cols,
            FlowColumns {
                reach: 3,
                date: 2,
                flow: 0
            }
        );
    }

    #[test]
    fn schema_problems_are_collected() {
        let s = schema(vec![
            ("reach", DataType::Utf8),
            ("flow", DataType::Float32),
        ]);
        match validate_schema(&s).unwrap_err() {
            IoError::Validation { count, details } => {
                assert_eq!(count, 2);
                assert!(details.contains("missing column 'date'"));
                assert!(details.contains("column 'flow'"));
            }
            other => panic!("expected Validation error, got {other:?}"),
        }
    }
}
