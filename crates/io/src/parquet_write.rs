//! Low-level Parquet column building.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Date32Array, Float64Array, Int32Array, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use eflow_iha::{FlowSeries, Param, ParameterMatrix};
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::error::IoError;
use crate::parquet_read::{FLOW_COLUMNS, date_to_date32};

/// Builds the Arrow schema for flow records: `reach`, `date`, `flow`.
pub(crate) fn flow_schema() -> Schema {
    Schema::new(
        FLOW_COLUMNS
            .iter()
            .map(|(name, data_type)| Field::new(*name, data_type.clone(), false))
            .collect::<Vec<_>>(),
    )
}

/// Builds the Arrow schema for a parameter table: `year` followed by one
/// Float64 column per parameter in canonical order.
pub(crate) fn parameter_schema() -> Schema {
    let mut fields = Vec::with_capacity(Param::ALL.len() + 1);
    fields.push(Field::new("year", DataType::Int32, false));
    fields.extend(
        Param::ALL
            .iter()
            .map(|p| Field::new(p.name(), DataType::Float64, false)),
    );
    Schema::new(fields)
}

/// Converts the series of one reach into an Arrow [`RecordBatch`].
pub(crate) fn flows_to_record_batch(
    reach: &str,
    series: &FlowSeries,
    schema: &Schema,
) -> Result<RecordBatch, IoError> {
    let n = series.len();

    let reach_col: ArrayRef = Arc::new(StringArray::from(vec![reach; n]));
    let date_col: ArrayRef = Arc::new(Date32Array::from(
        series
            .dates()
            .iter()
            .map(|&d| date_to_date32(d))
            .collect::<Vec<_>>(),
    ));
    let flow_col: ArrayRef = Arc::new(Float64Array::from(series.flows().to_vec()));

    RecordBatch::try_new(Arc::new(schema.clone()), vec![reach_col, date_col, flow_col])
        .map_err(|e| IoError::Parquet {
            reason: e.to_string(),
        })
}

/// Converts a parameter matrix into a single Arrow [`RecordBatch`].
/// Undefined parameters are stored as NaN.
pub(crate) fn parameters_to_record_batch(
    matrix: &ParameterMatrix,
    schema: &Schema,
) -> Result<RecordBatch, IoError> {
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(Param::ALL.len() + 1);
    columns.push(Arc::new(Int32Array::from(matrix.years().to_vec())));
    for param in Param::ALL {
        columns.push(Arc::new(Float64Array::from(matrix.param(param).to_vec())));
    }

    RecordBatch::try_new(Arc::new(schema.clone()), columns).map_err(|e| IoError::Parquet {
        reason: e.to_string(),
    })
}

/// Writes a sequence of [`RecordBatch`]es to a Parquet file at `path`.
///
/// # Errors
///
/// Returns [`IoError::Parquet`] if file creation, batch writing, or file
/// finalisation fails.
pub(crate) fn write_batches(
    path: &Path,
    batches: &[RecordBatch],
    schema: &Schema,
    props: WriterProperties,
) -> Result<(), IoError> {
    let file = std::fs::File::create(path).map_err(|e| IoError::Parquet {
        reason: e.to_string(),
    })?;
    let mut writer = ArrowWriter::try_new(file, Arc::new(schema.clone()), Some(props))?;

    for batch in batches {
        writer.write(batch)?;
    }

    writer.close()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn flow_schema_columns() {
        let schema = flow_schema();
        assert_eq!(schema.fields().len(), 3);
        assert_eq!(schema.field(0).name(), "reach");
        assert_eq!(schema.field(1).data_type(), &DataType::Date32);
        assert_eq!(schema.field(2).name(), "flow");
    }

    #[test]
    fn parameter_schema_columns() {
        let schema = parameter_schema();
        assert_eq!(schema.fields().len(), 34);
        assert_eq!(schema.field(0).name(), "year");
        assert_eq!(schema.field(1).name(), "jan");
        assert_eq!(schema.field(33).name(), "reversals");
    }

    #[test]
    fn flow_batch_rows() {
        let start = NaiveDate::from_ymd_opt(2010, 6, 1).unwrap();
        let series = FlowSeries::from_start(start, vec![1.0, 2.0, 3.0]).unwrap();
        let batch = flows_to_record_batch("upper", &series, &flow_schema()).unwrap();
        assert_eq!(batch.num_rows(), 3);
        assert_eq!(batch.num_columns(), 3);
    }
}
