//! Integration tests: round-trip flows and parameters through Parquet.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, AsArray, Date32Array, Float64Array, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Float64Type, Int32Type, Schema};
use chrono::NaiveDate;
use eflow_iha::{FlowSeries, IhaConfig, IhaError, Param, compute_iha};
use eflow_io::{
    Compression, IoError, ReachFlows, WriterConfig, read_flows, write_flows, write_parameters,
};
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

fn series(y: i32, n: usize, scale: f64) -> FlowSeries {
    let start = NaiveDate::from_ymd_opt(y, 1, 1).unwrap();
    let flows = (0..n).map(|i| scale * (1.0 + (i % 17) as f64)).collect();
    FlowSeries::from_start(start, flows).unwrap()
}

/// Unwraps every reach, failing on any rejected one.
fn accepted(flows: ReachFlows) -> BTreeMap<String, FlowSeries> {
    flows
        .into_iter()
        .map(|(reach, outcome)| (reach, outcome.unwrap()))
        .collect()
}

/// Writes raw columns, bypassing `write_flows`, to build malformed inputs.
fn write_raw(path: &Path, reaches: Vec<&str>, days: Vec<i32>, flows: Vec<f64>) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("reach", DataType::Utf8, false),
        Field::new("date", DataType::Date32, false),
        Field::new("flow", DataType::Float64, false),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(reaches)),
        Arc::new(Date32Array::from(days)),
        Arc::new(Float64Array::from(flows)),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
    let file = std::fs::File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
}

#[test]
fn flows_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flows.parquet");

    let mut flows = BTreeMap::new();
    flows.insert("upper".to_string(), series(2000, 400, 1.0));
    flows.insert("lower".to_string(), series(1999, 30, 2.5));

    write_flows(&path, &flows, &WriterConfig::default()).unwrap();
    let back = accepted(read_flows(&path).unwrap());
    assert_eq!(back, flows);
}

#[test]
fn flows_roundtrip_zstd() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flows.parquet");

    let mut flows = BTreeMap::new();
    flows.insert("only".to_string(), series(2020, 50, 0.1));
    let config = WriterConfig::default()
        .with_compression(Compression::Zstd)
        .with_row_group_size(7);

    write_flows(&path, &flows, &config).unwrap();
    assert_eq!(accepted(read_flows(&path).unwrap()), flows);
}

#[test]
fn unordered_rows_are_sorted_by_date() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shuffled.parquet");
    // 2000-01-01 is day 10957 since the epoch.
    write_raw(
        &path,
        vec!["a", "b", "a", "a"],
        vec![10959, 10957, 10957, 10958],
        vec![3.0, 9.0, 1.0, 2.0],
    );

    let flows = accepted(read_flows(&path).unwrap());
    let a = &flows["a"];
    assert_eq!(a.start_date(), NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
    assert_eq!(a.flows(), &[1.0, 2.0, 3.0]);
    assert_eq!(flows["b"].len(), 1);
}

#[test]
fn gap_rejects_only_that_reach() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gap.parquet");
    // "good" covers 2001-2002 in full; "bad" skips day 100.
    let good_days: Vec<i32> = (11323..11323 + 730).collect();
    let bad_days: Vec<i32> = (0..730).filter(|&d| d != 100).collect();
    let mut reaches = vec!["good"; good_days.len()];
    reaches.extend(vec!["bad"; bad_days.len()]);
    let days: Vec<i32> = good_days.iter().chain(bad_days.iter()).copied().collect();
    let flows = vec![1.5; days.len()];
    write_raw(&path, reaches, days, flows);

    let read = read_flows(&path).unwrap();
    assert_eq!(read.len(), 2);
    let good = read["good"].as_ref().unwrap();
    assert_eq!(good.len(), 730);
    assert_eq!(good.start_date(), NaiveDate::from_ymd_opt(2001, 1, 1).unwrap());
    assert_eq!(
        read["bad"],
        Err(IhaError::NonDailyTimestep {
            position: 99,
            gap_days: 2
        })
    );

    let matrix = compute_iha(good, &IhaConfig::default()).unwrap();
    assert_eq!(matrix.years(), &[2001, 2002]);
}

#[test]
fn negative_flow_rejects_only_that_reach() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("neg.parquet");
    write_raw(
        &path,
        vec!["n", "n", "p"],
        vec![0, 1, 0],
        vec![1.0, -1.0, 2.0],
    );
    let read = read_flows(&path).unwrap();
    assert!(matches!(read["n"], Err(IhaError::NegativeFlow { .. })));
    assert_eq!(read["p"].as_ref().unwrap().flows(), &[2.0]);
}

#[test]
fn missing_file() {
    let err = read_flows(Path::new("/nonexistent/flows.parquet")).unwrap_err();
    assert!(matches!(err, IoError::FileNotFound { .. }));
}

#[test]
fn wrong_schema_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.parquet");
    let schema = Arc::new(Schema::new(vec![Field::new("q", DataType::Float64, false)]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![Arc::new(Float64Array::from(vec![1.0])) as ArrayRef],
    )
    .unwrap();
    let mut writer = ArrowWriter::try_new(std::fs::File::create(&path).unwrap(), schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    match read_flows(&path).unwrap_err() {
        IoError::Validation { count, .. } => assert_eq!(count, 3),
        other => panic!("expected Validation error, got {other:?}"),
    }
}

#[test]
fn parameter_table_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("params.parquet");
    let matrix = compute_iha(&series(2001, 730, 1.0), &IhaConfig::default()).unwrap();

    write_parameters(&path, &matrix, &WriterConfig::default()).unwrap();

    let file = std::fs::File::open(&path).unwrap();
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .unwrap()
        .build()
        .unwrap();
    let batches: Vec<RecordBatch> = reader.collect::<Result<_, _>>().unwrap();
    let batch = &batches[0];

    assert_eq!(batch.num_columns(), 34);
    assert_eq!(batch.num_rows(), 2);
    let years = batch.column(0).as_primitive::<Int32Type>();
    assert_eq!(years.values().to_vec(), vec![2001, 2002]);

    let schema = batch.schema();
    let col = schema.index_of(Param::Max7Day.name()).unwrap();
    let stored = batch.column(col).as_primitive::<Float64Type>();
    let expected = matrix.param(Param::Max7Day);
    for (a, b) in stored.values().iter().zip(expected.iter()) {
        assert_eq!(a, b);
    }
}
