//! Reading daily flow records from Parquet.

use std::collections::BTreeMap;
use std::path::Path;

use eflow_iha::{FlowSeries, IhaError};
use tracing::{debug, info, warn};

use crate::error::IoError;
use crate::parquet_read;

/// Per-reach outcome of reading a flow file: the validated series, or the
/// reason that reach's rows were rejected.
pub type ReachFlows = BTreeMap<String, Result<FlowSeries, IhaError>>;

/// Read per-reach daily flows from a Parquet file.
///
/// The file needs `reach: Utf8`, `date: Date32` and `flow: Float64`
/// columns; other columns are ignored. Rows may appear in any order: each
/// reach is sorted by date and then validated as a [`FlowSeries`]. A reach
/// with gaps, duplicate dates or invalid flows keeps its entry with the
/// validation error, so the other reaches stay usable.
///
/// A file with no rows yields an empty map.
///
/// # Errors
///
/// - [`IoError::FileNotFound`] / [`IoError::Parquet`] if the file cannot be read.
/// - [`IoError::Validation`] for missing or mistyped columns and null cells.
/// - [`IoError::InvalidDate`] for unrepresentable dates.
pub fn read_flows(path: &Path) -> Result<ReachFlows, IoError> {
    let batches = parquet_read::read_batches(path)?;
    let Some(first) = batches.first() else {
        return Ok(BTreeMap::new());
    };
    let columns = parquet_read::validate_schema(&first.schema())?;
    let groups = parquet_read::group_by_reach(&batches, columns)?;

    let mut flows = BTreeMap::new();
    let mut n_rejected = 0usize;
    for (reach, (dates, values)) in groups {
        let mut rows: Vec<_> = dates.into_iter().zip(values).collect();
        rows.sort_by_key(|&(date, _)| date);
        let (dates, values): (Vec<_>, Vec<_>) = rows.into_iter().unzip();
        let outcome = FlowSeries::new(dates, values);
        match &outcome {
            Ok(series) => debug!(reach = %reach, n_days = series.len(), "read reach"),
            Err(err) => {
                n_rejected += 1;
                warn!(reach = %reach, error = %err, "reach rejected");
            }
        }
        flows.insert(reach, outcome);
    }

    info!(
        path = %path.display(),
        n_reaches = flows.len(),
        n_rejected,
        "read flows"
    );
    Ok(flows)
}
