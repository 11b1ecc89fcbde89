//! # eflow-io
//!
//! Read daily flow records from Parquet and write flows and IHA parameter
//! tables back out. Bridges files into the validated [`eflow_iha::FlowSeries`]
//! used by the rest of the workspace.
//!
//! Flow files are long-format: one row per reach and day with columns
//! `reach: Utf8`, `date: Date32`, `flow: Float64`.

mod error;
mod parquet_read;
mod parquet_write;
mod reader;
mod writer;

pub use error::IoError;
pub use reader::{ReachFlows, read_flows};
pub use writer::{Compression, WriterConfig, write_flows, write_parameters};
