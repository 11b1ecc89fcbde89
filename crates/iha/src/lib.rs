//! # eflow-iha
//!
//! Indicators of Hydrologic Alteration: reduces a daily discharge record to
//! 33 parameters per complete year, in five groups.
//!
//! ## Extraction Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["dates + flows"] -->|"FlowSeries::new()"| B["FlowSeries"]
//!     B -->|"pulse_thresholds_from_record()"| C["PulseThresholds"]
//!     B -->|"compute_iha()"| D["ParameterMatrix"]
//!     C -.->|"IhaConfig::with_pulse_thresholds()"| D
//!     D --> E[".group(Group)"]
//!     D --> F[".param(Param)"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use eflow_iha::{FlowSeries, IhaConfig, compute_iha, pulse_thresholds_from_record};
//!
//! let natural = FlowSeries::new(dates, flows)?;
//! let config = IhaConfig::default();
//! let thresholds = pulse_thresholds_from_record(&natural, config.conventions().quantile_method)?;
//! let config = config.with_pulse_thresholds(thresholds);
//! let matrix = compute_iha(&natural, &config)?;
//! println!("{} complete years", matrix.n_years());
//! ```
//!
//! ## Parameter Groups
//!
//! | Group | Columns | Parameters |
//! |-------|---------|------------|
//! | 1 | 0..12 | Mean flow per calendar month |
//! | 2 | 12..24 | 1/3/7/30/90-day minima and maxima, zero-flow days, baseflow index |
//! | 3 | 24..26 | Day of year of annual minimum and maximum |
//! | 4 | 26..30 | Low/high pulse count and duration |
//! | 5 | 30..33 | Rise rate, fall rate, reversals |

mod compute;
mod config;
mod error;
mod groups;
mod matrix;
mod param;
mod series;
mod thresholds;

pub use compute::compute_iha;
pub use config::{CentralTendency, Conventions, FallRateSign, IhaConfig, ZERO_FLOW_THRESHOLD};
pub use error::IhaError;
pub use groups::WINDOWS;
pub use matrix::ParameterMatrix;
pub use param::{Group, N_GROUPS, N_PARAMS, Param};
pub use series::FlowSeries;
pub use thresholds::{PulseThresholds, ThresholdSource, pulse_thresholds_from_record};

pub use eflow_calendar::YearConvention;
pub use eflow_stats::QuantileMethod;
