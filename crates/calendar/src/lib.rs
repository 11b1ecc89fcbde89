//! # eflow-calendar
//!
//! Gregorian date arithmetic for partitioning daily flow records into
//! hydrological years.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["NaiveDate"] -->|"water_year()"| B["year label"]
//!     C["YearConvention"] -->|".label()"| B
//!     C -->|".span()"| D["(first day, days in span)"]
//!     E["&[NaiveDate]"] -->|"complete_years()"| F["Vec of YearSlice"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use chrono::NaiveDate;
//! use eflow_calendar::{YearConvention, complete_years, water_year};
//!
//! // Water year
//! let wy = water_year(2000, 10, 10).unwrap(); // Oct start → WY 2001
//!
//! // Segment a record into complete October-start water years
//! let convention = YearConvention::water_year(10).unwrap();
//! let slices = complete_years(&dates, convention)?;
//! for s in &slices {
//!     println!("{}: rows {}..{}", s.label, s.start, s.end);
//! }
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `convention` | Calendar vs water-year labelling |
//! | `segment` | Complete-year detection |
//! | `water_year` | Water year computation |
//! | `error` | Error types |

mod convention;
mod error;
mod segment;
mod water_year;

pub use convention::YearConvention;
pub use error::CalendarError;
pub use segment::{YearSlice, complete_years, day_of_year};
pub use water_year::water_year;
