//! # eflow-dhram
//!
//! Dundee Hydrological Regime Alteration Method: a five-class categorical
//! assessment of how far an impacted flow regime departs from its natural
//! reference, for Water Framework Directive reporting.
//!
//! ## Classification Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["natural ParameterMatrix"] --> C["summary_indicators()"]
//!     B["impacted ParameterMatrix"] --> C
//!     C -->|"10 indicators"| D["ScoringThresholds::score()"]
//!     D -->|"0..30 points"| E["classify()"]
//!     E -->|"+ supplementary flags"| F["DhramResult"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use eflow_dhram::{DhramConfig, compute_dhram};
//!
//! let result = compute_dhram(&natural, &impacted, &DhramConfig::default())?;
//! println!("{}", result.summary());
//! ```

mod compute;
mod error;
mod indicators;
mod types;

pub use compute::{DhramConfig, compute_dhram};
pub use error::DhramError;
pub use indicators::{DAYS_PER_YEAR, MAX_CHANGE, parameter_changes, percent_change, summary_indicators};
pub use types::{
    CLASS_LOWER_BOUNDS, DhramResult, EMPIRICAL_THRESHOLDS, Indicator, MAX_POINTS, N_INDICATORS,
    SIMPLIFIED_THRESHOLDS, ScoredParameters, ScoringThresholds, Statistic, ThresholdVariant,
    WfdStatus, apply_supplementary, classify,
};
