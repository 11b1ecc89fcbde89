//! # eflow-iari
//!
//! Index of Hydrological Alteration in Rivers: a continuous, non-negative
//! score of how far impacted yearly parameters fall outside the natural
//! interquartile bands. Smooth enough to serve as an optimisation target.
//!
//! ## Scoring Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["natural ParameterMatrix"] -->|"bands_from_matrix()"| B["NaturalBands"]
//!     C["impacted ParameterMatrix"] -->|"compute_deviations()"| D["(n_years, 33) deviations"]
//!     B --> D
//!     D -->|"per-year mean"| E["per_year"]
//!     E -->|"grand mean"| F["overall + IariClass"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use eflow_iari::{IariConfig, compute_iari};
//!
//! let result = compute_iari(&natural, &impacted, &IariConfig::default())?;
//! println!("{}", result.summary());
//! ```

mod compute;
mod deviation;
mod error;
mod types;

pub use compute::{IariConfig, check_against_bands, compute_iari, score_against_bands};
pub use deviation::{bands_from_matrix, compute_deviations, deviation, overall_score, per_year_scores};
pub use error::IariError;
pub use types::{
    DEGENERATE_WIDTH, EXCELLENT_THRESHOLD, GOOD_THRESHOLD, IariClass, IariResult, NaturalBands,
};
