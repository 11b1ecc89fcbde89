//! Multi-reach evaluation of flow alteration.
//!
//! Bridges flow sources (simulation traces or dated records) to the IHA
//! extractor and the two alteration indices.
//!
//! ```mermaid
//! graph LR
//!     N[natural FlowSource] --> P[paired_matrices]
//!     I[impacted FlowSource] --> P
//!     P --> D[compute_dhram]
//!     P --> A[compute_iari]
//!     D --> R[ReachEvaluation]
//!     A --> R
//!     R --> O[DhramReport / IariReport]
//! ```
//!
//! Each reach is evaluated independently on the rayon pool. A reach that
//! fails is logged and recorded in [`ReachEvaluation::failures`]; the run
//! only fails if every reach does.
//!
//! # Quick Start
//!
//! ```ignore
//! use eflow_evaluate::{EvaluateConfig, Frequency, SimulatedTraces, evaluate_iari};
//! use eflow_iari::IariConfig;
//!
//! let natural = SimulatedTraces::new(Frequency::Daily, Some(start)).with_reach("outlet", nat);
//! let impacted = SimulatedTraces::new(Frequency::Daily, Some(start)).with_reach("outlet", imp);
//! let eval = evaluate_iari(&natural, &impacted, &EvaluateConfig::default(), &IariConfig::default())?;
//! println!("{}", eval.get("outlet").unwrap().summary());
//! ```

mod config;
mod error;
mod objective;
mod output;
mod reach;
mod source;

pub use config::EvaluateConfig;
pub use error::EvaluateError;
pub use objective::{CompositeIariObjective, Direction, IariObjective, Objective};
pub use output::{
    DhramReport, IariReachReport, IariReport, ParameterColumn, ParameterReport, YearScore, to_json,
};
pub use reach::{
    ReachEvaluation, evaluate_dhram, evaluate_iari, paired_matrices, select_reaches,
};
pub use source::{FlowSource, Frequency, SimulatedTraces, iha_from_reach};
