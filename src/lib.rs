//! # scorecard
//!
//! Evaluation toolkit for document classification.
//!
//! - **Metrics**: accuracy, per-class precision/recall/F1/support, macro and
//!   weighted averages, roster-ordered confusion matrix
//! - **Error analysis**: ranked `actual→predicted` patterns, sample mismatches
//! - **Latency profiling**: mean/median/std/p95/p99/throughput
//! - **Ground truth**: persistent document-id → category store
//!
//! ## Quick Start
//!
//! ```rust
//! use scorecard::{Evaluator, Taxonomy};
//!
//! let mut evaluator = Evaluator::new(
//!     Taxonomy::custom(["Finance", "Legal", "Other"]).unwrap(),
//! );
//! evaluator.record("Finance", "Finance", Some(2.5)).unwrap();
//! evaluator.record("Legal", "Finance", Some(3.1)).unwrap();
//!
//! let metrics = evaluator.metrics().unwrap();
//! assert!((metrics.accuracy - 0.5).abs() < 1e-9);
//! assert_eq!(metrics.confusion_matrix.total(), 2);
//! ```
//!
//! ## Taxonomies
//!
//! Category rosters are fixed and ordered: either one of ten built-in
//! per-industry rosters ([`Taxonomy::for_industry`]) or a caller-supplied
//! label list ([`Taxonomy::custom`]). Label resolution is strict by default;
//! the `Other` bucket is an explicit, named fallback, never an implicit
//! default.
//!
//! ## Reports
//!
//! [`EvaluationReport`] bundles one session's metrics, error analysis, and a
//! rendered per-category table. Reports and the ground-truth store both
//! persist as self-describing JSON, written atomically: a failed write
//! leaves the destination untouched.
//!
//! ## Design Philosophy
//!
//! - **Pure computation**: metrics are recomputed on demand from the record
//!   list; identical inputs yield identical snapshots
//! - **No NaN leakage**: zero-division resolves to 0 for precision, recall,
//!   F1, and throughput
//! - **Caller-visible failures**: empty input and length mismatches are
//!   errors, never silently truncated or zeroed
//! - **Local errors**: everything is returned to the immediate caller;
//!   nothing aborts a host process

#![warn(missing_docs)]

pub mod cli;
mod error;
pub mod eval;
mod persist;
pub mod taxonomy;
pub mod truth;

pub mod prelude {
    //! Commonly used items, re-exported for convenience.
    //!
    //! ```rust
    //! use scorecard::prelude::*;
    //!
    //! let mut evaluator = Evaluator::new(Taxonomy::general());
    //! evaluator.record("Finance", "Finance", None).unwrap();
    //! assert_eq!(evaluator.len(), 1);
    //! ```
    pub use crate::error::{Error, Result};
    pub use crate::eval::{
        ErrorAnalysis, EvalOptions, EvaluationReport, Evaluator, LatencyStats, MetricsSnapshot,
    };
    pub use crate::taxonomy::{Industry, Taxonomy};
    pub use crate::truth::GroundTruthStore;
}

// Re-exports
pub use error::{Error, Result};
pub use eval::{
    AverageMetrics, ClassMetrics, ConfusionMatrix, ErrorAnalysis, ErrorPattern, EvalOptions,
    EvaluationReport, Evaluator, LatencyStats, MetricsSnapshot, Misclassification,
    PredictionRecord,
};
pub use taxonomy::{Industry, Taxonomy, OTHER_CATEGORY};
pub use truth::{DatasetDocument, GroundTruthDataset, GroundTruthEntry, GroundTruthStore};
