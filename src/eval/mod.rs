//! Document-classification evaluation.
//!
//! # Overview
//!
//! This module scores predicted category labels against ground truth:
//!
//! - **Metrics**: accuracy, per-class precision/recall/F1/support, macro and
//!   weighted averages, roster-ordered confusion matrix
//! - **Error analysis**: `actual→predicted` pattern ranking, capped sample list
//! - **Latency profiling**: mean/median/std/min/max/p95/p99/throughput
//! - **Reporting**: one serializable [`EvaluationReport`] per session, written
//!   atomically
//!
//! # Usage
//!
//! ```rust
//! use scorecard::{Evaluator, Taxonomy};
//!
//! let mut evaluator = Evaluator::new(Taxonomy::general());
//! evaluator.record("Finance", "Finance", Some(2.5)).unwrap();
//! evaluator.record("HR", "Finance", Some(2.8)).unwrap();
//!
//! let metrics = evaluator.metrics().unwrap();
//! assert!((metrics.accuracy - 0.5).abs() < 1e-9);
//!
//! let analysis = evaluator.error_analysis().unwrap();
//! assert_eq!(analysis.pattern_count("Finance→HR"), 1);
//! ```
//!
//! Undefined ratios never escape as NaN: precision/recall/F1 for a category
//! with no occurrences resolve to 0, as does throughput when the mean
//! latency is 0.

use crate::taxonomy::Taxonomy;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

// Submodules
pub mod error_analysis;
pub mod latency;
pub mod metrics;
pub mod report;

// Re-exports
pub use error_analysis::{
    analyze, ErrorAnalysis, ErrorPattern, Misclassification, DEFAULT_MAX_SAMPLES,
};
pub use latency::{percentile, LatencyStats};
pub use metrics::{
    compute_snapshot, AverageMetrics, ClassMetrics, ConfusionMatrix, MetricsSnapshot,
};
pub use report::{render_classification_report, EvaluationReport};

// =============================================================================
// Options
// =============================================================================

/// Configuration for an evaluation session.
///
/// Passed to [`Evaluator::with_options`] at construction; validation errors
/// surface there, not mid-session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalOptions {
    /// Cap on individual mismatches retained by error analysis.
    pub max_error_samples: usize,
    /// Route off-roster labels to the `Other` bucket instead of failing.
    ///
    /// The strict default rejects unknown labels with
    /// [`Error::UnknownCategory`]; the fallback only applies when the roster
    /// carries an `Other` category.
    pub fallback_to_other: bool,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self::strict()
    }
}

impl EvalOptions {
    /// Strict label handling: off-roster labels are an error.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            max_error_samples: DEFAULT_MAX_SAMPLES,
            fallback_to_other: false,
        }
    }

    /// Lenient label handling: off-roster labels land in `Other`.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            max_error_samples: DEFAULT_MAX_SAMPLES,
            fallback_to_other: true,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.max_error_samples == 0 {
            return Err(Error::invalid_config(
                "max_error_samples must be at least 1",
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Prediction records
// =============================================================================

/// One classification attempt: what the classifier said, what was correct,
/// and optionally how long the call took.
///
/// Immutable once appended to an [`Evaluator`]; lives in memory for the
/// duration of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// Label the classifier produced.
    pub predicted: String,
    /// Ground-truth label.
    pub actual: String,
    /// Processing time of the call, seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_seconds: Option<f64>,
}

// =============================================================================
// Evaluator
// =============================================================================

/// Accumulates prediction records for one evaluation session.
///
/// Labels are resolved against the session's [`Taxonomy`] as they are
/// recorded, so every downstream computation sees only roster labels and the
/// confusion-matrix invariants hold unconditionally. Metrics, error analysis,
/// and reports are recomputed on demand from the record list; nothing is
/// cached or mutated in place.
#[derive(Debug, Clone)]
pub struct Evaluator {
    taxonomy: Taxonomy,
    options: EvalOptions,
    records: Vec<PredictionRecord>,
}

impl Evaluator {
    /// Create an evaluator with default (strict) options.
    #[must_use]
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self {
            taxonomy,
            options: EvalOptions::default(),
            records: Vec::new(),
        }
    }

    /// Create an evaluator with explicit options.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] if the options fail validation.
    pub fn with_options(taxonomy: Taxonomy, options: EvalOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            taxonomy,
            options,
            records: Vec::new(),
        })
    }

    /// The session's category roster.
    #[must_use]
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Records accumulated so far, in insertion order.
    #[must_use]
    pub fn records(&self) -> &[PredictionRecord] {
        &self.records
    }

    /// Number of recorded predictions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the session has no records yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record one classification attempt.
    ///
    /// Both labels are resolved against the roster immediately. With
    /// [`EvalOptions::lenient`], off-roster labels resolve to the `Other`
    /// bucket; otherwise they are rejected.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownCategory`] for an off-roster label (strict mode, or
    ///   lenient mode on a roster without an `Other` bucket).
    /// - [`Error::InvalidInput`] for a negative or non-finite latency.
    pub fn record(
        &mut self,
        predicted: &str,
        actual: &str,
        latency_seconds: Option<f64>,
    ) -> Result<()> {
        if let Some(latency) = latency_seconds {
            if !latency.is_finite() || latency < 0.0 {
                return Err(Error::invalid_input(format!(
                    "latency must be a non-negative number of seconds, got {}",
                    latency
                )));
            }
        }
        let predicted = self.resolve(predicted)?.to_string();
        let actual = self.resolve(actual)?.to_string();
        self.records.push(PredictionRecord {
            predicted,
            actual,
            latency_seconds,
        });
        Ok(())
    }

    /// Record a batch of `(predicted, actual, latency_seconds)` tuples.
    ///
    /// Stops at the first invalid tuple; records before it are kept.
    pub fn record_all<'a, I>(&mut self, tuples: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, &'a str, Option<f64>)>,
    {
        for (predicted, actual, latency) in tuples {
            self.record(predicted, actual, latency)?;
        }
        Ok(())
    }

    /// Compute the session's [`MetricsSnapshot`].
    ///
    /// # Errors
    ///
    /// [`Error::EmptyInput`] if nothing has been recorded.
    pub fn metrics(&self) -> Result<MetricsSnapshot> {
        let predictions = self.predictions();
        let actuals = self.actuals();
        let timed: Vec<f64> = self
            .records
            .iter()
            .filter_map(|r| r.latency_seconds)
            .collect();
        compute_snapshot(&self.taxonomy, &predictions, &actuals, &timed)
    }

    /// Analyze the session's misclassifications.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyInput`] if nothing has been recorded.
    pub fn error_analysis(&self) -> Result<ErrorAnalysis> {
        if self.records.is_empty() {
            return Err(Error::EmptyInput);
        }
        let latencies: Vec<Option<f64>> =
            self.records.iter().map(|r| r.latency_seconds).collect();
        analyze(
            &self.predictions(),
            &self.actuals(),
            &latencies,
            self.options.max_error_samples,
        )
    }

    /// Latency profile over the records that carried a timing.
    ///
    /// `None` when no record was timed.
    #[must_use]
    pub fn latency_stats(&self) -> Option<LatencyStats> {
        let timed: Vec<f64> = self
            .records
            .iter()
            .filter_map(|r| r.latency_seconds)
            .collect();
        LatencyStats::from_seconds(&timed)
    }

    /// Bundle metrics and error analysis into an [`EvaluationReport`].
    ///
    /// # Errors
    ///
    /// [`Error::EmptyInput`] if nothing has been recorded.
    pub fn report(&self) -> Result<EvaluationReport> {
        let metrics = self.metrics()?;
        let error_analysis = self.error_analysis()?;
        Ok(EvaluationReport::new(
            &self.taxonomy,
            metrics,
            error_analysis,
        ))
    }

    fn resolve<'a>(&'a self, label: &str) -> Result<&'a str> {
        if self.options.fallback_to_other {
            self.taxonomy.resolve_or_other(label)
        } else {
            self.taxonomy.resolve(label)
        }
    }

    fn predictions(&self) -> Vec<String> {
        self.records.iter().map(|r| r.predicted.clone()).collect()
    }

    fn actuals(&self) -> Vec<String> {
        self.records.iter().map(|r| r.actual.clone()).collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
