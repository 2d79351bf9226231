//! Unified evaluation report.
//!
//! Bundles one session's metrics, error analysis, and a rendered
//! per-category classification table into a single serializable record.
//! Reports round-trip through JSON and are written atomically: the
//! destination file is either fully replaced or left untouched.
//!
//! # Example
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
//! let report = evaluator.report().unwrap();
//! println!("{}", report.summary());
//! ```

use crate::eval::error_analysis::ErrorAnalysis;
use crate::eval::metrics::MetricsSnapshot;
use crate::taxonomy::{Industry, Taxonomy};
use crate::{persist, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::info;

/// How many top error patterns the rendered summary displays.
const MAX_PATTERNS_DISPLAYED: usize = 10;

/// Complete evaluation record for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Industry the roster was derived from, when a built-in one was used.
    pub industry: Option<Industry>,
    /// Category roster, in declared order.
    pub categories: Vec<String>,
    /// Number of prediction records scored.
    pub total_predictions: usize,
    /// Accuracy, per-class metrics, averages, confusion matrix, latency.
    pub metrics: MetricsSnapshot,
    /// Misclassification patterns and samples.
    pub error_analysis: ErrorAnalysis,
    /// Rendered per-category text table, embedded so the saved file is
    /// readable without this library.
    pub classification_report: String,
}

impl EvaluationReport {
    /// Assemble a report from session outputs, stamped with the current time.
    #[must_use]
    pub fn new(taxonomy: &Taxonomy, metrics: MetricsSnapshot, error_analysis: ErrorAnalysis) -> Self {
        let classification_report = render_classification_report(&metrics);
        Self {
            generated_at: Utc::now(),
            industry: taxonomy.industry(),
            categories: taxonomy.categories().to_vec(),
            total_predictions: metrics.total_samples,
            metrics,
            error_analysis,
            classification_report,
        }
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| crate::Error::parse(e.to_string()))
    }

    /// Write the report to `path` atomically.
    ///
    /// # Errors
    ///
    /// [`crate::Error::Persistence`] on failure; the destination is left
    /// untouched.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        persist::write_json_atomic(path, self)?;
        info!(
            path = %path.display(),
            predictions = self.total_predictions,
            "evaluation report saved"
        );
        Ok(())
    }

    /// Load a previously saved report.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        persist::read_json(path.as_ref())
    }

    /// Render the full human-readable summary.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = String::new();

        out.push_str("=== Classification Evaluation Report ===\n");
        out.push_str(&format!("Generated: {}\n", self.generated_at.to_rfc3339()));
        if let Some(industry) = self.industry {
            out.push_str(&format!("Industry:  {}\n", industry));
        }
        out.push_str(&format!("Samples:   {}\n\n", self.total_predictions));

        out.push_str("## Core Metrics\n");
        out.push_str(&format!(
            "  Accuracy:    {:.1}%\n",
            self.metrics.accuracy * 100.0
        ));
        out.push_str(&format!(
            "  Macro F1:    {:.1}%\n",
            self.metrics.macro_avg.f1 * 100.0
        ));
        out.push_str(&format!(
            "  Weighted F1: {:.1}%\n\n",
            self.metrics.weighted_avg.f1 * 100.0
        ));

        out.push_str("## Per-Category Breakdown\n");
        out.push_str(&self.classification_report);
        out.push('\n');

        out.push_str("## Confusion Matrix\n");
        out.push_str(&self.metrics.confusion_matrix.render());
        out.push('\n');

        out.push_str("## Error Analysis\n");
        out.push_str(&format!(
            "  Total errors: {} ({:.1}% of samples)\n",
            self.error_analysis.total_errors,
            self.error_analysis.error_rate * 100.0
        ));
        if !self.error_analysis.patterns.is_empty() {
            out.push_str("  Top patterns:\n");
            for pattern in self
                .error_analysis
                .patterns
                .iter()
                .take(MAX_PATTERNS_DISPLAYED)
            {
                out.push_str(&format!("    {:>4}x  {}\n", pattern.count, pattern.pattern));
            }
        }
        out.push('\n');

        if let Some(ref latency) = self.metrics.latency {
            out.push_str("## Latency\n");
            out.push_str(&format!(
                "  mean {:.3}s  median {:.3}s  std {:.3}s\n",
                latency.mean, latency.median, latency.std_dev
            ));
            out.push_str(&format!(
                "  min {:.3}s  max {:.3}s  p95 {:.3}s  p99 {:.3}s\n",
                latency.min, latency.max, latency.p95, latency.p99
            ));
            out.push_str(&format!(
                "  throughput {:.2} docs/sec ({} timed calls)\n",
                latency.throughput_per_sec, latency.samples
            ));
        }

        out
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

/// Render the per-category precision/recall/F1/support table.
///
/// One row per roster category, followed by `accuracy`, `macro avg`, and
/// `weighted avg` rows.
#[must_use]
pub fn render_classification_report(metrics: &MetricsSnapshot) -> String {
    let label_width = metrics
        .per_class
        .iter()
        .map(|c| c.category.len())
        .max()
        .unwrap_or(0)
        .max("weighted avg".len());

    let mut out = String::new();
    out.push_str(&format!(
        "{:>label_width$}  {:>9}  {:>9}  {:>9}  {:>9}\n\n",
        "", "precision", "recall", "f1-score", "support"
    ));

    for class in &metrics.per_class {
        out.push_str(&format!(
            "{:>label_width$}  {:>9.2}  {:>9.2}  {:>9.2}  {:>9}\n",
            class.category, class.precision, class.recall, class.f1, class.support
        ));
    }

    let total = metrics.total_samples;
    out.push('\n');
    out.push_str(&format!(
        "{:>label_width$}  {:>9}  {:>9}  {:>9.2}  {:>9}\n",
        "accuracy", "", "", metrics.accuracy, total
    ));
    out.push_str(&format!(
        "{:>label_width$}  {:>9.2}  {:>9.2}  {:>9.2}  {:>9}\n",
        "macro avg",
        metrics.macro_avg.precision,
        metrics.macro_avg.recall,
        metrics.macro_avg.f1,
        total
    ));
    out.push_str(&format!(
        "{:>label_width$}  {:>9.2}  {:>9.2}  {:>9.2}  {:>9}\n",
        "weighted avg",
        metrics.weighted_avg.precision,
        metrics.weighted_avg.recall,
        metrics.weighted_avg.f1,
        total
    ));
    out
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::Evaluator;
    use crate::taxonomy::Taxonomy;

    fn sample_report() -> EvaluationReport {
        let mut evaluator = Evaluator::new(
            Taxonomy::custom(["Finance", "Legal", "HR", "Sales", "Product", "Other"]).unwrap(),
        );
        for (predicted, actual, latency) in [
            ("Finance", "Finance", Some(2.5)),
            ("Legal", "Legal", Some(3.1)),
            ("HR", "Finance", Some(2.8)),
            ("Sales", "Sales", Some(1.9)),
            ("Other", "Product", Some(2.2)),
        ] {
            evaluator.record(predicted, actual, latency).unwrap();
        }
        evaluator.report().unwrap()
    }

    #[test]
    fn summary_mentions_core_numbers() {
        let report = sample_report();
        let summary = report.summary();
        assert!(summary.contains("Accuracy:    60.0%"));
        assert!(summary.contains("Total errors: 2 (40.0% of samples)"));
        assert!(summary.contains("Finance→HR"));
        assert!(summary.contains("throughput"));
    }

    #[test]
    fn classification_report_has_summary_rows() {
        let report = sample_report();
        assert!(report.classification_report.contains("precision"));
        assert!(report.classification_report.contains("accuracy"));
        assert!(report.classification_report.contains("macro avg"));
        assert!(report.classification_report.contains("weighted avg"));
        // One row per roster category.
        for category in &report.categories {
            assert!(report.classification_report.contains(category.as_str()));
        }
    }

    #[test]
    fn json_round_trip_preserves_fields() {
        let report = sample_report();
        let json = report.to_json().unwrap();
        let restored: EvaluationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, report);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        let report = sample_report();
        report.save(&path).unwrap();
        let loaded = EvaluationReport::load(&path).unwrap();

        assert_eq!(loaded.total_predictions, report.total_predictions);
        assert!((loaded.metrics.accuracy - report.metrics.accuracy).abs() < 1e-9);
        assert_eq!(loaded.categories, report.categories);
        assert_eq!(loaded.generated_at, report.generated_at);
    }

    #[test]
    fn failed_save_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("report.json");

        let report = sample_report();
        assert!(report.save(&path).is_err());
        assert!(!path.exists());
    }
}
