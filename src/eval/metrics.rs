//! Classification metrics over parallel prediction/ground-truth sequences.
//!
//! The entry point is [`compute_snapshot`], which turns two equal-length
//! label sequences plus a fixed roster into a [`MetricsSnapshot`]:
//! accuracy, per-class precision/recall/F1/support, macro and weighted
//! averages, and a roster-ordered [`ConfusionMatrix`].
//!
//! Undefined ratios follow a zero-division→0 policy: a category with no
//! predicted and no actual occurrences scores precision = recall = f1 = 0
//! with support 0, never NaN and never an error.

use crate::eval::latency::LatencyStats;
use crate::taxonomy::Taxonomy;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

// =============================================================================
// Confusion matrix
// =============================================================================

/// Square count grid indexed by (actual, predicted) category.
///
/// Rows and columns follow the roster's declared order, not first-seen
/// order, so serialized and rendered layouts are stable across runs.
///
/// Invariants: the cell sum equals the number of scored records, and each
/// row sum equals the number of ground-truth occurrences of that category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    /// Roster labels, in declared order.
    labels: Vec<String>,
    /// `counts[actual][predicted]`.
    counts: Vec<Vec<u64>>,
}

impl ConfusionMatrix {
    fn from_pairs(taxonomy: &Taxonomy, predictions: &[String], actuals: &[String]) -> Result<Self> {
        let labels: Vec<String> = taxonomy.categories().to_vec();
        let mut counts = vec![vec![0u64; labels.len()]; labels.len()];
        for (predicted, actual) in predictions.iter().zip(actuals) {
            let row = taxonomy
                .position(actual)
                .ok_or_else(|| Error::unknown_category(actual, taxonomy.categories()))?;
            let col = taxonomy
                .position(predicted)
                .ok_or_else(|| Error::unknown_category(predicted, taxonomy.categories()))?;
            counts[row][col] += 1;
        }
        Ok(Self { labels, counts })
    }

    /// Roster labels, in row/column order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Count for an (actual, predicted) label pair; 0 for off-roster labels.
    #[must_use]
    pub fn count(&self, actual: &str, predicted: &str) -> u64 {
        match (self.index_of(actual), self.index_of(predicted)) {
            (Some(row), Some(col)) => self.counts[row][col],
            _ => 0,
        }
    }

    /// Count at roster positions (actual row, predicted column).
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> u64 {
        self.counts[row][col]
    }

    /// Total records scored.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Ground-truth occurrences of the category at `row` (support).
    #[must_use]
    pub fn row_total(&self, row: usize) -> u64 {
        self.counts[row].iter().sum()
    }

    /// Predicted occurrences of the category at `col`.
    #[must_use]
    pub fn column_total(&self, col: usize) -> u64 {
        self.counts.iter().map(|row| row[col]).sum()
    }

    /// Correctly classified records (diagonal sum).
    #[must_use]
    pub fn diagonal_total(&self) -> u64 {
        (0..self.labels.len()).map(|i| self.counts[i][i]).sum()
    }

    /// Render as an aligned text grid, actual categories down the side and
    /// predicted categories across the top.
    #[must_use]
    pub fn render(&self) -> String {
        let label_width = self
            .labels
            .iter()
            .map(|l| l.len())
            .max()
            .unwrap_or(0)
            .max("actual \\ predicted".len());
        let cell_width = self
            .labels
            .iter()
            .map(|l| l.len())
            .chain(self.counts.iter().flatten().map(|c| c.to_string().len()))
            .max()
            .unwrap_or(1);

        let mut out = String::new();
        out.push_str(&format!("{:<label_width$}", "actual \\ predicted"));
        for label in &self.labels {
            out.push_str(&format!("  {:>cell_width$}", label));
        }
        out.push('\n');
        for (row, label) in self.labels.iter().enumerate() {
            out.push_str(&format!("{:<label_width$}", label));
            for col in 0..self.labels.len() {
                out.push_str(&format!("  {:>cell_width$}", self.counts[row][col]));
            }
            out.push('\n');
        }
        out
    }

    fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }
}

// =============================================================================
// Snapshot types
// =============================================================================

/// Precision/recall/F1/support for a single roster category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    /// Category label.
    pub category: String,
    /// TP / (TP + FP); 0 when the category was never predicted.
    pub precision: f64,
    /// TP / (TP + FN); 0 when the category never occurred.
    pub recall: f64,
    /// Harmonic mean of precision and recall; 0 when both are 0.
    pub f1: f64,
    /// Ground-truth occurrences of the category.
    pub support: u64,
}

/// Roster-level averaged precision/recall/F1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AverageMetrics {
    /// Averaged precision.
    pub precision: f64,
    /// Averaged recall.
    pub recall: f64,
    /// Averaged F1.
    pub f1: f64,
}

/// Read-only aggregate of one evaluation session's metrics.
///
/// Recomputed on demand from the record set; identical inputs yield
/// identical snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Number of scored prediction records.
    pub total_samples: usize,
    /// Fraction of records where predicted == actual.
    pub accuracy: f64,
    /// Per-category metrics, in roster order. Categories unseen in the
    /// session are present with 0-valued metrics and support 0.
    pub per_class: Vec<ClassMetrics>,
    /// Unweighted mean across all roster categories.
    pub macro_avg: AverageMetrics,
    /// Mean weighted by per-category support.
    pub weighted_avg: AverageMetrics,
    /// Roster-ordered confusion matrix.
    pub confusion_matrix: ConfusionMatrix,
    /// Latency statistics, when any record carried a latency.
    pub latency: Option<LatencyStats>,
}

// =============================================================================
// Computation
// =============================================================================

/// Compute a [`MetricsSnapshot`] from parallel label sequences.
///
/// `latencies` is the subset of per-record latencies that were observed;
/// it may be shorter than the label sequences (records without timing
/// contribute nothing to the latency profile).
///
/// # Errors
///
/// - [`Error::EmptyInput`] if either sequence is empty.
/// - [`Error::LengthMismatch`] if the sequences differ in length.
/// - [`Error::UnknownCategory`] if any label is off-roster.
pub fn compute_snapshot(
    taxonomy: &Taxonomy,
    predictions: &[String],
    actuals: &[String],
    latencies: &[f64],
) -> Result<MetricsSnapshot> {
    check_sequences(predictions, actuals)?;

    let confusion_matrix = ConfusionMatrix::from_pairs(taxonomy, predictions, actuals)?;
    let total = predictions.len();
    let accuracy = confusion_matrix.diagonal_total() as f64 / total as f64;

    let per_class: Vec<ClassMetrics> = taxonomy
        .categories()
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let tp = confusion_matrix.cell(i, i);
            let support = confusion_matrix.row_total(i);
            let predicted = confusion_matrix.column_total(i);
            let precision = ratio(tp, predicted);
            let recall = ratio(tp, support);
            ClassMetrics {
                category: category.clone(),
                precision,
                recall,
                f1: harmonic_mean(precision, recall),
                support,
            }
        })
        .collect();

    let macro_avg = macro_average(&per_class);
    let weighted_avg = weighted_average(&per_class, total as u64);

    Ok(MetricsSnapshot {
        total_samples: total,
        accuracy,
        per_class,
        macro_avg,
        weighted_avg,
        confusion_matrix,
        latency: LatencyStats::from_seconds(latencies),
    })
}

pub(crate) fn check_sequences(predictions: &[String], actuals: &[String]) -> Result<()> {
    if predictions.len() != actuals.len() {
        return Err(Error::LengthMismatch {
            predicted: predictions.len(),
            actual: actuals.len(),
        });
    }
    if predictions.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(())
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn harmonic_mean(precision: f64, recall: f64) -> f64 {
    if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    }
}

fn macro_average(per_class: &[ClassMetrics]) -> AverageMetrics {
    let n = per_class.len() as f64;
    AverageMetrics {
        precision: per_class.iter().map(|c| c.precision).sum::<f64>() / n,
        recall: per_class.iter().map(|c| c.recall).sum::<f64>() / n,
        f1: per_class.iter().map(|c| c.f1).sum::<f64>() / n,
    }
}

fn weighted_average(per_class: &[ClassMetrics], total: u64) -> AverageMetrics {
    if total == 0 {
        return AverageMetrics {
            precision: 0.0,
            recall: 0.0,
            f1: 0.0,
        };
    }
    let weight = |support: u64| support as f64 / total as f64;
    AverageMetrics {
        precision: per_class
            .iter()
            .map(|c| c.precision * weight(c.support))
            .sum(),
        recall: per_class.iter().map(|c| c.recall * weight(c.support)).sum(),
        f1: per_class.iter().map(|c| c.f1 * weight(c.support)).sum(),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::Taxonomy;

    const EPS: f64 = 1e-9;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn spec_scenario() -> (Taxonomy, Vec<String>, Vec<String>) {
        let taxonomy =
            Taxonomy::custom(["Finance", "Legal", "HR", "Sales", "Product", "Other"]).unwrap();
        let predictions = labels(&["Finance", "Legal", "HR", "Sales", "Other"]);
        let actuals = labels(&["Finance", "Legal", "Finance", "Sales", "Product"]);
        (taxonomy, predictions, actuals)
    }

    #[test]
    fn accuracy_counts_exact_matches() {
        let (taxonomy, predictions, actuals) = spec_scenario();
        let snapshot = compute_snapshot(&taxonomy, &predictions, &actuals, &[]).unwrap();
        assert!((snapshot.accuracy - 0.6).abs() < EPS);
        assert_eq!(snapshot.total_samples, 5);
    }

    #[test]
    fn confusion_matrix_cells_sum_to_record_count() {
        let (taxonomy, predictions, actuals) = spec_scenario();
        let snapshot = compute_snapshot(&taxonomy, &predictions, &actuals, &[]).unwrap();
        let cm = &snapshot.confusion_matrix;
        assert_eq!(cm.total(), 5);
        assert_eq!(cm.diagonal_total(), 3);
        assert_eq!(cm.count("Finance", "HR"), 1);
        assert_eq!(cm.count("Product", "Other"), 1);
    }

    #[test]
    fn row_totals_match_per_category_support() {
        let (taxonomy, predictions, actuals) = spec_scenario();
        let snapshot = compute_snapshot(&taxonomy, &predictions, &actuals, &[]).unwrap();
        for (i, class) in snapshot.per_class.iter().enumerate() {
            assert_eq!(snapshot.confusion_matrix.row_total(i), class.support);
        }
        // Finance occurs twice in the ground truth.
        assert_eq!(snapshot.per_class[0].support, 2);
    }

    #[test]
    fn unseen_categories_score_zero_not_nan() {
        let (taxonomy, predictions, actuals) = spec_scenario();
        let snapshot = compute_snapshot(&taxonomy, &predictions, &actuals, &[]).unwrap();
        // "HR" was predicted once but never occurs in the ground truth.
        let hr = &snapshot.per_class[2];
        assert_eq!(hr.support, 0);
        assert!((hr.recall - 0.0).abs() < EPS);
        assert!((hr.f1 - 0.0).abs() < EPS);
        for class in &snapshot.per_class {
            assert!(class.precision.is_finite());
            assert!(class.recall.is_finite());
            assert!(class.f1.is_finite());
        }
    }

    #[test]
    fn macro_average_spans_the_full_roster() {
        let taxonomy = Taxonomy::custom(["A", "B", "C", "D"]).unwrap();
        let predictions = labels(&["A", "A"]);
        let actuals = labels(&["A", "A"]);
        let snapshot = compute_snapshot(&taxonomy, &predictions, &actuals, &[]).unwrap();
        // A is perfect; B, C, D contribute zero rows.
        assert!((snapshot.macro_avg.f1 - 0.25).abs() < EPS);
        assert!((snapshot.weighted_avg.f1 - 1.0).abs() < EPS);
    }

    #[test]
    fn single_category_roster_fully_correct() {
        let taxonomy = Taxonomy::custom(["Only"]).unwrap();
        let predictions = labels(&["Only", "Only", "Only"]);
        let snapshot = compute_snapshot(&taxonomy, &predictions, &predictions.clone(), &[]).unwrap();
        assert!((snapshot.accuracy - 1.0).abs() < EPS);
        assert!((snapshot.macro_avg.f1 - 1.0).abs() < EPS);
        assert!((snapshot.weighted_avg.precision - 1.0).abs() < EPS);
    }

    #[test]
    fn empty_sequences_are_an_error() {
        let taxonomy = Taxonomy::general();
        let err = compute_snapshot(&taxonomy, &[], &[], &[]).unwrap_err();
        assert!(matches!(err, Error::EmptyInput));
    }

    #[test]
    fn mismatched_lengths_are_an_error() {
        let taxonomy = Taxonomy::general();
        let predictions = labels(&["Finance"]);
        let actuals = labels(&["Finance", "Legal"]);
        let err = compute_snapshot(&taxonomy, &predictions, &actuals, &[]).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { .. }));
    }

    #[test]
    fn off_roster_labels_are_an_error() {
        let taxonomy = Taxonomy::custom(["A", "B"]).unwrap();
        let predictions = labels(&["A"]);
        let actuals = labels(&["C"]);
        let err = compute_snapshot(&taxonomy, &predictions, &actuals, &[]).unwrap_err();
        assert!(matches!(err, Error::UnknownCategory { .. }));
    }

    #[test]
    fn snapshot_is_idempotent() {
        let (taxonomy, predictions, actuals) = spec_scenario();
        let first = compute_snapshot(&taxonomy, &predictions, &actuals, &[0.5, 1.5]).unwrap();
        let second = compute_snapshot(&taxonomy, &predictions, &actuals, &[0.5, 1.5]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn render_lists_labels_in_roster_order() {
        let (taxonomy, predictions, actuals) = spec_scenario();
        let snapshot = compute_snapshot(&taxonomy, &predictions, &actuals, &[]).unwrap();
        let rendered = snapshot.confusion_matrix.render();
        let finance = rendered.find("Finance").unwrap();
        let other = rendered.rfind("Other").unwrap();
        assert!(finance < other);
    }
}
