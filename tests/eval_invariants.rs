//! Invariant tests for evaluation metrics.
//!
//! These tests verify that metric computation always satisfies its
//! mathematical invariants, regardless of input shape: confusion-matrix
//! conservation, zero-division policy, bounds, and determinism.

use scorecard::eval::compute_snapshot;
use scorecard::{Error, EvalOptions, Evaluator, Taxonomy};

const EPS: f64 = 1e-9;

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Confusion-matrix cells always sum to the number of scored records,
/// and each row sum equals that category's support.
#[test]
fn test_confusion_matrix_conservation() {
    let taxonomy = Taxonomy::custom(["A", "B", "C"]).unwrap();
    let cases: &[(&[&str], &[&str])] = &[
        (&["A"], &["A"]),
        (&["A", "B", "C"], &["C", "B", "A"]),
        (&["A", "A", "A", "A"], &["B", "B", "B", "B"]),
        (&["A", "B", "A", "C", "B", "C"], &["A", "A", "B", "C", "B", "A"]),
    ];

    for (predictions, actuals) in cases {
        let snapshot =
            compute_snapshot(&taxonomy, &labels(predictions), &labels(actuals), &[]).unwrap();
        let cm = &snapshot.confusion_matrix;
        assert_eq!(cm.total(), predictions.len() as u64);
        for (i, class) in snapshot.per_class.iter().enumerate() {
            assert_eq!(cm.row_total(i), class.support);
        }
    }
}

/// Precision, recall, and F1 stay in [0, 1] and never go NaN.
#[test]
fn test_metric_bounds() {
    let taxonomy = Taxonomy::custom(["A", "B", "C", "D"]).unwrap();
    let snapshot = compute_snapshot(
        &taxonomy,
        &labels(&["A", "B", "A", "D"]),
        &labels(&["A", "A", "C", "D"]),
        &[0.5, 1.0, 1.5, 2.0],
    )
    .unwrap();

    for class in &snapshot.per_class {
        assert!((0.0..=1.0).contains(&class.precision), "{:?}", class);
        assert!((0.0..=1.0).contains(&class.recall), "{:?}", class);
        assert!((0.0..=1.0).contains(&class.f1), "{:?}", class);
    }
    assert!((0.0..=1.0).contains(&snapshot.accuracy));
    assert!((0.0..=1.0).contains(&snapshot.macro_avg.f1));
    assert!((0.0..=1.0).contains(&snapshot.weighted_avg.f1));
}

/// Categories never seen in a session score 0 with support 0,
/// not NaN and not an error.
#[test]
fn test_unseen_categories_contribute_zero_rows() {
    let taxonomy = Taxonomy::custom(["Seen", "Unseen1", "Unseen2"]).unwrap();
    let snapshot = compute_snapshot(
        &taxonomy,
        &labels(&["Seen", "Seen"]),
        &labels(&["Seen", "Seen"]),
        &[],
    )
    .unwrap();

    assert_eq!(snapshot.per_class.len(), 3);
    for class in &snapshot.per_class[1..] {
        assert_eq!(class.support, 0);
        assert!((class.precision - 0.0).abs() < EPS);
        assert!((class.recall - 0.0).abs() < EPS);
        assert!((class.f1 - 0.0).abs() < EPS);
    }
    // Macro average dilutes across the full roster; weighted does not.
    assert!((snapshot.macro_avg.f1 - 1.0 / 3.0).abs() < EPS);
    assert!((snapshot.weighted_avg.f1 - 1.0).abs() < EPS);
}

/// A known five-record scenario with hand-computed expected values,
/// end to end through the evaluator.
#[test]
fn test_known_scenario_values() {
    let mut evaluator = Evaluator::new(
        Taxonomy::custom(["Finance", "Legal", "HR", "Sales", "Product", "Other"]).unwrap(),
    );
    evaluator
        .record_all([
            ("Finance", "Finance", Some(2.5)),
            ("Legal", "Legal", Some(3.1)),
            ("HR", "Finance", Some(2.8)),
            ("Sales", "Sales", Some(1.9)),
            ("Other", "Product", Some(2.2)),
        ])
        .unwrap();

    let metrics = evaluator.metrics().unwrap();
    assert_eq!(metrics.total_samples, 5);
    assert!((metrics.accuracy - 0.6).abs() < EPS);
    assert_eq!(metrics.confusion_matrix.diagonal_total(), 3);

    let analysis = evaluator.error_analysis().unwrap();
    assert_eq!(analysis.total_errors, 2);
    assert!((analysis.error_rate - 0.4).abs() < EPS);
    assert_eq!(analysis.pattern_count("Finance→HR"), 1);
    assert_eq!(analysis.pattern_count("Product→Other"), 1);

    let latency = metrics.latency.as_ref().unwrap();
    assert_eq!(latency.samples, 5);
    assert!((latency.mean - 2.5).abs() < EPS);
    assert!((latency.median - 2.5).abs() < EPS);
    assert!(latency.throughput_per_sec > 0.0);
}

/// Identical inputs always produce identical snapshots.
#[test]
fn test_snapshot_determinism() {
    let taxonomy = Taxonomy::general();
    let predictions = labels(&["Finance", "Legal", "Sales", "Other", "Finance"]);
    let actuals = labels(&["Finance", "Sales", "Sales", "Product", "HR"]);
    let latencies = [0.2, 0.4, 0.6, 0.8, 1.0];

    let first = compute_snapshot(&taxonomy, &predictions, &actuals, &latencies).unwrap();
    let second = compute_snapshot(&taxonomy, &predictions, &actuals, &latencies).unwrap();
    assert_eq!(first, second);
}

/// Empty input is an error, not a zero-valued snapshot.
#[test]
fn test_empty_input_is_an_error() {
    let taxonomy = Taxonomy::general();
    assert!(matches!(
        compute_snapshot(&taxonomy, &[], &[], &[]),
        Err(Error::EmptyInput)
    ));
}

/// Mismatched sequence lengths are surfaced, never truncated.
#[test]
fn test_length_mismatch_is_an_error() {
    let taxonomy = Taxonomy::general();
    let err = compute_snapshot(
        &taxonomy,
        &labels(&["Finance", "Legal"]),
        &labels(&["Finance"]),
        &[],
    )
    .unwrap_err();
    match err {
        Error::LengthMismatch { predicted, actual } => {
            assert_eq!(predicted, 2);
            assert_eq!(actual, 1);
        }
        other => panic!("expected LengthMismatch, got {:?}", other),
    }
}

/// A single-category roster with fully correct predictions scores 1.0
/// across the board.
#[test]
fn test_single_category_perfect_run() {
    let taxonomy = Taxonomy::custom(["Only"]).unwrap();
    let sequence = labels(&["Only", "Only", "Only", "Only"]);
    let snapshot = compute_snapshot(&taxonomy, &sequence, &sequence, &[]).unwrap();

    assert!((snapshot.accuracy - 1.0).abs() < EPS);
    assert!((snapshot.macro_avg.precision - 1.0).abs() < EPS);
    assert!((snapshot.macro_avg.f1 - 1.0).abs() < EPS);
    assert!((snapshot.weighted_avg.f1 - 1.0).abs() < EPS);
}

/// The lenient Other-fallback changes scoring only for off-roster labels.
#[test]
fn test_lenient_fallback_scores_through_other() {
    let taxonomy = Taxonomy::custom(["Finance", "Other"]).unwrap();
    let mut evaluator = Evaluator::with_options(taxonomy, EvalOptions::lenient()).unwrap();
    evaluator.record("Finance", "Finance", None).unwrap();
    evaluator.record("Procurement", "Other", None).unwrap();

    let metrics = evaluator.metrics().unwrap();
    // The off-roster prediction resolved to Other and matched.
    assert!((metrics.accuracy - 1.0).abs() < EPS);
    assert_eq!(metrics.confusion_matrix.count("Other", "Other"), 1);
}
