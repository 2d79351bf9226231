//! Misclassification analysis.
//!
//! Walks the prediction/ground-truth sequences in order, collects every
//! mismatch, and tallies `actual→predicted` patterns ranked by frequency.
//! Output is deterministic for a given input order: patterns sort by
//! descending count with ties broken by first appearance, and the sample
//! list keeps the first mismatches as they occurred.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default cap on the number of individual mismatches retained.
pub const DEFAULT_MAX_SAMPLES: usize = 20;

/// A single misclassified record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Misclassification {
    /// Position of the record in the session, 0-based.
    pub index: usize,
    /// Label the classifier produced.
    pub predicted: String,
    /// Correct label.
    pub actual: String,
    /// Processing time of the call, when it was recorded.
    pub latency_seconds: Option<f64>,
}

/// One `actual→predicted` confusion pattern with its frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPattern {
    /// Pattern key, `{actual}→{predicted}`.
    pub pattern: String,
    /// Occurrences of the pattern in the session.
    pub count: usize,
}

/// Aggregated misclassification analysis for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorAnalysis {
    /// Number of mismatched records.
    pub total_errors: usize,
    /// `total_errors / total records`; 0 when the session is empty.
    pub error_rate: f64,
    /// All patterns, sorted by descending count; ties keep first-seen order.
    pub patterns: Vec<ErrorPattern>,
    /// The first mismatches, in session order, capped by the analyzer.
    pub samples: Vec<Misclassification>,
}

impl ErrorAnalysis {
    /// Look up the count for a pattern key such as `"Finance→HR"`.
    #[must_use]
    pub fn pattern_count(&self, pattern: &str) -> usize {
        self.patterns
            .iter()
            .find(|p| p.pattern == pattern)
            .map_or(0, |p| p.count)
    }
}

/// Analyze mismatches between parallel label sequences.
///
/// `latencies[i]` is the optional processing time of record `i`; the slice
/// must be empty (no timing at all) or parallel to the label sequences.
/// `max_samples` caps the retained individual mismatches.
///
/// Unlike metric computation, empty sequences are not an error here: an
/// empty session simply has zero errors and an error rate of 0.
///
/// # Errors
///
/// [`Error::LengthMismatch`] if the sequences differ in length.
pub fn analyze(
    predictions: &[String],
    actuals: &[String],
    latencies: &[Option<f64>],
    max_samples: usize,
) -> Result<ErrorAnalysis> {
    if predictions.len() != actuals.len() {
        return Err(Error::LengthMismatch {
            predicted: predictions.len(),
            actual: actuals.len(),
        });
    }
    // An all-or-nothing latency slice keeps index alignment honest.
    if !latencies.is_empty() && latencies.len() != predictions.len() {
        return Err(Error::invalid_input(format!(
            "latency sequence has {} entries for {} records",
            latencies.len(),
            predictions.len()
        )));
    }

    let total = predictions.len();
    let mut samples = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();
    let mut total_errors = 0usize;

    for (index, (predicted, actual)) in predictions.iter().zip(actuals).enumerate() {
        if predicted == actual {
            continue;
        }
        total_errors += 1;

        let pattern = pattern_key(actual, predicted);
        match counts.get_mut(&pattern) {
            Some(count) => *count += 1,
            None => {
                counts.insert(pattern.clone(), 1);
                first_seen.push(pattern);
            }
        }

        if samples.len() < max_samples {
            samples.push(Misclassification {
                index,
                predicted: predicted.clone(),
                actual: actual.clone(),
                latency_seconds: latencies.get(index).copied().flatten(),
            });
        }
    }

    // first_seen already holds tie order; a stable sort by count finishes it.
    let mut patterns: Vec<ErrorPattern> = first_seen
        .into_iter()
        .map(|pattern| {
            let count = counts[&pattern];
            ErrorPattern { pattern, count }
        })
        .collect();
    patterns.sort_by(|a, b| b.count.cmp(&a.count));

    let error_rate = if total == 0 {
        0.0
    } else {
        total_errors as f64 / total as f64
    };

    Ok(ErrorAnalysis {
        total_errors,
        error_rate,
        patterns,
        samples,
    })
}

/// Pattern key for an (actual, predicted) confusion.
#[must_use]
pub fn pattern_key(actual: &str, predicted: &str) -> String {
    format!("{}→{}", actual, predicted)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn spec_scenario_patterns_and_rate() {
        let predictions = labels(&["Finance", "Legal", "HR", "Sales", "Other"]);
        let actuals = labels(&["Finance", "Legal", "Finance", "Sales", "Product"]);
        let analysis = analyze(&predictions, &actuals, &[], DEFAULT_MAX_SAMPLES).unwrap();

        assert_eq!(analysis.total_errors, 2);
        assert!((analysis.error_rate - 0.4).abs() < EPS);
        assert_eq!(analysis.pattern_count("Finance→HR"), 1);
        assert_eq!(analysis.pattern_count("Product→Other"), 1);
        assert_eq!(analysis.patterns.len(), 2);
    }

    #[test]
    fn patterns_rank_by_count_then_first_seen() {
        let predictions = labels(&["B", "C", "B", "C", "C"]);
        let actuals = labels(&["A", "A", "A", "A", "A"]);
        let analysis = analyze(&predictions, &actuals, &[], DEFAULT_MAX_SAMPLES).unwrap();

        assert_eq!(analysis.patterns[0].pattern, "A→C");
        assert_eq!(analysis.patterns[0].count, 3);
        assert_eq!(analysis.patterns[1].pattern, "A→B");
        assert_eq!(analysis.patterns[1].count, 2);

        // Equal counts preserve first-seen order.
        let predictions = labels(&["X", "Y", "X", "Y"]);
        let actuals = labels(&["A", "A", "A", "A"]);
        let analysis = analyze(&predictions, &actuals, &[], DEFAULT_MAX_SAMPLES).unwrap();
        assert_eq!(analysis.patterns[0].pattern, "A→X");
        assert_eq!(analysis.patterns[1].pattern, "A→Y");
    }

    #[test]
    fn samples_are_capped_and_in_order() {
        let predictions: Vec<String> = (0..30).map(|_| "Wrong".to_string()).collect();
        let actuals: Vec<String> = (0..30).map(|_| "Right".to_string()).collect();
        let analysis = analyze(&predictions, &actuals, &[], DEFAULT_MAX_SAMPLES).unwrap();

        assert_eq!(analysis.total_errors, 30);
        assert_eq!(analysis.samples.len(), DEFAULT_MAX_SAMPLES);
        assert_eq!(analysis.samples[0].index, 0);
        assert_eq!(analysis.samples[19].index, 19);
    }

    #[test]
    fn samples_carry_latency_when_recorded() {
        let predictions = labels(&["B", "B"]);
        let actuals = labels(&["A", "A"]);
        let latencies = vec![Some(1.25), None];
        let analysis = analyze(&predictions, &actuals, &latencies, DEFAULT_MAX_SAMPLES).unwrap();

        assert_eq!(analysis.samples[0].latency_seconds, Some(1.25));
        assert_eq!(analysis.samples[1].latency_seconds, None);
    }

    #[test]
    fn empty_session_has_zero_rate() {
        let analysis = analyze(&[], &[], &[], DEFAULT_MAX_SAMPLES).unwrap();
        assert_eq!(analysis.total_errors, 0);
        assert!((analysis.error_rate - 0.0).abs() < EPS);
        assert!(analysis.patterns.is_empty());
    }

    #[test]
    fn mismatched_lengths_are_an_error() {
        let err = analyze(&labels(&["A"]), &labels(&["A", "B"]), &[], 20).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { .. }));
    }

    #[test]
    fn misaligned_latency_slice_is_rejected() {
        let err = analyze(
            &labels(&["A", "B"]),
            &labels(&["A", "A"]),
            &[Some(0.1)],
            20,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
