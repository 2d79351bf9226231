//! Latency statistics over per-call processing times.
//!
//! Summarizes a sequence of non-negative durations (seconds) into the
//! standard profile: mean, median, population standard deviation, min/max,
//! p95/p99 with linear interpolation, and throughput. Division never
//! escapes as NaN: throughput resolves to 0 when the mean is 0.

use serde::{Deserialize, Serialize};

/// Summary statistics for a sequence of per-call latencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyStats {
    /// Number of samples observed.
    pub samples: usize,
    /// Arithmetic mean, seconds.
    pub mean: f64,
    /// Median (p50, linear interpolation), seconds.
    pub median: f64,
    /// Population standard deviation, seconds.
    pub std_dev: f64,
    /// Fastest observed call, seconds.
    pub min: f64,
    /// Slowest observed call, seconds.
    pub max: f64,
    /// 95th percentile (linear interpolation), seconds.
    pub p95: f64,
    /// 99th percentile (linear interpolation), seconds.
    pub p99: f64,
    /// Calls per second, `1 / mean`; 0 when the mean is 0.
    pub throughput_per_sec: f64,
}

impl LatencyStats {
    /// Compute statistics from latencies in seconds.
    ///
    /// Returns `None` for an empty sequence: with no samples there is no
    /// profile to report.
    #[must_use]
    pub fn from_seconds(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let throughput_per_sec = if mean > 0.0 { 1.0 / mean } else { 0.0 };

        Some(Self {
            samples: samples.len(),
            mean,
            median: percentile(&sorted, 50.0),
            std_dev: variance.sqrt(),
            min,
            max,
            p95: percentile(&sorted, 95.0),
            p99: percentile(&sorted, 99.0),
            throughput_per_sec,
        })
    }
}

/// Percentile of a sorted sample via linear interpolation.
///
/// The rank is `(n - 1) * p / 100`; fractional ranks interpolate between
/// the two neighboring order statistics.
#[must_use]
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = (sorted.len() - 1) as f64 * p / 100.0;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let fraction = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn empty_input_has_no_profile() {
        assert!(LatencyStats::from_seconds(&[]).is_none());
    }

    #[test]
    fn single_sample() {
        let stats = LatencyStats::from_seconds(&[2.0]).unwrap();
        assert!((stats.mean - 2.0).abs() < EPS);
        assert!((stats.median - 2.0).abs() < EPS);
        assert!((stats.std_dev - 0.0).abs() < EPS);
        assert!((stats.p95 - 2.0).abs() < EPS);
        assert!((stats.p99 - 2.0).abs() < EPS);
        assert!((stats.throughput_per_sec - 0.5).abs() < EPS);
    }

    #[test]
    fn median_interpolates_for_even_counts() {
        let stats = LatencyStats::from_seconds(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((stats.median - 2.5).abs() < EPS);
    }

    #[test]
    fn percentile_matches_linear_interpolation() {
        // rank for p95 over 5 samples is 3.8 -> 4.0 + 0.8 * (5.0 - 4.0)
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((percentile(&sorted, 95.0) - 4.8).abs() < EPS);
        assert!((percentile(&sorted, 99.0) - 4.96).abs() < EPS);
        assert!((percentile(&sorted, 0.0) - 1.0).abs() < EPS);
        assert!((percentile(&sorted, 100.0) - 5.0).abs() < EPS);
    }

    #[test]
    fn population_std_dev() {
        let stats = LatencyStats::from_seconds(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((stats.std_dev - 2.0).abs() < EPS);
    }

    #[test]
    fn zero_mean_yields_zero_throughput() {
        let stats = LatencyStats::from_seconds(&[0.0, 0.0]).unwrap();
        assert!((stats.throughput_per_sec - 0.0).abs() < EPS);
    }
}
