//! Latency statistics over successful fetches

use crate::{
    error::{AppError, Result},
    models::FetchResult,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Percentiles reported in the summary block
pub const MEDIAN: f64 = 0.5;
pub const P90: f64 = 0.9;

/// Linearly interpolated percentile of `values` for fraction `n` in [0, 1].
///
/// The input does not need to be sorted. A single value is returned as is
/// for every `n`.
pub fn percentile(values: &[f64], n: f64) -> Result<f64> {
    if values.is_empty() {
        return Err(AppError::statistics("Cannot compute a percentile of an empty sample"));
    }
    if !(0.0..=1.0).contains(&n) {
        return Err(AppError::statistics(format!("Percentile fraction must be within [0, 1], got {}", n)));
    }
    if values.len() == 1 {
        return Ok(values[0]);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Ok(interpolate_sorted(&sorted, n))
}

/// Percentile over an already sorted, non-empty slice
fn interpolate_sorted(sorted: &[f64], n: f64) -> f64 {
    let index = n * (sorted.len() - 1) as f64;
    let i = index.floor() as usize;
    let w = index - i as f64;

    match sorted.get(i + 1) {
        Some(next) => sorted[i] + w * (next - sorted[i]),
        None => sorted[i],
    }
}

/// Aggregate response times of the successful requests
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencyStats {
    pub average: f64,
    pub median: f64,
    pub p90: f64,
}

impl LatencyStats {
    /// Compute from elapsed seconds. `None` for an empty sample.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        Some(Self {
            average: sorted.iter().sum::<f64>() / sorted.len() as f64,
            median: interpolate_sorted(&sorted, MEDIAN),
            p90: interpolate_sorted(&sorted, P90),
        })
    }
}

/// Everything reported after the per-request lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Wall-clock time of the whole batch in seconds
    pub total_time: f64,
    /// Absent when no request succeeded
    pub latency: Option<LatencyStats>,
    /// Requests that produced a response
    pub processed: usize,
    /// Requests dispatched
    pub total: usize,
}

impl Summary {
    pub fn from_results(results: &[FetchResult], total_time: Duration) -> Self {
        let samples: Vec<f64> = results.iter().filter_map(FetchResult::elapsed_secs).collect();

        Self {
            total_time: total_time.as_secs_f64(),
            latency: LatencyStats::from_samples(&samples),
            processed: samples.len(),
            total: results.len(),
        }
    }

    /// Share of requests that succeeded, in percent
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.processed as f64 / self.total as f64 * 100.0
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.processed == self.total
    }
}
