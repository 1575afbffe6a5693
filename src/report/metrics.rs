use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::AppResult;
use crate::results::{HitResult, Results};

use super::histogram::LatencyHistogram;

/// Success ratio scale: `10_000` is 100.00%.
pub const RATIO_SCALE: u64 = 10_000;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LatencyMetrics {
    #[serde(with = "crate::results::nanos")]
    pub mean: Duration,
    #[serde(with = "crate::results::nanos")]
    pub p50: Duration,
    #[serde(with = "crate::results::nanos")]
    pub p95: Duration,
    #[serde(with = "crate::results::nanos")]
    pub p99: Duration,
    #[serde(with = "crate::results::nanos")]
    pub max: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ByteMetrics {
    pub total: u64,
    /// Mean bytes per request, times 100.
    pub mean_x100: u64,
}

/// Aggregate view of a result collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub requests: u64,
    /// Share of successful requests in units of 1/100 percent.
    pub success_ratio_x100: u64,
    pub earliest: Option<DateTime<Utc>>,
    pub latest: Option<DateTime<Utc>>,
    /// Time between the first and the last issued request.
    #[serde(with = "crate::results::nanos")]
    pub duration: Duration,
    /// Latency of the last issued request.
    #[serde(with = "crate::results::nanos")]
    pub wait: Duration,
    pub latencies: LatencyMetrics,
    pub bytes_in: ByteMetrics,
    pub bytes_out: ByteMetrics,
    pub status_codes: BTreeMap<u16, u64>,
    pub errors: Vec<String>,
}

impl Metrics {
    /// Computes metrics over `results` regardless of their order.
    ///
    /// # Errors
    ///
    /// Returns an error when a latency cannot be recorded in the histogram.
    pub fn compute(results: &Results) -> AppResult<Self> {
        let mut histogram = LatencyHistogram::new()?;
        let mut metrics = Self::default();
        let mut successes: u64 = 0;
        let mut latency_total: u128 = 0;
        let mut last: Option<&HitResult> = None;
        let mut errors: BTreeSet<&str> = BTreeSet::new();

        for result in results {
            metrics.requests = metrics.requests.saturating_add(1);
            if result.is_success() {
                successes = successes.saturating_add(1);
            }
            histogram.record(result.latency)?;
            latency_total = latency_total.saturating_add(result.latency.as_nanos());
            metrics.latencies.max = metrics.latencies.max.max(result.latency);
            metrics.bytes_in.total = metrics.bytes_in.total.saturating_add(result.bytes_in);
            metrics.bytes_out.total = metrics.bytes_out.total.saturating_add(result.bytes_out);

            let count = metrics.status_codes.entry(result.code).or_insert(0);
            *count = count.saturating_add(1);
            if !result.error.is_empty() {
                errors.insert(result.error.as_str());
            }

            if let Some(timestamp) = result.timestamp {
                if metrics.earliest.is_none_or(|earliest| timestamp < earliest) {
                    metrics.earliest = Some(timestamp);
                }
                if metrics.latest.is_none_or(|latest| timestamp >= latest) {
                    metrics.latest = Some(timestamp);
                    last = Some(result);
                }
            }
        }

        metrics.errors = errors.into_iter().map(str::to_owned).collect();

        if let (Some(earliest), Some(latest)) = (metrics.earliest, metrics.latest) {
            metrics.duration = latest
                .signed_duration_since(earliest)
                .to_std()
                .unwrap_or_default();
        }
        metrics.wait = last.map(|result| result.latency).unwrap_or_default();

        metrics.success_ratio_x100 = scaled_ratio(successes, metrics.requests, RATIO_SCALE);
        metrics.bytes_in.mean_x100 = scaled_ratio(metrics.bytes_in.total, metrics.requests, 100);
        metrics.bytes_out.mean_x100 = scaled_ratio(metrics.bytes_out.total, metrics.requests, 100);
        metrics.latencies.mean = mean_duration(latency_total, metrics.requests);
        metrics.latencies.p50 = histogram.quantile(0.5);
        metrics.latencies.p95 = histogram.quantile(0.95);
        metrics.latencies.p99 = histogram.quantile(0.99);

        Ok(metrics)
    }
}

fn scaled_ratio(part: u64, whole: u64, scale: u64) -> u64 {
    let scaled = u128::from(part)
        .saturating_mul(u128::from(scale))
        .checked_div(u128::from(whole))
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

fn mean_duration(total_nanos: u128, count: u64) -> Duration {
    let mean = total_nanos.checked_div(u128::from(count)).unwrap_or(0);
    Duration::from_nanos(u64::try_from(mean).unwrap_or(u64::MAX))
}
