use std::time::Duration;

use hdrhistogram::Histogram;

use crate::error::{AppError, AppResult, ReportError};

const SIGNIFICANT_DIGITS: u8 = 3;

/// Latency distribution recorded in microseconds.
#[derive(Debug)]
pub(super) struct LatencyHistogram {
    hist: Histogram<u64>,
}

impl LatencyHistogram {
    pub(super) fn new() -> AppResult<Self> {
        let hist = Histogram::<u64>::new(SIGNIFICANT_DIGITS).map_err(|err| {
            AppError::report(ReportError::Histogram {
                context: "create",
                message: err.to_string(),
            })
        })?;
        Ok(Self { hist })
    }

    pub(super) fn record(&mut self, latency: Duration) -> AppResult<()> {
        let micros = u64::try_from(latency.as_micros()).unwrap_or(u64::MAX).max(1);
        self.hist.record(micros).map_err(|err| {
            AppError::report(ReportError::Histogram {
                context: "record",
                message: err.to_string(),
            })
        })
    }

    /// Latency at `quantile` (0.0 to 1.0). Zero when nothing was recorded.
    pub(super) fn quantile(&self, quantile: f64) -> Duration {
        if self.hist.is_empty() {
            return Duration::ZERO;
        }
        Duration::from_micros(self.hist.value_at_quantile(quantile))
    }
}
