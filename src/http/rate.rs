use std::num::NonZeroU64;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, interval_at};
use tracing::debug;

use crate::error::{AppError, AppResult, HttpError};
use crate::results::Results;
use crate::targets::Targets;

use super::Attacker;

const NANOS_PER_SEC: u128 = 1_000_000_000;

impl Attacker {
    /// Fires `rate` requests per second for `duration`, one task per hit.
    ///
    /// Targets are used round-robin in list order. The returned results are
    /// sorted by timestamp and hold exactly [`rate_hits`] entries.
    ///
    /// # Errors
    ///
    /// Returns an error when `targets` is empty.
    pub async fn attack_rate(
        &self,
        targets: Arc<Targets>,
        rate: NonZeroU64,
        duration: Duration,
    ) -> AppResult<Results> {
        if targets.is_empty() {
            return Err(AppError::http(HttpError::TargetsEmpty));
        }

        let hits = rate_hits(rate, duration);
        let period = tick_period(rate);
        debug!(
            "Attacking {} targets at {} req/s for {:?} ({} hits)",
            targets.len(),
            rate,
            duration,
            hits
        );

        let (result_tx, mut result_rx) = mpsc::unbounded_channel();
        let start = Instant::now().checked_add(period).unwrap_or_else(Instant::now);
        let mut ticker = interval_at(start, period);

        for index in 0..hits {
            ticker.tick().await;
            let permit = match self.in_flight.as_ref() {
                Some(limit) => limit.clone().acquire_owned().await.ok(),
                None => None,
            };
            let attacker = self.clone();
            let targets = Arc::clone(&targets);
            let result_tx = result_tx.clone();
            tokio::spawn(async move {
                let result = attacker.hit_nth(&targets, index).await;
                drop(permit);
                if result_tx.send(result).is_err() {
                    debug!("Result receiver closed before hit {} finished", index);
                }
            });
        }
        drop(result_tx);

        let mut results = Results::with_capacity(usize::try_from(hits).unwrap_or(0));
        while let Some(result) = result_rx.recv().await {
            results.push(result);
        }
        results.sort();
        Ok(results)
    }
}

/// Number of hits a rate run schedules: `floor(rate * duration)`.
#[must_use]
pub fn rate_hits(rate: NonZeroU64, duration: Duration) -> u64 {
    let scheduled = u128::from(rate.get())
        .saturating_mul(duration.as_nanos())
        .checked_div(NANOS_PER_SEC)
        .unwrap_or(0);
    u64::try_from(scheduled).unwrap_or(u64::MAX)
}

fn tick_period(rate: NonZeroU64) -> Duration {
    let nanos = NANOS_PER_SEC
        .checked_div(u128::from(rate.get()))
        .unwrap_or(1)
        .max(1);
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}
