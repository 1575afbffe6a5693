use std::num::NonZeroU64;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::mpsc;
use tracing::debug;

use crate::error::{AppError, AppResult, HttpError};
use crate::results::{HitResult, Results};
use crate::targets::Targets;

use super::Attacker;

/// Units of work left in one concurrency run.
#[derive(Debug)]
pub(crate) struct Countdown(AtomicI64);

impl Countdown {
    pub(crate) fn new(total: u64) -> Self {
        Self(AtomicI64::new(i64::try_from(total).unwrap_or(i64::MAX)))
    }

    /// Claims one unit, returning the value held before the claim.
    /// `None` once the countdown is exhausted.
    pub(crate) fn claim(&self) -> Option<u64> {
        let claimed = self.0.fetch_sub(1, Ordering::AcqRel);
        if claimed <= 0 {
            return None;
        }
        u64::try_from(claimed).ok()
    }
}

impl Attacker {
    /// Runs `total` requests spread over `concurrency` persistent workers.
    ///
    /// The worker count is capped at `total`; `total == 0` returns an empty
    /// collection. Results are sorted by timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error when `targets` is empty.
    pub async fn attack_concurrency(
        &self,
        targets: Arc<Targets>,
        concurrency: NonZeroU64,
        total: u64,
    ) -> AppResult<Results> {
        if targets.is_empty() {
            return Err(AppError::http(HttpError::TargetsEmpty));
        }
        if total == 0 {
            return Ok(Results::new());
        }

        let batches = self.run_workers(targets, concurrency, total).await;
        let mut results = Results::with_capacity(usize::try_from(total).unwrap_or(0));
        for batch in batches {
            results.extend(batch);
        }
        results.sort();
        Ok(results)
    }

    /// Spawns the workers and returns one batch per worker.
    pub(super) async fn run_workers(
        &self,
        targets: Arc<Targets>,
        concurrency: NonZeroU64,
        total: u64,
    ) -> Vec<Vec<HitResult>> {
        let workers = concurrency.get().min(total);
        debug!(
            "Attacking {} targets with {} workers ({} requests)",
            targets.len(),
            workers,
            total
        );

        let countdown = Arc::new(Countdown::new(total));
        let (batch_tx, mut batch_rx) = mpsc::unbounded_channel();
        for worker in 0..workers {
            let attacker = self.clone();
            let targets = Arc::clone(&targets);
            let countdown = Arc::clone(&countdown);
            let batch_tx = batch_tx.clone();
            tokio::spawn(async move {
                let mut batch = Vec::new();
                while let Some(claimed) = countdown.claim() {
                    batch.push(attacker.hit_nth(&targets, claimed).await);
                }
                debug!("Worker {} finished {} requests", worker, batch.len());
                if batch_tx.send(batch).is_err() {
                    debug!("Batch receiver closed before worker {} finished", worker);
                }
            });
        }
        drop(batch_tx);

        let mut batches = Vec::with_capacity(usize::try_from(workers).unwrap_or(0));
        while let Some(batch) = batch_rx.recv().await {
            batches.push(batch);
        }
        batches
    }
}
