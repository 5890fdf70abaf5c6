//! Batch scheduler for street lookups.
//!
//! Lookups run in fixed-width groups. Members of a group are queried
//! concurrently; a group starts only once every member of the previous
//! group has finished, successfully or not. Peak concurrency is therefore
//! the group width.

use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::blocks::BlockCandidate;
use crate::oracle::{OracleError, StreetOracle};

use super::config::FailSafe;
use super::progress::ProgressSink;

/// Progress reported before the first batch starts.
pub(crate) const BATCH_PROGRESS_START: f64 = 20.0;

/// Progress span covered by the batches.
pub(crate) const BATCH_PROGRESS_SPAN: f64 = 70.0;

/// Outcome of one street lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The oracle answered.
    Answered(bool),
    /// The oracle failed; the fail-safe answer was substituted.
    FailedOver(bool),
}

impl Lookup {
    /// The street-presence answer to decide on.
    pub fn has_streets(self) -> bool {
        match self {
            Lookup::Answered(v) | Lookup::FailedOver(v) => v,
        }
    }

    /// The oracle's own answer, `None` after a failure.
    pub fn answer(self) -> Option<bool> {
        match self {
            Lookup::Answered(v) => Some(v),
            Lookup::FailedOver(_) => None,
        }
    }
}

/// Runs street lookups for cache-missed candidates.
pub struct BatchScheduler<'a, O: StreetOracle> {
    oracle: &'a O,
    batch_size: usize,
    on_failure: FailSafe,
    call_timeout: Option<Duration>,
}

impl<'a, O: StreetOracle> BatchScheduler<'a, O> {
    /// Creates a scheduler. A zero batch size is treated as 1.
    pub fn new(
        oracle: &'a O,
        batch_size: usize,
        on_failure: FailSafe,
        call_timeout: Option<Duration>,
    ) -> Self {
        Self {
            oracle,
            batch_size: batch_size.max(1),
            on_failure,
            call_timeout,
        }
    }

    /// Number of batches `count` candidates split into.
    pub fn batch_count(&self, count: usize) -> usize {
        count.div_ceil(self.batch_size)
    }

    /// Looks up every candidate, returning one [`Lookup`] per candidate in
    /// input order.
    ///
    /// Never fails: a failed or timed-out call resolves to the fail-safe
    /// answer and does not affect its siblings. After each batch a status
    /// message `Checking streets: batch i/k (n blocks)` is reported.
    pub async fn run(
        &self,
        candidates: &[BlockCandidate],
        progress: &dyn ProgressSink,
    ) -> Vec<Lookup> {
        let total = self.batch_count(candidates.len());
        let mut lookups = Vec::with_capacity(candidates.len());

        for (index, batch) in candidates.chunks(self.batch_size).enumerate() {
            let results = join_all(batch.iter().map(|c| self.lookup(c))).await;
            lookups.extend(results);

            let done = index + 1;
            let percent = BATCH_PROGRESS_START + BATCH_PROGRESS_SPAN * done as f64 / total as f64;
            progress.report(
                &format!(
                    "Checking streets: batch {}/{} ({} blocks)",
                    done,
                    total,
                    batch.len()
                ),
                percent,
            );
            debug!(batch = done, total, size = batch.len(), "Street batch complete");
        }

        lookups
    }

    async fn lookup(&self, candidate: &BlockCandidate) -> Lookup {
        match self.call_oracle(candidate).await {
            Ok(has_streets) => Lookup::Answered(has_streets),
            Err(e) => {
                let fallback = self.on_failure.has_streets();
                warn!(
                    key = %candidate.key,
                    error = %e,
                    fallback,
                    "Street lookup failed, using fail-safe answer"
                );
                Lookup::FailedOver(fallback)
            }
        }
    }

    async fn call_oracle(&self, candidate: &BlockCandidate) -> Result<bool, OracleError> {
        let call = self.oracle.has_streets(&candidate.bbox);
        match self.call_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| OracleError::TimedOut(limit))?,
            None => call.await,
        }
    }
}
