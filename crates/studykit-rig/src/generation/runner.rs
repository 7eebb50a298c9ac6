//! Sequential, paced execution of per-chunk calls.

use std::future::Future;
use std::time::Duration;

use studykit_core::chunking::TextChunk;
use tokio_util::sync::CancellationToken;

use super::config::FailurePolicy;
use super::outcome::{BatchReport, ChunkOutcome};
use crate::{Error, Result, TRACING_TARGET_GENERATION};

/// How long to wait between consecutive calls.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Start the next call as soon as the previous one finishes.
    #[default]
    Immediate,
    /// Sleep for a fixed duration between calls.
    FixedDelay(Duration),
}

impl Pacing {
    /// Waits out the pacing interval, returning early if `cancel` fires.
    pub async fn wait(&self, cancel: &CancellationToken) -> Result<()> {
        match *self {
            Self::Immediate => Ok(()),
            Self::FixedDelay(delay) => tokio::select! {
                biased;
                () = cancel.cancelled() => Err(Error::Cancelled),
                () = tokio::time::sleep(delay) => Ok(()),
            },
        }
    }
}

/// A chunk together with the work requested from it.
#[derive(Debug, Clone)]
pub struct ChunkJob<Q> {
    /// The chunk to generate from.
    pub chunk: TextChunk,
    /// What to ask for, e.g. a number of flashcards.
    pub quota: Q,
}

impl<Q> ChunkJob<Q> {
    /// Creates a job.
    pub fn new(chunk: TextChunk, quota: Q) -> Self {
        Self { chunk, quota }
    }
}

/// Runs one call per job, strictly one after another.
///
/// Call *i* starts only after call *i - 1* and the pacing interval have both
/// completed. No interval is waited after the last call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialRunner {
    pacing: Pacing,
    policy: FailurePolicy,
}

impl SequentialRunner {
    /// Creates a runner.
    pub fn new(pacing: Pacing, policy: FailurePolicy) -> Self {
        Self { pacing, policy }
    }

    /// Returns the pacing strategy.
    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Returns the failure policy.
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Runs `task` for every job in order.
    ///
    /// Cancellation is checked before each call and raced against both the
    /// pacing interval and the call itself; it ends the run with
    /// [`Error::Cancelled`]. Under [`FailurePolicy::Abort`] the run stops
    /// after the first failed call.
    pub async fn run<Q, T, F, Fut>(
        &self,
        jobs: Vec<ChunkJob<Q>>,
        cancel: &CancellationToken,
        mut task: F,
    ) -> Result<BatchReport<T>>
    where
        F: FnMut(ChunkJob<Q>) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let total = jobs.len();
        let mut report = BatchReport::with_capacity(total);

        for (position, job) in jobs.into_iter().enumerate() {
            if position > 0 {
                self.pacing.wait(cancel).await?;
            }

            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }

            let chunk_index = job.chunk.index;
            tracing::debug!(
                target: TRACING_TARGET_GENERATION,
                chunk_index,
                position,
                total,
                "Starting chunk call"
            );

            let result = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(Error::Cancelled),
                result = task(job) => result,
            };

            let result = match result {
                Err(Error::Cancelled) => return Err(Error::Cancelled),
                other => other.map_err(|e| e.at_chunk(chunk_index)),
            };

            let failed = result.is_err();
            report.push(ChunkOutcome {
                chunk_index,
                result,
            });

            if failed && self.policy == FailurePolicy::Abort {
                tracing::warn!(
                    target: TRACING_TARGET_GENERATION,
                    chunk_index,
                    "Aborting run after failed chunk"
                );
                report.mark_aborted();
                break;
            }
        }

        Ok(report)
    }
}
