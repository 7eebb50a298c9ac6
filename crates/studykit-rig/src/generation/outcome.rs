//! Per-chunk results collected by the runner.

use super::config::FailurePolicy;
use crate::{Result, TRACING_TARGET_GENERATION};

/// Result of one chunk's generation call.
#[derive(Debug)]
pub struct ChunkOutcome<T> {
    /// Index of the chunk the call was made for.
    pub chunk_index: usize,
    /// What the call returned.
    pub result: Result<T>,
}

/// Ordered outcomes of a sequential run.
#[derive(Debug)]
pub struct BatchReport<T> {
    outcomes: Vec<ChunkOutcome<T>>,
    aborted: bool,
}

impl<T> Default for BatchReport<T> {
    fn default() -> Self {
        Self {
            outcomes: Vec::new(),
            aborted: false,
        }
    }
}

impl<T> BatchReport<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            outcomes: Vec::with_capacity(capacity),
            aborted: false,
        }
    }

    pub(crate) fn push(&mut self, outcome: ChunkOutcome<T>) {
        self.outcomes.push(outcome);
    }

    pub(crate) fn mark_aborted(&mut self) {
        self.aborted = true;
    }

    /// Outcomes in the order the calls were made.
    pub fn outcomes(&self) -> &[ChunkOutcome<T>] {
        &self.outcomes
    }

    /// Number of calls that were made.
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of calls that failed.
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }

    /// Returns true if the run stopped early on a failure.
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Collapses the outcomes into successful values according to `policy`.
    ///
    /// With [`FailurePolicy::Abort`] the first failure is returned. With
    /// [`FailurePolicy::Isolate`] failures are logged and skipped; the first
    /// failure is only returned when no call succeeded.
    pub fn into_values(self, policy: FailurePolicy) -> Result<Vec<T>> {
        match policy {
            FailurePolicy::Abort => self.outcomes.into_iter().map(|o| o.result).collect(),
            FailurePolicy::Isolate => {
                let mut values = Vec::with_capacity(self.outcomes.len());
                let mut first_error = None;

                for outcome in self.outcomes {
                    match outcome.result {
                        Ok(value) => values.push(value),
                        Err(error) => {
                            tracing::warn!(
                                target: TRACING_TARGET_GENERATION,
                                chunk_index = outcome.chunk_index,
                                error = %error,
                                "Skipping failed chunk"
                            );
                            first_error.get_or_insert(error);
                        }
                    }
                }

                match first_error {
                    Some(error) if values.is_empty() => Err(error),
                    _ => Ok(values),
                }
            }
        }
    }
}
