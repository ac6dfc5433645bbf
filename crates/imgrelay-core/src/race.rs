//! The first-success race.
//!
//! One fetch task per candidate, all in flight at once. The first task to
//! report success wins the race; every other task is told to cancel and the
//! winning payload is handed through untouched. The race concludes not-found
//! only once every task has reported, or when the overall deadline elapses.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::domain::{Candidate, RaceResult};
use crate::ports::{FetchOutcome, ImageFetcher};

/// Runs the candidate race for one request at a time.
///
/// Holds no per-request state; a single coordinator is shared across all
/// requests and each `race` call owns its own task set and cancel token.
#[derive(Debug, Clone)]
pub struct RaceCoordinator<F> {
    fetcher: Arc<F>,
    deadline: Duration,
}

impl<F: ImageFetcher + 'static> RaceCoordinator<F> {
    /// Create a coordinator with an overall race deadline.
    ///
    /// The deadline bounds the whole race and should be at least the
    /// fetcher's per-fetch timeout, since it is the per-fetch timeout that
    /// normally terminates stuck candidates.
    #[must_use]
    pub fn new(fetcher: Arc<F>, deadline: Duration) -> Self {
        Self { fetcher, deadline }
    }

    /// Race all candidates, first success wins.
    ///
    /// Exit paths:
    /// - a task reports `Success`: the remaining tasks are cancelled
    ///   (fire-and-forget) and the winning payload is returned;
    /// - every task has reported without a success: `NotFound`;
    /// - the deadline elapses first: remaining tasks are cancelled and
    ///   `NotFound` is returned.
    ///
    /// The task set aborts whatever is still running when it is dropped, so
    /// no exit path leaks in-flight fetches or their buffers.
    pub async fn race(&self, candidates: Vec<Candidate>) -> RaceResult {
        if candidates.is_empty() {
            return RaceResult::NotFound;
        }

        let total = candidates.len();
        let cancel = CancellationToken::new();
        let mut tasks = JoinSet::new();

        for candidate in candidates {
            let fetcher = Arc::clone(&self.fetcher);
            let token = cancel.child_token();
            tasks.spawn(async move {
                tokio::select! {
                    () = token.cancelled() => FetchOutcome::Cancelled,
                    outcome = fetcher.fetch(&candidate) => outcome,
                }
            });
        }

        let deadline = tokio::time::sleep(self.deadline);
        tokio::pin!(deadline);
        let mut failed = 0_usize;

        loop {
            tokio::select! {
                () = &mut deadline => {
                    tracing::warn!(total, failed, "race deadline elapsed with no success");
                    cancel.cancel();
                    tasks.abort_all();
                    return RaceResult::NotFound;
                }
                joined = tasks.join_next() => match joined {
                    None => {
                        tracing::debug!(total, "all candidates failed");
                        return RaceResult::NotFound;
                    }
                    Some(Ok(FetchOutcome::Success { bytes, format })) => {
                        cancel.cancel();
                        tasks.abort_all();
                        tracing::debug!(%format, size = bytes.len(), "candidate won the race");
                        return RaceResult::Found { bytes, format };
                    }
                    Some(Ok(FetchOutcome::Failure(error))) => {
                        failed += 1;
                        tracing::debug!(%error, "candidate failed");
                    }
                    Some(Ok(FetchOutcome::Cancelled)) => {}
                    Some(Err(join_error)) => {
                        // A panicked fetch task counts as a failed candidate.
                        failed += 1;
                        tracing::warn!(%join_error, "fetch task did not complete");
                    }
                }
            }
        }
    }
}
