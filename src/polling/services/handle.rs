//! Cancellable handle for a spawned polling loop.

use std::future::Future;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Error returned when a spawned loop did not run to completion.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PollJoinError {
    /// The spawned task panicked or was aborted by the runtime.
    #[error("polling task did not complete: {0}")]
    Aborted(String),
}

/// Owns a spawned loop and its cancellation token.
///
/// The owner must call [`PollHandle::cancel`] on teardown; dropping the
/// handle cancels as well, so a loop can never outlive its owner.
#[derive(Debug)]
pub struct PollHandle<R> {
    cancellation: CancellationToken,
    join: Option<JoinHandle<R>>,
}

impl<R> PollHandle<R>
where
    R: Send + 'static,
{
    /// Spawns `run` with a fresh cancellation token.
    pub fn spawn<F, Fut>(run: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = R> + Send + 'static,
    {
        let cancellation = CancellationToken::new();
        let join = tokio::spawn(run(cancellation.clone()));
        Self {
            cancellation,
            join: Some(join),
        }
    }
}

impl<R> PollHandle<R> {
    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Returns `true` once cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Waits for the loop to finish and returns its result.
    ///
    /// # Errors
    ///
    /// Returns [`PollJoinError::Aborted`] when the spawned task panicked.
    pub async fn join(mut self) -> Result<R, PollJoinError> {
        let join = self
            .join
            .take()
            .ok_or_else(|| PollJoinError::Aborted("handle already joined".to_owned()))?;
        join.await
            .map_err(|err| PollJoinError::Aborted(err.to_string()))
    }
}

impl<R> Drop for PollHandle<R> {
    fn drop(&mut self) {
        self.cancellation.cancel();
    }
}
