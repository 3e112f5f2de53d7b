//! Bounded task polling loop.

use super::PollHandle;
use crate::api::ApiResult;
use crate::polling::{
    domain::{
        PollOutcome, PollPolicy, PollReport, PollTick, TaskId, TaskStatus, TransportErrorPolicy,
    },
    ports::{PollTimer, TaskStatusSource},
};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Polls a remote task until it is terminal or the policy's budget runs out.
///
/// Reads are strictly sequential: each status request is awaited before the
/// next wait starts, so there is never more than one request in flight. The
/// first read is immediate and no wait follows the final read.
pub struct TaskPoller<S, T>
where
    S: TaskStatusSource,
    T: PollTimer,
{
    source: Arc<S>,
    timer: Arc<T>,
    policy: PollPolicy,
}

impl<S, T> Clone for TaskPoller<S, T>
where
    S: TaskStatusSource,
    T: PollTimer,
{
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            timer: Arc::clone(&self.timer),
            policy: self.policy,
        }
    }
}

#[derive(Debug, Default)]
struct Progress {
    status_reads: u32,
    retry_signals: u32,
    waited: Duration,
}

impl Progress {
    const fn tick(&self, status: Option<TaskStatus>) -> PollTick {
        PollTick {
            status,
            status_reads: self.status_reads,
            retry_signals: self.retry_signals,
        }
    }

    const fn finish(&self, outcome: PollOutcome) -> PollReport {
        PollReport::new(outcome, self.status_reads, self.retry_signals)
    }
}

impl<S, T> TaskPoller<S, T>
where
    S: TaskStatusSource,
    T: PollTimer,
{
    /// Creates a poller.
    #[must_use]
    pub const fn new(source: Arc<S>, timer: Arc<T>, policy: PollPolicy) -> Self {
        Self {
            source,
            timer,
            policy,
        }
    }

    /// Returns the policy this poller runs with.
    #[must_use]
    pub const fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// Polls until a terminal outcome.
    pub async fn poll(&self, task_id: &TaskId, cancellation: &CancellationToken) -> PollReport {
        self.poll_observed(task_id, cancellation, |_| {}).await
    }

    /// Polls until a terminal outcome, calling `observer` after every read.
    ///
    /// The observer is never called after cancellation.
    pub async fn poll_observed<F>(
        &self,
        task_id: &TaskId,
        cancellation: &CancellationToken,
        mut observer: F,
    ) -> PollReport
    where
        F: FnMut(PollTick) + Send,
    {
        let mut progress = Progress::default();
        loop {
            let response = tokio::select! {
                biased;
                () = cancellation.cancelled() => {
                    return self.finished(task_id, &progress, PollOutcome::Cancelled);
                }
                response = self.source.task_status(task_id) => response,
            };
            progress.status_reads = progress.status_reads.saturating_add(1);

            let status = response.as_ref().ok().copied();
            let terminal = self.observe(task_id, &mut progress, response);
            observer(progress.tick(status));
            if let Some(outcome) = terminal {
                return self.finished(task_id, &progress, outcome);
            }

            if self.policy.attempts_exhausted(progress.status_reads) {
                return self.finished(task_id, &progress, PollOutcome::BudgetExhausted);
            }
            if self.policy.next_wait_exceeds_ceiling(progress.waited) {
                return self.finished(task_id, &progress, PollOutcome::TimedOut);
            }

            tokio::select! {
                biased;
                () = cancellation.cancelled() => {
                    return self.finished(task_id, &progress, PollOutcome::Cancelled);
                }
                () = self.timer.wait(self.policy.interval()) => {}
            }
            progress.waited = progress.waited.saturating_add(self.policy.interval());
        }
    }

    /// Applies one read to the counters, returning the terminal outcome if
    /// this read ends the loop.
    fn observe(
        &self,
        task_id: &TaskId,
        progress: &mut Progress,
        response: ApiResult<TaskStatus>,
    ) -> Option<PollOutcome> {
        match response {
            Ok(TaskStatus::Success) => Some(PollOutcome::Succeeded),
            Ok(TaskStatus::Failure) => Some(PollOutcome::TaskFailed),
            Ok(TaskStatus::Retry) => {
                progress.retry_signals = progress.retry_signals.saturating_add(1);
                tracing::debug!(
                    task_id = %task_id,
                    retry_signals = progress.retry_signals,
                    "task signalled retry"
                );
                self.policy
                    .retries_exhausted(progress.retry_signals)
                    .then_some(PollOutcome::BudgetExhausted)
            }
            Ok(TaskStatus::Pending) => {
                tracing::debug!(task_id = %task_id, reads = progress.status_reads, "task pending");
                None
            }
            Err(error) => match self.policy.on_transport_error() {
                TransportErrorPolicy::Abort => Some(PollOutcome::TransportFailed(error)),
                TransportErrorPolicy::CountAsAttempt => {
                    tracing::warn!(
                        task_id = %task_id,
                        reads = progress.status_reads,
                        %error,
                        "status read failed; counting as attempt"
                    );
                    None
                }
            },
        }
    }

    fn finished(&self, task_id: &TaskId, progress: &Progress, outcome: PollOutcome) -> PollReport {
        tracing::debug!(
            task_id = %task_id,
            outcome = outcome.as_str(),
            reads = progress.status_reads,
            retry_signals = progress.retry_signals,
            interval_ms = u64::try_from(self.policy.interval().as_millis()).unwrap_or(u64::MAX),
            "polling finished"
        );
        progress.finish(outcome)
    }
}

impl<S, T> TaskPoller<S, T>
where
    S: TaskStatusSource + 'static,
    T: PollTimer + 'static,
{
    /// Runs the loop on the tokio runtime.
    ///
    /// Cancelling or dropping the returned handle stops the loop before its
    /// next read or wait.
    #[must_use]
    pub fn spawn(&self, task_id: TaskId) -> PollHandle<PollReport> {
        let poller = self.clone();
        PollHandle::spawn(move |cancellation| async move {
            poller.poll(&task_id, &cancellation).await
        })
    }
}
