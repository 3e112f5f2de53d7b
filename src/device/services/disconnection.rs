//! Device disconnection controller.

use super::DeviceLinkStore;
use crate::device::{
    domain::{DisconnectionAttempt, DisconnectionFailure, DisconnectionOutcome, DisconnectionState},
    ports::DeviceIntegrationApi,
};
use crate::local_state::{LocalState, ports::KeyValueStore};
use crate::polling::{
    domain::{PollOutcome, PollPolicy, TaskStatus},
    ports::PollTimer,
    services::TaskPoller,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;

/// Errors returned by [`DisconnectionController::disconnect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DisconnectionError {
    /// Another disconnection of this controller is still running.
    #[error("a disconnection attempt is already in progress")]
    AttemptInProgress,
}

/// Unlinks the user's device with a capped number of status reads.
pub struct DisconnectionController<A, T, K>
where
    A: DeviceIntegrationApi,
    T: PollTimer,
    K: KeyValueStore,
{
    api: Arc<A>,
    poller: TaskPoller<A, T>,
    links: DeviceLinkStore<K>,
    state: watch::Sender<DisconnectionState>,
    active: Mutex<()>,
}

impl<A, T, K> DisconnectionController<A, T, K>
where
    A: DeviceIntegrationApi,
    T: PollTimer,
    K: KeyValueStore,
{
    /// Creates an idle controller.
    #[must_use]
    pub fn new(api: Arc<A>, timer: Arc<T>, local_state: LocalState<K>, policy: PollPolicy) -> Self {
        let (state, _) = watch::channel(DisconnectionState::Idle);
        Self {
            poller: TaskPoller::new(Arc::clone(&api), timer, policy),
            api,
            links: DeviceLinkStore::new(local_state),
            state,
            active: Mutex::new(()),
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> DisconnectionState {
        *self.state.borrow()
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DisconnectionState> {
        self.state.subscribe()
    }

    /// Submits a disconnect job and polls it until a terminal status or the
    /// attempt cap. On success the local link markers are cleared.
    ///
    /// # Errors
    ///
    /// Returns [`DisconnectionError::AttemptInProgress`] while another
    /// disconnection runs.
    pub async fn disconnect(
        &self,
        cancellation: &CancellationToken,
    ) -> Result<DisconnectionOutcome, DisconnectionError> {
        let _active = self.active.try_lock().map_err(|_| {
            tracing::debug!("rejected concurrent disconnection attempt");
            DisconnectionError::AttemptInProgress
        })?;

        self.publish(DisconnectionState::Submitting);
        let submitted = tokio::select! {
            biased;
            () = cancellation.cancelled() => return Ok(DisconnectionOutcome::Cancelled),
            submitted = self.api.submit_disconnect() => submitted,
        };
        let task_id = match submitted {
            Ok(task_id) => task_id,
            Err(error) => {
                tracing::warn!(%error, "disconnect job submission failed");
                return Ok(self.fail(None, DisconnectionFailure::Initialization));
            }
        };

        let mut attempt =
            DisconnectionAttempt::new(task_id.clone(), self.poller.policy().budget().limit());
        tracing::debug!(
            attempt_id = %attempt.attempt_id(),
            task_id = %task_id,
            "polling disconnect task"
        );
        self.publish(DisconnectionState::Polling { attempt: 1 });

        let report = self
            .poller
            .poll_observed(&task_id, cancellation, |tick| {
                attempt.observe_reads(tick.status_reads);
                let terminal = tick.status.is_some_and(TaskStatus::is_terminal);
                if !terminal && attempt.has_remaining() {
                    self.publish(DisconnectionState::Polling {
                        attempt: tick.status_reads.saturating_add(1),
                    });
                }
            })
            .await;

        Ok(match report.into_outcome() {
            PollOutcome::Succeeded => self.succeed(&attempt),
            PollOutcome::TaskFailed => self.fail(Some(&attempt), DisconnectionFailure::TaskFailed),
            PollOutcome::BudgetExhausted => {
                self.fail(Some(&attempt), DisconnectionFailure::AttemptsExhausted)
            }
            PollOutcome::TransportFailed(error) => {
                tracing::warn!(
                    attempt_id = %attempt.attempt_id(),
                    %error,
                    "disconnect status check failed"
                );
                self.fail(Some(&attempt), DisconnectionFailure::StatusCheck)
            }
            PollOutcome::TimedOut => self.fail(Some(&attempt), DisconnectionFailure::TimedOut),
            PollOutcome::Cancelled => {
                tracing::debug!(attempt_id = %attempt.attempt_id(), "disconnection cancelled");
                DisconnectionOutcome::Cancelled
            }
        })
    }

    fn succeed(&self, attempt: &DisconnectionAttempt) -> DisconnectionOutcome {
        if let Err(error) = self.links.clear_link() {
            tracing::error!(
                attempt_id = %attempt.attempt_id(),
                %error,
                "failed to clear device link markers"
            );
        }
        tracing::info!(
            attempt_id = %attempt.attempt_id(),
            attempts = attempt.attempts_made(),
            "device disconnected"
        );
        self.publish(DisconnectionState::Succeeded);
        DisconnectionOutcome::Succeeded
    }

    fn fail(
        &self,
        attempt: Option<&DisconnectionAttempt>,
        failure: DisconnectionFailure,
    ) -> DisconnectionOutcome {
        tracing::info!(
            attempt_id = ?attempt.map(DisconnectionAttempt::attempt_id),
            attempts = ?attempt.map(DisconnectionAttempt::attempts_made),
            reason = failure.as_str(),
            "disconnection failed"
        );
        self.publish(DisconnectionState::Failed(failure));
        DisconnectionOutcome::Failed(failure)
    }

    fn publish(&self, next: DisconnectionState) {
        tracing::debug!(state = ?next, "disconnection state changed");
        self.state.send_modify(|state| *state = next);
    }
}
