//! Device connection controller.

use super::DeviceLinkStore;
use crate::device::{
    domain::{
        ConnectionAttempt, ConnectionFailure, ConnectionOutcome, ConnectionState, ProviderId,
        RecoveryAction, SyncRequest,
    },
    ports::{AppNavigator, DeviceIntegrationApi},
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

/// Errors returned by [`ConnectionController`] operations.
///
/// Expected failures of a running attempt are reported as
/// [`ConnectionOutcome::Failed`], not as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConnectionError {
    /// Another operation of this controller is still running.
    #[error("a connection attempt is already in progress")]
    AttemptInProgress,
    /// The attempt failed before polling could start.
    #[error(transparent)]
    Failed(#[from] ConnectionFailure),
}

/// Result type for connection controller operations.
pub type ConnectionResult<T> = Result<T, ConnectionError>;

/// Drives one device connection attempt at a time.
///
/// Submits the connect job, polls it under the connection policy, fetches
/// the result, persists the pending link, and sends the user to the
/// provider's authorization page exactly once. State changes are published
/// on a [`watch`] channel; after cancellation nothing further is published,
/// persisted, or navigated.
pub struct ConnectionController<A, T, N, K>
where
    A: DeviceIntegrationApi,
    T: PollTimer,
    N: AppNavigator,
    K: KeyValueStore,
{
    api: Arc<A>,
    poller: TaskPoller<A, T>,
    navigator: Arc<N>,
    links: DeviceLinkStore<K>,
    state: watch::Sender<ConnectionState>,
    active: Mutex<()>,
}

impl<A, T, N, K> ConnectionController<A, T, N, K>
where
    A: DeviceIntegrationApi,
    T: PollTimer,
    N: AppNavigator,
    K: KeyValueStore,
{
    /// Creates an idle controller.
    #[must_use]
    pub fn new(
        api: Arc<A>,
        timer: Arc<T>,
        navigator: Arc<N>,
        local_state: LocalState<K>,
        policy: PollPolicy,
    ) -> Self {
        let (state, _) = watch::channel(ConnectionState::Idle);
        Self {
            poller: TaskPoller::new(Arc::clone(&api), timer, policy),
            api,
            navigator,
            links: DeviceLinkStore::new(local_state),
            state,
            active: Mutex::new(()),
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.state.borrow().clone()
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    /// Submits a connect job and returns the request that opens the
    /// synchronization screen.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::AttemptInProgress`] while another
    /// operation runs, and [`ConnectionError::Failed`] with
    /// [`ConnectionFailure::Initialization`] when submission fails.
    pub async fn begin(&self, provider: &ProviderId) -> ConnectionResult<SyncRequest> {
        let _active = self.claim()?;
        self.submit(provider).await
    }

    /// Polls a submitted connect task through to a redirect or a failure.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::AttemptInProgress`] while another
    /// operation runs.
    pub async fn synchronize(
        &self,
        request: &SyncRequest,
        cancellation: &CancellationToken,
    ) -> ConnectionResult<ConnectionOutcome> {
        let _active = self.claim()?;
        Ok(self.run(request, cancellation).await)
    }

    /// Synchronizes from the screen's `task_id`/`provider` query.
    ///
    /// Without a usable `task_id` the attempt fails with
    /// [`ConnectionFailure::Configuration`] and the user is sent back to
    /// settings before any status read. A cancelled token suppresses both.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::AttemptInProgress`] while another
    /// operation runs.
    pub async fn synchronize_from_query(
        &self,
        query: &str,
        cancellation: &CancellationToken,
    ) -> ConnectionResult<ConnectionOutcome> {
        let _active = self.claim()?;
        match SyncRequest::from_query(query) {
            Ok(request) => Ok(self.run(&request, cancellation).await),
            Err(error) => {
                if cancellation.is_cancelled() {
                    tracing::debug!(%error, "synchronization cancelled before it started");
                    return Ok(ConnectionOutcome::Cancelled);
                }
                tracing::warn!(%error, "synchronization opened without a usable task id");
                let failure = self.fail(None, ConnectionFailure::Configuration);
                self.navigator
                    .go_to(RecoveryAction::ReturnToSettings.route());
                Ok(ConnectionOutcome::Failed(failure))
            }
        }
    }

    /// Submits a connect job and synchronizes it as one attempt.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::AttemptInProgress`] while another
    /// operation runs.
    pub async fn connect(
        &self,
        provider: &ProviderId,
        cancellation: &CancellationToken,
    ) -> ConnectionResult<ConnectionOutcome> {
        let _active = self.claim()?;
        let request = match self.submit(provider).await {
            Ok(request) => request,
            Err(ConnectionError::Failed(failure)) => return Ok(ConnectionOutcome::Failed(failure)),
            Err(error) => return Err(error),
        };
        Ok(self.run(&request, cancellation).await)
    }

    fn claim(&self) -> ConnectionResult<tokio::sync::MutexGuard<'_, ()>> {
        self.active.try_lock().map_err(|_| {
            tracing::debug!("rejected concurrent connection attempt");
            ConnectionError::AttemptInProgress
        })
    }

    async fn submit(&self, provider: &ProviderId) -> ConnectionResult<SyncRequest> {
        self.publish(ConnectionState::Submitting);
        match self.api.submit_connect(provider).await {
            Ok(task_id) => {
                tracing::debug!(provider = %provider, task_id = %task_id, "connect job submitted");
                self.publish(ConnectionState::Polling { retry_count: 0 });
                Ok(SyncRequest::new(task_id, Some(provider.clone())))
            }
            Err(error) => {
                tracing::warn!(provider = %provider, %error, "connect job submission failed");
                Err(self.fail(None, ConnectionFailure::Initialization).into())
            }
        }
    }

    async fn run(
        &self,
        request: &SyncRequest,
        cancellation: &CancellationToken,
    ) -> ConnectionOutcome {
        let mut attempt = ConnectionAttempt::new(
            request.task_id().clone(),
            request.provider().cloned(),
            self.poller.policy().budget().limit(),
        );
        tracing::debug!(
            attempt_id = %attempt.attempt_id(),
            task_id = %request.task_id(),
            "synchronizing connect task"
        );
        self.publish(ConnectionState::Polling { retry_count: 0 });

        let report = self
            .poller
            .poll_observed(request.task_id(), cancellation, |tick| {
                if tick.status == Some(TaskStatus::Retry)
                    && attempt.observe_retries(tick.retry_signals)
                    && !attempt.retries_exhausted()
                {
                    self.publish(ConnectionState::Polling {
                        retry_count: attempt.retry_count(),
                    });
                }
            })
            .await;

        match report.into_outcome() {
            PollOutcome::Succeeded => self.redirect(&attempt, cancellation).await,
            PollOutcome::TaskFailed => {
                ConnectionOutcome::Failed(self.fail(Some(&attempt), ConnectionFailure::TaskFailed))
            }
            PollOutcome::BudgetExhausted => ConnectionOutcome::Failed(
                self.fail(Some(&attempt), ConnectionFailure::RetriesExhausted),
            ),
            PollOutcome::TransportFailed(error) => {
                tracing::warn!(
                    attempt_id = %attempt.attempt_id(),
                    %error,
                    "connect status check failed"
                );
                ConnectionOutcome::Failed(self.fail(Some(&attempt), ConnectionFailure::StatusCheck))
            }
            PollOutcome::TimedOut => {
                ConnectionOutcome::Failed(self.fail(Some(&attempt), ConnectionFailure::TimedOut))
            }
            PollOutcome::Cancelled => {
                tracing::debug!(attempt_id = %attempt.attempt_id(), "synchronization cancelled");
                ConnectionOutcome::Cancelled
            }
        }
    }

    async fn redirect(
        &self,
        attempt: &ConnectionAttempt,
        cancellation: &CancellationToken,
    ) -> ConnectionOutcome {
        let fetched = tokio::select! {
            biased;
            () = cancellation.cancelled() => return ConnectionOutcome::Cancelled,
            fetched = self.api.task_result(attempt.task_id()) => fetched,
        };
        let result = match fetched {
            Ok(result) => result,
            Err(error) => {
                if error.is_malformed_payload() {
                    tracing::error!(
                        attempt_id = %attempt.attempt_id(),
                        task_id = %attempt.task_id(),
                        %error,
                        "connect task returned a malformed result"
                    );
                } else {
                    tracing::warn!(
                        attempt_id = %attempt.attempt_id(),
                        %error,
                        "connect task result unavailable"
                    );
                }
                return ConnectionOutcome::Failed(
                    self.fail(Some(attempt), ConnectionFailure::ResultsUnavailable),
                );
            }
        };

        if let Err(error) = self.links.record_pending_link(&result) {
            tracing::error!(
                attempt_id = %attempt.attempt_id(),
                %error,
                "failed to persist pending device link"
            );
        }
        let url = result.integration_url().clone();
        tracing::info!(
            attempt_id = %attempt.attempt_id(),
            provider = %result.provider(),
            retry_count = attempt.retry_count(),
            "redirecting to provider authorization"
        );
        self.publish(ConnectionState::Redirecting { url: url.clone() });
        self.navigator.open_external(&url);
        ConnectionOutcome::Redirected {
            url,
            retry_count: attempt.retry_count(),
        }
    }

    fn fail(
        &self,
        attempt: Option<&ConnectionAttempt>,
        failure: ConnectionFailure,
    ) -> ConnectionFailure {
        tracing::info!(
            attempt_id = ?attempt.map(ConnectionAttempt::attempt_id),
            retry_count = ?attempt.map(ConnectionAttempt::retry_count),
            reason = failure.as_str(),
            "connection attempt failed"
        );
        self.publish(ConnectionState::Failed(failure));
        failure
    }

    fn publish(&self, next: ConnectionState) {
        tracing::debug!(state = ?next, "connection state changed");
        self.state.send_modify(|state| *state = next);
    }
}
