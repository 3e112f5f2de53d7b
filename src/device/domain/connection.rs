//! Connection attempt state machine.

use super::{AttemptId, IntegrationUrl, ProviderId, RecoveryAction};
use crate::messages::{MessageKey, UserMessage};
use crate::polling::domain::TaskId;
use thiserror::Error;

/// Why a connection attempt ended without a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ConnectionFailure {
    /// The connect job could not be submitted.
    #[error("connect job could not be submitted")]
    Initialization,
    /// The task signalled `RETRY` as often as the budget allows.
    #[error("connect task exhausted its retries")]
    RetriesExhausted,
    /// The backend reported `FAILURE`.
    #[error("connect task failed")]
    TaskFailed,
    /// The task succeeded but its result could not be read.
    #[error("connect task results are unavailable")]
    ResultsUnavailable,
    /// A status request failed.
    #[error("connect task status could not be checked")]
    StatusCheck,
    /// The synchronization screen was opened without a task.
    #[error("synchronization was opened without a task id")]
    Configuration,
    /// Waiting for the task passed the configured ceiling.
    #[error("connect task did not finish in time")]
    TimedOut,
}

impl ConnectionFailure {
    /// Returns the canonical label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initialization => "initialization",
            Self::RetriesExhausted => "retries_exhausted",
            Self::TaskFailed => "task_failed",
            Self::ResultsUnavailable => "results_unavailable",
            Self::StatusCheck => "status_check",
            Self::Configuration => "configuration",
            Self::TimedOut => "timed_out",
        }
    }

    /// Returns the key of the message shown to the user.
    #[must_use]
    pub const fn message_key(self) -> MessageKey {
        match self {
            Self::Initialization => MessageKey::ConnectInitializationFailed,
            Self::RetriesExhausted => MessageKey::ConnectRetriesExhausted,
            Self::TaskFailed => MessageKey::ConnectTaskFailed,
            Self::ResultsUnavailable => MessageKey::ConnectResultsUnavailable,
            Self::StatusCheck => MessageKey::ConnectStatusCheckFailed,
            Self::Configuration => MessageKey::ConnectMissingTask,
            Self::TimedOut => MessageKey::ConnectTimedOut,
        }
    }

    /// Returns the message shown to the user.
    #[must_use]
    pub fn user_message(self) -> UserMessage {
        UserMessage::new(self.message_key())
    }
}

/// Observable state of a connection controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConnectionState {
    /// No attempt has started.
    #[default]
    Idle,
    /// The connect job is being submitted.
    Submitting,
    /// The connect task is being polled.
    Polling {
        /// `RETRY` signals observed so far.
        retry_count: u32,
    },
    /// The user is being sent to the provider. Terminal.
    Redirecting {
        /// Provider authorization page.
        url: IntegrationUrl,
    },
    /// The attempt failed. Terminal.
    Failed(ConnectionFailure),
}

impl ConnectionState {
    /// Returns `true` for `Redirecting` and `Failed`.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Redirecting { .. } | Self::Failed(_))
    }

    /// Returns the recovery offered after a failure. Connection never
    /// retries on its own.
    #[must_use]
    pub const fn recovery(&self) -> Option<RecoveryAction> {
        match self {
            Self::Failed(_) => Some(RecoveryAction::ReturnToSettings),
            _ => None,
        }
    }

    /// Returns the failure, if the attempt failed.
    #[must_use]
    pub const fn failure(&self) -> Option<ConnectionFailure> {
        match self {
            Self::Failed(failure) => Some(*failure),
            _ => None,
        }
    }
}

/// How a synchronization run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionOutcome {
    /// The user was sent to the provider's authorization page.
    Redirected {
        /// Provider authorization page.
        url: IntegrationUrl,
        /// `RETRY` signals observed before the task succeeded.
        retry_count: u32,
    },
    /// The attempt failed.
    Failed(ConnectionFailure),
    /// The caller cancelled; no further side effects happened.
    Cancelled,
}

/// Bookkeeping for one connection attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionAttempt {
    attempt_id: AttemptId,
    provider: Option<ProviderId>,
    task_id: TaskId,
    retry_count: u32,
    max_retries: u32,
}

impl ConnectionAttempt {
    /// Starts tracking an attempt for a submitted task.
    #[must_use]
    pub fn new(task_id: TaskId, provider: Option<ProviderId>, max_retries: u32) -> Self {
        Self {
            attempt_id: AttemptId::new(),
            provider,
            task_id,
            retry_count: 0,
            max_retries,
        }
    }

    /// Records the retry count reported by the poller.
    ///
    /// Returns `true` when the count changed.
    pub const fn observe_retries(&mut self, retry_count: u32) -> bool {
        let changed = self.retry_count != retry_count;
        self.retry_count = retry_count;
        changed
    }

    /// Returns `true` once the retry budget is spent.
    #[must_use]
    pub const fn retries_exhausted(&self) -> bool {
        self.retry_count >= self.max_retries
    }

    /// Returns the log correlation identifier.
    #[must_use]
    pub const fn attempt_id(&self) -> AttemptId {
        self.attempt_id
    }

    /// Returns the provider, when known.
    #[must_use]
    pub const fn provider(&self) -> Option<&ProviderId> {
        self.provider.as_ref()
    }

    /// Returns the polled task.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the `RETRY` signals observed so far.
    #[must_use]
    pub const fn retry_count(&self) -> u32 {
        self.retry_count
    }

    /// Returns the retry budget.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }
}
