//! Disconnection attempt state machine.

use super::{AttemptId, RecoveryAction};
use crate::messages::{MessageKey, UserMessage};
use crate::polling::domain::TaskId;
use thiserror::Error;

/// Why a disconnection did not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum DisconnectionFailure {
    /// The disconnect job could not be submitted.
    #[error("disconnect job could not be submitted")]
    Initialization,
    /// The backend reported `FAILURE`.
    #[error("disconnect task failed")]
    TaskFailed,
    /// No terminal status within the attempt cap.
    #[error("disconnect task exhausted its attempts")]
    AttemptsExhausted,
    /// A status request failed under a policy that does not tolerate it.
    #[error("disconnect task status could not be checked")]
    StatusCheck,
    /// Waiting for the task passed the configured ceiling.
    #[error("disconnect task did not finish in time")]
    TimedOut,
}

impl DisconnectionFailure {
    /// Returns the canonical label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initialization => "initialization",
            Self::TaskFailed => "task_failed",
            Self::AttemptsExhausted => "attempts_exhausted",
            Self::StatusCheck => "status_check",
            Self::TimedOut => "timed_out",
        }
    }

    /// Returns the key of the message shown to the user.
    #[must_use]
    pub const fn message_key(self) -> MessageKey {
        match self {
            Self::Initialization => MessageKey::DisconnectInitializationFailed,
            Self::TaskFailed => MessageKey::DisconnectTaskFailed,
            Self::AttemptsExhausted => MessageKey::DisconnectAttemptsExhausted,
            Self::StatusCheck => MessageKey::DisconnectStatusCheckFailed,
            Self::TimedOut => MessageKey::DisconnectTimedOut,
        }
    }

    /// Returns the message shown to the user.
    #[must_use]
    pub fn user_message(self) -> UserMessage {
        UserMessage::new(self.message_key())
    }
}

/// Observable state of a disconnection controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisconnectionState {
    /// No attempt has started.
    #[default]
    Idle,
    /// The disconnect job is being submitted.
    Submitting,
    /// Status read number `attempt` is due or in flight.
    Polling {
        /// One-based attempt number.
        attempt: u32,
    },
    /// The device was unlinked. Terminal.
    Succeeded,
    /// The attempt failed. Terminal.
    Failed(DisconnectionFailure),
}

impl DisconnectionState {
    /// Returns `true` for `Succeeded` and `Failed`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed(_))
    }
}

/// Result handed back to the caller of a disconnection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisconnectionOutcome {
    /// The device was unlinked and local markers cleared.
    Succeeded,
    /// The device is still linked.
    Failed(DisconnectionFailure),
    /// The caller cancelled before a terminal status.
    Cancelled,
}

impl DisconnectionOutcome {
    /// Returns `true` only when the device was unlinked.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Returns the recovery offered after a failure.
    #[must_use]
    pub const fn recovery(self) -> Option<RecoveryAction> {
        match self {
            Self::Failed(_) => Some(RecoveryAction::ReturnToSettings),
            Self::Succeeded | Self::Cancelled => None,
        }
    }

    /// Returns the failure, if any.
    #[must_use]
    pub const fn failure(self) -> Option<DisconnectionFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            Self::Succeeded | Self::Cancelled => None,
        }
    }
}

/// Bookkeeping for one disconnection attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisconnectionAttempt {
    attempt_id: AttemptId,
    task_id: TaskId,
    attempts_made: u32,
    max_attempts: u32,
}

impl DisconnectionAttempt {
    /// Starts tracking an attempt for a submitted task.
    #[must_use]
    pub fn new(task_id: TaskId, max_attempts: u32) -> Self {
        Self {
            attempt_id: AttemptId::new(),
            task_id,
            attempts_made: 0,
            max_attempts,
        }
    }

    /// Records the number of status reads issued so far.
    pub const fn observe_reads(&mut self, attempts_made: u32) {
        self.attempts_made = attempts_made;
    }

    /// Returns `true` while another status read is allowed.
    #[must_use]
    pub const fn has_remaining(&self) -> bool {
        self.attempts_made < self.max_attempts
    }

    /// Returns the log correlation identifier.
    #[must_use]
    pub const fn attempt_id(&self) -> AttemptId {
        self.attempt_id
    }

    /// Returns the polled task.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the status reads issued so far.
    #[must_use]
    pub const fn attempts_made(&self) -> u32 {
        self.attempts_made
    }

    /// Returns the attempt cap.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}
