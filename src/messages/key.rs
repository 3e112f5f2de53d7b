//! Message keys and parameterized user messages.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Stable identifier for every user-visible message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKey {
    /// Connect job could not be submitted.
    ConnectInitializationFailed,
    /// The connect task signalled `RETRY` too many times.
    ConnectRetriesExhausted,
    /// The backend reported the connect task as failed.
    ConnectTaskFailed,
    /// The connect task succeeded but its result could not be read.
    ConnectResultsUnavailable,
    /// A status request failed while synchronizing.
    ConnectStatusCheckFailed,
    /// The synchronization screen was opened without a task identifier.
    ConnectMissingTask,
    /// Synchronization exceeded its overall waiting ceiling.
    ConnectTimedOut,
    /// Disconnect job could not be submitted.
    DisconnectInitializationFailed,
    /// The backend reported the disconnect task as failed.
    DisconnectTaskFailed,
    /// No terminal disconnect status within the attempt cap.
    DisconnectAttemptsExhausted,
    /// A status request failed while disconnecting.
    DisconnectStatusCheckFailed,
    /// Disconnection exceeded its overall waiting ceiling.
    DisconnectTimedOut,
    /// Consent could not be reported to the backend.
    ConsentReportFailed,
    /// The entered code is not six digits.
    OtpMalformedCode,
    /// The code was rejected; some attempts remain.
    OtpAttemptsRemaining,
    /// No verification attempts remain until a new code is requested.
    OtpAttemptsExhausted,
    /// The verification request could not be completed.
    OtpRequestFailed,
    /// A new code could not be sent.
    OtpResendFailed,
    /// The challenge is already verified.
    OtpAlreadyVerified,
}

impl MessageKey {
    /// Returns the canonical dotted key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConnectInitializationFailed => "connect.initialization_failed",
            Self::ConnectRetriesExhausted => "connect.retries_exhausted",
            Self::ConnectTaskFailed => "connect.task_failed",
            Self::ConnectResultsUnavailable => "connect.results_unavailable",
            Self::ConnectStatusCheckFailed => "connect.status_check_failed",
            Self::ConnectMissingTask => "connect.missing_task",
            Self::ConnectTimedOut => "connect.timed_out",
            Self::DisconnectInitializationFailed => "disconnect.initialization_failed",
            Self::DisconnectTaskFailed => "disconnect.task_failed",
            Self::DisconnectAttemptsExhausted => "disconnect.attempts_exhausted",
            Self::DisconnectStatusCheckFailed => "disconnect.status_check_failed",
            Self::DisconnectTimedOut => "disconnect.timed_out",
            Self::ConsentReportFailed => "consent.report_failed",
            Self::OtpMalformedCode => "otp.malformed_code",
            Self::OtpAttemptsRemaining => "otp.attempts_remaining",
            Self::OtpAttemptsExhausted => "otp.attempts_exhausted",
            Self::OtpRequestFailed => "otp.request_failed",
            Self::OtpResendFailed => "otp.resend_failed",
            Self::OtpAlreadyVerified => "otp.already_verified",
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message key with the parameters its template expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMessage {
    key: MessageKey,
    params: Map<String, Value>,
}

impl UserMessage {
    /// Creates a message without parameters.
    #[must_use]
    pub fn new(key: MessageKey) -> Self {
        Self {
            key,
            params: Map::new(),
        }
    }

    /// Adds a template parameter.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Returns the message key.
    #[must_use]
    pub const fn key(&self) -> MessageKey {
        self.key
    }

    /// Returns the template parameters.
    #[must_use]
    pub const fn params(&self) -> &Map<String, Value> {
        &self.params
    }
}

impl From<MessageKey> for UserMessage {
    fn from(key: MessageKey) -> Self {
        Self::new(key)
    }
}
