//! Results, feedback, and form states of a verification flow.

use super::{EmailAddress, OtpCode};
use crate::api::ApiError;
use crate::messages::{MessageKey, UserMessage};
use thiserror::Error;

/// Backend decision on a submitted code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationVerdict {
    /// The code matched.
    Accepted,
    /// The code was wrong or expired.
    Rejected,
}

/// Validated code handed to the password-reset step.
///
/// The code is trusted as validated and must not be re-entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordResetGrant {
    email: EmailAddress,
    code: OtpCode,
}

impl PasswordResetGrant {
    /// Creates a grant.
    #[must_use]
    pub const fn new(email: EmailAddress, code: OtpCode) -> Self {
        Self { email, code }
    }

    /// Returns the account email.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the validated code.
    #[must_use]
    pub const fn code(&self) -> &OtpCode {
        &self.code
    }
}

/// Successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpSuccess {
    /// The account is verified.
    Verified,
    /// The password-reset step may proceed with this grant.
    ResetAuthorized(PasswordResetGrant),
}

/// Why a submission did not succeed.
#[derive(Debug, Clone, Error)]
pub enum OtpSubmitError {
    /// The pending input is not six digits. No attempt was consumed.
    #[error("verification code must be exactly 6 digits")]
    MalformedCode,
    /// The backend rejected the code.
    #[error("verification code rejected; {remaining} attempts remaining")]
    Rejected {
        /// Attempts left before a new code is required.
        remaining: u32,
    },
    /// No attempts remain until a new code is requested.
    #[error("no verification attempts remain")]
    AttemptsExhausted,
    /// The challenge is already verified.
    #[error("verification code already accepted")]
    AlreadyVerified,
    /// The request failed. No attempt was consumed.
    #[error("verification request failed: {0}")]
    Unavailable(ApiError),
}

impl OtpSubmitError {
    /// Returns the feedback shown next to the code field.
    #[must_use]
    pub const fn feedback(&self) -> OtpFeedback {
        match self {
            Self::MalformedCode => OtpFeedback::MalformedCode,
            Self::Rejected { remaining } => OtpFeedback::Rejected {
                remaining: *remaining,
            },
            Self::AttemptsExhausted => OtpFeedback::AttemptsExhausted,
            Self::AlreadyVerified => OtpFeedback::AlreadyVerified,
            Self::Unavailable(_) => OtpFeedback::RequestFailed,
        }
    }
}

/// Why a resend did not succeed.
#[derive(Debug, Clone, Error)]
pub enum OtpResendError {
    /// The challenge is already verified.
    #[error("verification code already accepted")]
    AlreadyVerified,
    /// The request failed; attempts are unchanged.
    #[error("resend request failed: {0}")]
    Unavailable(ApiError),
}

/// User-facing feedback next to the code field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpFeedback {
    /// The input is not six digits.
    MalformedCode,
    /// The code was wrong; `remaining` attempts are left.
    Rejected {
        /// Attempts left.
        remaining: u32,
    },
    /// A new code is required.
    AttemptsExhausted,
    /// The code was already accepted.
    AlreadyVerified,
    /// Verification could not be completed.
    RequestFailed,
    /// A new code could not be sent.
    ResendFailed,
}

impl OtpFeedback {
    /// Returns the localized message for this feedback.
    #[must_use]
    pub fn user_message(self, email: &EmailAddress) -> UserMessage {
        match self {
            Self::MalformedCode => {
                UserMessage::new(MessageKey::OtpMalformedCode).with_param("email", email.as_str())
            }
            Self::Rejected { remaining } => UserMessage::new(MessageKey::OtpAttemptsRemaining)
                .with_param("remaining", remaining),
            Self::AttemptsExhausted => UserMessage::new(MessageKey::OtpAttemptsExhausted),
            Self::AlreadyVerified => UserMessage::new(MessageKey::OtpAlreadyVerified),
            Self::RequestFailed => UserMessage::new(MessageKey::OtpRequestFailed),
            Self::ResendFailed => UserMessage::new(MessageKey::OtpResendFailed),
        }
    }
}

/// Observable state of the code-entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpFormState {
    /// Waiting for input, optionally showing feedback from the last action.
    Entering {
        /// Feedback from the last submit or resend, if any.
        feedback: Option<OtpFeedback>,
    },
    /// A code is being checked.
    Verifying,
    /// A new code is being requested.
    Resending,
    /// The code was accepted. Terminal.
    Verified,
    /// No attempts remain; only a resend leaves this state.
    Exhausted,
}

impl Default for OtpFormState {
    fn default() -> Self {
        Self::Entering { feedback: None }
    }
}
