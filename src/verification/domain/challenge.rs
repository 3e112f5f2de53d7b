//! Attempt-limited one-time code challenge.

use super::{EmailAddress, OtpCode, OtpContext, OtpSubmitError};

/// Attempts allowed before a new code must be requested.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// One code challenge: who it was sent to, why, and how many wrong
/// codes have been submitted.
///
/// `attempts` only grows on a backend rejection. Malformed input, transport
/// failures, and acceptances leave it unchanged; a successful resend
/// resets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpChallenge {
    email: EmailAddress,
    context: OtpContext,
    code: String,
    attempts: u32,
    max_attempts: u32,
    verified: bool,
}

impl OtpChallenge {
    /// Creates a challenge with no attempts used.
    #[must_use]
    pub const fn new(email: EmailAddress, context: OtpContext, max_attempts: u32) -> Self {
        Self {
            email,
            context,
            code: String::new(),
            attempts: 0,
            max_attempts,
            verified: false,
        }
    }

    /// Replaces the pending input.
    pub fn enter_code(&mut self, input: &str) {
        input.clone_into(&mut self.code);
    }

    /// Checks that the pending input may be sent to the backend.
    ///
    /// # Errors
    ///
    /// Returns [`OtpSubmitError::AlreadyVerified`] after an acceptance,
    /// [`OtpSubmitError::AttemptsExhausted`] once no attempts remain
    /// whatever the input, and [`OtpSubmitError::MalformedCode`] for input
    /// that is not six digits.
    pub fn prepare_submission(&self) -> Result<OtpCode, OtpSubmitError> {
        if self.verified {
            return Err(OtpSubmitError::AlreadyVerified);
        }
        if self.is_exhausted() {
            return Err(OtpSubmitError::AttemptsExhausted);
        }
        OtpCode::parse(&self.code).map_err(|_| OtpSubmitError::MalformedCode)
    }

    /// Records a backend rejection: consumes an attempt and clears the input.
    pub fn record_rejection(&mut self) -> OtpSubmitError {
        self.attempts = self.attempts.saturating_add(1);
        self.code.clear();
        if self.is_exhausted() {
            OtpSubmitError::AttemptsExhausted
        } else {
            OtpSubmitError::Rejected {
                remaining: self.remaining(),
            }
        }
    }

    /// Records a backend acceptance.
    pub const fn record_acceptance(&mut self) {
        self.verified = true;
    }

    /// Starts over after a new code was sent.
    pub fn reset_after_resend(&mut self) {
        self.attempts = 0;
        self.code.clear();
    }

    /// Returns the address the code was sent to.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the flow the code belongs to.
    #[must_use]
    pub const fn context(&self) -> OtpContext {
        self.context
    }

    /// Returns the pending input.
    #[must_use]
    pub fn pending_code(&self) -> &str {
        &self.code
    }

    /// Returns the rejected submissions since the last resend.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Returns the attempt cap.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the attempts left.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.max_attempts.saturating_sub(self.attempts)
    }

    /// Returns `true` once no attempts remain.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }

    /// Returns `true` after an acceptance.
    #[must_use]
    pub const fn is_verified(&self) -> bool {
        self.verified
    }
}
