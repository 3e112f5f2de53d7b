//! Code-entry form state machine.

use crate::verification::{
    domain::{
        DEFAULT_MAX_ATTEMPTS, EmailAddress, OtpChallenge, OtpContext, OtpFeedback, OtpFormState,
        OtpResendError, OtpSubmitError, OtpSuccess, PasswordResetGrant, VerificationVerdict,
    },
    ports::VerificationApi,
};
use std::sync::Arc;
use tokio::sync::watch;

/// Drives one [`OtpChallenge`] through submit and resend.
///
/// Operations take `&mut self`, so a flow never has two requests in flight.
/// The form state is published on a [`watch`] channel for observers.
pub struct OtpVerificationFlow<V>
where
    V: VerificationApi,
{
    api: Arc<V>,
    challenge: OtpChallenge,
    state: watch::Sender<OtpFormState>,
}

impl<V> OtpVerificationFlow<V>
where
    V: VerificationApi,
{
    /// Creates a flow allowing [`DEFAULT_MAX_ATTEMPTS`] wrong codes.
    #[must_use]
    pub fn new(api: Arc<V>, email: EmailAddress, context: OtpContext) -> Self {
        Self::with_max_attempts(api, email, context, DEFAULT_MAX_ATTEMPTS)
    }

    /// Creates a flow with a custom attempt cap.
    #[must_use]
    pub fn with_max_attempts(
        api: Arc<V>,
        email: EmailAddress,
        context: OtpContext,
        max_attempts: u32,
    ) -> Self {
        let (state, _) = watch::channel(OtpFormState::default());
        Self {
            api,
            challenge: OtpChallenge::new(email, context, max_attempts),
            state,
        }
    }

    /// Returns the current form state.
    #[must_use]
    pub fn state(&self) -> OtpFormState {
        *self.state.borrow()
    }

    /// Subscribes to form state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<OtpFormState> {
        self.state.subscribe()
    }

    /// Returns the challenge.
    #[must_use]
    pub const fn challenge(&self) -> &OtpChallenge {
        &self.challenge
    }

    /// Replaces the pending input.
    pub fn enter_code(&mut self, input: &str) {
        self.challenge.enter_code(input);
    }

    /// Submits the pending input.
    ///
    /// Malformed input and an exhausted challenge are rejected without a
    /// request. A rejection consumes an attempt and clears the input; a
    /// failed request consumes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`OtpSubmitError`] describing why the code was not accepted.
    pub async fn submit(&mut self) -> Result<OtpSuccess, OtpSubmitError> {
        let code = match self.challenge.prepare_submission() {
            Ok(code) => code,
            Err(error) => {
                tracing::debug!(reason = %error, "code rejected before submission");
                self.publish_error(&error);
                return Err(error);
            }
        };

        self.publish(OtpFormState::Verifying);
        let email = self.challenge.email().clone();
        let context = self.challenge.context();
        let verdict = match context {
            OtpContext::Verify => self.api.verify_account(&email, &code).await,
            OtpContext::ResetPassword => self.api.validate_reset_otp(&email, &code).await,
        };

        match verdict {
            Ok(VerificationVerdict::Accepted) => {
                self.challenge.record_acceptance();
                tracing::info!(
                    context = %context,
                    attempts = self.challenge.attempts(),
                    "verification code accepted"
                );
                self.publish(OtpFormState::Verified);
                Ok(match context {
                    OtpContext::Verify => OtpSuccess::Verified,
                    OtpContext::ResetPassword => {
                        OtpSuccess::ResetAuthorized(PasswordResetGrant::new(email, code))
                    }
                })
            }
            Ok(VerificationVerdict::Rejected) => {
                let error = self.challenge.record_rejection();
                tracing::info!(
                    context = %context,
                    attempts = self.challenge.attempts(),
                    remaining = self.challenge.remaining(),
                    "verification code rejected"
                );
                self.publish_error(&error);
                Err(error)
            }
            Err(api_error) => {
                tracing::warn!(
                    context = %context,
                    error = %api_error,
                    "verification request failed"
                );
                let error = OtpSubmitError::Unavailable(api_error);
                self.publish_error(&error);
                Err(error)
            }
        }
    }

    /// Requests a new code. On success attempts reset to zero and the input
    /// and feedback are cleared; this is the only way out of exhaustion.
    ///
    /// # Errors
    ///
    /// Returns [`OtpResendError::AlreadyVerified`] after an acceptance and
    /// [`OtpResendError::Unavailable`] when the request fails.
    pub async fn resend(&mut self) -> Result<(), OtpResendError> {
        if self.challenge.is_verified() {
            return Err(OtpResendError::AlreadyVerified);
        }
        let previous = self.state();
        self.publish(OtpFormState::Resending);
        let resent = self
            .api
            .resend_otp(self.challenge.email(), self.challenge.context())
            .await;
        match resent {
            Ok(()) => {
                self.challenge.reset_after_resend();
                tracing::info!(context = %self.challenge.context(), "verification code resent");
                self.publish(OtpFormState::Entering { feedback: None });
                Ok(())
            }
            Err(api_error) => {
                tracing::warn!(
                    context = %self.challenge.context(),
                    error = %api_error,
                    "verification code resend failed"
                );
                self.publish(match previous {
                    OtpFormState::Exhausted => OtpFormState::Exhausted,
                    _ => OtpFormState::Entering {
                        feedback: Some(OtpFeedback::ResendFailed),
                    },
                });
                Err(OtpResendError::Unavailable(api_error))
            }
        }
    }

    fn publish_error(&self, error: &OtpSubmitError) {
        self.publish(match error {
            OtpSubmitError::AttemptsExhausted => OtpFormState::Exhausted,
            OtpSubmitError::AlreadyVerified => OtpFormState::Verified,
            _ => OtpFormState::Entering {
                feedback: Some(error.feedback()),
            },
        });
    }

    fn publish(&self, next: OtpFormState) {
        self.state.send_modify(|state| *state = next);
    }
}
