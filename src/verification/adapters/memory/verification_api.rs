//! Scripted verification backend.

use crate::api::{ApiError, ApiResult};
use crate::verification::{
    domain::{EmailAddress, OtpCode, OtpContext, VerificationVerdict},
    ports::VerificationApi,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A call received by [`ScriptedVerificationApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationCall {
    /// `verify_account` with the submitted code.
    VerifyAccount {
        /// Account email.
        email: EmailAddress,
        /// Submitted code.
        code: OtpCode,
    },
    /// `validate_reset_otp` with the submitted code.
    ValidateResetOtp {
        /// Account email.
        email: EmailAddress,
        /// Submitted code.
        code: OtpCode,
    },
    /// `resend_otp`.
    ResendOtp {
        /// Account email.
        email: EmailAddress,
        /// Flow the code is for.
        context: OtpContext,
    },
}

/// In-memory backend replaying scripted verdicts.
///
/// Both verification endpoints share one verdict script; once it is empty
/// every code is rejected.
#[derive(Debug, Clone, Default)]
pub struct ScriptedVerificationApi {
    state: Arc<Mutex<VerificationScript>>,
}

#[derive(Debug)]
struct VerificationScript {
    verdicts: VecDeque<ApiResult<VerificationVerdict>>,
    fallback: VerificationVerdict,
    resend: ApiResult<()>,
    calls: Vec<VerificationCall>,
}

impl Default for VerificationScript {
    fn default() -> Self {
        Self {
            verdicts: VecDeque::new(),
            fallback: VerificationVerdict::Rejected,
            resend: Ok(()),
            calls: Vec::new(),
        }
    }
}

impl ScriptedVerificationApi {
    /// Creates a backend that rejects every code and accepts resends.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the verdict returned once the script is empty.
    pub fn set_fallback(&self, verdict: VerificationVerdict) {
        self.update(|script| script.fallback = verdict);
    }

    /// Appends a verdict to the script.
    pub fn push_verdict(&self, verdict: VerificationVerdict) {
        self.update(|script| script.verdicts.push_back(Ok(verdict)));
    }

    /// Appends a failed verification request to the script.
    pub fn push_error(&self, error: ApiError) {
        self.update(|script| script.verdicts.push_back(Err(error)));
    }

    /// Sets the response to `resend_otp`.
    pub fn set_resend_response(&self, response: ApiResult<()>) {
        self.update(|script| script.resend = response);
    }

    /// Returns every recorded call, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<VerificationCall> {
        self.state
            .lock()
            .map(|script| script.calls.clone())
            .unwrap_or_default()
    }

    /// Returns how many verification requests were received.
    #[must_use]
    pub fn verification_requests(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| !matches!(call, VerificationCall::ResendOtp { .. }))
            .count()
    }

    fn update(&self, apply: impl FnOnce(&mut VerificationScript)) {
        if let Ok(mut script) = self.state.lock() {
            apply(&mut script);
        }
    }

    fn verdict(&self, call: VerificationCall) -> ApiResult<VerificationVerdict> {
        let mut script = self
            .state
            .lock()
            .map_err(|err| ApiError::transport(std::io::Error::other(err.to_string())))?;
        script.calls.push(call);
        let fallback = script.fallback;
        script.verdicts.pop_front().unwrap_or(Ok(fallback))
    }
}

#[async_trait]
impl VerificationApi for ScriptedVerificationApi {
    async fn verify_account(
        &self,
        email: &EmailAddress,
        code: &OtpCode,
    ) -> ApiResult<VerificationVerdict> {
        self.verdict(VerificationCall::VerifyAccount {
            email: email.clone(),
            code: code.clone(),
        })
    }

    async fn validate_reset_otp(
        &self,
        email: &EmailAddress,
        code: &OtpCode,
    ) -> ApiResult<VerificationVerdict> {
        self.verdict(VerificationCall::ValidateResetOtp {
            email: email.clone(),
            code: code.clone(),
        })
    }

    async fn resend_otp(&self, email: &EmailAddress, context: OtpContext) -> ApiResult<()> {
        let mut script = self
            .state
            .lock()
            .map_err(|err| ApiError::transport(std::io::Error::other(err.to_string())))?;
        script.calls.push(VerificationCall::ResendOtp {
            email: email.clone(),
            context,
        });
        script.resend.clone()
    }
}
