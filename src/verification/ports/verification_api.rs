//! Remote verification port.

use crate::api::ApiResult;
use crate::verification::domain::{EmailAddress, OtpCode, OtpContext, VerificationVerdict};
use async_trait::async_trait;

/// Backend operations behind the code-entry form.
#[async_trait]
pub trait VerificationApi: Send + Sync {
    /// Checks a code that confirms a new account.
    ///
    /// # Errors
    ///
    /// Returns [`crate::api::ApiError`] when no verdict could be obtained.
    async fn verify_account(
        &self,
        email: &EmailAddress,
        code: &OtpCode,
    ) -> ApiResult<VerificationVerdict>;

    /// Checks a code that authorizes a password reset.
    ///
    /// # Errors
    ///
    /// Returns [`crate::api::ApiError`] when no verdict could be obtained.
    async fn validate_reset_otp(
        &self,
        email: &EmailAddress,
        code: &OtpCode,
    ) -> ApiResult<VerificationVerdict>;

    /// Sends a new code for `context` to `email`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::api::ApiError`] when the request is not acknowledged.
    async fn resend_otp(&self, email: &EmailAddress, context: OtpContext) -> ApiResult<()>;
}
