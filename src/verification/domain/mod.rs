//! Domain model for one-time code verification.

mod challenge;
mod code;
mod context;
mod email;
mod error;
mod outcome;

pub use challenge::{DEFAULT_MAX_ATTEMPTS, OtpChallenge};
pub use code::{OTP_CODE_LENGTH, OtpCode};
pub use context::OtpContext;
pub use email::EmailAddress;
pub use error::{ParseOtpContextError, VerificationDomainError};
pub use outcome::{
    OtpFeedback, OtpFormState, OtpResendError, OtpSubmitError, OtpSuccess, PasswordResetGrant,
    VerificationVerdict,
};
