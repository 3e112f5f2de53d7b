//! Error types for verification domain validation.

use thiserror::Error;

/// Errors returned while constructing verification values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerificationDomainError {
    /// The email address is not of the form `local@domain`.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The code is not exactly six ASCII digits.
    #[error("verification code must be exactly 6 digits")]
    MalformedCode,
}

/// Error returned while parsing an OTP context.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown otp context: {0}")]
pub struct ParseOtpContextError(pub String);
