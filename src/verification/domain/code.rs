//! One-time verification code.

use super::VerificationDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of digits in a code.
pub const OTP_CODE_LENGTH: usize = 6;

/// Six ASCII digits, ready to submit.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OtpCode(String);

impl OtpCode {
    /// Parses user input into a code.
    ///
    /// Surrounding whitespace is ignored; anything else must be a digit.
    ///
    /// # Errors
    ///
    /// Returns [`VerificationDomainError::MalformedCode`] unless the trimmed
    /// input is exactly six ASCII digits.
    pub fn parse(input: &str) -> Result<Self, VerificationDomainError> {
        let trimmed = input.trim();
        if trimmed.len() != OTP_CODE_LENGTH || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(VerificationDomainError::MalformedCode);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Codes stay out of logs.
impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtpCode(******)")
    }
}

impl TryFrom<String> for OtpCode {
    type Error = VerificationDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<OtpCode> for String {
    fn from(value: OtpCode) -> Self {
        value.0
    }
}
