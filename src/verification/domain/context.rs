//! Why a code was issued.

use super::ParseOtpContextError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Flow a one-time code belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpContext {
    /// Confirming a newly registered account.
    #[default]
    Verify,
    /// Authorizing a password reset.
    ResetPassword,
}

impl OtpContext {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Verify => "verify",
            Self::ResetPassword => "reset_password",
        }
    }
}

impl fmt::Display for OtpContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for OtpContext {
    type Error = ParseOtpContextError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "verify" => Ok(Self::Verify),
            "reset_password" => Ok(Self::ResetPassword),
            _ => Err(ParseOtpContextError(value.to_owned())),
        }
    }
}
