//! Identifier and validated scalar types for the device domain.

use super::DeviceDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Wearable data provider chosen by the user, for example `garmin`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProviderId(String);

impl ProviderId {
    /// Creates a validated provider identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceDomainError::EmptyProvider`] when the value is blank.
    pub fn new(value: impl AsRef<str>) -> Result<Self, DeviceDomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DeviceDomainError::EmptyProvider);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the provider as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProviderId {
    type Error = DeviceDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProviderId> for String {
    fn from(value: ProviderId) -> Self {
        value.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// External user identifier assigned by the integration service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SpikeId(String);

impl SpikeId {
    /// Creates a validated external user identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceDomainError::EmptySpikeId`] when the value is blank.
    pub fn new(value: impl AsRef<str>) -> Result<Self, DeviceDomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DeviceDomainError::EmptySpikeId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SpikeId {
    type Error = DeviceDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SpikeId> for String {
    fn from(value: SpikeId) -> Self {
        value.0
    }
}

impl fmt::Display for SpikeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Client-side identifier correlating log events of one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttemptId(Uuid);

impl AttemptId {
    /// Creates a new random attempt identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an attempt identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for AttemptId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
