//! Result of a successful connect task.

use super::{DeviceDomainError, ProviderId, SpikeId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Absolute `http(s)` URL of the provider's authorization page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IntegrationUrl(String);

impl IntegrationUrl {
    /// Creates a validated integration URL.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceDomainError::InvalidIntegrationUrl`] unless the value
    /// is an `http://` or `https://` URL with a non-empty host.
    pub fn new(value: impl AsRef<str>) -> Result<Self, DeviceDomainError> {
        let trimmed = value.as_ref().trim();
        let invalid = || DeviceDomainError::InvalidIntegrationUrl(trimmed.to_owned());
        let (scheme, rest) = trimmed.split_once("://").ok_or_else(invalid)?;
        if !scheme.eq_ignore_ascii_case("https") && !scheme.eq_ignore_ascii_case("http") {
            return Err(invalid());
        }
        let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if authority.is_empty() || authority.chars().any(char::is_whitespace) {
            return Err(invalid());
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for IntegrationUrl {
    type Error = DeviceDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IntegrationUrl> for String {
    fn from(value: IntegrationUrl) -> Self {
        value.0
    }
}

impl fmt::Display for IntegrationUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payload of a connect task that reported `SUCCESS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationResult {
    integration_url: IntegrationUrl,
    spike_id: SpikeId,
    provider: ProviderId,
}

impl IntegrationResult {
    /// Creates an integration result.
    #[must_use]
    pub const fn new(
        integration_url: IntegrationUrl,
        spike_id: SpikeId,
        provider: ProviderId,
    ) -> Self {
        Self {
            integration_url,
            spike_id,
            provider,
        }
    }

    /// Returns the URL the user must be sent to.
    #[must_use]
    pub const fn integration_url(&self) -> &IntegrationUrl {
        &self.integration_url
    }

    /// Returns the external user identifier.
    #[must_use]
    pub const fn spike_id(&self) -> &SpikeId {
        &self.spike_id
    }

    /// Returns the provider the link was created for.
    #[must_use]
    pub const fn provider(&self) -> &ProviderId {
        &self.provider
    }
}
