//! Persisted marker keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Keys of every persisted local marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StateKey {
    /// Provider of the most recently linked device.
    DeviceProvider,
    /// External user identifier returned by the integration.
    DeviceSpikeId,
    /// Whether a device is currently connected.
    DeviceConnected,
    /// Date of the last successful device link.
    DeviceLastSyncDate,
    /// Date the daily check-in was last completed.
    CheckInCompletedDate,
    /// Date the daily check-in was last skipped.
    CheckInSkippedDate,
}

impl StateKey {
    /// Every key, in storage order.
    pub const ALL: [Self; 6] = [
        Self::DeviceProvider,
        Self::DeviceSpikeId,
        Self::DeviceConnected,
        Self::DeviceLastSyncDate,
        Self::CheckInCompletedDate,
        Self::CheckInSkippedDate,
    ];

    /// Returns the canonical storage key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DeviceProvider => "device.provider",
            Self::DeviceSpikeId => "device.spike_id",
            Self::DeviceConnected => "device.connected",
            Self::DeviceLastSyncDate => "device.last_sync_date",
            Self::CheckInCompletedDate => "check_in.completed_date",
            Self::CheckInSkippedDate => "check_in.skipped_date",
        }
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for StateKey {
    type Error = ParseStateKeyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == value.trim())
            .ok_or_else(|| ParseStateKeyError(value.to_owned()))
    }
}

/// Error returned while parsing a stored key.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown local state key: {0}")]
pub struct ParseStateKeyError(pub String);
