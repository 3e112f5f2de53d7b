//! Configuration sections.

use crate::messages::Locale;
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_connection_interval_ms() -> u64 {
    3000
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_disconnection_interval_ms() -> u64 {
    2000
}

const fn default_disconnection_attempts() -> u32 {
    3
}

const fn default_otp_attempts() -> u32 {
    5
}

fn default_state_file() -> Utf8PathBuf {
    Utf8PathBuf::from("wearlink-state.json")
}

/// Backend endpoint and credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is joined onto.
    #[serde(default)]
    pub base_url: String,

    /// Bearer token for the signed-in user.
    #[serde(default)]
    pub bearer_token: Option<String>,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Connection polling cadence and budget.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConnectionConfig {
    /// Milliseconds between status reads.
    #[serde(default = "default_connection_interval_ms")]
    pub interval_ms: u64,

    /// `RETRY` signals that fail the attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Optional ceiling on total waiting, in seconds.
    #[serde(default)]
    pub max_wait_secs: Option<u64>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_connection_interval_ms(),
            max_retries: default_max_retries(),
            max_wait_secs: None,
        }
    }
}

/// Disconnection polling cadence and budget.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DisconnectionConfig {
    /// Milliseconds between status reads.
    #[serde(default = "default_disconnection_interval_ms")]
    pub interval_ms: u64,

    /// Total status reads allowed.
    #[serde(default = "default_disconnection_attempts")]
    pub max_attempts: u32,
}

impl Default for DisconnectionConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_disconnection_interval_ms(),
            max_attempts: default_disconnection_attempts(),
        }
    }
}

/// One-time-passcode limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Wrong codes tolerated before the form locks.
    #[serde(default = "default_otp_attempts")]
    pub max_attempts: u32,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_otp_attempts(),
        }
    }
}

/// Where persisted markers live.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// JSON document holding the local markers.
    #[serde(default = "default_state_file")]
    pub state_file: Utf8PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
        }
    }
}

/// Every section together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Backend settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Connection polling.
    #[serde(default)]
    pub connection: ConnectionConfig,
    /// Disconnection polling.
    #[serde(default)]
    pub disconnection: DisconnectionConfig,
    /// Passcode limits.
    #[serde(default)]
    pub otp: OtpConfig,
    /// Local marker storage.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Language used to render user messages.
    #[serde(default)]
    pub locale: Locale,
}
