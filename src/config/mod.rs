//! Layered client configuration.
//!
//! Sources, lowest priority first:
//! 1. Built-in defaults, which reproduce the fixed polling budgets.
//! 2. An optional TOML file.
//! 3. `WEARLINK_*` environment variables, with `__` separating sections,
//!    so `WEARLINK_API__BASE_URL` sets `api.base_url`.

mod error;
mod sections;

pub use error::ConfigError;
pub use sections::{
    ApiConfig, ClientConfig, ConnectionConfig, DisconnectionConfig, OtpConfig, StorageConfig,
};

use crate::polling::domain::{PollBudget, PollPolicy};
use camino::Utf8Path;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::time::Duration;

/// Prefix shared by every environment override.
pub const ENV_PREFIX: &str = "WEARLINK_";

impl ClientConfig {
    /// Loads and validates configuration, layering `file` when it exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be read or
    /// deserialized, and [`ConfigError::InvalidValue`] when a field is out
    /// of range.
    pub fn load(file: Option<&Utf8Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(file).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Builds the provider chain without extracting it.
    #[must_use]
    pub fn figment(file: Option<&Utf8Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = file.filter(|candidate| candidate.exists()) {
            figment = figment.merge(Toml::file(path.as_std_path()));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Rejects values that would make polling or requests meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.timeout_secs == 0 {
            return Err(invalid("api.timeout_secs", "must be greater than zero"));
        }
        if self.connection.interval_ms == 0 {
            return Err(invalid("connection.interval_ms", "must be greater than zero"));
        }
        if self.connection.max_retries == 0 {
            return Err(invalid("connection.max_retries", "must be greater than zero"));
        }
        if self.disconnection.interval_ms == 0 {
            return Err(invalid(
                "disconnection.interval_ms",
                "must be greater than zero",
            ));
        }
        if self.disconnection.max_attempts == 0 {
            return Err(invalid(
                "disconnection.max_attempts",
                "must be greater than zero",
            ));
        }
        if self.otp.max_attempts == 0 {
            return Err(invalid("otp.max_attempts", "must be greater than zero"));
        }
        Ok(())
    }

    /// Returns the API request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Builds the connection polling policy.
    #[must_use]
    pub fn connection_policy(&self) -> PollPolicy {
        PollPolicy::connection()
            .with_interval(Duration::from_millis(self.connection.interval_ms))
            .with_budget(PollBudget::RetrySignals {
                max_retries: self.connection.max_retries,
            })
            .with_max_wait(self.connection.max_wait_secs.map(Duration::from_secs))
    }

    /// Builds the disconnection polling policy.
    #[must_use]
    pub const fn disconnection_policy(&self) -> PollPolicy {
        PollPolicy::disconnection()
            .with_interval(Duration::from_millis(self.disconnection.interval_ms))
            .with_budget(PollBudget::TotalAttempts {
                max_attempts: self.disconnection.max_attempts,
            })
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_owned(),
    }
}
