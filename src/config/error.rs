//! Configuration error types.

use thiserror::Error;

/// Errors raised while loading [`super::ClientConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A provider failed to merge or the result did not deserialize.
    #[error("configuration error: {0}")]
    Figment(Box<figment::Error>),

    /// A field parsed but carries an unusable value.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}
