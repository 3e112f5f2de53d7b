//! Error types for device integration domain validation.

use thiserror::Error;

/// Errors returned while constructing device integration values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeviceDomainError {
    /// The provider identifier is empty after trimming.
    #[error("provider must not be empty")]
    EmptyProvider,

    /// The external user identifier is empty after trimming.
    #[error("spike id must not be empty")]
    EmptySpikeId,

    /// The integration URL is not an absolute `http(s)` URL.
    #[error("invalid integration url '{0}', expected an absolute http(s) url")]
    InvalidIntegrationUrl(String),

    /// The synchronization query has no usable `task_id`.
    #[error("synchronization query is missing task_id")]
    MissingTaskId,

    /// A query parameter is not valid percent-encoded UTF-8.
    #[error("query parameter '{0}' is not valid percent-encoded utf-8")]
    InvalidQueryEncoding(String),
}

/// Error returned while parsing application routes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown application route: {0}")]
pub struct ParseAppRouteError(pub String);
