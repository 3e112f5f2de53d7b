//! Error types for polling domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing polling domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PollingDomainError {
    /// The task identifier is empty after trimming.
    #[error("task identifier must not be empty")]
    EmptyTaskId,
}

/// Error returned while parsing a task status from the wire.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
