//! Transport-level errors shared by every remote collaborator port.

use std::sync::Arc;
use thiserror::Error;

/// Result type for remote API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by remote API adapters.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request could not be sent or the response could not be read.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The bearer token was missing, expired, or rejected.
    #[error("request to {endpoint} was not authorized")]
    Unauthorized {
        /// Endpoint path that rejected the request.
        endpoint: String,
    },

    /// The backend answered with a status the client does not handle.
    #[error("unexpected status {status} from {endpoint}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Endpoint path that returned the status.
        endpoint: String,
    },

    /// The response body did not match the expected shape.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

impl ApiError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Returns `true` when the response body was malformed.
    #[must_use]
    pub const fn is_malformed_payload(&self) -> bool {
        matches!(self, Self::MalformedPayload(_))
    }
}
