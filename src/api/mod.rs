//! JSON-over-HTTPS transport for every remote collaborator.
//!
//! [`ApiError`] is shared by all remote ports so controllers can treat a
//! failed request the same way whichever backend operation produced it.

mod client;
mod error;
mod wire;

pub use client::HttpApiClient;
pub use error::{ApiError, ApiResult};
