//! Port contracts for one-time code verification.

pub mod verification_api;

pub use verification_api::VerificationApi;
