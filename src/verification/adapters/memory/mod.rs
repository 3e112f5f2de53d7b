//! In-memory verification adapters.

mod verification_api;

pub use verification_api::{ScriptedVerificationApi, VerificationCall};
