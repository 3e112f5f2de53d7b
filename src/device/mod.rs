//! Wearable device integration.
//!
//! Connecting a device is a server-side job: the client submits it, polls
//! the resulting task, and on success sends the user to the provider's
//! authorization page. The provider later redirects back to a consent
//! landing, which reports the decision. Disconnecting is a second job
//! polled with a fixed attempt cap.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
