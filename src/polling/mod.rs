//! Bounded polling of remote asynchronous tasks.
//!
//! A task is a server-side job identified by an opaque [`domain::TaskId`].
//! The client only observes it: the [`services::TaskPoller`] reads its
//! status on a fixed cadence until the task is terminal, the configured
//! budget runs out, or the caller cancels. The poller has no knowledge of
//! what the task does; callers parameterize it with a
//! [`domain::PollPolicy`].
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
