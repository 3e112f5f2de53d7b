//! Wearlink: wearable device integration client core.
//!
//! This crate drives the client side of linking a wearable device account
//! to a health dashboard: starting a connection, polling the backend task
//! until it settles, handing the user off to the provider, recording the
//! provider consent callback, and unlinking again. It also covers the
//! one-time-passcode verification form and the daily check-in gate.
//!
//! # Architecture
//!
//! Wearlink follows hexagonal architecture principles:
//!
//! - **Domain**: Pure state machines and values with no I/O
//! - **Ports**: Async trait interfaces for the backend, timers, navigation,
//!   and persisted markers
//! - **Adapters**: `reqwest`, Tokio, JSON-file, and in-memory implementations
//!
//! # Modules
//!
//! - [`polling`]: Bounded task-status polling shared by every flow
//! - [`device`]: Connection, disconnection, and consent controllers
//! - [`verification`]: One-time-passcode entry and resend
//! - [`check_in`]: Daily check-in gate
//! - [`local_state`]: Persisted key-value markers
//! - [`messages`]: Localized user-facing messages
//! - [`api`]: HTTP adapter for the remote ports
//! - [`config`]: Layered configuration

pub mod api;
pub mod check_in;
pub mod config;
pub mod device;
pub mod local_state;
pub mod messages;
pub mod polling;
pub mod verification;
