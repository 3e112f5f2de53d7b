//! Persisted local key-value markers.
//!
//! The connected-device indicator, the linked provider and external user
//! identifier, the last sync date, and the daily check-in markers are the
//! only state shared between controllers. They live behind the
//! [`ports::KeyValueStore`] port so state machines can be exercised without
//! a real persisted store. Writers are last-write-wins.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

mod facade;

pub use facade::LocalState;
