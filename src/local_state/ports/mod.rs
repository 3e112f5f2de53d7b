//! Port contracts for persisted local markers.

pub mod store;

pub use store::{KeyValueStore, StoreError, StoreResult};
