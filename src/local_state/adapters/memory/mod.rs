//! In-memory key-value store adapter.

mod store;

pub use store::InMemoryKeyValueStore;
