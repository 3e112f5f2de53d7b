//! Adapter implementations for the key-value store port.

pub mod memory;

mod json_file;

pub use json_file::JsonFileKeyValueStore;
