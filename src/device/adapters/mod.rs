//! Adapter implementations for device integration ports.

pub mod memory;
