//! Adapter implementations for verification ports.

pub mod memory;
