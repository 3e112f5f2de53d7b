//! Step definitions for device integration scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
