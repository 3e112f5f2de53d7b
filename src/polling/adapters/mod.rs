//! Adapter implementations for polling ports.

pub mod memory;

mod tokio_timer;

pub use tokio_timer::TokioPollTimer;
