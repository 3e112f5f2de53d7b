//! Domain model for the daily check-in gate.

mod decision;
mod markers;

pub use decision::{CheckInDecision, decide};
pub use markers::CheckInMarkers;
