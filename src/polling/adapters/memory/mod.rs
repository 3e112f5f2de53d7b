//! Deterministic in-memory polling adapters.

mod status;
mod timer;

pub use status::ScriptedStatusSource;
pub use timer::RecordingPollTimer;
