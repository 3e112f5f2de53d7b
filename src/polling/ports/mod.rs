//! Port contracts for remote task polling.

pub mod status_source;
pub mod timer;

pub use status_source::TaskStatusSource;
pub use timer::PollTimer;
