//! Polling services.

mod handle;
mod poller;

pub use handle::{PollHandle, PollJoinError};
pub use poller::TaskPoller;
