//! Domain model for remote task polling.

mod error;
mod ids;
mod policy;
mod report;
mod status;

pub use error::{ParseTaskStatusError, PollingDomainError};
pub use ids::TaskId;
pub use policy::{PollBudget, PollPolicy, TransportErrorPolicy};
pub use report::{PollOutcome, PollReport, PollTick};
pub use status::TaskStatus;
