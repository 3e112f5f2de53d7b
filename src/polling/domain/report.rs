//! Polling progress and terminal outcomes.

use super::TaskStatus;
use crate::api::ApiError;

/// Why a polling loop stopped.
#[derive(Debug, Clone)]
pub enum PollOutcome {
    /// The task reported `SUCCESS`.
    Succeeded,
    /// The task reported `FAILURE`.
    TaskFailed,
    /// The retry-signal or total-attempt budget ran out.
    BudgetExhausted,
    /// A status request failed under [`super::TransportErrorPolicy::Abort`].
    TransportFailed(ApiError),
    /// Another wait would have passed the policy's waiting ceiling.
    TimedOut,
    /// The caller cancelled the loop.
    Cancelled,
}

impl PollOutcome {
    /// Returns a short label for logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::TaskFailed => "task_failed",
            Self::BudgetExhausted => "budget_exhausted",
            Self::TransportFailed(_) => "transport_failed",
            Self::TimedOut => "timed_out",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Snapshot handed to observers after every status read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollTick {
    /// Status returned by this read, or `None` when the request failed.
    pub status: Option<TaskStatus>,
    /// Reads issued so far, including this one.
    pub status_reads: u32,
    /// `RETRY` signals observed so far.
    pub retry_signals: u32,
}

/// Terminal report of a polling loop.
#[derive(Debug, Clone)]
pub struct PollReport {
    outcome: PollOutcome,
    status_reads: u32,
    retry_signals: u32,
}

impl PollReport {
    /// Creates a report.
    #[must_use]
    pub const fn new(outcome: PollOutcome, status_reads: u32, retry_signals: u32) -> Self {
        Self {
            outcome,
            status_reads,
            retry_signals,
        }
    }

    /// Returns the outcome.
    #[must_use]
    pub const fn outcome(&self) -> &PollOutcome {
        &self.outcome
    }

    /// Consumes the report, returning the outcome.
    #[must_use]
    pub fn into_outcome(self) -> PollOutcome {
        self.outcome
    }

    /// Returns the number of status reads issued.
    #[must_use]
    pub const fn status_reads(&self) -> u32 {
        self.status_reads
    }

    /// Returns the number of `RETRY` signals observed.
    #[must_use]
    pub const fn retry_signals(&self) -> u32 {
        self.retry_signals
    }
}
