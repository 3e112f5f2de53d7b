//! Polling cadence and budget.

use std::time::Duration;

/// Interval between connection status reads.
const CONNECTION_INTERVAL: Duration = Duration::from_millis(3000);
/// `RETRY` signals tolerated while connecting.
const CONNECTION_MAX_RETRIES: u32 = 3;
/// Interval between disconnection status reads.
const DISCONNECTION_INTERVAL: Duration = Duration::from_millis(2000);
/// Status reads allowed while disconnecting.
const DISCONNECTION_MAX_ATTEMPTS: u32 = 3;

/// Which counter bounds a polling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollBudget {
    /// Unbounded reads while `PENDING`; fail once `RETRY` has been observed
    /// `max_retries` times.
    RetrySignals {
        /// Number of `RETRY` signals that exhausts the budget.
        max_retries: u32,
    },
    /// At most `max_attempts` status reads, whatever they return.
    TotalAttempts {
        /// Total status reads allowed.
        max_attempts: u32,
    },
}

impl PollBudget {
    /// Returns the bound, whichever counter it applies to.
    #[must_use]
    pub const fn limit(self) -> u32 {
        match self {
            Self::RetrySignals { max_retries } => max_retries,
            Self::TotalAttempts { max_attempts } => max_attempts,
        }
    }
}

/// How a failed status request affects the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorPolicy {
    /// A failed request ends polling immediately.
    Abort,
    /// A failed request consumes one read and polling continues.
    CountAsAttempt,
}

/// Full parameterization of one polling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    interval: Duration,
    budget: PollBudget,
    on_transport_error: TransportErrorPolicy,
    max_wait: Option<Duration>,
}

impl PollPolicy {
    /// Creates a policy.
    #[must_use]
    pub const fn new(
        interval: Duration,
        budget: PollBudget,
        on_transport_error: TransportErrorPolicy,
    ) -> Self {
        Self {
            interval,
            budget,
            on_transport_error,
            max_wait: None,
        }
    }

    /// Connection synchronization: 3000 ms cadence, three `RETRY` signals,
    /// transport errors are terminal.
    #[must_use]
    pub const fn connection() -> Self {
        Self::new(
            CONNECTION_INTERVAL,
            PollBudget::RetrySignals {
                max_retries: CONNECTION_MAX_RETRIES,
            },
            TransportErrorPolicy::Abort,
        )
    }

    /// Disconnection: 2000 ms cadence, three reads in total, transport
    /// errors consume a read.
    #[must_use]
    pub const fn disconnection() -> Self {
        Self::new(
            DISCONNECTION_INTERVAL,
            PollBudget::TotalAttempts {
                max_attempts: DISCONNECTION_MAX_ATTEMPTS,
            },
            TransportErrorPolicy::CountAsAttempt,
        )
    }

    /// Replaces the interval.
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Replaces the budget.
    #[must_use]
    pub const fn with_budget(mut self, budget: PollBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Caps the total time spent waiting between reads.
    #[must_use]
    pub const fn with_max_wait(mut self, max_wait: Option<Duration>) -> Self {
        self.max_wait = max_wait;
        self
    }

    /// Returns the interval between reads.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the budget.
    #[must_use]
    pub const fn budget(&self) -> PollBudget {
        self.budget
    }

    /// Returns the transport error policy.
    #[must_use]
    pub const fn on_transport_error(&self) -> TransportErrorPolicy {
        self.on_transport_error
    }

    /// Returns the waiting ceiling, if any.
    #[must_use]
    pub const fn max_wait(&self) -> Option<Duration> {
        self.max_wait
    }

    /// Returns `true` when `retry_signals` exhausts a retry-signal budget.
    #[must_use]
    pub const fn retries_exhausted(&self, retry_signals: u32) -> bool {
        match self.budget {
            PollBudget::RetrySignals { max_retries } => retry_signals >= max_retries,
            PollBudget::TotalAttempts { .. } => false,
        }
    }

    /// Returns `true` when `status_reads` exhausts a total-attempt budget.
    #[must_use]
    pub const fn attempts_exhausted(&self, status_reads: u32) -> bool {
        match self.budget {
            PollBudget::TotalAttempts { max_attempts } => status_reads >= max_attempts,
            PollBudget::RetrySignals { .. } => false,
        }
    }

    /// Returns `true` when waiting one more interval would pass the ceiling.
    #[must_use]
    pub fn next_wait_exceeds_ceiling(&self, waited: Duration) -> bool {
        self.max_wait
            .is_some_and(|ceiling| waited.saturating_add(self.interval) > ceiling)
    }
}
