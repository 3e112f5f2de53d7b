//! Poll timer that records waits instead of sleeping.

use crate::polling::ports::PollTimer;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Records every requested wait and returns immediately.
///
/// Optionally cancels a token once a given number of waits has been
/// requested, which simulates the owning screen being torn down mid-poll.
#[derive(Debug, Clone, Default)]
pub struct RecordingPollTimer {
    state: Arc<Mutex<TimerState>>,
}

#[derive(Debug, Default)]
struct TimerState {
    waits: Vec<Duration>,
    cancel_after: Option<(usize, CancellationToken)>,
}

impl RecordingPollTimer {
    /// Creates a timer with no recorded waits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels `token` when the `waits`-th wait is requested.
    pub fn cancel_after(&self, waits: usize, token: CancellationToken) {
        if let Ok(mut state) = self.state.lock() {
            state.cancel_after = Some((waits, token));
        }
    }

    /// Returns every wait requested so far, in order.
    #[must_use]
    pub fn waits(&self) -> Vec<Duration> {
        self.state
            .lock()
            .map(|state| state.waits.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PollTimer for RecordingPollTimer {
    async fn wait(&self, duration: Duration) {
        if let Ok(mut state) = self.state.lock() {
            state.waits.push(duration);
            let recorded = state.waits.len();
            if let Some((threshold, token)) = &state.cancel_after {
                if recorded >= *threshold {
                    token.cancel();
                }
            }
        }
        tokio::task::yield_now().await;
    }
}
