//! Timer port used between status reads.

use async_trait::async_trait;
use std::time::Duration;

/// Suspends a polling loop between reads.
///
/// Injected so tests can assert the exact waits without sleeping.
#[async_trait]
pub trait PollTimer: Send + Sync {
    /// Completes after `duration` has elapsed.
    async fn wait(&self, duration: Duration);
}
