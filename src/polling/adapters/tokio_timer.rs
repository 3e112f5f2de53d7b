//! Runtime timer backed by `tokio::time`.

use crate::polling::ports::PollTimer;
use async_trait::async_trait;
use std::time::Duration;

/// Poll timer that sleeps on the tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPollTimer;

#[async_trait]
impl PollTimer for TokioPollTimer {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
