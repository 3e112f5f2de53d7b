//! Scripted task status source.

use crate::api::{ApiError, ApiResult};
use crate::polling::{
    domain::{TaskId, TaskStatus},
    ports::TaskStatusSource,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Status source that replays a fixed script of responses.
///
/// Once the script is exhausted every further read returns the fallback
/// status (`PENDING` unless configured otherwise).
#[derive(Debug, Clone)]
pub struct ScriptedStatusSource {
    state: Arc<Mutex<ScriptState>>,
}

#[derive(Debug)]
struct ScriptState {
    script: VecDeque<ApiResult<TaskStatus>>,
    fallback: TaskStatus,
    reads: Vec<TaskId>,
}

impl Default for ScriptedStatusSource {
    fn default() -> Self {
        Self::with_fallback(TaskStatus::Pending)
    }
}

impl ScriptedStatusSource {
    /// Creates an empty script that always answers `PENDING`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty script with a custom fallback status.
    #[must_use]
    pub fn with_fallback(fallback: TaskStatus) -> Self {
        Self {
            state: Arc::new(Mutex::new(ScriptState {
                script: VecDeque::new(),
                fallback,
                reads: Vec::new(),
            })),
        }
    }

    /// Creates a script from a sequence of statuses.
    #[must_use]
    pub fn with_statuses(statuses: impl IntoIterator<Item = TaskStatus>) -> Self {
        let source = Self::new();
        for status in statuses {
            source.push_status(status);
        }
        source
    }

    /// Appends a status to the script.
    pub fn push_status(&self, status: TaskStatus) {
        self.push(Ok(status));
    }

    /// Appends a failed read to the script.
    pub fn push_error(&self, error: ApiError) {
        self.push(Err(error));
    }

    fn push(&self, response: ApiResult<TaskStatus>) {
        if let Ok(mut state) = self.state.lock() {
            state.script.push_back(response);
        }
    }

    /// Returns how many status reads have been served.
    #[must_use]
    pub fn read_count(&self) -> usize {
        self.state.lock().map(|state| state.reads.len()).unwrap_or(0)
    }

    /// Returns the task identifiers of every read, in order.
    #[must_use]
    pub fn requested_ids(&self) -> Vec<TaskId> {
        self.state
            .lock()
            .map(|state| state.reads.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TaskStatusSource for ScriptedStatusSource {
    async fn task_status(&self, task_id: &TaskId) -> ApiResult<TaskStatus> {
        let mut state = self
            .state
            .lock()
            .map_err(|err| ApiError::transport(std::io::Error::other(err.to_string())))?;
        state.reads.push(task_id.clone());
        let fallback = state.fallback;
        state.script.pop_front().unwrap_or(Ok(fallback))
    }
}
