//! Task status port.

use crate::api::ApiResult;
use crate::polling::domain::{TaskId, TaskStatus};
use async_trait::async_trait;

/// Reads the current status of a remote task.
#[async_trait]
pub trait TaskStatusSource: Send + Sync {
    /// Returns the task's current status.
    ///
    /// # Errors
    ///
    /// Returns [`crate::api::ApiError`] when the status cannot be read.
    async fn task_status(&self, task_id: &TaskId) -> ApiResult<TaskStatus>;
}
