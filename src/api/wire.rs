//! JSON bodies exchanged with the backend.

use super::{ApiError, ApiResult};
use crate::device::domain::{IntegrationResult, IntegrationUrl, ProviderId, SpikeId};
use crate::polling::domain::{TaskId, TaskStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct ConnectRequest<'a> {
    pub provider: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct ConsentRequest {
    pub consent_given: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct CodeRequest<'a> {
    pub email: &'a str,
    pub code: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct ResendRequest<'a> {
    pub email: &'a str,
    pub context: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct TaskSubmitted {
    task_id: String,
}

impl TaskSubmitted {
    pub(super) fn into_task_id(self) -> ApiResult<TaskId> {
        TaskId::new(self.task_id).map_err(malformed)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TaskStatusBody {
    status: String,
}

impl TaskStatusBody {
    pub(super) fn into_status(self) -> ApiResult<TaskStatus> {
        TaskStatus::try_from(self.status.as_str()).map_err(malformed)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TaskResultFields {
    integration_url: String,
    spike_id: String,
    provider: String,
}

/// Result body, either bare or under a `result` key.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum TaskResultBody {
    Wrapped { result: TaskResultFields },
    Bare(TaskResultFields),
}

impl TaskResultBody {
    pub(super) fn into_result(self) -> ApiResult<IntegrationResult> {
        let fields = match self {
            Self::Wrapped { result } => result,
            Self::Bare(fields) => fields,
        };
        Ok(IntegrationResult::new(
            IntegrationUrl::new(fields.integration_url).map_err(malformed)?,
            SpikeId::new(fields.spike_id).map_err(malformed)?,
            ProviderId::new(fields.provider).map_err(malformed)?,
        ))
    }
}

fn malformed(err: impl std::fmt::Display) -> ApiError {
    ApiError::MalformedPayload(err.to_string())
}
