//! Scripted device integration backend.

use crate::api::{ApiError, ApiResult};
use crate::device::{
    domain::{ConsentReport, IntegrationResult, ProviderId},
    ports::DeviceIntegrationApi,
};
use crate::polling::{
    adapters::memory::ScriptedStatusSource,
    domain::{TaskId, TaskStatus},
    ports::TaskStatusSource,
};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// A call received by [`ScriptedDeviceApi`], excluding status reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceApiCall {
    /// `submit_connect` for a provider.
    SubmitConnect(ProviderId),
    /// `task_result` for a task.
    TaskResult(TaskId),
    /// `submit_disconnect`.
    SubmitDisconnect,
    /// `report_consent` with the reported decision.
    ReportConsent(bool),
}

/// In-memory backend with configurable responses.
///
/// Status reads are served by an embedded [`ScriptedStatusSource`]; every
/// other call is recorded and answered with the configured response.
#[derive(Debug, Clone)]
pub struct ScriptedDeviceApi {
    statuses: ScriptedStatusSource,
    state: Arc<Mutex<ApiScript>>,
}

#[derive(Debug)]
struct ApiScript {
    connect: ApiResult<TaskId>,
    disconnect: ApiResult<TaskId>,
    result: ApiResult<IntegrationResult>,
    consent: ApiResult<()>,
    calls: Vec<DeviceApiCall>,
}

impl ScriptedDeviceApi {
    /// Creates a backend that accepts every submission with `task_id` and
    /// has no connect result until one is configured.
    #[must_use]
    pub fn new(task_id: TaskId) -> Self {
        Self {
            statuses: ScriptedStatusSource::new(),
            state: Arc::new(Mutex::new(ApiScript {
                connect: Ok(task_id.clone()),
                disconnect: Ok(task_id),
                result: Err(ApiError::MalformedPayload(
                    "no connect result configured".to_owned(),
                )),
                consent: Ok(()),
                calls: Vec::new(),
            })),
        }
    }

    /// Returns the embedded status script.
    #[must_use]
    pub const fn statuses(&self) -> &ScriptedStatusSource {
        &self.statuses
    }

    /// Appends statuses to the status script.
    pub fn push_statuses(&self, statuses: impl IntoIterator<Item = TaskStatus>) {
        for status in statuses {
            self.statuses.push_status(status);
        }
    }

    /// Sets the response to `submit_connect`.
    pub fn set_connect_response(&self, response: ApiResult<TaskId>) {
        self.update(|script| script.connect = response);
    }

    /// Sets the response to `submit_disconnect`.
    pub fn set_disconnect_response(&self, response: ApiResult<TaskId>) {
        self.update(|script| script.disconnect = response);
    }

    /// Sets the response to `task_result`.
    pub fn set_result(&self, response: ApiResult<IntegrationResult>) {
        self.update(|script| script.result = response);
    }

    /// Sets the response to `report_consent`.
    pub fn set_consent_response(&self, response: ApiResult<()>) {
        self.update(|script| script.consent = response);
    }

    /// Returns every recorded call except status reads, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<DeviceApiCall> {
        self.state
            .lock()
            .map(|script| script.calls.clone())
            .unwrap_or_default()
    }

    /// Returns how many status reads have been served.
    #[must_use]
    pub fn status_reads(&self) -> usize {
        self.statuses.read_count()
    }

    fn update(&self, apply: impl FnOnce(&mut ApiScript)) {
        if let Ok(mut script) = self.state.lock() {
            apply(&mut script);
        }
    }

    fn respond<T: Clone>(
        &self,
        call: DeviceApiCall,
        pick: impl FnOnce(&ApiScript) -> &ApiResult<T>,
    ) -> ApiResult<T> {
        let mut script = self
            .state
            .lock()
            .map_err(|err| ApiError::transport(std::io::Error::other(err.to_string())))?;
        script.calls.push(call);
        pick(&script).clone()
    }
}

#[async_trait]
impl TaskStatusSource for ScriptedDeviceApi {
    async fn task_status(&self, task_id: &TaskId) -> ApiResult<TaskStatus> {
        self.statuses.task_status(task_id).await
    }
}

#[async_trait]
impl DeviceIntegrationApi for ScriptedDeviceApi {
    async fn submit_connect(&self, provider: &ProviderId) -> ApiResult<TaskId> {
        self.respond(DeviceApiCall::SubmitConnect(provider.clone()), |script| {
            &script.connect
        })
    }

    async fn task_result(&self, task_id: &TaskId) -> ApiResult<IntegrationResult> {
        self.respond(DeviceApiCall::TaskResult(task_id.clone()), |script| {
            &script.result
        })
    }

    async fn submit_disconnect(&self) -> ApiResult<TaskId> {
        self.respond(DeviceApiCall::SubmitDisconnect, |script| &script.disconnect)
    }

    async fn report_consent(&self, report: ConsentReport) -> ApiResult<()> {
        self.respond(
            DeviceApiCall::ReportConsent(report.consent_given()),
            |script| &script.consent,
        )
    }
}
