//! Remote device integration port.

use crate::api::ApiResult;
use crate::device::domain::{ConsentReport, IntegrationResult, ProviderId};
use crate::polling::{domain::TaskId, ports::TaskStatusSource};
use async_trait::async_trait;

/// Backend operations behind the connect, disconnect, and consent flows.
///
/// Connect and disconnect are asynchronous jobs: submission returns a
/// [`TaskId`] whose status is read through [`TaskStatusSource`].
#[async_trait]
pub trait DeviceIntegrationApi: TaskStatusSource {
    /// Submits a connect job for `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::api::ApiError`] when the job cannot be submitted.
    async fn submit_connect(&self, provider: &ProviderId) -> ApiResult<TaskId>;

    /// Reads the result of a connect task that reported `SUCCESS`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::api::ApiError`] when the result cannot be read or
    /// is malformed.
    async fn task_result(&self, task_id: &TaskId) -> ApiResult<IntegrationResult>;

    /// Submits a disconnect job for the current user's device.
    ///
    /// # Errors
    ///
    /// Returns [`crate::api::ApiError`] when the job cannot be submitted.
    async fn submit_disconnect(&self) -> ApiResult<TaskId>;

    /// Reports the user's consent decision.
    ///
    /// # Errors
    ///
    /// Returns [`crate::api::ApiError`] when the report is not acknowledged.
    async fn report_consent(&self, report: ConsentReport) -> ApiResult<()>;
}
