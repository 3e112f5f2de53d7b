//! `reqwest` adapter for every remote port.

use super::{
    ApiError, ApiResult,
    wire::{
        CodeRequest, ConnectRequest, ConsentRequest, ResendRequest, TaskResultBody,
        TaskStatusBody, TaskSubmitted,
    },
};
use crate::device::{
    domain::{ConsentReport, IntegrationResult, ProviderId},
    ports::DeviceIntegrationApi,
};
use crate::polling::{
    domain::{TaskId, TaskStatus},
    ports::TaskStatusSource,
};
use crate::verification::{
    domain::{EmailAddress, OtpCode, OtpContext, VerificationVerdict},
    ports::VerificationApi,
};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

const CONNECT_PATH: &str = "/integrations/connect";
const DISCONNECT_PATH: &str = "/integrations/disconnect";
const CONSENT_PATH: &str = "/integrations/consent";
const VERIFY_PATH: &str = "/auth/verify";
const VALIDATE_RESET_PATH: &str = "/auth/password-reset/validate-otp";
const RESEND_PATH: &str = "/auth/otp/resend";

/// JSON-over-HTTPS client for the health dashboard backend.
///
/// Every request carries the bearer token, when one is configured, and is
/// bounded by the client timeout.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    http: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpApiClient {
    /// Creates a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        bearer_token: Option<String>,
        timeout: Duration,
    ) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::transport)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            bearer_token,
        })
    }

    /// Returns the base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, format!("{}{path}", self.base_url));
        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn send(&self, builder: RequestBuilder, endpoint: &str) -> ApiResult<Response> {
        let response = builder.send().await.map_err(ApiError::transport)?;
        tracing::debug!(endpoint, status = response.status().as_u16(), "backend responded");
        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        endpoint: &str,
    ) -> ApiResult<T> {
        let response = self.send(builder, endpoint).await?;
        ensure_success(response.status(), endpoint)?;
        let body = response.bytes().await.map_err(ApiError::transport)?;
        serde_json::from_slice(&body)
            .map_err(|err| ApiError::MalformedPayload(format!("{endpoint}: {err}")))
    }

    async fn verdict(
        &self,
        path: &str,
        email: &EmailAddress,
        code: &OtpCode,
    ) -> ApiResult<VerificationVerdict> {
        let builder = self.request(Method::POST, path).json(&CodeRequest {
            email: email.as_str(),
            code: code.as_str(),
        });
        let response = self.send(builder, path).await?;
        verdict_for_status(response.status(), path)
    }
}

/// Maps a non-success status to an [`ApiError`].
fn ensure_success(status: StatusCode, endpoint: &str) -> ApiResult<()> {
    if status.is_success() {
        return Ok(());
    }
    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        return Err(ApiError::Unauthorized {
            endpoint: endpoint.to_owned(),
        });
    }
    Err(ApiError::UnexpectedStatus {
        status: status.as_u16(),
        endpoint: endpoint.to_owned(),
    })
}

/// Maps a verification response status to a verdict.
///
/// The backend answers a wrong or expired code with a client error, so
/// those statuses are rejections rather than failures.
fn verdict_for_status(status: StatusCode, endpoint: &str) -> ApiResult<VerificationVerdict> {
    if status.is_success() {
        return Ok(VerificationVerdict::Accepted);
    }
    match status {
        StatusCode::BAD_REQUEST
        | StatusCode::UNAUTHORIZED
        | StatusCode::FORBIDDEN
        | StatusCode::UNPROCESSABLE_ENTITY => Ok(VerificationVerdict::Rejected),
        _ => Err(ApiError::UnexpectedStatus {
            status: status.as_u16(),
            endpoint: endpoint.to_owned(),
        }),
    }
}

fn task_path(task_id: &TaskId, leaf: &str) -> String {
    format!("/tasks/{}/{leaf}", urlencoding::encode(task_id.as_str()))
}

#[async_trait]
impl TaskStatusSource for HttpApiClient {
    async fn task_status(&self, task_id: &TaskId) -> ApiResult<TaskStatus> {
        let path = task_path(task_id, "status");
        self.fetch::<TaskStatusBody>(self.request(Method::GET, &path), &path)
            .await?
            .into_status()
    }
}

#[async_trait]
impl DeviceIntegrationApi for HttpApiClient {
    async fn submit_connect(&self, provider: &ProviderId) -> ApiResult<TaskId> {
        let builder = self.request(Method::POST, CONNECT_PATH).json(&ConnectRequest {
            provider: provider.as_str(),
        });
        self.fetch::<TaskSubmitted>(builder, CONNECT_PATH)
            .await?
            .into_task_id()
    }

    async fn task_result(&self, task_id: &TaskId) -> ApiResult<IntegrationResult> {
        let path = task_path(task_id, "result");
        self.fetch::<TaskResultBody>(self.request(Method::GET, &path), &path)
            .await?
            .into_result()
    }

    async fn submit_disconnect(&self) -> ApiResult<TaskId> {
        let builder = self.request(Method::POST, DISCONNECT_PATH);
        self.fetch::<TaskSubmitted>(builder, DISCONNECT_PATH)
            .await?
            .into_task_id()
    }

    async fn report_consent(&self, report: ConsentReport) -> ApiResult<()> {
        let builder = self.request(Method::POST, CONSENT_PATH).json(&ConsentRequest {
            consent_given: report.consent_given(),
        });
        let response = self.send(builder, CONSENT_PATH).await?;
        ensure_success(response.status(), CONSENT_PATH)
    }
}

#[async_trait]
impl VerificationApi for HttpApiClient {
    async fn verify_account(
        &self,
        email: &EmailAddress,
        code: &OtpCode,
    ) -> ApiResult<VerificationVerdict> {
        self.verdict(VERIFY_PATH, email, code).await
    }

    async fn validate_reset_otp(
        &self,
        email: &EmailAddress,
        code: &OtpCode,
    ) -> ApiResult<VerificationVerdict> {
        self.verdict(VALIDATE_RESET_PATH, email, code).await
    }

    async fn resend_otp(&self, email: &EmailAddress, context: OtpContext) -> ApiResult<()> {
        let builder = self.request(Method::POST, RESEND_PATH).json(&ResendRequest {
            email: email.as_str(),
            context: context.as_str(),
        });
        let response = self.send(builder, RESEND_PATH).await?;
        ensure_success(response.status(), RESEND_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(200)]
    #[case(202)]
    #[case(204)]
    fn success_statuses_pass(#[case] code: u16) {
        let status = StatusCode::from_u16(code).expect("valid status");
        assert!(ensure_success(status, CONNECT_PATH).is_ok());
    }

    #[rstest]
    #[case(StatusCode::UNAUTHORIZED)]
    #[case(StatusCode::FORBIDDEN)]
    fn auth_failures_are_unauthorized(#[case] status: StatusCode) {
        assert!(matches!(
            ensure_success(status, CONNECT_PATH),
            Err(ApiError::Unauthorized { endpoint }) if endpoint == CONNECT_PATH
        ));
    }

    #[test]
    fn other_failures_keep_their_status() {
        assert!(matches!(
            ensure_success(StatusCode::BAD_GATEWAY, DISCONNECT_PATH),
            Err(ApiError::UnexpectedStatus { status: 502, .. })
        ));
    }

    #[rstest]
    #[case(StatusCode::OK, VerificationVerdict::Accepted)]
    #[case(StatusCode::BAD_REQUEST, VerificationVerdict::Rejected)]
    #[case(StatusCode::UNAUTHORIZED, VerificationVerdict::Rejected)]
    #[case(StatusCode::FORBIDDEN, VerificationVerdict::Rejected)]
    #[case(StatusCode::UNPROCESSABLE_ENTITY, VerificationVerdict::Rejected)]
    fn verification_statuses_map_to_verdicts(
        #[case] status: StatusCode,
        #[case] expected: VerificationVerdict,
    ) {
        assert!(matches!(
            verdict_for_status(status, VERIFY_PATH),
            Ok(verdict) if verdict == expected
        ));
    }

    #[test]
    fn verification_server_errors_are_not_rejections() {
        assert!(matches!(
            verdict_for_status(StatusCode::SERVICE_UNAVAILABLE, VERIFY_PATH),
            Err(ApiError::UnexpectedStatus { status: 503, .. })
        ));
    }

    #[test]
    fn task_paths_escape_identifiers() {
        let task_id = TaskId::new("a/b c").expect("valid task id");
        assert_eq!(task_path(&task_id, "status"), "/tasks/a%2Fb%20c/status");
    }

    #[test]
    fn base_url_drops_trailing_slashes() {
        let client = HttpApiClient::new("https://api.example.com/v1/", None, Duration::from_secs(5))
            .expect("client builds");
        assert_eq!(client.base_url(), "https://api.example.com/v1");
    }
}
