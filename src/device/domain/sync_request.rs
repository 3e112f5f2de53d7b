//! Parameters of the synchronization screen.

use super::{DeviceDomainError, ProviderId};
use crate::polling::domain::TaskId;

const TASK_ID_PARAM: &str = "task_id";
const PROVIDER_PARAM: &str = "provider";

/// Identifies the connect task a synchronization screen polls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    task_id: TaskId,
    provider: Option<ProviderId>,
}

impl SyncRequest {
    /// Creates a synchronization request.
    #[must_use]
    pub const fn new(task_id: TaskId, provider: Option<ProviderId>) -> Self {
        Self { task_id, provider }
    }

    /// Parses `task_id=...&provider=...` with or without a leading `?`.
    ///
    /// Values are percent-decoded and `+` reads as a space. A blank
    /// `provider` reads as absent.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceDomainError::MissingTaskId`] when `task_id` is absent
    /// or blank, and [`DeviceDomainError::InvalidQueryEncoding`] when a value
    /// does not decode to UTF-8.
    pub fn from_query(query: &str) -> Result<Self, DeviceDomainError> {
        let raw_task_id =
            query_param(query, TASK_ID_PARAM)?.ok_or(DeviceDomainError::MissingTaskId)?;
        let task_id = TaskId::new(raw_task_id).map_err(|_| DeviceDomainError::MissingTaskId)?;
        let provider = query_param(query, PROVIDER_PARAM)?
            .and_then(|value| ProviderId::new(value).ok());
        Ok(Self { task_id, provider })
    }

    /// Renders the request as a query string without the leading `?`.
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut query = format!(
            "{TASK_ID_PARAM}={}",
            urlencoding::encode(self.task_id.as_str())
        );
        if let Some(provider) = &self.provider {
            query.push('&');
            query.push_str(PROVIDER_PARAM);
            query.push('=');
            query.push_str(&urlencoding::encode(provider.as_str()));
        }
        query
    }

    /// Returns the connect task identifier.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the provider, when the query named one.
    #[must_use]
    pub const fn provider(&self) -> Option<&ProviderId> {
        self.provider.as_ref()
    }
}

/// Returns the decoded value of the first occurrence of `name`.
pub(crate) fn query_param(query: &str, name: &str) -> Result<Option<String>, DeviceDomainError> {
    let query = query.trim().trim_start_matches('?');
    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if decode(key)? != name {
            continue;
        }
        return decode(value).map(Some);
    }
    Ok(None)
}

fn decode(raw: &str) -> Result<String, DeviceDomainError> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(std::borrow::Cow::into_owned)
        .map_err(|_| DeviceDomainError::InvalidQueryEncoding(raw.to_owned()))
}
