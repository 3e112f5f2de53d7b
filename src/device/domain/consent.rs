//! Consent reported after the provider redirects back.

use super::{AppRoute, sync_request::query_param};
use crate::local_state::domain::parse_flag;
use crate::messages::{MessageKey, UserMessage};
use serde::{Deserialize, Serialize};

const CONSENT_PARAM: &str = "consent";

/// The user's decision at the provider's authorization page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentReport {
    consent_given: bool,
}

impl ConsentReport {
    /// Creates a report.
    #[must_use]
    pub const fn new(consent_given: bool) -> Self {
        Self { consent_given }
    }

    /// Reads the `consent` parameter of a landing query.
    ///
    /// An absent, blank, or unreadable parameter counts as consent, since the
    /// provider only redirects back on the success path.
    #[must_use]
    pub fn from_landing_query(query: &str) -> Self {
        let raw = match query_param(query, CONSENT_PARAM) {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => return Self::new(true),
            Err(error) => {
                tracing::warn!(%error, "unreadable consent parameter; assuming consent");
                return Self::new(true);
            }
        };
        parse_flag(&raw).map_or_else(
            || {
                tracing::warn!(value = %raw, "unrecognized consent value; assuming consent");
                Self::new(true)
            },
            Self::new,
        )
    }

    /// Returns `true` when the user authorized the link.
    #[must_use]
    pub const fn consent_given(self) -> bool {
        self.consent_given
    }
}

/// Result of handling a consent landing. Always offers a way back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentOutcome {
    report: ConsentReport,
    reported: bool,
    error: Option<UserMessage>,
    next_route: AppRoute,
}

impl ConsentOutcome {
    /// Outcome of a report the backend acknowledged.
    #[must_use]
    pub const fn reported(report: ConsentReport) -> Self {
        Self {
            report,
            reported: true,
            error: None,
            next_route: AppRoute::Dashboard,
        }
    }

    /// Outcome of a report that could not be delivered.
    #[must_use]
    pub fn unreported(report: ConsentReport) -> Self {
        Self {
            report,
            reported: false,
            error: Some(UserMessage::new(MessageKey::ConsentReportFailed)),
            next_route: AppRoute::Dashboard,
        }
    }

    /// Returns the decision that was reported.
    #[must_use]
    pub const fn report(&self) -> ConsentReport {
        self.report
    }

    /// Returns `true` when the backend acknowledged the report.
    #[must_use]
    pub const fn is_reported(&self) -> bool {
        self.reported
    }

    /// Returns the error to show, if reporting failed.
    #[must_use]
    pub const fn error(&self) -> Option<&UserMessage> {
        self.error.as_ref()
    }

    /// Returns where the user goes next, whatever happened.
    #[must_use]
    pub const fn next_route(&self) -> AppRoute {
        self.next_route
    }
}
