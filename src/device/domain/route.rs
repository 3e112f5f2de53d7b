//! In-app destinations a flow can send the user back to.

use super::ParseAppRouteError;
use std::fmt;

/// Application route offered as the way out of a flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppRoute {
    /// Settings screen hosting the device connection entry point.
    Settings,
    /// Main dashboard.
    Dashboard,
}

impl AppRoute {
    /// Returns the route path.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Settings => "/settings",
            Self::Dashboard => "/dashboard",
        }
    }
}

impl fmt::Display for AppRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AppRoute {
    type Error = ParseAppRouteError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().trim_end_matches('/') {
            "/settings" => Ok(Self::Settings),
            "/dashboard" => Ok(Self::Dashboard),
            _ => Err(ParseAppRouteError(value.to_owned())),
        }
    }
}

/// The single recovery offered by a terminal device-flow failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Go back to settings and start again.
    ReturnToSettings,
}

impl RecoveryAction {
    /// Returns the route that performs the recovery.
    #[must_use]
    pub const fn route(self) -> AppRoute {
        match self {
            Self::ReturnToSettings => AppRoute::Settings,
        }
    }
}
