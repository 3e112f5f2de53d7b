//! Navigation port.

use crate::device::domain::{AppRoute, IntegrationUrl};

/// Moves the user between screens or out of the application.
pub trait AppNavigator: Send + Sync {
    /// Leaves the application for an external page.
    fn open_external(&self, url: &IntegrationUrl);

    /// Navigates to an in-app route.
    fn go_to(&self, route: AppRoute);
}
