//! Navigator that records instead of navigating.

use crate::device::{
    domain::{AppRoute, IntegrationUrl},
    ports::AppNavigator,
};
use std::sync::{Arc, Mutex};

/// A navigation requested through [`RecordingNavigator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The user was sent to an external page.
    External(IntegrationUrl),
    /// The user was sent to an in-app route.
    Route(AppRoute),
}

/// Records every navigation request.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    navigations: Arc<Mutex<Vec<Navigation>>>,
}

impl RecordingNavigator {
    /// Creates a navigator with no recorded navigations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every navigation, in order.
    #[must_use]
    pub fn navigations(&self) -> Vec<Navigation> {
        self.navigations
            .lock()
            .map(|navigations| navigations.clone())
            .unwrap_or_default()
    }

    /// Returns the external pages opened, in order.
    #[must_use]
    pub fn external_urls(&self) -> Vec<IntegrationUrl> {
        self.navigations()
            .into_iter()
            .filter_map(|navigation| match navigation {
                Navigation::External(url) => Some(url),
                Navigation::Route(_) => None,
            })
            .collect()
    }

    /// Returns the in-app routes visited, in order.
    #[must_use]
    pub fn routes(&self) -> Vec<AppRoute> {
        self.navigations()
            .into_iter()
            .filter_map(|navigation| match navigation {
                Navigation::Route(route) => Some(route),
                Navigation::External(_) => None,
            })
            .collect()
    }

    fn record(&self, navigation: Navigation) {
        if let Ok(mut navigations) = self.navigations.lock() {
            navigations.push(navigation);
        }
    }
}

impl AppNavigator for RecordingNavigator {
    fn open_external(&self, url: &IntegrationUrl) {
        self.record(Navigation::External(url.clone()));
    }

    fn go_to(&self, route: AppRoute) {
        self.record(Navigation::Route(route));
    }
}
