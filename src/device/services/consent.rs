//! Consent callback handling after the provider redirects back.

use super::DeviceLinkStore;
use crate::device::{
    domain::{ConsentOutcome, ConsentReport},
    ports::DeviceIntegrationApi,
};
use crate::local_state::{LocalState, ports::KeyValueStore};
use mockable::Clock;
use std::sync::Arc;

/// Reports the user's consent decision. Never fails hard: whatever the
/// backend answers, the outcome offers the way back into the app.
pub struct ConsentCallbackHandler<A, K, C>
where
    A: DeviceIntegrationApi,
    K: KeyValueStore,
    C: Clock + Send + Sync,
{
    api: Arc<A>,
    links: DeviceLinkStore<K>,
    clock: Arc<C>,
}

impl<A, K, C> ConsentCallbackHandler<A, K, C>
where
    A: DeviceIntegrationApi,
    K: KeyValueStore,
    C: Clock + Send + Sync,
{
    /// Creates a handler.
    #[must_use]
    pub const fn new(api: Arc<A>, local_state: LocalState<K>, clock: Arc<C>) -> Self {
        Self {
            api,
            links: DeviceLinkStore::new(local_state),
            clock,
        }
    }

    /// Reports `consent_given` once.
    ///
    /// An acknowledged consent marks the device connected and synced today;
    /// an acknowledged refusal forgets the pending link. A failed report
    /// leaves local markers untouched and carries a user-facing error.
    pub async fn handle(&self, consent_given: bool) -> ConsentOutcome {
        let report = ConsentReport::new(consent_given);
        if let Err(error) = self.api.report_consent(report).await {
            tracing::warn!(consent_given, %error, "consent report failed");
            return ConsentOutcome::unreported(report);
        }

        let updated = if consent_given {
            self.links.mark_connected(self.clock.local().date_naive())
        } else {
            self.links.clear_link()
        };
        if let Err(error) = updated {
            tracing::error!(consent_given, %error, "failed to update device link markers");
        }
        tracing::info!(consent_given, "consent reported");
        ConsentOutcome::reported(report)
    }

    /// Handles a consent landing query such as `?consent=false`.
    pub async fn handle_landing(&self, query: &str) -> ConsentOutcome {
        let report = ConsentReport::from_landing_query(query);
        self.handle(report.consent_given()).await
    }
}
