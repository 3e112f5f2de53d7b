//! Daily check-in gate over persisted markers.

use crate::check_in::domain::{CheckInDecision, CheckInMarkers, decide};
use crate::local_state::{
    LocalState,
    domain::StateKey,
    ports::{KeyValueStore, StoreResult},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;

/// Decides once per local day whether to prompt for a check-in.
pub struct DailyCheckInGate<K, C>
where
    K: KeyValueStore,
    C: Clock + Send + Sync,
{
    state: LocalState<K>,
    clock: Arc<C>,
}

impl<K, C> DailyCheckInGate<K, C>
where
    K: KeyValueStore,
    C: Clock + Send + Sync,
{
    /// Creates a gate.
    #[must_use]
    pub const fn new(state: LocalState<K>, clock: Arc<C>) -> Self {
        Self { state, clock }
    }

    /// Returns today's local date.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.local().date_naive()
    }

    /// Reads the current markers. Unparsable dates read as absent.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn markers(&self) -> StoreResult<CheckInMarkers> {
        Ok(CheckInMarkers::new()
            .with_completed_date(self.state.date(StateKey::CheckInCompletedDate)?)
            .with_skipped_date(self.state.date(StateKey::CheckInSkippedDate)?)
            .with_device_connected(self.state.flag(StateKey::DeviceConnected)?))
    }

    /// Decides today's prompt.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn decision(&self) -> StoreResult<CheckInDecision> {
        let markers = self.markers()?;
        let today = self.today();
        let decision = decide(&markers, today);
        tracing::debug!(%today, decision = decision.as_str(), "check-in decided");
        Ok(decision)
    }

    /// Records that today's check-in was completed.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn mark_completed(&self) -> StoreResult<()> {
        self.state
            .set_date(StateKey::CheckInCompletedDate, self.today())
    }

    /// Records that today's check-in was skipped.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn mark_skipped(&self) -> StoreResult<()> {
        self.state.set_date(StateKey::CheckInSkippedDate, self.today())
    }
}
