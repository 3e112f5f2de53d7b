//! Persisted device link markers.

use crate::device::domain::IntegrationResult;
use crate::local_state::{
    LocalState,
    domain::StateKey,
    ports::{KeyValueStore, StoreResult},
};
use chrono::NaiveDate;

/// Device markers shared by the connect, disconnect, and consent flows.
pub struct DeviceLinkStore<K>
where
    K: KeyValueStore,
{
    state: LocalState<K>,
}

impl<K> Clone for DeviceLinkStore<K>
where
    K: KeyValueStore,
{
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<K> DeviceLinkStore<K>
where
    K: KeyValueStore,
{
    /// Wraps local state.
    #[must_use]
    pub const fn new(state: LocalState<K>) -> Self {
        Self { state }
    }

    /// Remembers which provider and external user a pending link is for,
    /// so the consent landing can resume after the external redirect.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn record_pending_link(&self, result: &IntegrationResult) -> StoreResult<()> {
        self.state
            .set_text(StateKey::DeviceProvider, result.provider().as_str())?;
        self.state
            .set_text(StateKey::DeviceSpikeId, result.spike_id().as_str())
    }

    /// Marks the device as connected and synced on `today`.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn mark_connected(&self, today: NaiveDate) -> StoreResult<()> {
        self.state.set_flag(StateKey::DeviceConnected, true)?;
        self.state.set_date(StateKey::DeviceLastSyncDate, today)
    }

    /// Forgets the link: connected indicator, provider, and spike id.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn clear_link(&self) -> StoreResult<()> {
        self.state.clear(StateKey::DeviceConnected)?;
        self.state.clear(StateKey::DeviceProvider)?;
        self.state.clear(StateKey::DeviceSpikeId)
    }

    /// Returns `true` when a device is marked connected.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn is_connected(&self) -> StoreResult<bool> {
        self.state.flag(StateKey::DeviceConnected)
    }

    /// Returns the linked provider, if any.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn provider(&self) -> StoreResult<Option<String>> {
        self.state.text(StateKey::DeviceProvider)
    }

    /// Returns the linked external user identifier, if any.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn spike_id(&self) -> StoreResult<Option<String>> {
        self.state.text(StateKey::DeviceSpikeId)
    }

    /// Returns the last date the device was synced, if recorded.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn last_sync_date(&self) -> StoreResult<Option<NaiveDate>> {
        self.state.date(StateKey::DeviceLastSyncDate)
    }
}
