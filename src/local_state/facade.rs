//! Typed accessors over a [`KeyValueStore`].

use crate::local_state::{
    domain::{StateKey, format_date, format_flag, parse_date, parse_flag},
    ports::{KeyValueStore, StoreResult},
};
use chrono::NaiveDate;
use std::sync::Arc;

/// Typed view over the persisted local markers.
///
/// Malformed stored values read as absent and are logged, so a corrupted
/// marker never blocks a flow.
pub struct LocalState<K>
where
    K: KeyValueStore,
{
    store: Arc<K>,
}

impl<K> Clone for LocalState<K>
where
    K: KeyValueStore,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<K> LocalState<K>
where
    K: KeyValueStore,
{
    /// Wraps a store.
    #[must_use]
    pub const fn new(store: Arc<K>) -> Self {
        Self { store }
    }

    /// Reads a text marker.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn text(&self, key: StateKey) -> StoreResult<Option<String>> {
        self.store.get(key)
    }

    /// Writes a text marker.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn set_text(&self, key: StateKey, value: &str) -> StoreResult<()> {
        self.store.set(key, value)
    }

    /// Reads a date marker.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn date(&self, key: StateKey) -> StoreResult<Option<NaiveDate>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        let parsed = parse_date(&raw);
        if parsed.is_none() {
            tracing::warn!(key = %key, value = %raw, "ignoring malformed date marker");
        }
        Ok(parsed)
    }

    /// Writes a date marker.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn set_date(&self, key: StateKey, date: NaiveDate) -> StoreResult<()> {
        self.store.set(key, &format_date(date))
    }

    /// Reads a flag marker; unset or malformed flags read as `false`.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn flag(&self, key: StateKey) -> StoreResult<bool> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(false);
        };
        parse_flag(&raw).map_or_else(
            || {
                tracing::warn!(key = %key, value = %raw, "ignoring malformed flag marker");
                Ok(false)
            },
            Ok,
        )
    }

    /// Writes a flag marker.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn set_flag(&self, key: StateKey, flag: bool) -> StoreResult<()> {
        self.store.set(key, format_flag(flag))
    }

    /// Removes a marker.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn clear(&self, key: StateKey) -> StoreResult<()> {
        self.store.remove(key)
    }
}
