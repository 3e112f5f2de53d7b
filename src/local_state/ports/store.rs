//! Key-value store port.

use crate::local_state::domain::StateKey;
use std::sync::Arc;
use thiserror::Error;

/// Result type for key-value store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persisted string key-value contract.
///
/// Implementations are last-write-wins; no transactional guarantee spans
/// multiple keys.
pub trait KeyValueStore: Send + Sync {
    /// Reads a value. Returns `None` when the key is unset.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing storage cannot be read.
    fn get(&self, key: StateKey) -> StoreResult<Option<String>>;

    /// Writes a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing storage cannot be written.
    fn set(&self, key: StateKey, value: &str) -> StoreResult<()>;

    /// Removes a value. Removing an unset key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing storage cannot be written.
    fn remove(&self, key: StateKey) -> StoreResult<()>;
}

/// Errors returned by key-value store implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The stored document could not be decoded.
    #[error("corrupt local state: {0}")]
    Corrupt(String),

    /// Storage-layer failure.
    #[error("local state storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps a storage error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}
