//! # Persistence
//!
//! Stores survive restarts by writing a JSON snapshot of their whole state under a
//! fixed key after every change. The store itself knows nothing about this: a
//! [`PersistHook`] is registered on the store and a [`SnapshotBackend`] decides
//! where the text ends up.
//!
//! Writes are best effort. A failed save is logged and the in-memory state stays
//! authoritative. A snapshot that cannot be parsed on start-up is treated as
//! absent.

pub mod file;
pub mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use crate::framework::{Change, StateHook, StoreState};
use async_trait::async_trait;
use std::marker::PhantomData;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised by snapshot backends.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on snapshot '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode snapshot '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Keys become file names, so only a safe subset of characters is allowed.
    #[error("Invalid snapshot key: '{0}'")]
    InvalidKey(String),
}

/// Key-value storage for JSON snapshot text.
#[async_trait]
pub trait SnapshotBackend: Send + Sync {
    /// Returns the stored text, or `None` when the key was never written.
    async fn load(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Overwrites the value stored under `key`.
    async fn save(&self, key: &str, contents: String) -> Result<(), PersistenceError>;

    /// Deletes the value. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}

/// The storage keys used by one storefront instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotKeys {
    pub catalog: String,
    pub cart: String,
    pub admin_mode: String,
}

impl SnapshotKeys {
    pub fn from_prefix(prefix: &str) -> Self {
        Self {
            catalog: format!("{prefix}-catalog"),
            cart: format!("{prefix}-cart"),
            admin_mode: format!("{prefix}-admin-mode"),
        }
    }
}

/// [`StateHook`] that writes the store's snapshot on every change and deletes it
/// when the store is erased.
pub struct PersistHook<S> {
    backend: Arc<dyn SnapshotBackend>,
    key: String,
    _state: PhantomData<fn() -> S>,
}

impl<S> PersistHook<S> {
    pub fn new(backend: Arc<dyn SnapshotBackend>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            _state: PhantomData,
        }
    }
}

impl<S: StoreState> PersistHook<S> {
    async fn persist(&self, state: &S, change: Change) -> Result<(), PersistenceError> {
        match change {
            Change::Unchanged => Ok(()),
            Change::Modified => {
                let contents =
                    serde_json::to_string(&state.snapshot()).map_err(|source| {
                        PersistenceError::Encode {
                            key: self.key.clone(),
                            source,
                        }
                    })?;
                self.backend.save(&self.key, contents).await
            }
            Change::Erased => self.backend.remove(&self.key).await,
        }
    }
}

#[async_trait]
impl<S: StoreState> StateHook<S> for PersistHook<S> {
    async fn on_change(&self, state: &S, change: Change) {
        match self.persist(state, change).await {
            Ok(()) => debug!(store = S::NAME, key = %self.key, ?change, "Snapshot persisted"),
            Err(e) => warn!(store = S::NAME, key = %self.key, error = %e, "Failed to persist snapshot"),
        }
    }
}

/// Restores a store state from its snapshot.
///
/// Missing, unreadable and malformed snapshots all yield the initial state; the
/// latter two are logged.
pub async fn load_state<S: StoreState>(backend: &dyn SnapshotBackend, key: &str) -> S {
    let snapshot = match backend.load(key).await {
        Ok(Some(text)) => match serde_json::from_str::<S::Snapshot>(&text) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(store = S::NAME, key, error = %e, "Ignoring malformed snapshot");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!(store = S::NAME, key, error = %e, "Failed to read snapshot");
            None
        }
    };
    debug!(store = S::NAME, key, found = snapshot.is_some(), "Snapshot loaded");
    S::restore(snapshot)
}
