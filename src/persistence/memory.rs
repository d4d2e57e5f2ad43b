//! In-process snapshot storage, used by tests and by embedders that persist
//! elsewhere.

use super::{PersistenceError, SnapshotBackend};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with the given key already written.
    pub fn with_entry(key: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            entries: Mutex::new(HashMap::from([(key.into(), contents.into())])),
        }
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.entries.lock().await.contains_key(key)
    }
}

#[async_trait]
impl SnapshotBackend for MemoryBackend {
    async fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn save(&self, key: &str, contents: String) -> Result<(), PersistenceError> {
        self.entries.lock().await.insert(key.to_string(), contents);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}
