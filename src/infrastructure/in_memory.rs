use crate::domain::ports::KeyValueStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory slot store.
///
/// Uses `Arc<RwLock<HashMap<String, Vec<u8>>>>` so clones share the same slots.
/// Ideal for testing or for one-shot runs where persistence is not required.
#[derive(Default, Clone)]
pub struct InMemoryKeyValueStore {
    slots: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryKeyValueStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let slots = self.slots.read().await;
        Ok(slots.get(key).cloned())
    }

    async fn save(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut slots = self.slots.write().await;
        slots.insert(key.to_string(), value);
        Ok(())
    }
}
