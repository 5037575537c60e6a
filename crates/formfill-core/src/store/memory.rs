//! In-memory named-record store.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use formfill_protocols::{KeyValueStore, StoreError};

/// In-memory store.
pub struct MemoryStore {
    records: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    fn id(&self) -> &str {
        "memory"
    }

    async fn get(&self, name: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.records.read().await.get(name).cloned())
    }

    async fn set(&self, name: &str, value: Value) -> Result<(), StoreError> {
        self.records.write().await.insert(name.to_string(), value);
        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<(), StoreError> {
        self.records.write().await.remove(name);
        Ok(())
    }
}
