//! Learned-mapping persistence adapter.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use formfill_protocols::{FillError, KeyValueStore, LearnedMappings};

/// Well-known record name for the mapping table.
pub const DEFAULT_MAPPINGS_RECORD: &str = "customMappings";

/// Reads and writes the `selector -> profileKey` table as one record.
pub struct MappingStore {
    store: Arc<dyn KeyValueStore>,
    record: String,
    /// Serializes read-modify-write cycles issued through this adapter.
    write_lock: Mutex<()>,
}

impl MappingStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_record(store, DEFAULT_MAPPINGS_RECORD)
    }

    pub fn with_record(store: Arc<dyn KeyValueStore>, record: impl Into<String>) -> Self {
        Self {
            store,
            record: record.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn record(&self) -> &str {
        &self.record
    }

    /// Load the whole table. A missing record is an empty table.
    pub async fn load(&self) -> Result<LearnedMappings, FillError> {
        match self.store.get(&self.record).await? {
            None => Ok(LearnedMappings::new()),
            Some(value) => serde_json::from_value(value).map_err(|e| {
                FillError::StorageFailure(format!("Malformed {} record: {}", self.record, e))
            }),
        }
    }

    /// Add or overwrite one entry.
    pub async fn save(&self, selector: &str, profile_key: &str) -> Result<(), FillError> {
        let _guard = self.write_lock.lock().await;
        let mut mappings = self.load().await?;
        if let Some(previous) = mappings.insert(selector, profile_key) {
            debug!("Replacing mapping for {} (was {})", selector, previous);
        }
        self.write(&mappings).await?;
        info!("New mapping saved: {} -> {}", selector, profile_key);
        Ok(())
    }

    /// Remove one entry. Returns whether it existed.
    pub async fn remove(&self, selector: &str) -> Result<bool, FillError> {
        let _guard = self.write_lock.lock().await;
        let mut mappings = self.load().await?;
        if mappings.remove(selector).is_none() {
            return Ok(false);
        }
        self.write(&mappings).await?;
        Ok(true)
    }

    /// Drop every learned mapping.
    pub async fn clear(&self) -> Result<(), FillError> {
        let _guard = self.write_lock.lock().await;
        self.store.remove(&self.record).await?;
        Ok(())
    }

    async fn write(&self, mappings: &LearnedMappings) -> Result<(), FillError> {
        let value = serde_json::to_value(mappings)
            .map_err(|e| FillError::StorageFailure(e.to_string()))?;
        self.store.set(&self.record, value).await?;
        Ok(())
    }
}
