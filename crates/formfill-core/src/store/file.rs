//! JSON-file named-record store.
//!
//! Every record lives in one JSON object keyed by record name, the on-disk
//! analogue of a synced storage area.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::debug;

use formfill_protocols::{KeyValueStore, StoreError};

/// File-backed store.
pub struct JsonFileStore {
    path: PathBuf,
    /// Serializes whole-file rewrites.
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Map<String, Value>, StoreError> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Ok(Map::new());
        }
        let json = tokio::fs::read_to_string(&self.path).await?;
        if json.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&json)? {
            Value::Object(records) => Ok(records),
            _ => Err(StoreError::Backend(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }

    async fn write_all(&self, records: Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string_pretty(&Value::Object(records))?;
        tokio::fs::write(&self.path, json).await?;
        debug!("Wrote store file {:?}", self.path);
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    fn id(&self) -> &str {
        "json-file"
    }

    async fn get(&self, name: &str) -> Result<Option<Value>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await?.remove(name))
    }

    async fn set(&self, name: &str, value: Value) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_all().await?;
        records.insert(name.to_string(), value);
        self.write_all(records).await
    }

    async fn remove(&self, name: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_all().await?;
        if records.remove(name).is_some() {
            self.write_all(records).await?;
        }
        Ok(())
    }
}
