//! Named-record persistence protocol.
//!
//! Mirrors a synced key-value area: each record is a JSON value stored under
//! a well-known name and read or written wholesale.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

/// Core trait for named-record stores.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the store ID.
    fn id(&self) -> &str;

    /// Read a record. `Ok(None)` when nothing is stored under `name`.
    async fn get(&self, name: &str) -> Result<Option<Value>, StoreError>;

    /// Replace a record.
    async fn set(&self, name: &str, value: Value) -> Result<(), StoreError>;

    /// Remove a record. Removing a missing record is not an error.
    async fn remove(&self, name: &str) -> Result<(), StoreError>;
}
