//! Profile record adapter.

use std::sync::Arc;

use tracing::debug;

use formfill_protocols::{FillError, KeyValueStore, Profile};

/// Well-known record name for the profile.
pub const DEFAULT_PROFILE_RECORD: &str = "userProfile";

/// Reads (and, for host tooling, replaces) the stored profile.
pub struct ProfileStore {
    store: Arc<dyn KeyValueStore>,
    record: String,
}

impl ProfileStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_record(store, DEFAULT_PROFILE_RECORD)
    }

    pub fn with_record(store: Arc<dyn KeyValueStore>, record: impl Into<String>) -> Self {
        Self {
            store,
            record: record.into(),
        }
    }

    /// Load the profile, failing with `ProfileNotFound` when none is stored.
    pub async fn load(&self) -> Result<Profile, FillError> {
        let value = self
            .store
            .get(&self.record)
            .await?
            .ok_or(FillError::ProfileNotFound)?;
        serde_json::from_value(value)
            .map_err(|e| FillError::StorageFailure(format!("Malformed {} record: {}", self.record, e)))
    }

    pub async fn save(&self, profile: &Profile) -> Result<(), FillError> {
        let value =
            serde_json::to_value(profile).map_err(|e| FillError::StorageFailure(e.to_string()))?;
        self.store.set(&self.record, value).await?;
        debug!("Profile saved to record {}", self.record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_missing_profile() {
        let profiles = ProfileStore::new(Arc::new(MemoryStore::new()));
        assert_eq!(profiles.load().await.unwrap_err(), FillError::ProfileNotFound);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let profiles = ProfileStore::new(Arc::new(MemoryStore::new()));
        let profile = Profile {
            first_name: Some("Ada".to_string()),
            ..Default::default()
        };
        profiles.save(&profile).await.unwrap();
        assert_eq!(profiles.load().await.unwrap(), profile);
    }

    #[tokio::test]
    async fn test_reads_record_written_by_editor() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(
                DEFAULT_PROFILE_RECORD,
                serde_json::json!({"firstName": "Ada", "workExperience": [{"title": "Analyst"}]}),
            )
            .await
            .unwrap();
        let profile = ProfileStore::new(store).load().await.unwrap();
        assert_eq!(profile.work_experience.len(), 1);
    }
}
