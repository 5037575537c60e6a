//! Learning a page-specific field mapping from a user correction.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use formfill_protocols::{ElementId, FillError, Page};

use crate::mapping_store::MappingStore;
use crate::selector::generate_selector;

/// A mapping that was stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LearnedMapping {
    pub selector: String,
    pub profile_key: String,
}

/// Binds an indicated element to a profile key.
pub struct Learner {
    page: Arc<dyn Page>,
    mappings: Arc<MappingStore>,
}

impl Learner {
    pub fn new(page: Arc<dyn Page>, mappings: Arc<MappingStore>) -> Self {
        Self { page, mappings }
    }

    /// Generate a selector for `target` and store it against `profile_key`.
    ///
    /// Nothing is written to storage when no selector can be derived.
    pub async fn learn(
        &self,
        target: ElementId,
        profile_key: &str,
    ) -> Result<LearnedMapping, FillError> {
        let selector = self
            .page
            .attributes(target)
            .ok_or(FillError::SelectorUnavailable)
            .and_then(|attrs| generate_selector(&attrs))
            .inspect_err(|_| {
                error!("Could not generate a selector for element {}", target);
            })?;

        info!("Mapping selector \"{}\" to profile key \"{}\"", selector, profile_key);
        self.mappings.save(&selector, profile_key).await?;

        Ok(LearnedMapping {
            selector,
            profile_key: profile_key.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use formfill_dom::Document;
    use formfill_protocols::KeyValueStore;

    fn learner(html: &str) -> (Arc<Document>, Arc<MemoryStore>, Learner) {
        let doc = Arc::new(Document::parse(html));
        let store = Arc::new(MemoryStore::new());
        let mappings = Arc::new(MappingStore::new(store.clone()));
        let learner = Learner::new(doc.clone(), mappings);
        (doc, store, learner)
    }

    #[tokio::test]
    async fn test_learn_stores_id_selector() {
        let (doc, store, learner) = learner(r#"<input id="custom1">"#);
        let target = doc.query_selector("#custom1").unwrap().unwrap();

        let learned = learner.learn(target, "custom.referral").await.unwrap();
        assert_eq!(learned.selector, "#custom1");

        let raw = store.get("customMappings").await.unwrap().unwrap();
        assert_eq!(raw, serde_json::json!({"#custom1": "custom.referral"}));
    }

    #[tokio::test]
    async fn test_learn_falls_back_to_tag_and_class() {
        let (doc, _store, learner) = learner(r#"<textarea class="notes big"></textarea>"#);
        let target = doc.query_selector("textarea").unwrap().unwrap();
        let learned = learner.learn(target, "coverLetter").await.unwrap();
        assert_eq!(learned.selector, "textarea.notes.big");
    }

    #[tokio::test]
    async fn test_unresolvable_target_writes_nothing() {
        let (_doc, store, learner) = learner(r#"<input id="a">"#);
        let err = learner
            .learn(ElementId(usize::MAX), "firstName")
            .await
            .unwrap_err();
        assert_eq!(err, FillError::SelectorUnavailable);
        assert!(store.get("customMappings").await.unwrap().is_none());
    }
}
