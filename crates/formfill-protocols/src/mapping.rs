//! Learned selector-to-profile-key mappings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::profile::Profile;

/// Prefix marking a profile key that addresses `Profile::custom_fields`.
pub const CUSTOM_KEY_PREFIX: &str = "custom.";

/// A parsed profile key as stored in a learned mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProfileKey {
    /// A top-level profile entry, e.g. `firstName`.
    Direct(String),
    /// A custom field, stored as `custom.<name>`.
    Custom(String),
}

impl ProfileKey {
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(CUSTOM_KEY_PREFIX) {
            Some(name) => ProfileKey::Custom(name.to_string()),
            None => ProfileKey::Direct(raw.to_string()),
        }
    }

    /// Resolve the key against a profile.
    ///
    /// Returns `None` when the value is undefined. An empty string is a
    /// defined value and is returned as such.
    pub fn resolve(&self, profile: &Profile) -> Option<String> {
        match self {
            ProfileKey::Direct(name) => profile.lookup(name),
            ProfileKey::Custom(name) => profile.custom(name).map(str::to_string),
        }
    }
}

impl std::fmt::Display for ProfileKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileKey::Direct(name) => f.write_str(name),
            ProfileKey::Custom(name) => write!(f, "{CUSTOM_KEY_PREFIX}{name}"),
        }
    }
}

/// The persisted `selector -> profileKey` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LearnedMappings(BTreeMap<String, String>);

impl LearnedMappings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or overwrite the mapping for `selector`. Returns the previous key.
    pub fn insert(&mut self, selector: impl Into<String>, profile_key: impl Into<String>) -> Option<String> {
        self.0.insert(selector.into(), profile_key.into())
    }

    pub fn get(&self, selector: &str) -> Option<&str> {
        self.0.get(selector).map(String::as_str)
    }

    pub fn remove(&mut self, selector: &str) -> Option<String> {
        self.0.remove(selector)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(selector, profileKey)` pairs in selector order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(s, k)| (s.as_str(), k.as_str()))
    }
}

impl FromIterator<(String, String)> for LearnedMappings {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
