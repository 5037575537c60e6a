//! # Formfill Protocols
//!
//! Shared data model and seams for the formfill engine.
//! Contains only types and interface definitions - no matching logic.
//!
//! ## Core Traits
//!
//! - [`Page`] - Host-controlled DOM, queried and written through a capability surface
//! - [`KeyValueStore`] - Named-record persistence used for profiles and learned mappings

pub mod error;
pub mod mapping;
pub mod page;
pub mod profile;
pub mod store;

pub use error::{FillError, PageError, StoreError};
pub use mapping::{LearnedMappings, ProfileKey, CUSTOM_KEY_PREFIX};
pub use page::{ElementAttributes, ElementId, EventKind, Page};
pub use profile::{Education, Profile, ScalarField, WorkExperience};
pub use store::KeyValueStore;
