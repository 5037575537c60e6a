//! # Formfill Core
//!
//! The matching-and-filling engine.
//!
//! A fill pass runs four phases in a fixed order: learned mappings first,
//! then scalar fields matched by keyword over the whole page, then work
//! experience and education entries aligned to detected section containers.
//! Each element is written at most once per pass, and learned mappings
//! always win over inferred ones.
//!
//! Learning is independent of filling: the element the user pointed at is
//! captured, turned into a selector, and stored against a profile key so
//! later passes replay it before any heuristic runs.

pub mod capture;
pub mod dispatcher;
pub mod extractor;
pub mod keywords;
pub mod learning;
pub mod mapping_store;
pub mod matcher;
pub mod orchestrator;
pub mod profile_store;
pub mod report;
pub mod sections;
pub mod selector;
pub mod store;
pub mod writer;

pub use capture::TargetCapture;
pub use dispatcher::{Acknowledgement, Command, CommandDispatcher, Completion, Outcome};
pub use keywords::{KeywordCatalog, KeywordSet, SectionKeywords};
pub use learning::{LearnedMapping, Learner};
pub use mapping_store::MappingStore;
pub use matcher::{ControlKind, ControlKinds};
pub use orchestrator::{FillPhase, FormFiller};
pub use profile_store::ProfileStore;
pub use report::{FillReport, FillSource, FilledField};
pub use selector::generate_selector;
pub use store::{JsonFileStore, MemoryStore};
