//! In-memory page model.
//!
//! Parses HTML with `scraper` and indexes it into a flat arena whose index
//! order is document order, then serves it through the [`Page`] protocol.
//! Selector matching runs on the parsed tree. Structure is fixed
//! after parsing; control values and the dispatched-event log are live state
//! behind a lock so the page can be edited while a fill pass runs.
//!
//! [`Page`]: formfill_protocols::Page

mod document;

pub use document::{DispatchedEvent, Document};
