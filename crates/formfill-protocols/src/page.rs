//! Host page protocol.
//!
//! The page is host-controlled, mutable state. The engine never owns its
//! structure: it queries, reads and writes through this capability surface
//! and re-queries rather than caching results across suspension points.

use serde::{Deserialize, Serialize};

use crate::error::PageError;

/// Opaque handle to an element of the current page.
///
/// A handle is a lookup key only; it says nothing about identity across
/// reloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub usize);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Identifying attributes of a candidate element, read from live state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementAttributes {
    /// Lowercase tag name. `None` when the host exposes no tag information.
    pub tag: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub placeholder: Option<String>,
    pub aria_label: Option<String>,
    /// `type` attribute, meaningful for `<input>` only.
    pub input_type: Option<String>,
    /// Text of the first associated label.
    pub label_text: Option<String>,
    /// Whitespace-separated class list, in attribute order.
    #[serde(default)]
    pub class_list: Vec<String>,
}

impl ElementAttributes {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.class_list = classes.into_iter().map(Into::into).collect();
        self
    }
}

/// Notification signals synthesized after a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Live edit (`input`).
    Input,
    /// Committed change (`change`).
    Change,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Input => "input",
            EventKind::Change => "change",
        }
    }
}

/// Capability surface over the host DOM.
pub trait Page: Send + Sync {
    /// First element in document order matching `selector`.
    fn query_selector(&self, selector: &str) -> Result<Option<ElementId>, PageError>;

    /// All descendants of `scope` (or of the document when `None`) matching
    /// `selector`, in document order.
    fn query_selector_all(
        &self,
        scope: Option<ElementId>,
        selector: &str,
    ) -> Result<Vec<ElementId>, PageError>;

    /// Current attributes of an element, `None` if the handle is stale.
    fn attributes(&self, element: ElementId) -> Option<ElementAttributes>;

    /// Rendered text of the subtree (innerText-like).
    fn inner_text(&self, element: ElementId) -> String;

    /// Whether `descendant` is `ancestor` or lies inside it.
    fn contains(&self, ancestor: ElementId, descendant: ElementId) -> bool;

    /// Assign the element's current value.
    fn set_value(&self, element: ElementId, value: &str) -> Result<(), PageError>;

    /// Deliver a notification to the element, optionally bubbling to ancestors.
    fn dispatch_event(
        &self,
        element: ElementId,
        event: EventKind,
        bubbles: bool,
    ) -> Result<(), PageError>;
}
