//! Arena-backed document implementing the page protocol.

use std::collections::HashMap;
use std::ops::{Deref, Range};

use ego_tree::NodeId;
use parking_lot::{Mutex, RwLock};
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use tracing::{debug, trace};

use formfill_protocols::{ElementAttributes, ElementId, EventKind, Page, PageError};

/// Subtrees whose text is not rendered.
const UNRENDERED_TAGS: &[&str] = &["script", "style", "template", "noscript", "textarea", "head"];

/// Labelable elements other than `<input>`, which is labelable unless hidden.
const LABELABLE_TAGS: &[&str] = &["button", "meter", "output", "progress", "select", "textarea"];

#[derive(Debug)]
enum NodeData {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
        /// Node in the parsed tree, used for selector matching.
        handle: NodeId,
    },
    Text(String),
}

#[derive(Debug)]
struct Node {
    parent: Option<usize>,
    /// One past the last index of this node's subtree.
    subtree_end: usize,
    data: NodeData,
}

/// A notification recorded by [`Page::dispatch_event`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchedEvent {
    pub kind: EventKind,
    pub target: ElementId,
    pub bubbles: bool,
    /// Elements that observed the event, target first.
    pub path: Vec<ElementId>,
}

#[derive(Debug, Default)]
struct LiveState {
    values: HashMap<usize, String>,
    events: Vec<DispatchedEvent>,
}

/// A parsed page.
#[derive(Debug)]
pub struct Document {
    /// Parsed tree. Structure never changes after parsing.
    html: Mutex<Html>,
    /// Pre-order arena over `html`: index order is document order.
    nodes: Vec<Node>,
    live: RwLock<LiveState>,
}

impl Document {
    /// Parse an HTML document or fragment.
    pub fn parse(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        let mut nodes = Vec::new();
        index_element(&mut nodes, parsed.root_element(), None);
        debug!("Parsed document with {} nodes", nodes.len());
        Document {
            html: Mutex::new(parsed),
            nodes,
            live: RwLock::new(LiveState::default()),
        }
    }

    fn tag(&self, index: usize) -> Option<&str> {
        match &self.nodes.get(index)?.data {
            NodeData::Element { tag, .. } => Some(tag),
            NodeData::Text(_) => None,
        }
    }

    fn attr(&self, index: usize, name: &str) -> Option<&str> {
        match &self.nodes.get(index)?.data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str()),
            NodeData::Text(_) => None,
        }
    }

    fn handle(&self, index: usize) -> Option<NodeId> {
        match &self.nodes.get(index)?.data {
            NodeData::Element { handle, .. } => Some(*handle),
            NodeData::Text(_) => None,
        }
    }

    fn parent_element(&self, index: usize) -> Option<usize> {
        self.nodes.get(index)?.parent
    }

    /// Elements in `range` matching `selector`, in document order.
    fn matching(&self, selector: &str, range: Range<usize>) -> Result<Vec<ElementId>, PageError> {
        let compiled = Selector::parse(selector).map_err(|err| PageError::InvalidSelector {
            selector: selector.to_string(),
            message: err.to_string(),
        })?;
        let html = self.html.lock();
        Ok(range
            .filter(|&index| {
                self.handle(index)
                    .and_then(|handle| html.tree.get(handle))
                    .and_then(ElementRef::wrap)
                    .is_some_and(|element| compiled.matches(&element))
            })
            .map(ElementId)
            .collect())
    }

    fn is_element(&self, index: usize) -> bool {
        self.tag(index).is_some()
    }

    fn element(&self, id: ElementId) -> Result<usize, PageError> {
        if self.is_element(id.0) {
            Ok(id.0)
        } else {
            Err(PageError::Detached(id.0))
        }
    }

    /// Concatenated text of every text node in the subtree.
    fn text_content(&self, index: usize) -> String {
        let end = self.nodes[index].subtree_end;
        self.nodes[index..end]
            .iter()
            .filter_map(|node| match &node.data {
                NodeData::Text(text) => Some(text.as_str()),
                NodeData::Element { .. } => None,
            })
            .collect()
    }

    /// Text of the first `<label>` associated with the element, in tree order.
    ///
    /// A label with `for` names its control by id. A label without one labels
    /// only its first labelable descendant.
    fn first_label_text(&self, index: usize) -> Option<String> {
        if !self.is_labelable(index) {
            return None;
        }
        let own_id = self.attr(index, "id").filter(|id| !id.is_empty());
        (0..self.nodes.len())
            .filter(|&i| self.tag(i) == Some("label"))
            .find(|&label| match self.attr(label, "for") {
                Some(target) => own_id == Some(target),
                None => self.first_labelable_descendant(label) == Some(index),
            })
            .map(|label| self.text_content(label))
    }

    fn is_labelable(&self, index: usize) -> bool {
        match self.tag(index) {
            Some("input") => !self
                .attr(index, "type")
                .is_some_and(|t| t.eq_ignore_ascii_case("hidden")),
            Some(tag) => LABELABLE_TAGS.contains(&tag),
            None => false,
        }
    }

    fn first_labelable_descendant(&self, label: usize) -> Option<usize> {
        (label + 1..self.nodes[label].subtree_end).find(|&i| self.is_labelable(i))
    }

    fn contains_index(&self, ancestor: usize, descendant: usize) -> bool {
        ancestor <= descendant
            && self
                .nodes
                .get(ancestor)
                .is_some_and(|node| descendant < node.subtree_end)
    }

    /// Live value of a control: the last written value, else its initial value.
    pub fn value(&self, element: ElementId) -> Option<String> {
        if let Some(value) = self.live.read().values.get(&element.0) {
            return Some(value.clone());
        }
        match self.tag(element.0)? {
            "textarea" => Some(self.text_content(element.0)),
            _ => self.attr(element.0, "value").map(str::to_string),
        }
    }

    /// Every event dispatched so far, in dispatch order.
    pub fn events(&self) -> Vec<DispatchedEvent> {
        self.live.read().events.clone()
    }

    /// Events whose target is `element`.
    pub fn events_for(&self, element: ElementId) -> Vec<DispatchedEvent> {
        self.live
            .read()
            .events
            .iter()
            .filter(|event| event.target == element)
            .cloned()
            .collect()
    }

    /// Elements written through [`Page::set_value`], in index order.
    pub fn written_elements(&self) -> Vec<ElementId> {
        let mut written: Vec<_> = self.live.read().values.keys().map(|&i| ElementId(i)).collect();
        written.sort();
        written
    }

    /// Number of element nodes.
    pub fn element_count(&self) -> usize {
        (0..self.nodes.len()).filter(|&i| self.is_element(i)).count()
    }
}

impl Page for Document {
    fn query_selector(&self, selector: &str) -> Result<Option<ElementId>, PageError> {
        Ok(self
            .matching(selector, 0..self.nodes.len())?
            .into_iter()
            .next())
    }

    fn query_selector_all(
        &self,
        scope: Option<ElementId>,
        selector: &str,
    ) -> Result<Vec<ElementId>, PageError> {
        let range = match scope {
            Some(scope) => {
                let root = self.element(scope)?;
                root + 1..self.nodes[root].subtree_end
            }
            None => 0..self.nodes.len(),
        };
        self.matching(selector, range)
    }

    fn attributes(&self, element: ElementId) -> Option<ElementAttributes> {
        let index = element.0;
        let tag = self.tag(index)?;
        let read = |name: &str| self.attr(index, name).map(str::to_string);
        Some(ElementAttributes {
            tag: Some(tag.to_string()),
            id: read("id"),
            name: read("name"),
            placeholder: read("placeholder"),
            aria_label: read("aria-label"),
            input_type: read("type").map(|t| t.to_ascii_lowercase()),
            label_text: self.first_label_text(index),
            class_list: self
                .attr(index, "class")
                .map(|c| c.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
        })
    }

    fn inner_text(&self, element: ElementId) -> String {
        let Ok(root) = self.element(element) else {
            return String::new();
        };
        let end = self.nodes[root].subtree_end;
        let mut parts = Vec::new();
        let mut index = root;
        while index < end {
            match &self.nodes[index].data {
                NodeData::Element { tag, .. }
                    if index != root && UNRENDERED_TAGS.contains(&tag.as_str()) =>
                {
                    index = self.nodes[index].subtree_end;
                    continue;
                }
                NodeData::Text(text) => parts.push(text.as_str()),
                NodeData::Element { .. } => {}
            }
            index += 1;
        }
        parts
            .iter()
            .flat_map(|part| part.split_whitespace())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn contains(&self, ancestor: ElementId, descendant: ElementId) -> bool {
        self.contains_index(ancestor.0, descendant.0)
    }

    fn set_value(&self, element: ElementId, value: &str) -> Result<(), PageError> {
        let index = self.element(element)?;
        self.live.write().values.insert(index, value.to_string());
        trace!("Set value of {} ({} chars)", element, value.len());
        Ok(())
    }

    fn dispatch_event(
        &self,
        element: ElementId,
        event: EventKind,
        bubbles: bool,
    ) -> Result<(), PageError> {
        let index = self.element(element)?;
        let mut path = vec![element];
        if bubbles {
            let mut current = self.parent_element(index);
            while let Some(parent) = current {
                path.push(ElementId(parent));
                current = self.parent_element(parent);
            }
        }
        self.live.write().events.push(DispatchedEvent {
            kind: event,
            target: element,
            bubbles,
            path,
        });
        Ok(())
    }
}

fn index_element(nodes: &mut Vec<Node>, element: ElementRef<'_>, parent: Option<usize>) {
    let index = nodes.len();
    let value = element.value();
    nodes.push(Node {
        parent,
        subtree_end: index + 1,
        data: NodeData::Element {
            tag: value.name().to_ascii_lowercase(),
            attrs: value
                .attrs()
                .map(|(name, v)| (name.to_ascii_lowercase(), v.to_string()))
                .collect(),
            handle: element.id(),
        },
    });

    for child in element.children() {
        match child.value() {
            scraper::Node::Text(text) => {
                let text_index = nodes.len();
                nodes.push(Node {
                    parent: Some(index),
                    subtree_end: text_index + 1,
                    data: NodeData::Text(text.deref().to_string()),
                });
            }
            scraper::Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    index_element(nodes, child_element, Some(index));
                }
            }
            _ => {}
        }
    }

    nodes[index].subtree_end = nodes.len();
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
