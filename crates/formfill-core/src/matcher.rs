//! Keyword matching over fillable controls.

use tracing::trace;

use formfill_protocols::{ElementAttributes, ElementId, Page, PageError};

use crate::extractor::attribute_text;
use crate::keywords::KeywordSet;

/// `<input>` types that do not take free text.
const NON_TEXT_INPUT_TYPES: &[&str] = &[
    "hidden", "submit", "button", "reset", "image", "checkbox", "radio", "file",
];

/// Structural kind of a fillable control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    TextInput,
    TextArea,
    Select,
}

impl ControlKind {
    /// Classify an element, `None` when it is not a fillable control.
    pub fn classify(attrs: &ElementAttributes) -> Option<Self> {
        match attrs.tag.as_deref()? {
            "input" => {
                let input_type = attrs.input_type.as_deref().unwrap_or("text");
                (!NON_TEXT_INPUT_TYPES.contains(&input_type)).then_some(ControlKind::TextInput)
            }
            "textarea" => Some(ControlKind::TextArea),
            "select" => Some(ControlKind::Select),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        match self {
            ControlKind::TextInput => 0b001,
            ControlKind::TextArea => 0b010,
            ControlKind::Select => 0b100,
        }
    }

    fn tag(self) -> &'static str {
        match self {
            ControlKind::TextInput => "input",
            ControlKind::TextArea => "textarea",
            ControlKind::Select => "select",
        }
    }
}

/// A set of control kinds to consider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlKinds(u8);

impl ControlKinds {
    /// Text inputs and textareas: the controls values are written into.
    pub const TEXT_ENTRY: Self = Self(0b011);
    /// Text entry plus selects; used to qualify section containers.
    pub const FILLABLE: Self = Self(0b111);

    pub fn contains(self, kind: ControlKind) -> bool {
        self.0 & kind.bit() != 0
    }

    fn selector(self) -> String {
        [ControlKind::TextInput, ControlKind::TextArea, ControlKind::Select]
            .into_iter()
            .filter(|kind| self.contains(*kind))
            .map(ControlKind::tag)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Controls of the given kinds inside `scope` (whole page when `None`), in
/// document order, with their current attributes.
pub fn controls(
    page: &dyn Page,
    scope: Option<ElementId>,
    kinds: ControlKinds,
) -> Result<Vec<(ElementId, ElementAttributes, ControlKind)>, PageError> {
    let candidates = page.query_selector_all(scope, &kinds.selector())?;
    Ok(candidates
        .into_iter()
        .filter_map(|element| {
            let attrs = page.attributes(element)?;
            let kind = ControlKind::classify(&attrs).filter(|kind| kinds.contains(*kind))?;
            Some((element, attrs, kind))
        })
        .collect())
}

/// Controls whose attribute text contains any keyword, in document order.
///
/// An empty result means no match and is not an error.
pub fn find_by_keywords(
    page: &dyn Page,
    keywords: &KeywordSet,
    scope: Option<ElementId>,
    kinds: ControlKinds,
) -> Result<Vec<ElementId>, PageError> {
    let matches: Vec<_> = controls(page, scope, kinds)?
        .into_iter()
        .filter(|(_, attrs, _)| keywords.matches(&attribute_text(attrs)))
        .map(|(element, _, _)| element)
        .collect();
    trace!(
        "Keywords {:?} matched {} element(s)",
        keywords.keywords(),
        matches.len()
    );
    Ok(matches)
}
