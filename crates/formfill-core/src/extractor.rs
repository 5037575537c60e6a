//! Searchable text built from an element's identifying attributes.

use formfill_protocols::ElementAttributes;

/// Lowercase blob of `id`, `name`, `placeholder`, `aria-label` and the first
/// label's text, joined by single spaces. Absent attributes contribute an
/// empty string so the separator layout is stable.
pub fn attribute_text(attrs: &ElementAttributes) -> String {
    [
        attrs.id.as_deref(),
        attrs.name.as_deref(),
        attrs.placeholder.as_deref(),
        attrs.aria_label.as_deref(),
        attrs.label_text.as_deref(),
    ]
    .map(|part| part.unwrap_or_default())
    .join(" ")
    .to_lowercase()
}
