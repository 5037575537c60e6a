//! Value writer.

use tracing::debug;

use formfill_protocols::{ElementId, EventKind, Page, PageError};

/// Write `value` into `element` and notify the page as if the user typed it.
///
/// A missing element or value is a no-op, reported as `Ok(false)`. Both the
/// `input` and `change` notifications bubble.
pub fn write_value(
    page: &dyn Page,
    element: Option<ElementId>,
    value: Option<&str>,
) -> Result<bool, PageError> {
    let (Some(element), Some(value)) = (element, value) else {
        return Ok(false);
    };

    page.set_value(element, value)?;
    page.dispatch_event(element, EventKind::Input, true)?;
    page.dispatch_event(element, EventKind::Change, true)?;

    debug!("Filled '{}' with value: {}", describe(page, element), value);
    Ok(true)
}

/// Short human label for log lines: name, else id, else the handle.
pub fn describe(page: &dyn Page, element: ElementId) -> String {
    page.attributes(element)
        .and_then(|attrs| attrs.name.or(attrs.id))
        .unwrap_or_else(|| element.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use formfill_dom::Document;

    #[test]
    fn test_write_sets_value_and_fires_both_events() {
        let doc = Document::parse(r#"<form><input name="fname"></form>"#);
        let input = doc.query_selector("input").unwrap();

        assert!(write_value(&doc, input, Some("Ada")).unwrap());

        let input = input.unwrap();
        assert_eq!(doc.value(input).as_deref(), Some("Ada"));
        let events = doc.events_for(input);
        let kinds: Vec<_> = events.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::Input, EventKind::Change]);
        assert!(events.iter().all(|e| e.bubbles && e.path.len() > 1));
    }

    #[test]
    fn test_missing_element_or_value_is_noop() {
        let doc = Document::parse(r#"<input name="fname">"#);
        let input = doc.query_selector("input").unwrap();

        assert!(!write_value(&doc, None, Some("Ada")).unwrap());
        assert!(!write_value(&doc, input, None).unwrap());
        assert!(doc.events().is_empty());
        assert!(doc.written_elements().is_empty());
    }

    #[test]
    fn test_empty_string_is_written() {
        let doc = Document::parse(r#"<input name="fname" value="old">"#);
        let input = doc.query_selector("input").unwrap();
        assert!(write_value(&doc, input, Some("")).unwrap());
        assert_eq!(doc.value(input.unwrap()).as_deref(), Some(""));
    }

    #[test]
    fn test_describe_prefers_name() {
        let doc = Document::parse(r#"<input id="a" name="b"><input id="c"><div></div>"#);
        let all = doc.query_selector_all(None, "input, div").unwrap();
        assert_eq!(describe(&doc, all[0]), "b");
        assert_eq!(describe(&doc, all[1]), "c");
        assert_eq!(describe(&doc, all[2]), all[2].to_string());
    }
}
