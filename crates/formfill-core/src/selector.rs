//! Stable selector generation for learned mappings.
//!
//! Priority: `#id`, then `[name="..."]`, then `tag.class1.class2`. The last
//! form is not unique; replay binds to the first match in document order.

use formfill_protocols::{ElementAttributes, FillError};

/// Derive a selector for an element from its current attributes.
///
/// Deterministic for a fixed attribute state.
pub fn generate_selector(attrs: &ElementAttributes) -> Result<String, FillError> {
    if let Some(id) = non_empty(attrs.id.as_deref()) {
        return Ok(format!("#{}", escape_ident(id)));
    }
    if let Some(name) = non_empty(attrs.name.as_deref()) {
        return Ok(format!("[name=\"{}\"]", escape_string(name)));
    }

    let tag = non_empty(attrs.tag.as_deref()).ok_or(FillError::SelectorUnavailable)?;
    let mut selector = tag.to_ascii_lowercase();
    for class in attrs.class_list.iter().filter(|c| !c.is_empty()) {
        selector.push('.');
        selector.push_str(&escape_ident(class));
    }
    Ok(selector)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Serialize an identifier the way `CSS.escape` does.
///
/// Control characters and a digit in leading position become hex escapes;
/// any other non-identifier character is backslash-escaped.
fn escape_ident(ident: &str) -> String {
    let mut escaped = String::with_capacity(ident.len());
    let first = ident.chars().next();
    for (position, c) in ident.chars().enumerate() {
        let leading_digit = c.is_ascii_digit()
            && (position == 0 || (position == 1 && first == Some('-')));
        if c == '\0' {
            escaped.push('\u{FFFD}');
        } else if (c.is_control() && c < '\u{80}') || leading_digit {
            escaped.push_str(&format!("\\{:x} ", c as u32));
        } else if c == '-' && position == 0 && ident.len() == 1 {
            escaped.push_str("\\-");
        } else if c >= '\u{80}' || c == '-' || c == '_' || c.is_ascii_alphanumeric() {
            escaped.push(c);
        } else {
            escaped.push('\\');
            escaped.push(c);
        }
    }
    escaped
}

fn escape_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_wins() {
        let attrs = ElementAttributes::new("input")
            .with_id("custom1")
            .with_name("referral");
        assert_eq!(generate_selector(&attrs).unwrap(), "#custom1");
    }

    #[test]
    fn test_name_when_no_id() {
        let attrs = ElementAttributes::new("input").with_name("fname");
        assert_eq!(generate_selector(&attrs).unwrap(), r#"[name="fname"]"#);
    }

    #[test]
    fn test_empty_id_falls_through() {
        let attrs = ElementAttributes::new("input").with_id("").with_name("fname");
        assert_eq!(generate_selector(&attrs).unwrap(), r#"[name="fname"]"#);
    }

    #[test]
    fn test_tag_and_classes() {
        let attrs = ElementAttributes::new("TEXTAREA").with_classes(["w-full", "border"]);
        assert_eq!(generate_selector(&attrs).unwrap(), "textarea.w-full.border");
        assert_eq!(
            generate_selector(&ElementAttributes::new("input")).unwrap(),
            "input"
        );
    }

    #[test]
    fn test_no_identifying_information() {
        assert_eq!(
            generate_selector(&ElementAttributes::default()),
            Err(FillError::SelectorUnavailable)
        );
    }

    #[test]
    fn test_idempotent() {
        let attrs = ElementAttributes::new("input").with_classes(["a", "b"]);
        let first = generate_selector(&attrs).unwrap();
        for _ in 0..5 {
            assert_eq!(generate_selector(&attrs).unwrap(), first);
        }
    }

    #[test]
    fn test_special_characters_are_escaped() {
        let attrs = ElementAttributes::new("input").with_id("user.email");
        assert_eq!(generate_selector(&attrs).unwrap(), r"#user\.email");

        let attrs = ElementAttributes::new("input").with_name(r#"q["1"]"#);
        assert_eq!(generate_selector(&attrs).unwrap(), r#"[name="q[\"1\"]"]"#);
    }

    #[test]
    fn test_leading_digits_are_hex_escaped() {
        let attrs = ElementAttributes::new("input").with_id("123");
        assert_eq!(generate_selector(&attrs).unwrap(), r"#\31 23");

        let attrs = ElementAttributes::new("input").with_id("-1x");
        assert_eq!(generate_selector(&attrs).unwrap(), r"#-\31 x");

        let attrs = ElementAttributes::new("input").with_id("-");
        assert_eq!(generate_selector(&attrs).unwrap(), r"#\-");
    }

    #[test]
    fn test_non_identifier_class_characters() {
        let attrs = ElementAttributes::new("div").with_classes(["w-1/2", "md:flex", "caf\u{e9}"]);
        assert_eq!(
            generate_selector(&attrs).unwrap(),
            "div.w-1\\/2.md\\:flex.caf\u{e9}"
        );
    }

    #[test]
    fn test_generated_selectors_resolve_in_parsed_page() {
        use formfill_dom::Document;
        use formfill_protocols::Page;

        let doc = Document::parse(
            r#"<input id="123"><input id="user.email"><input name='q"1"'>
               <textarea class="w-1/2 md:flex"></textarea>"#,
        );
        let controls = doc.query_selector_all(None, "input, textarea").unwrap();
        assert_eq!(controls.len(), 4);
        for element in controls {
            let selector = generate_selector(&doc.attributes(element).unwrap()).unwrap();
            assert_eq!(
                doc.query_selector(&selector).unwrap(),
                Some(element),
                "{selector} should resolve to its element"
            );
        }
    }
}
