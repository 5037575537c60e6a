//! Section container detection for repeated profile entries.
//!
//! A container is a block element whose rendered text names its own section
//! and none of the sibling sections, holding at least two fillable controls.
//! Containers never nest: once an outer block is accepted, blocks inside it
//! are dropped. Document order of the survivors is the alignment order for
//! the profile's list entries.

use tracing::trace;

use formfill_protocols::{ElementId, Page, PageError};

use crate::keywords::KeywordSet;
use crate::matcher::{controls, ControlKind, ControlKinds};

/// Block elements considered as potential containers.
const BLOCK_SELECTOR: &str = "div, fieldset, li, section";

/// Minimum number of fillable descendants, selects included.
const MIN_FILLABLE: usize = 2;

/// Detect containers for a section, in document order.
pub fn detect_containers(
    page: &dyn Page,
    section: &KeywordSet,
    stop: &KeywordSet,
) -> Result<Vec<ElementId>, PageError> {
    let mut accepted: Vec<ElementId> = Vec::new();

    for block in page.query_selector_all(None, BLOCK_SELECTOR)? {
        let fillable = controls(page, Some(block), ControlKinds::FILLABLE)?;
        if !fillable
            .iter()
            .any(|(_, _, kind)| *kind != ControlKind::Select)
        {
            continue;
        }

        let text = page.inner_text(block).to_lowercase();
        if let Some(stop_word) = stop.first_hit(&text) {
            trace!("Block {} rejected by stop keyword '{}'", block, stop_word);
            continue;
        }
        if !section.matches(&text) || fillable.len() < MIN_FILLABLE {
            continue;
        }
        if accepted.iter().any(|&outer| page.contains(outer, block)) {
            trace!("Block {} nested in an accepted container", block);
            continue;
        }
        accepted.push(block);
    }

    Ok(accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use formfill_dom::Document;

    fn work() -> KeywordSet {
        KeywordSet::new(["experience", "work", "employment"])
    }

    fn education() -> KeywordSet {
        KeywordSet::new(["education", "school", "university", "academic"])
    }

    const TWO_JOBS: &str = r#"
        <form>
          <div id="job1"><h3>Work Experience 1</h3>
            <label>Title <input name="title1"></label>
            <label>Company <input name="company1"></label>
          </div>
          <div id="job2"><h3>Work Experience 2</h3>
            <label>Title <input name="title2"></label>
            <label>Company <input name="company2"></label>
          </div>
          <div id="edu"><h3>Education</h3>
            <label>School <input name="school"></label>
            <label>Degree <input name="degree"></label>
          </div>
        </form>"#;

    fn ids(doc: &Document, containers: &[ElementId]) -> Vec<String> {
        containers
            .iter()
            .map(|&c| doc.attributes(c).unwrap().id.unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_detects_each_job_block_in_order() {
        let doc = Document::parse(TWO_JOBS);
        let containers = detect_containers(&doc, &work(), &education()).unwrap();
        assert_eq!(ids(&doc, &containers), vec!["job1", "job2"]);
    }

    #[test]
    fn test_stop_keywords_exclude_shared_ancestor() {
        let doc = Document::parse(TWO_JOBS);
        let containers = detect_containers(&doc, &education(), &work()).unwrap();
        assert_eq!(ids(&doc, &containers), vec!["edu"]);
    }

    #[test]
    fn test_outer_container_wins() {
        let doc = Document::parse(
            r#"<section id="outer"><h2>Employment</h2>
                 <div id="inner"><span>Work</span>
                   <input name="title"><input name="company">
                 </div>
               </section>"#,
        );
        let containers = detect_containers(&doc, &work(), &education()).unwrap();
        assert_eq!(ids(&doc, &containers), vec!["outer"]);
        for (i, &a) in containers.iter().enumerate() {
            for &b in &containers[i + 1..] {
                assert!(!doc.contains(a, b) && !doc.contains(b, a));
            }
        }
    }

    #[test]
    fn test_inner_block_accepted_when_outer_rejected() {
        let doc = Document::parse(
            r#"<div id="page"><p>Education and work</p>
                 <fieldset id="jobs"><legend>Work history</legend>
                   <input name="title"><input name="company">
                 </fieldset>
               </div>"#,
        );
        let containers = detect_containers(&doc, &work(), &education()).unwrap();
        assert_eq!(ids(&doc, &containers), vec!["jobs"]);
    }

    #[test]
    fn test_requires_two_fillable_controls() {
        let doc = Document::parse(
            r#"<div id="one"><span>Work</span><input name="title"></div>
               <div id="with-select"><span>Work</span><input name="title"><select name="year"></select></div>"#,
        );
        let containers = detect_containers(&doc, &work(), &education()).unwrap();
        assert_eq!(ids(&doc, &containers), vec!["with-select"]);
    }

    #[test]
    fn test_selects_alone_do_not_qualify() {
        let doc = Document::parse(
            r#"<div id="selects"><span>Work</span><select></select><select></select></div>"#,
        );
        assert!(detect_containers(&doc, &work(), &education())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_no_section_keyword_no_container() {
        let doc = Document::parse(
            r#"<div><span>Contact</span><input name="a"><input name="b"></div>"#,
        );
        assert!(detect_containers(&doc, &work(), &education())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_list_items_are_blocks() {
        let doc = Document::parse(
            r#"<ul>
                 <li id="a">Experience <input name="t"><textarea name="d"></textarea></li>
                 <li id="b">Experience <input name="t"><textarea name="d"></textarea></li>
               </ul>"#,
        );
        let containers = detect_containers(&doc, &work(), &education()).unwrap();
        assert_eq!(ids(&doc, &containers), vec!["a", "b"]);
    }
}
