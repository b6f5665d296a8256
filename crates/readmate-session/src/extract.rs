//! Paragraph extractor: turn a container into the ordered work list.

use readmate_dom::page::{attr, elements, parent_of, tag_name, text_content};
use readmate_dom::{ElementRef, Handle};
use readmate_protocols::ContentError;
use tracing::debug;

/// Minimum trimmed text length (exclusive) for a unit to be worth
/// translating. Filters out captions, button labels and similar fragments.
pub const MIN_UNIT_TEXT_CHARS: usize = 20;

const UNIT_TAGS: &[&str] = &["p", "h1", "h2", "h3", "h4", "h5", "h6"];

const EXCLUDED_ANCESTOR_TAGS: &[&str] = &["nav", "header", "footer", "aside"];

/// One translatable text fragment with a live back-reference to its element.
#[derive(Debug, Clone)]
pub struct TranslatableUnit {
    /// Non-owning handle into the live document.
    pub element: ElementRef,
    /// Text as captured at extraction time. Immutable afterwards.
    pub original_text: String,
    /// Whatever is presently displayed (original or translated).
    pub current_text: String,
    pub translated: bool,
}

impl TranslatableUnit {
    fn new(element: &Handle, text: String) -> Self {
        Self {
            element: ElementRef::new(element),
            original_text: text.clone(),
            current_text: text,
            translated: false,
        }
    }
}

/// Whether the element sits inside site chrome that must not be translated.
fn in_excluded_landmark(element: &Handle) -> bool {
    let mut current = parent_of(element);
    while let Some(ancestor) = current {
        if let Some(tag) = tag_name(&ancestor) {
            if EXCLUDED_ANCESTOR_TAGS.contains(&tag.as_str()) {
                return true;
            }
        }
        if attr(&ancestor, "role").as_deref() == Some("navigation") {
            return true;
        }
        current = parent_of(&ancestor);
    }
    false
}

/// Produce the ordered work list for a container.
///
/// Selects paragraph- and heading-level descendants in document order,
/// skipping site chrome and fragments at or below the length threshold. An
/// empty result is an error: a session must never start empty.
pub fn extract_units(container: &Handle) -> Result<Vec<TranslatableUnit>, ContentError> {
    let mut units = Vec::new();

    for element in elements(container) {
        let Some(tag) = tag_name(&element) else {
            continue;
        };
        if !UNIT_TAGS.contains(&tag.as_str()) {
            continue;
        }
        if in_excluded_landmark(&element) {
            continue;
        }
        let text = text_content(&element).trim().to_string();
        if text.chars().count() <= MIN_UNIT_TEXT_CHARS {
            continue;
        }
        units.push(TranslatableUnit::new(&element, text));
    }

    if units.is_empty() {
        return Err(ContentError::NoTranslatableText);
    }

    debug!(units = units.len(), "work list extracted");
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use readmate_dom::Page;

    const FILLER: &str = "This sentence is comfortably longer than the threshold.";

    #[test]
    fn test_extracts_paragraphs_and_headings_in_order() {
        let html = format!(
            "<article><h1>A heading long enough to qualify</h1><p>{FILLER} one</p>\
             <p>{FILLER} two</p></article>"
        );
        let page = Page::parse(&html);
        let container = page.body();
        let units = extract_units(&container).unwrap();
        assert_eq!(units.len(), 3);
        assert!(units[0].original_text.starts_with("A heading"));
        assert!(units[1].original_text.ends_with("one"));
        assert!(units[2].original_text.ends_with("two"));
        assert!(units.iter().all(|u| !u.translated));
        assert!(
            units
                .iter()
                .all(|u| u.current_text == u.original_text)
        );
    }

    #[test]
    fn test_skips_site_chrome() {
        let html = format!(
            "<body><nav><p>{FILLER} nav copy</p></nav>\
             <header><p>{FILLER} header copy</p></header>\
             <div role=\"navigation\"><p>{FILLER} menu copy</p></div>\
             <main><p>{FILLER} article copy</p></main>\
             <footer><p>{FILLER} footer copy</p></footer></body>"
        );
        let page = Page::parse(&html);
        let units = extract_units(&page.body()).unwrap();
        assert_eq!(units.len(), 1);
        assert!(units[0].original_text.ends_with("article copy"));
    }

    #[test]
    fn test_short_fragments_filtered_out() {
        let html = format!("<div><p>caption</p><p>ok</p><p>{FILLER}</p></div>");
        let page = Page::parse(&html);
        let units = extract_units(&page.body()).unwrap();
        assert_eq!(units.len(), 1);
    }

    #[test]
    fn test_empty_work_list_is_an_error() {
        let page = Page::parse("<div><p>too short</p><span>not a unit</span></div>");
        let err = extract_units(&page.body()).unwrap_err();
        assert_eq!(err, ContentError::NoTranslatableText);
    }

    #[test]
    fn test_unit_handles_point_at_live_elements() {
        let html = format!("<div><p id=\"target\">{FILLER}</p></div>");
        let page = Page::parse(&html);
        let units = extract_units(&page.body()).unwrap();
        let element = units[0].element.upgrade().expect("element alive");
        assert_eq!(attr(&element, "id").as_deref(), Some("target"));
        assert!(page.is_attached(&element));
    }
}
