//! Content locator: find the subtree most likely to hold the article body.

use readmate_dom::page::{attr, elements, has_class, tag_name, text_content};
use readmate_dom::{Handle, Page};
use readmate_protocols::ContentError;
use tracing::debug;

/// Minimum trimmed text length for a container to count as significant.
const MIN_CONTAINER_TEXT_CHARS: usize = 200;

/// Minimum number of paragraph children for a significant container.
const MIN_PARAGRAPH_CHILDREN: usize = 2;

/// Prioritized content selectors, most specific first.
enum ContentSelector {
    Tag(&'static str),
    Role(&'static str),
    Class(&'static str),
    Id(&'static str),
}

const CONTENT_SELECTORS: &[ContentSelector] = &[
    ContentSelector::Tag("article"),
    ContentSelector::Role("main"),
    ContentSelector::Tag("main"),
    ContentSelector::Class("article"),
    ContentSelector::Class("post"),
    ContentSelector::Class("content"),
    ContentSelector::Class("entry-content"),
    ContentSelector::Class("post-content"),
    ContentSelector::Class("article-content"),
    ContentSelector::Id("content"),
    ContentSelector::Id("main"),
    ContentSelector::Class("main-content"),
];

impl ContentSelector {
    fn matches(&self, element: &Handle) -> bool {
        match self {
            ContentSelector::Tag(tag) => tag_name(element).as_deref() == Some(*tag),
            ContentSelector::Role(role) => attr(element, "role").as_deref() == Some(*role),
            ContentSelector::Class(class) => has_class(element, class),
            ContentSelector::Id(id) => attr(element, "id").as_deref() == Some(*id),
        }
    }
}

/// Number of `<p>` descendants, the ranking criterion among candidates.
pub fn paragraph_count(element: &Handle) -> usize {
    elements(element)
        .iter()
        .filter(|el| tag_name(el).as_deref() == Some("p"))
        .count()
}

/// Whether a container holds enough prose to be worth considering.
fn has_significant_text(element: &Handle) -> bool {
    if let Some(tag) = tag_name(element) {
        if matches!(tag.as_str(), "script" | "style" | "noscript") {
            return false;
        }
    }
    let text = text_content(element);
    if text.trim().chars().count() < MIN_CONTAINER_TEXT_CHARS {
        return false;
    }
    paragraph_count(element) >= MIN_PARAGRAPH_CHILDREN
}

/// Collect candidate containers: selector matches first, then a scan over
/// generic block containers, then the document body.
fn candidate_containers(page: &Page) -> Vec<Handle> {
    let all = elements(&page.document());

    let mut candidates = Vec::new();
    for selector in CONTENT_SELECTORS {
        for element in &all {
            if selector.matches(element) && has_significant_text(element) {
                candidates.push(element.clone());
            }
        }
    }

    if candidates.is_empty() {
        for element in &all {
            if matches!(
                tag_name(element).as_deref(),
                Some("div") | Some("section") | Some("article")
            ) && has_significant_text(element)
            {
                candidates.push(element.clone());
            }
        }
    }

    if candidates.is_empty() {
        candidates.push(page.body());
    }

    candidates
}

/// The container most likely to hold the main readable content.
///
/// Among candidates the one with the most paragraph descendants wins;
/// ties keep the first-encountered candidate, so repeated invocations (the
/// text-formatting feature recomputes this) pick the same container.
pub fn locate_best_container(page: &Page) -> Result<Handle, ContentError> {
    let candidates = candidate_containers(page);

    let mut best: Option<(Handle, usize)> = None;
    for candidate in candidates {
        let count = paragraph_count(&candidate);
        match &best {
            Some((_, max)) if count <= *max => {}
            _ => best = Some((candidate, count)),
        }
    }

    match best {
        Some((container, count)) => {
            debug!(paragraphs = count, "content container located");
            Ok(container)
        }
        None => Err(ContentError::NoContainer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_paragraphs(count: usize, chars_each: usize) -> String {
        (0..count)
            .map(|i| format!("<p>{}</p>", format!("{i}").repeat(chars_each)))
            .collect()
    }

    #[test]
    fn test_prefers_semantic_article() {
        let html = format!(
            "<body><div>{}</div><article>{}</article></body>",
            long_paragraphs(2, 150),
            long_paragraphs(2, 150),
        );
        let page = Page::parse(&html);
        let best = locate_best_container(&page).unwrap();
        assert_eq!(tag_name(&best).as_deref(), Some("article"));
    }

    #[test]
    fn test_falls_back_to_plain_div_with_enough_text() {
        // No semantic selector matches: a bare div with 3 paragraphs summing
        // to 250 characters must be chosen over the body.
        let html = format!(
            "<body><nav><a>home</a></nav><div id=\"story\">{}{}{}</div></body>",
            format!("<p>{}</p>", "a".repeat(100)),
            format!("<p>{}</p>", "b".repeat(100)),
            format!("<p>{}</p>", "c".repeat(50)),
        );
        let page = Page::parse(&html);
        let best = locate_best_container(&page).unwrap();
        assert_eq!(attr(&best, "id").as_deref(), Some("story"));
    }

    #[test]
    fn test_only_short_snippets_fall_back_to_body() {
        let html = "<body><div><p>short one</p><p>short two</p></div></body>";
        let page = Page::parse(html);
        let best = locate_best_container(&page).unwrap();
        assert_eq!(tag_name(&best).as_deref(), Some("body"));
    }

    #[test]
    fn test_most_paragraphs_wins() {
        let html = format!(
            "<body><article id=\"a\">{}</article><article id=\"b\">{}</article></body>",
            long_paragraphs(2, 150),
            long_paragraphs(5, 150),
        );
        let page = Page::parse(&html);
        let best = locate_best_container(&page).unwrap();
        assert_eq!(attr(&best, "id").as_deref(), Some("b"));
    }

    #[test]
    fn test_tie_keeps_first_encountered() {
        let html = format!(
            "<body><article id=\"first\">{}</article><article id=\"second\">{}</article></body>",
            long_paragraphs(3, 100),
            long_paragraphs(3, 100),
        );
        let page = Page::parse(&html);
        let best = locate_best_container(&page).unwrap();
        assert_eq!(attr(&best, "id").as_deref(), Some("first"));
        // Recomputing yields the same container.
        let again = locate_best_container(&page).unwrap();
        assert_eq!(attr(&again, "id").as_deref(), Some("first"));
    }

    #[test]
    fn test_container_with_one_paragraph_is_not_significant() {
        let html = format!(
            "<body><article><p>{}</p></article></body>",
            "x".repeat(400)
        );
        let page = Page::parse(&html);
        let best = locate_best_container(&page).unwrap();
        // The article fails the two-paragraph requirement.
        assert_eq!(tag_name(&best).as_deref(), Some("body"));
    }
}
