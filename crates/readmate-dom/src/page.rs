//! Parsed HTML page with mutation helpers.

use std::cell::RefCell;
use std::rc::Rc;

use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::serialize::{SerializeOpts, serialize};
use html5ever::{Attribute, LocalName, QualName, ns, namespace_url, parse_document};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle, WeakHandle};

/// A parsed HTML document.
///
/// Wraps the reference-counted DOM produced by html5ever. The tree is shared
/// and interior-mutable; `Page` is deliberately `!Send` and lives on one
/// thread together with everything that mutates it.
pub struct Page {
    dom: RcDom,
}

impl Page {
    /// Parse an HTML document. Malformed markup is recovered the way a
    /// browser would recover it; parsing itself does not fail.
    pub fn parse(html: &str) -> Self {
        let dom = parse_document(RcDom::default(), Default::default()).one(html);
        Self { dom }
    }

    /// Root document node.
    pub fn document(&self) -> Handle {
        self.dom.document.clone()
    }

    /// The `<body>` element, falling back to the document root for documents
    /// the parser could not give a body (never the case for HTML input).
    pub fn body(&self) -> Handle {
        self.find_first_tag("body")
            .unwrap_or_else(|| self.dom.document.clone())
    }

    /// The `<head>` element, if present.
    pub fn head(&self) -> Option<Handle> {
        self.find_first_tag("head")
    }

    fn find_first_tag(&self, tag: &str) -> Option<Handle> {
        elements(&self.dom.document)
            .into_iter()
            .find(|el| tag_name(el).as_deref() == Some(tag))
    }

    /// Whether `node` is still reachable from this document's root.
    ///
    /// Detachment is the eviction signal for stale element handles: a write
    /// must not proceed when this returns false.
    pub fn is_attached(&self, node: &Handle) -> bool {
        let mut current = node.clone();
        loop {
            if Rc::ptr_eq(&current, &self.dom.document) {
                return true;
            }
            match parent_of(&current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Find an element by its `id` attribute.
    pub fn element_by_id(&self, id: &str) -> Option<Handle> {
        elements(&self.dom.document)
            .into_iter()
            .find(|el| attr(el, "id").as_deref() == Some(id))
    }

    /// Remove the element with the given id, if present. Returns whether an
    /// element was removed.
    pub fn remove_element_by_id(&self, id: &str) -> bool {
        match self.element_by_id(id) {
            Some(el) => {
                detach(&el);
                true
            }
            None => false,
        }
    }

    /// Insert or replace a `<style id=...>` element carrying `css`.
    pub fn ensure_style(&self, id: &str, css: &str) {
        self.remove_element_by_id(id);
        let style = create_element("style", Some(id));
        set_text_content(&style, css);
        let target = self.head().unwrap_or_else(|| self.body());
        append_child(&target, &style);
    }

    /// Serialize the document back to HTML.
    pub fn to_html(&self) -> String {
        let mut out = Vec::new();
        let document: SerializableHandle = self.dom.document.clone().into();
        // Writing into a Vec cannot produce an I/O error.
        serialize(&mut out, &document, SerializeOpts::default())
            .expect("in-memory serialization");
        String::from_utf8_lossy(&out).into_owned()
    }
}

/// A non-owning reference to a live element.
///
/// Upgrading yields the element only while the page still holds it; the
/// handle goes stale when the document is dropped. Even a successful upgrade
/// must be paired with [`Page::is_attached`] before mutation, since a node
/// can be detached while references to it are still alive.
#[derive(Clone)]
pub struct ElementRef {
    weak: WeakHandle,
}

impl ElementRef {
    pub fn new(handle: &Handle) -> Self {
        Self {
            weak: Rc::downgrade(handle),
        }
    }

    pub fn upgrade(&self) -> Option<Handle> {
        self.weak.upgrade()
    }
}

impl std::fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.upgrade() {
            Some(el) => write!(f, "ElementRef(<{}>)", tag_name(&el).unwrap_or_default()),
            None => write!(f, "ElementRef(stale)"),
        }
    }
}

/// Parent element of a node, if it has one.
pub fn parent_of(node: &Handle) -> Option<Handle> {
    let weak = node.parent.take();
    let parent = weak.as_ref().and_then(|w| w.upgrade());
    node.parent.set(weak);
    parent
}

/// All element descendants of `root` in document order.
pub fn elements(root: &Handle) -> Vec<Handle> {
    let mut out = Vec::new();
    collect_elements(root, &mut out);
    out
}

fn collect_elements(node: &Handle, out: &mut Vec<Handle>) {
    for child in node.children.borrow().iter() {
        if matches!(child.data, NodeData::Element { .. }) {
            out.push(child.clone());
        }
        collect_elements(child, out);
    }
}

/// Lowercase tag name of an element node.
pub fn tag_name(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string().to_ascii_lowercase()),
        _ => None,
    }
}

/// Value of an attribute, if present.
pub fn attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| a.name.local.as_ref() == attr_name)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

/// Set (or replace) an attribute value.
pub fn set_attr(node: &Handle, attr_name: &str, value: &str) {
    if let NodeData::Element { attrs, .. } = &node.data {
        let mut attrs = attrs.borrow_mut();
        if let Some(existing) = attrs.iter_mut().find(|a| a.name.local.as_ref() == attr_name) {
            existing.value = StrTendril::from(value);
        } else {
            attrs.push(Attribute {
                name: QualName::new(None, ns!(), LocalName::from(attr_name)),
                value: StrTendril::from(value),
            });
        }
    }
}

/// Whether the element's class list contains `class`.
pub fn has_class(node: &Handle, class: &str) -> bool {
    attr(node, "class")
        .map(|classes| classes.split_whitespace().any(|c| c == class))
        .unwrap_or(false)
}

/// Add a class to the element's class list (no-op when already present).
pub fn add_class(node: &Handle, class: &str) {
    if has_class(node, class) {
        return;
    }
    let merged = match attr(node, "class") {
        Some(existing) if !existing.trim().is_empty() => format!("{existing} {class}"),
        _ => class.to_string(),
    };
    set_attr(node, "class", &merged);
}

/// Remove a class from the element's class list.
pub fn remove_class(node: &Handle, class: &str) {
    if let Some(existing) = attr(node, "class") {
        let kept: Vec<&str> = existing.split_whitespace().filter(|c| *c != class).collect();
        set_attr(node, "class", &kept.join(" "));
    }
}

/// Concatenated text of the node and all its descendants.
pub fn text_content(node: &Handle) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &Handle, out: &mut String) {
    if let NodeData::Text { contents } = &node.data {
        out.push_str(&contents.borrow());
    }
    for child in node.children.borrow().iter() {
        collect_text(child, out);
    }
}

/// Replace the node's children with a single text node.
pub fn set_text_content(node: &Handle, text: &str) {
    let children = std::mem::take(&mut *node.children.borrow_mut());
    for child in children {
        child.parent.set(None);
    }
    let text_node = Node::new(NodeData::Text {
        contents: RefCell::new(StrTendril::from(text)),
    });
    append_child(node, &text_node);
}

/// Create a detached element, optionally with an id.
pub fn create_element(tag: &str, id: Option<&str>) -> Handle {
    let element = Node::new(NodeData::Element {
        name: QualName::new(None, ns!(html), LocalName::from(tag)),
        attrs: RefCell::new(Vec::new()),
        template_contents: RefCell::new(None),
        mathml_annotation_xml_integration_point: false,
    });
    if let Some(id) = id {
        set_attr(&element, "id", id);
    }
    element
}

/// Append a child node, rewiring its parent link.
pub fn append_child(parent: &Handle, child: &Handle) {
    detach(child);
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child.clone());
}

/// Detach a node from its parent, if it has one.
pub fn detach(node: &Handle) {
    if let Some(parent) = parent_of(node) {
        parent
            .children
            .borrow_mut()
            .retain(|child| !Rc::ptr_eq(child, node));
    }
    node.parent.set(None);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_text_content() {
        let page = Page::parse("<html><body><p>Hello <b>world</b></p></body></html>");
        let body = page.body();
        assert_eq!(text_content(&body).trim(), "Hello world");
    }

    #[test]
    fn test_element_lookup_by_id_and_class() {
        let page = Page::parse(r#"<div id="main" class="content wide"><p>x</p></div>"#);
        let div = page.element_by_id("main").expect("div present");
        assert_eq!(tag_name(&div).as_deref(), Some("div"));
        assert!(has_class(&div, "content"));
        assert!(!has_class(&div, "conten"));
    }

    #[test]
    fn test_set_text_content_replaces_children() {
        let page = Page::parse(r#"<p id="p">old <em>rich</em> text</p>"#);
        let p = page.element_by_id("p").unwrap();
        set_text_content(&p, "new text");
        assert_eq!(text_content(&p), "new text");
        assert_eq!(p.children.borrow().len(), 1);
    }

    #[test]
    fn test_attachment_tracks_detach() {
        let page = Page::parse(r#"<div><p id="p">text</p></div>"#);
        let p = page.element_by_id("p").unwrap();
        assert!(page.is_attached(&p));
        detach(&p);
        assert!(!page.is_attached(&p));
        // The strong handle keeps the node alive, but it is no longer found.
        assert!(page.element_by_id("p").is_none());
    }

    #[test]
    fn test_element_ref_goes_stale_with_detached_subtree() {
        let page = Page::parse(r#"<div id="wrap"><p id="p">text</p></div>"#);
        let p = page.element_by_id("p").unwrap();
        let handle = ElementRef::new(&p);
        drop(p);
        assert!(handle.upgrade().is_some());

        let wrap = page.element_by_id("wrap").unwrap();
        detach(&wrap);
        drop(wrap);
        // The subtree's last strong reference is gone.
        assert!(handle.upgrade().is_none());
    }

    #[test]
    fn test_ensure_style_replaces_previous_instance() {
        let page = Page::parse("<html><head></head><body></body></html>");
        page.ensure_style("theme", "body { color: red }");
        page.ensure_style("theme", "body { color: blue }");
        let style = page.element_by_id("theme").unwrap();
        assert_eq!(text_content(&style), "body { color: blue }");
        let styles = elements(&page.document())
            .into_iter()
            .filter(|el| tag_name(el).as_deref() == Some("style"))
            .count();
        assert_eq!(styles, 1);
    }

    #[test]
    fn test_append_and_class_editing() {
        let page = Page::parse("<body></body>");
        let div = create_element("div", Some("overlay"));
        append_child(&page.body(), &div);
        assert!(page.is_attached(&div));

        add_class(&div, "visible");
        add_class(&div, "visible");
        assert_eq!(attr(&div, "class").as_deref(), Some("visible"));
        remove_class(&div, "visible");
        assert!(!has_class(&div, "visible"));
    }

    #[test]
    fn test_serialize_round_trip_contains_mutation() {
        let page = Page::parse(r#"<body><p id="p">original</p></body>"#);
        let p = page.element_by_id("p").unwrap();
        set_text_content(&p, "translated");
        let html = page.to_html();
        assert!(html.contains("translated"));
        assert!(!html.contains("original"));
    }
}
