//! Shared kuchiki DOM helpers used by the parsers, decorators, and transforms.
//!
//! All selector strings passed to these helpers are hardcoded by callers.
//! A selector that fails to compile is a compile-time bug in this crate, so
//! the helpers panic with a `BUG:` message instead of surfacing a `Result`.

use kuchiki::traits::TendrilSink;
use kuchiki::{ElementData, NodeDataRef, NodeRef, Selectors};

/// Collect every descendant element matching `selectors`, in document order.
///
/// Matches are collected into a `Vec` before being returned because callers
/// routinely detach matched nodes while iterating, which would invalidate a
/// live iterator over the tree.
pub fn select_all(root: &NodeRef, selectors: &str) -> Vec<NodeDataRef<ElementData>> {
    match root.select(selectors) {
        Ok(matches) => matches.collect(),
        Err(()) => panic!("BUG: hardcoded CSS selector '{selectors}' is invalid"),
    }
}

/// First descendant element matching `selectors`, if any.
pub fn select_first(root: &NodeRef, selectors: &str) -> Option<NodeDataRef<ElementData>> {
    match root.select(selectors) {
        Ok(mut matches) => matches.next(),
        Err(()) => panic!("BUG: hardcoded CSS selector '{selectors}' is invalid"),
    }
}

/// Nearest inclusive ancestor matching `selectors` (the DOM `closest`).
pub fn closest(node: &NodeRef, selectors: &str) -> Option<NodeRef> {
    let compiled = match Selectors::compile(selectors) {
        Ok(compiled) => compiled,
        Err(()) => panic!("BUG: hardcoded CSS selector '{selectors}' is invalid"),
    };
    node.inclusive_ancestors()
        .filter_map(NodeRef::into_element_ref)
        .find(|el| compiled.matches(el))
        .map(|el| el.as_node().clone())
}

/// Direct child elements of `node`, skipping text and comment nodes.
pub fn child_elements(node: &NodeRef) -> Vec<NodeRef> {
    node.children()
        .filter(|child| child.as_element().is_some())
        .collect()
}

/// True if `node` is an element with the given local tag name.
pub fn is_element(node: &NodeRef, tag: &str) -> bool {
    node.as_element().is_some_and(|el| &*el.name.local == tag)
}

/// Value of an attribute on a matched element, as an owned string.
pub fn attr(el: &NodeDataRef<ElementData>, name: &str) -> Option<String> {
    el.attributes.borrow().get(name).map(ToString::to_string)
}

/// Add a class token to an element, preserving existing classes.
///
/// No-op when the token is already present, so repeated decoration passes do
/// not grow the attribute.
pub fn add_class(node: &NodeRef, class: &str) {
    let Some(el) = node.as_element() else { return };
    let mut attrs = el.attributes.borrow_mut();
    let updated = match attrs.get("class") {
        Some(existing) if existing.split_whitespace().any(|token| token == class) => return,
        Some(existing) if !existing.trim().is_empty() => format!("{existing} {class}"),
        _ => class.to_string(),
    };
    attrs.insert("class", updated);
}

/// Parse an HTML snippet and return its top-level nodes, detached and ready
/// to be inserted elsewhere.
///
/// The snippet is run through the full document parser, so elements the
/// parser reparents into `<head>` (style, link) are picked up alongside body
/// content.
pub fn parse_snippet(html: &str) -> Vec<NodeRef> {
    let document = kuchiki::parse_html().one(html);
    let mut nodes = Vec::new();
    for container in ["head", "body"] {
        if let Some(root) = select_first(&document, container) {
            nodes.extend(root.as_node().children());
        }
    }
    for node in &nodes {
        node.detach();
    }
    nodes
}

/// Parse an HTML snippet and return its first element node.
pub fn parse_snippet_element(html: &str) -> Option<NodeRef> {
    parse_snippet(html)
        .into_iter()
        .find(|node| node.as_element().is_some())
}

/// Detach every descendant of `root` matching any of `selectors`.
pub fn remove_all(root: &NodeRef, selectors: &[&str]) {
    for selector in selectors {
        let matches = select_all(root, selector);
        if !matches.is_empty() {
            log::debug!("removing {} '{selector}' element(s)", matches.len());
        }
        for matched in matches {
            matched.as_node().detach();
        }
    }
}

/// Serialize a node to an HTML string. Used by tests and the importer.
pub fn serialize(node: &NodeRef) -> std::io::Result<String> {
    let mut out = Vec::new();
    node.serialize(&mut out)?;
    String::from_utf8(out).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}
