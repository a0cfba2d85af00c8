//! Hero parser: an optional background-image row followed by a single
//! content cell of heading, paragraphs, and CTA anchors.

use kuchiki::NodeRef;

use crate::block::{BlockSpec, Cell, replace_with_block};
use crate::dom;

/// Parse a legacy section into a Hero block table, replacing the section in
/// place. Returns the created table.
pub fn parse(section: &NodeRef) -> NodeRef {
    let mut spec = BlockSpec::new("Hero");

    // Row 1: background image alone, omitted entirely when absent
    if let Some(img) = dom::select_first(section, "img") {
        spec.push_row(vec![vec![img.as_node().clone()]]);
    }

    // Row 2: heading (h1 preferred, h2 fallback) + paragraphs + CTAs
    let mut content: Cell = Vec::new();
    if let Some(heading) =
        dom::select_first(section, "h1").or_else(|| dom::select_first(section, "h2"))
    {
        content.push(heading.as_node().clone());
    }
    for p in dom::select_all(section, "p") {
        content.push(p.as_node().clone());
    }
    for a in dom::select_all(section, "a") {
        content.push(a.as_node().clone());
    }
    spec.push_row(vec![content]);

    replace_with_block(section, spec)
}
