//! Columns parser: classify a legacy section into one of four layout
//! patterns, then extract its fields into a two-phase classify/extract
//! pipeline feeding the Columns block table.

use kuchiki::NodeRef;

use crate::block::{BlockSpec, Cell, Row, replace_with_block};
use crate::dom;

/// The legacy layout shapes a columns section can take, in classification
/// priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnsPattern {
    /// Section contains at least one `.card` element.
    SideBySideCards,
    /// No cards, but a `blockquote` is present.
    Testimonial,
    /// No cards or quote, but two or more direct-child `h2` headings.
    DualCta,
    /// Fallback: image plus text content.
    ImageText,
}

/// Classify a section into exactly one pattern. Read-only; the fallback
/// guarantees a result for any input.
pub fn classify(section: &NodeRef) -> ColumnsPattern {
    if !dom::select_all(section, ".card").is_empty() {
        return ColumnsPattern::SideBySideCards;
    }
    if dom::select_first(section, "blockquote").is_some() {
        return ColumnsPattern::Testimonial;
    }
    let direct_headings = dom::child_elements(section)
        .iter()
        .filter(|child| dom::is_element(child, "h2"))
        .count();
    if direct_headings >= 2 {
        return ColumnsPattern::DualCta;
    }
    ColumnsPattern::ImageText
}

/// Parse a legacy section into a Columns block table, replacing the section
/// in place. Returns the created table.
pub fn parse(section: &NodeRef) -> NodeRef {
    let pattern = classify(section);
    let id = section
        .as_element()
        .and_then(|el| el.attributes.borrow().get("id").map(ToString::to_string))
        .unwrap_or_default();
    log::debug!("columns section '{id}' classified as {pattern:?}");

    let row = match pattern {
        ColumnsPattern::SideBySideCards => extract_cards_row(section),
        ColumnsPattern::Testimonial => extract_testimonial(section),
        ColumnsPattern::DualCta => extract_dual_cta(section),
        ColumnsPattern::ImageText => extract_image_text(section),
    };

    let mut spec = BlockSpec::new("Columns");
    spec.push_row(row);
    replace_with_block(section, spec)
}

/// One cell per card: image, heading (h2 preferred, h3 fallback), all
/// paragraphs, all anchors, in that order.
fn extract_cards_row(section: &NodeRef) -> Row {
    dom::select_all(section, ".card")
        .iter()
        .map(|card| {
            let card = card.as_node();
            let mut cell: Cell = Vec::new();
            if let Some(img) = dom::select_first(card, "img") {
                cell.push(img.as_node().clone());
            }
            if let Some(heading) =
                dom::select_first(card, "h2").or_else(|| dom::select_first(card, "h3"))
            {
                cell.push(heading.as_node().clone());
            }
            for p in dom::select_all(card, "p") {
                cell.push(p.as_node().clone());
            }
            for a in dom::select_all(card, "a") {
                cell.push(a.as_node().clone());
            }
            cell
        })
        .collect()
}

/// Column A: image when present. Column B: the quote followed by all
/// paragraphs in document order.
fn extract_testimonial(section: &NodeRef) -> Row {
    let mut col_a: Cell = Vec::new();
    if let Some(img) = dom::select_first(section, "img") {
        col_a.push(img.as_node().clone());
    }

    let mut col_b: Cell = Vec::new();
    if let Some(quote) = dom::select_first(section, "blockquote") {
        col_b.push(quote.as_node().clone());
    }
    for p in dom::select_all(section, "p") {
        col_b.push(p.as_node().clone());
    }

    vec![col_a, col_b]
}

/// Split direct children into two columns at the second `h2`. Everything
/// before the second heading stays in Column A; the second heading and
/// everything after it goes to Column B. A third or later heading stays in
/// Column B with no further split.
fn extract_dual_cta(section: &NodeRef) -> Row {
    let mut col_a: Cell = Vec::new();
    let mut col_b: Cell = Vec::new();
    let mut heading_count = 0;
    let mut in_second = false;

    for child in dom::child_elements(section) {
        if dom::is_element(&child, "h2") {
            heading_count += 1;
            if heading_count == 2 {
                in_second = true;
            }
        }
        if in_second {
            col_b.push(child);
        } else {
            col_a.push(child);
        }
    }

    vec![col_a, col_b]
}

/// Default pattern. Column A: first image. Column B: paragraphs minus the
/// intro text sitting between the first direct-child heading and the first
/// image or list, then all lists, then direct-child anchors only (nested
/// anchors are excluded to avoid duplication).
fn extract_image_text(section: &NodeRef) -> Row {
    let img = dom::select_first(section, "img").map(|el| el.as_node().clone());

    let intro = intro_paragraphs(section, img.as_ref());

    let mut col_a: Cell = Vec::new();
    if let Some(img) = img {
        col_a.push(img);
    }

    let mut col_b: Cell = Vec::new();
    for p in dom::select_all(section, "p") {
        let node = p.as_node().clone();
        if !intro.contains(&node) {
            col_b.push(node);
        }
    }
    for list in dom::select_all(section, "ul, ol") {
        col_b.push(list.as_node().clone());
    }
    for child in dom::child_elements(section) {
        if dom::is_element(&child, "a") {
            col_b.push(child);
        }
    }

    vec![col_a, col_b]
}

/// Paragraphs between the first direct-child `h2` and the first image, read
/// top to bottom and terminated at the first image or list. These belong to
/// the section's default intro content, not the columns block.
fn intro_paragraphs(section: &NodeRef, first_img: Option<&NodeRef>) -> Vec<NodeRef> {
    let mut intro = Vec::new();
    // no image means there is nothing "between the heading and the image";
    // every paragraph belongs to the block
    if first_img.is_none() {
        return intro;
    }
    let first_heading = dom::child_elements(section)
        .into_iter()
        .find(|child| dom::is_element(child, "h2"));
    let Some(first_heading) = first_heading else {
        return intro;
    };

    let mut sibling = first_heading.next_sibling();
    while let Some(node) = sibling {
        if node.as_element().is_some() {
            if dom::is_element(&node, "img")
                || dom::is_element(&node, "ul")
                || dom::is_element(&node, "ol")
                || first_img == Some(&node)
            {
                break;
            }
            if dom::is_element(&node, "p") {
                intro.push(node.clone());
            }
        }
        sibling = node.next_sibling();
    }
    intro
}
