//! Cards parser: each card becomes a two-column row of image and text
//! content. Anchors that merely wrap an image or sit inside a heading are
//! structural, not calls to action, and are excluded from the text cell.

use kuchiki::NodeRef;

use crate::block::{BlockSpec, Cell, replace_with_block};
use crate::dom;

/// Parse a legacy section into a Cards block table, replacing the section in
/// place. Returns the created table.
pub fn parse(section: &NodeRef) -> NodeRef {
    let mut cards: Vec<NodeRef> = dom::select_all(section, ".card")
        .iter()
        .map(|card| card.as_node().clone())
        .collect();
    // no recognized card class: treat direct child divs as the cards
    if cards.is_empty() {
        cards = dom::child_elements(section)
            .into_iter()
            .filter(|child| dom::is_element(child, "div"))
            .collect();
    }
    log::debug!("cards section yields {} card(s)", cards.len());

    let mut spec = BlockSpec::new("Cards");
    for card in cards {
        let mut image_cell: Cell = Vec::new();
        if let Some(img) = dom::select_first(&card, "img") {
            image_cell.push(img.as_node().clone());
        }

        let mut text_cell: Cell = Vec::new();
        if let Some(heading) =
            dom::select_first(&card, "h3").or_else(|| dom::select_first(&card, "h2"))
        {
            text_cell.push(heading.as_node().clone());
        }
        for p in dom::select_all(&card, "p") {
            text_cell.push(p.as_node().clone());
        }
        for a in cta_anchors(&card) {
            text_cell.push(a);
        }

        spec.push_row(vec![image_cell, text_cell]);
    }

    replace_with_block(section, spec)
}

/// Anchors that qualify as calls to action: not wrapping an image, not
/// nested inside a heading.
fn cta_anchors(card: &NodeRef) -> Vec<NodeRef> {
    dom::select_all(card, "a")
        .iter()
        .filter(|a| dom::select_first(a.as_node(), "img").is_none())
        .filter(|a| dom::closest(a.as_node(), "h2, h3, h4").is_none())
        .map(|a| a.as_node().clone())
        .collect()
}
