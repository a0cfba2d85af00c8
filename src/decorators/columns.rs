//! Columns block decorator: tags the block with its column count, marks
//! image-only columns, and turns bare YouTube links into responsive embeds.

use kuchiki::{ElementData, NodeDataRef, NodeRef};
use url::Url;

use crate::dom;

/// Decorate a rendered columns block in place.
///
/// Rows are the block's direct-child divs; columns are their child divs.
/// Re-running on an already-decorated block mutates nothing: class tagging
/// is idempotent and embedded players leave no qualifying anchor behind.
pub fn decorate(block: &NodeRef) {
    let rows = dom::child_elements(block);
    if let Some(first_row) = rows.first() {
        let count = dom::child_elements(first_row).len();
        dom::add_class(block, &format!("columns-{count}-cols"));
    }

    for row in &rows {
        for col in dom::child_elements(row) {
            mark_image_column(&col);
            for anchor in dom::select_all(&col, "a") {
                let text = anchor.as_node().text_contents().trim().to_string();
                let href = dom::attr(&anchor, "href").unwrap_or_default();
                if (text.contains("youtube.com") || text.contains("youtu.be")) && text == href {
                    embed_youtube(&anchor);
                }
            }
        }
    }
}

/// A column whose picture sits alone in its own container is an image
/// column; tag the container for styling.
fn mark_image_column(col: &NodeRef) {
    let Some(pic) = dom::select_first(col, "picture") else {
        return;
    };
    if let Some(wrapper) = dom::closest(pic.as_node(), "div") {
        if dom::child_elements(&wrapper).len() == 1 {
            dom::add_class(&wrapper, "columns-img-col");
        }
    }
}

/// Replace the anchor's containing paragraph with a 16:9 wrapper holding a
/// lazily-loaded YouTube iframe. An unparseable URL or missing video id
/// leaves the anchor untouched.
fn embed_youtube(anchor: &NodeDataRef<ElementData>) {
    let href = dom::attr(anchor, "href").unwrap_or_default();
    let text = anchor.as_node().text_contents().trim().to_string();
    let raw = if href.contains("youtube") { href } else { text };

    let parsed = match Url::parse(&raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::warn!("skipping video embed, unparseable URL '{raw}': {e}");
            return;
        }
    };

    let video_id = if parsed.host_str().is_some_and(|h| h.contains("youtu.be")) {
        // short link: the id is the first path segment
        parsed
            .path_segments()
            .and_then(|mut segments| segments.next().map(ToString::to_string))
            .filter(|id| !id.is_empty())
    } else {
        parsed
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
    };
    let Some(video_id) = video_id else {
        log::debug!("no video id in '{raw}', leaving anchor as-is");
        return;
    };

    let embed_src = format!("https://www.youtube.com/embed/{video_id}?rel=0");
    let wrapper_html = format!(
        concat!(
            r#"<div style="left:0;width:100%;height:0;position:relative;padding-bottom:56.25%">"#,
            r#"<iframe src="{}" style="border:0;top:0;left:0;width:100%;height:100%;position:absolute" "#,
            r#"allow="autoplay; fullscreen; picture-in-picture; encrypted-media; accelerometer; gyroscope" "#,
            r#"allowfullscreen loading="lazy" title="Content from Youtube"></iframe></div>"#
        ),
        html_escape::encode_double_quoted_attribute(&embed_src)
    );
    let Some(wrapper) = dom::parse_snippet_element(&wrapper_html) else {
        return;
    };

    let target = dom::closest(anchor.as_node(), "p").or_else(|| anchor.as_node().parent());
    if let Some(target) = target {
        target.insert_before(wrapper);
        target.detach();
        log::debug!("embedded YouTube video {video_id}");
    }
}
