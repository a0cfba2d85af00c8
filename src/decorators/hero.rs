//! Hero block decorator: promotes an mp4 link into a looping background
//! video. A block with no mp4 link is left entirely unmodified.

use kuchiki::NodeRef;

use crate::dom;

/// Decorate a rendered hero block in place.
pub fn decorate(block: &NodeRef) {
    let video_link = dom::select_all(block, "a").into_iter().find(|a| {
        dom::attr(a, "href").is_some_and(|href| href.contains(".mp4"))
            || a.as_node().text_contents().contains(".mp4")
    });
    let Some(link) = video_link else {
        return;
    };

    // prefer the visible text: upstream rewriting may have altered the href
    let text = link.as_node().text_contents().trim().to_string();
    let src = if text.contains(".mp4") {
        text
    } else {
        dom::attr(&link, "href").unwrap_or_default()
    };
    if src.is_empty() {
        return;
    }

    // drop the link's paragraph, and its row if nothing else is left in it
    let link_parent = dom::closest(link.as_node(), "p").or_else(|| link.as_node().parent());
    let row = link_parent.as_ref().and_then(|parent| row_of(block, parent));
    if let Some(parent) = link_parent {
        parent.detach();
    }
    if let Some(row) = row {
        if row.text_contents().trim().is_empty()
            && dom::select_first(&row, "picture, img").is_none()
        {
            row.detach();
        }
    }

    let video_html = format!(
        concat!(
            r#"<video class="hero-video" autoplay muted loop playsinline>"#,
            r#"<source src="{}" type="video/mp4"></video>"#
        ),
        html_escape::encode_double_quoted_attribute(&src)
    );
    let Some(video) = dom::parse_snippet_element(&video_html) else {
        return;
    };

    // insert immediately before the first image, or lead the block
    if let Some(image) = dom::select_first(block, "picture, img") {
        image.as_node().insert_before(video);
    } else {
        block.prepend(video);
    }
    log::debug!("inserted hero background video from {src}");
}

/// The row containing `node`: its inclusive ancestor that is a direct child
/// of the block root.
fn row_of(block: &NodeRef, node: &NodeRef) -> Option<NodeRef> {
    node.inclusive_ancestors()
        .find(|ancestor| ancestor.parent().as_ref() == Some(block))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuchiki::traits::TendrilSink;

    fn block_from(body: &str) -> (NodeRef, NodeRef) {
        let document = kuchiki::parse_html().one(body.to_string());
        let block = dom::select_first(&document, ".hero")
            .expect("block")
            .as_node()
            .clone();
        (document, block)
    }

    #[test]
    fn no_mp4_link_leaves_block_unmodified() {
        let (doc, block) = block_from(
            r#"<body><div class="hero"><div><div>
                <h1>Title</h1><p><a href="/go">Go</a></p>
            </div></div></div></body>"#,
        );
        let before = dom::serialize(&doc).expect("serialize");
        decorate(&block);
        let after = dom::serialize(&doc).expect("serialize");
        assert_eq!(before, after);
    }

    #[test]
    fn video_is_inserted_before_the_picture() {
        let (doc, block) = block_from(
            r#"<body><div class="hero">
                <div><div><picture><img src="bg.jpg"></picture></div></div>
                <div><div><h1>Title</h1><p><a href="https://cdn.example/loop.mp4">loop.mp4</a></p></div></div>
            </div></body>"#,
        );
        decorate(&block);
        let html = dom::serialize(&doc).expect("serialize");
        let video_at = html.find("<video").expect("video present");
        let picture_at = html.find("<picture").expect("picture kept");
        assert!(video_at < picture_at);
        assert!(html.contains(r#"type="video/mp4""#));
        // the link paragraph is gone
        assert!(!html.contains("loop.mp4</a>"));
    }

    #[test]
    fn rewritten_href_falls_back_to_text_source() {
        let (doc, block) = block_from(
            r#"<body><div class="hero"><div><div>
                <h1>Title</h1>
                <p><a href="https://rewritten.example/media_abc">video.mp4</a></p>
            </div></div></div></body>"#,
        );
        decorate(&block);
        let source = dom::select_first(&block, "source").expect("source");
        assert_eq!(dom::attr(&source, "src").as_deref(), Some("video.mp4"));
    }

    #[test]
    fn video_leads_the_block_when_no_image_exists() {
        let (_doc, block) = block_from(
            r#"<body><div class="hero"><div><div>
                <h1>Title</h1>
                <p><a href="https://cdn.example/bg.mp4">https://cdn.example/bg.mp4</a></p>
            </div></div></div></body>"#,
        );
        decorate(&block);
        let first = dom::child_elements(&block);
        assert!(dom::is_element(&first[0], "video"));
    }

    #[test]
    fn emptied_row_is_removed() {
        let (doc, block) = block_from(
            r#"<body><div class="hero">
                <div><div><p><a href="https://cdn.example/bg.mp4">bg.mp4</a></p></div></div>
                <div><div><h1>Title</h1></div></div>
            </div></body>"#,
        );
        decorate(&block);
        // the video replaces the row that held only the link
        let rows = dom::child_elements(&block);
        assert_eq!(rows.len(), 2);
        assert!(dom::is_element(&rows[0], "video"));
        let html = dom::serialize(&doc).expect("serialize");
        assert!(html.contains("Title"));
    }

    #[test]
    fn second_run_is_a_no_op() {
        let (doc, block) = block_from(
            r#"<body><div class="hero"><div><div>
                <h1>Title</h1>
                <p><a href="https://cdn.example/bg.mp4">bg.mp4</a></p>
            </div></div></div></body>"#,
        );
        decorate(&block);
        let first_pass = dom::serialize(&doc).expect("serialize");
        decorate(&block);
        let second_pass = dom::serialize(&doc).expect("serialize");
        assert_eq!(first_pass, second_pass);
    }
}
