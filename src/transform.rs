//! Two-phase document cleanup run around the import parsers.
//!
//! The before-phase strips page chrome and embedded resource tags so the
//! classifiers cannot misread structural regions as content. The after-phase
//! strips the frame and resource tags extraction may have left behind; it
//! must not run earlier because the extractors still need to read media
//! elements. No state is carried between phases other than the DOM itself.

use kuchiki::NodeRef;

/// The two fixed points in the import pipeline where cleanup runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformHook {
    BeforeTransform,
    AfterTransform,
}

/// Context payload handed to the transformer by the pipeline. Used only for
/// logging.
#[derive(Debug, Clone, Default)]
pub struct TransformContext {
    /// Source URL of the document being imported, when known.
    pub url: Option<String>,
}

/// Page structure elements present on every page; never content.
const CHROME_SELECTORS: &[&str] = &["header", "nav", "footer"];

/// Embedded resource tags stripped before parsing.
const RESOURCE_SELECTORS: &[&str] = &["script", "style", "noscript"];

/// Frame and resource tags stripped once extraction is complete.
const LEFTOVER_SELECTORS: &[&str] = &["iframe", "link", "source"];

/// Run one cleanup phase over `element` in place.
pub fn transform(hook: TransformHook, element: &NodeRef, ctx: &TransformContext) {
    let url = ctx.url.as_deref().unwrap_or("<unknown>");
    match hook {
        TransformHook::BeforeTransform => {
            log::debug!("cleanup before-phase for {url}");
            crate::dom::remove_all(element, CHROME_SELECTORS);
            crate::dom::remove_all(element, RESOURCE_SELECTORS);
        }
        TransformHook::AfterTransform => {
            log::debug!("cleanup after-phase for {url}");
            crate::dom::remove_all(element, LEFTOVER_SELECTORS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;
    use kuchiki::traits::TendrilSink;

    #[test]
    fn before_phase_strips_chrome_and_scripts() {
        let document = kuchiki::parse_html().one(
            r#"<body>
                <header>site</header><nav>menu</nav>
                <section><h1>Keep</h1><img src="a.jpg"><iframe src="x"></iframe></section>
                <script>track()</script><style>.a{}</style><noscript>js off</noscript>
                <footer>links</footer>
            </body>"#,
        );
        transform(
            TransformHook::BeforeTransform,
            &document,
            &TransformContext::default(),
        );
        let html = dom::serialize(&document).expect("serialize");
        for gone in ["<header", "<nav", "<footer", "<script", "<style", "<noscript"] {
            assert!(!html.contains(gone), "{gone} should be stripped");
        }
        // media and frames survive the before-phase for the extractors
        assert!(html.contains("<img"));
        assert!(html.contains("<iframe"));
    }

    #[test]
    fn after_phase_strips_leftover_embeds() {
        let document = kuchiki::parse_html().one(
            r#"<body>
                <section><h1>Keep</h1><img src="a.jpg"></section>
                <iframe src="x"></iframe>
                <link rel="preload" href="y">
                <video><source src="z.mp4"></video>
            </body>"#,
        );
        transform(
            TransformHook::AfterTransform,
            &document,
            &TransformContext::default(),
        );
        let html = dom::serialize(&document).expect("serialize");
        for gone in ["<iframe", "<link", "<source"] {
            assert!(!html.contains(gone), "{gone} should be stripped");
        }
        assert!(html.contains("<img"));
    }
}
