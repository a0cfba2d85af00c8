//! Import pipeline orchestration: cleanup, section parsing, serialization.
//!
//! The migration tooling wires each legacy page region to the parser that
//! should consume it. [`ImportConfig`] holds that wiring as selector → block
//! kind rules; [`import_document`] runs the full pass over one document.

use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink;
use thiserror::Error;

use crate::parsers::BlockKind;
use crate::transform::{TransformContext, TransformHook, transform};

/// Errors surfaced by the import pipeline.
///
/// Parsers and decorators themselves have no failure path; only the
/// pipeline's edges (user-supplied selectors, serialization) can fail.
#[derive(Debug, Error)]
pub enum ImportError {
    /// A configured section selector failed to compile.
    #[error("invalid section selector '{selector}'")]
    InvalidSelector { selector: String },

    /// Writing the transformed document back out failed.
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] std::io::Error),
}

/// One wiring entry: every section matching `selector` is parsed as `kind`.
#[derive(Debug, Clone)]
pub struct ImportRule {
    selector: String,
    kind: BlockKind,
}

/// Import configuration, built up rule by rule.
#[derive(Debug, Clone, Default)]
pub struct ImportConfig {
    rules: Vec<ImportRule>,
    source_url: Option<String>,
}

impl ImportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every section matching `selector` as `kind`. Rules apply in
    /// insertion order.
    pub fn with_rule(mut self, selector: impl Into<String>, kind: BlockKind) -> Self {
        self.rules.push(ImportRule {
            selector: selector.into(),
            kind,
        });
        self
    }

    /// Record the document's source URL for cleanup logging.
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }
}

/// Run the full import pass over one document: before-phase cleanup, section
/// parsing per rule, after-phase cleanup, serialization.
pub fn import_document(html: &str, config: &ImportConfig) -> Result<String, ImportError> {
    let document = kuchiki::parse_html().one(html);
    import_into(&document, config)?;
    Ok(crate::dom::serialize(&document)?)
}

/// Same pass over an already-parsed document, mutating it in place.
pub fn import_into(document: &NodeRef, config: &ImportConfig) -> Result<(), ImportError> {
    let ctx = TransformContext {
        url: config.source_url.clone(),
    };

    transform(TransformHook::BeforeTransform, document, &ctx);

    for rule in &config.rules {
        let sections: Vec<NodeRef> = match document.select(&rule.selector) {
            Ok(matches) => matches.map(|m| m.as_node().clone()).collect(),
            Err(()) => {
                return Err(ImportError::InvalidSelector {
                    selector: rule.selector.clone(),
                });
            }
        };
        log::debug!(
            "rule '{}' matched {} section(s) for {:?}",
            rule.selector,
            sections.len(),
            rule.kind
        );
        for section in sections {
            rule.kind.parse(&section);
        }
    }

    transform(TransformHook::AfterTransform, document, &ctx);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    const LEGACY_PAGE: &str = r#"<html><head><script>boot()</script></head><body>
        <header>chrome</header><nav>menu</nav>
        <section id="hero">
            <img src="bg.jpg"><h1>Careers</h1><p>Much more than a 9-5</p>
            <a href="/register">Register interest</a>
        </section>
        <section id="discover-potential">
            <div class="card"><img src="c1.jpg"><h3>Confidence</h3><p>Build it.</p></div>
            <div class="card"><img src="c2.jpg"><h3>Skills</h3><p>Learn them.</p></div>
        </section>
        <section id="testimonial">
            <img src="face.jpg"><blockquote>Best job ever</blockquote><p>Sam</p>
        </section>
        <footer>links</footer>
    </body></html>"#;

    fn config() -> ImportConfig {
        ImportConfig::new()
            .with_source_url("https://example.mod.uk/careers")
            .with_rule("section#hero", BlockKind::Hero)
            .with_rule("section#discover-potential", BlockKind::Cards)
            .with_rule("section#testimonial", BlockKind::Columns)
    }

    #[test]
    fn full_page_round_trip() {
        let _ = env_logger::builder().is_test(true).try_init();
        let html = import_document(LEGACY_PAGE, &config()).expect("import");
        // all sections replaced by block tables
        assert!(!html.contains("<section"));
        assert!(html.contains(">Hero<"));
        assert!(html.contains(">Cards<"));
        assert!(html.contains(">Columns<"));
        // chrome and scripts stripped in the before-phase
        for gone in ["<header", "<nav", "<footer", "<script"] {
            assert!(!html.contains(gone), "{gone} should be stripped");
        }
        // extracted content survives inside the tables
        for kept in ["Careers", "Build it.", "Best job ever", "bg.jpg"] {
            assert!(html.contains(kept), "{kept} should survive");
        }
    }

    #[test]
    fn content_is_never_duplicated() {
        let html = import_document(LEGACY_PAGE, &config()).expect("import");
        for unique in ["Careers", "Confidence", "Best job ever", "Register interest"] {
            assert_eq!(html.matches(unique).count(), 1, "{unique} appears once");
        }
    }

    #[test]
    fn invalid_rule_selector_is_reported() {
        let config = ImportConfig::new().with_rule("section[", BlockKind::Hero);
        let err = import_document("<body></body>", &config).expect_err("invalid selector");
        assert!(matches!(err, ImportError::InvalidSelector { .. }));
    }

    #[test]
    fn unmatched_rules_leave_the_document_intact() {
        let config = ImportConfig::new().with_rule("section#missing", BlockKind::Hero);
        let html = import_document("<body><p>plain</p></body>", &config).expect("import");
        assert!(html.contains("<p>plain</p>"));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn import_into_mutates_a_parsed_document() {
        let document = kuchiki::parse_html().one(LEGACY_PAGE);
        import_into(&document, &config()).expect("import");
        assert!(dom::select_first(&document, "section").is_none());
        assert_eq!(dom::select_all(&document, "table").len(), 3);
    }
}
