//! Migration parsers: one per target block type. Each takes a legacy section
//! element rooted in a document, extracts its fields, and replaces the
//! section with a block table.

use kuchiki::NodeRef;

pub mod cards;
pub mod columns;
pub mod hero;

pub use columns::ColumnsPattern;

/// The block types a section can be migrated into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Cards,
    Columns,
    Hero,
}

impl BlockKind {
    /// Run this kind's parser against a section, replacing it with a block
    /// table. Returns the created table.
    pub fn parse(self, section: &NodeRef) -> NodeRef {
        match self {
            BlockKind::Cards => cards::parse(section),
            BlockKind::Columns => columns::parse(section),
            BlockKind::Hero => hero::parse(section),
        }
    }
}
