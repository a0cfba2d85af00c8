//! blockmill: block parsers, decorators, and cleanup transforms for
//! migrating legacy HTML sections into block tables.
//!
//! Three kinds of pass over a kuchiki DOM tree:
//! - **Parsers** (import time): classify a legacy section, extract its
//!   fields, and replace it with a named block table of rows and cells.
//! - **Decorators** (runtime): enhance an already-rendered block in place —
//!   YouTube links become responsive embeds, mp4 links become background
//!   videos.
//! - **Cleanup transform**: strips chrome before parsing and leftover embeds
//!   after, at two fixed hook points in the import pipeline.

pub mod block;
pub mod decorators;
pub mod dom;
pub mod importer;
pub mod parsers;
pub mod transform;

pub use block::{BlockSpec, Cell, Row, replace_with_block};
pub use decorators::{decorate_columns, decorate_hero};
pub use importer::{ImportConfig, ImportError, import_document, import_into};
pub use parsers::{BlockKind, ColumnsPattern};
pub use transform::{TransformContext, TransformHook, transform};
