//! Block specification and table materializer.
//!
//! A block is a named table of rows and cells. Parsers assemble a
//! [`BlockSpec`] out of nodes extracted from a legacy section; materializing
//! it builds the target table markup and *moves* each extracted node into its
//! cell. A node is detached from its original parent exactly once and
//! attached to exactly one `<td>`, so no node can end up in two cells.

use kuchiki::NodeRef;

use crate::dom;

/// Ordered content nodes occupying one column position within a row.
pub type Cell = Vec<NodeRef>;

/// Ordered cells making up one table row.
pub type Row = Vec<Cell>;

/// A block name plus its rows — the contract handed to the materializer.
#[derive(Debug, Default)]
pub struct BlockSpec {
    name: String,
    rows: Vec<Row>,
}

impl BlockSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Materialize the spec into a block table element.
    ///
    /// The header row carries the block name and spans the widest row. The
    /// skeleton is generated as one HTML string and parsed in a single pass
    /// because the parser only accepts `tr`/`td` inside a complete table;
    /// extracted nodes are then moved into the empty `<td>`s in order.
    pub fn into_table(self) -> NodeRef {
        let max_cols = self.rows.iter().map(Vec::len).max().unwrap_or(1).max(1);

        let mut skeleton = String::from("<table>");
        skeleton.push_str(&format!(
            r#"<tr><th colspan="{max_cols}">{}</th></tr>"#,
            html_escape::encode_text(&self.name)
        ));
        for row in &self.rows {
            skeleton.push_str("<tr>");
            for _ in row {
                skeleton.push_str("<td></td>");
            }
            skeleton.push_str("</tr>");
        }
        skeleton.push_str("</table>");

        let table = dom::parse_snippet_element(&skeleton)
            .expect("BUG: generated block table skeleton failed to parse");

        let cells = dom::select_all(&table, "td");
        let mut slots = cells.iter();
        for row in self.rows {
            for cell in row {
                let slot = slots
                    .next()
                    .expect("BUG: block table skeleton has fewer <td> slots than cells");
                for node in cell {
                    node.detach();
                    slot.as_node().append(node);
                }
            }
        }
        table
    }
}

/// Materialize `spec` and splice the resulting table in place of `section`.
///
/// The section element is removed only after the table has captured every
/// node the spec references. The created table is returned; when `section`
/// is not attached to a document the table is returned without splicing.
pub fn replace_with_block(section: &NodeRef, spec: BlockSpec) -> NodeRef {
    let name = spec.name().to_string();
    let table = spec.into_table();
    if section.parent().is_some() {
        section.insert_before(table.clone());
        section.detach();
        log::debug!("replaced section with '{name}' block table");
    } else {
        log::debug!("section for '{name}' block is detached; returning table without splicing");
    }
    table
}
