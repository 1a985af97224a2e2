//! Structure tree building: classified items → per-page element hierarchy.
//!
//! Converts a page's [`StructureItem`] sequence and its MCID allocation into
//! the [`PageStructure`] the document writer persists. Item-level problems
//! are logged and skipped so the rest of the page still gets structure.

use crate::layout::{ItemKind, StructureItem};
use crate::structure::mcid::{ItemMcids, PageMcids};
use crate::structure::types::{PageStructure, Role, StructureNode};

/// Maximum length, in characters, of an element title.
const TITLE_MAX: usize = 100;

/// Build the structure element hierarchy for one page.
///
/// Walks items in page order: a text item becomes one element tagged with
/// its kind and referencing its allocated MCID; a table item becomes a
/// `Table` element owning `TR` rows owning `TH`/`TD` cells, each cell
/// referencing its own MCID. Titles are truncated to 100 characters.
pub fn build_page_structure(
    page_number: usize,
    items: &[StructureItem],
    mcids: &PageMcids,
) -> PageStructure {
    let mut nodes = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        match item.kind {
            ItemKind::Table => match table_node(item, mcids.item(index)) {
                Some(node) => nodes.push(node),
                None => {
                    log::warn!(
                        "page {}: skipping malformed table item at position {}",
                        page_number,
                        index
                    );
                },
            },
            _ => match text_node(item, mcids.text_mcid(index)) {
                Some(node) => nodes.push(node),
                None => {
                    log::warn!(
                        "page {}: skipping text item at position {} without an MCID",
                        page_number,
                        index
                    );
                },
            },
        }
    }

    PageStructure { page_number, nodes }
}

/// Element for one text item.
fn text_node(item: &StructureItem, mcid: Option<u32>) -> Option<StructureNode> {
    let role = Role::from_tag(item.kind.tag())?;
    let title = item.text.as_deref().map(|t| truncate(t, TITLE_MAX));
    Some(StructureNode::leaf(role, title, mcid?))
}

/// `Table` element with nested `TR` and `TH`/`TD` children.
fn table_node(item: &StructureItem, mcids: Option<&ItemMcids>) -> Option<StructureNode> {
    let rows = item.table.as_ref()?;
    let cell_ids = match mcids {
        Some(ItemMcids::Table(ids)) => ids,
        _ => return None,
    };
    if cell_ids.len() != rows.len() {
        return None;
    }

    let mut row_nodes = Vec::with_capacity(rows.len());
    for (row, ids) in rows.iter().zip(cell_ids) {
        if ids.len() != row.len() {
            return None;
        }
        let cells = row
            .iter()
            .zip(ids)
            .map(|(cell, &mcid)| {
                let role = if cell.is_header { Role::TH } else { Role::TD };
                StructureNode::leaf(role, Some(truncate(&cell.text, TITLE_MAX)), mcid)
            })
            .collect();
        row_nodes.push(StructureNode::branch(Role::TR, cells));
    }

    Some(StructureNode::branch(Role::Table, row_nodes))
}

/// Truncate to at most `max` characters, respecting char boundaries.
fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
