//! Page-scoped marked-content identifier allocation.
//!
//! MCIDs are assigned once per page, from a single monotonically increasing
//! counter, and the resulting [`PageMcids`] is handed to both the content
//! rewriter and the structure tree builder. One authority prevents the two
//! stages from drifting apart: every identifier a structure element
//! references was produced by the same walk that decides what the rewriter
//! may emit.
//!
//! Allocation is item-driven: a text item claims one MCID, a table item
//! claims one per retained cell (row-major). Text runs that fail to match an
//! item never touch the counter; items that no run matched keep their
//! allocation, so the stream's MCID set is a subset of the tree's.

use crate::layout::StructureItem;

/// MCID assignment for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemMcids {
    /// A text item's single identifier
    Text(u32),
    /// A table item's per-cell identifiers, row-major, shaped like the
    /// retained cell matrix
    Table(Vec<Vec<u32>>),
}

/// The complete MCID assignment for one page.
#[derive(Debug, Clone)]
pub struct PageMcids {
    per_item: Vec<ItemMcids>,
    next: u32,
}

impl PageMcids {
    /// Allocate identifiers for a page's items, in item order, starting at 0.
    pub fn allocate(items: &[StructureItem]) -> Self {
        let mut next = 0u32;
        let mut per_item = Vec::with_capacity(items.len());

        for item in items {
            match &item.table {
                Some(rows) => {
                    let cell_ids = rows
                        .iter()
                        .map(|row| {
                            row.iter()
                                .map(|_| {
                                    let id = next;
                                    next += 1;
                                    id
                                })
                                .collect()
                        })
                        .collect();
                    per_item.push(ItemMcids::Table(cell_ids));
                },
                None => {
                    per_item.push(ItemMcids::Text(next));
                    next += 1;
                },
            }
        }

        Self { per_item, next }
    }

    /// The identifier the rewriter splices for a matched text item, or `None`
    /// for table items and out-of-range indices.
    pub fn text_mcid(&self, item_index: usize) -> Option<u32> {
        match self.per_item.get(item_index) {
            Some(ItemMcids::Text(id)) => Some(*id),
            _ => None,
        }
    }

    /// Assignment for one item.
    pub fn item(&self, item_index: usize) -> Option<&ItemMcids> {
        self.per_item.get(item_index)
    }

    /// Total identifiers allocated on the page.
    pub fn count(&self) -> u32 {
        self.next
    }
}
