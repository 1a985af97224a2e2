//! Audit sidecar: the full structure-item list serialized as JSON.
//!
//! Written next to the tagged output (`<output>.json`) after tagging
//! succeeds, for debugging and auditing what the classifier saw. Text items
//! carry `text`; table items carry `table_data`; both carry the raw `bbox`
//! corners and the flipped display `rect`.

use crate::error::Result;
use crate::layout::{Cell, StructureItem};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// One serialized structure item.
#[derive(Debug, Serialize)]
struct SidecarRecord<'a> {
    page: usize,
    #[serde(rename = "type")]
    kind: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    table_data: Option<&'a Vec<Vec<Cell>>>,
    bbox: [f32; 4],
    rect: [f32; 4],
}

impl<'a> From<&'a StructureItem> for SidecarRecord<'a> {
    fn from(item: &'a StructureItem) -> Self {
        Self {
            page: item.page,
            kind: item.kind.tag(),
            text: item.text.as_deref(),
            table_data: item.table.as_ref(),
            bbox: item.bbox.corners(),
            rect: [
                item.display_rect.x,
                item.display_rect.y,
                item.display_rect.width,
                item.display_rect.height,
            ],
        }
    }
}

/// Write the sidecar JSON array for the whole document.
pub fn write_sidecar<P: AsRef<Path>>(path: P, items: &[StructureItem]) -> Result<()> {
    let records: Vec<SidecarRecord<'_>> = items.iter().map(SidecarRecord::from).collect();
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), &records)?;
    Ok(())
}
