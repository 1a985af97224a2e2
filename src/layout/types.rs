//! Types produced and consumed by layout analysis.
//!
//! Raw inputs ([`RawTextBlock`], [`TableDetection`], [`PageLayout`]) arrive
//! from a layout reader; classified outputs ([`StructureItem`]) feed the
//! content-stream matcher and the structure tree builder.
//!
//! ## Coordinate convention
//!
//! Raw bounding boxes use top-left-origin page coordinates (y grows
//! downward), the form layout libraries report. [`StructureItem::display_rect`]
//! is the same region flipped against the page height into bottom-left-origin
//! `[x, y, width, height]` display space.

use crate::geometry::Rect;
use serde::Serialize;

/// A raw text block extracted from one page.
///
/// One block corresponds to a visually contiguous chunk of text; the reader
/// has already merged its spans and aggregated their styling.
#[derive(Debug, Clone)]
pub struct RawTextBlock {
    /// Bounding box in top-left-origin page coordinates
    pub bbox: Rect,
    /// Largest font size seen in the block, in points
    pub max_font_size: f32,
    /// Whether any span in the block uses a bold face
    pub is_bold: bool,
    /// Concatenated span text
    pub text: String,
}

/// A table detection handed over by an external table finder.
///
/// The cell matrix is row-major; a `None` cell means the finder saw the grid
/// position but could not read text for it.
#[derive(Debug, Clone)]
pub struct TableDetection {
    /// Bounding box in top-left-origin page coordinates
    pub bbox: Rect,
    /// Row-major cell text matrix
    pub cells: Vec<Vec<Option<String>>>,
}

/// Everything layout analysis needs to know about one page.
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    /// Page height in points, used to flip into display coordinates
    pub height: f32,
    /// Raw text blocks, in no particular order
    pub blocks: Vec<RawTextBlock>,
    /// Table detections for the page
    pub tables: Vec<TableDetection>,
}

/// One table cell after normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    /// Trimmed cell text
    pub text: String,
    /// Placeholder for a future per-cell bounding box; always null today
    pub bbox: Option<[f32; 4]>,
    /// Whether the cell belongs to the header row
    pub is_header: bool,
}

impl Cell {
    /// Create a cell with no bounding box.
    pub fn new(text: impl Into<String>, is_header: bool) -> Self {
        Self {
            text: text.into(),
            bbox: None,
            is_header,
        }
    }
}

/// Classification assigned to a structure item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// Top-level heading (font size above the H1 threshold)
    Heading1,
    /// Secondary heading (size above the H2 threshold, or bold)
    Heading2,
    /// Body paragraph
    Paragraph,
    /// Table detection normalized into header/body rows
    Table,
}

impl ItemKind {
    /// The PDF structure tag emitted for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            ItemKind::Heading1 => "H1",
            ItemKind::Heading2 => "H2",
            ItemKind::Paragraph => "P",
            ItemKind::Table => "Table",
        }
    }
}

/// One classified layout unit, ready for matching and tree building.
///
/// Text items carry `text`; table items carry `table`. Items are immutable
/// once classification has ordered them for a page.
#[derive(Debug, Clone)]
pub struct StructureItem {
    /// 1-based page number
    pub page: usize,
    /// Classification of the unit
    pub kind: ItemKind,
    /// Block text (text items only)
    pub text: Option<String>,
    /// Normalized cell rows (table items only)
    pub table: Option<Vec<Vec<Cell>>>,
    /// Bounding box in top-left-origin page coordinates
    pub bbox: Rect,
    /// Flipped display rectangle `[x, page_height - y1, width, height]`
    pub display_rect: Rect,
}

impl StructureItem {
    /// Trimmed item text, or `""` for table items.
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Whether this item is a table.
    pub fn is_table(&self) -> bool {
        self.kind == ItemKind::Table
    }
}

/// Flip a top-left-origin bounding box into the bottom-left-origin display
/// rectangle serialized in the sidecar.
pub(crate) fn display_rect(bbox: &Rect, page_height: f32) -> Rect {
    Rect::new(bbox.left(), page_height - bbox.bottom(), bbox.width, bbox.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_kind_tags() {
        assert_eq!(ItemKind::Heading1.tag(), "H1");
        assert_eq!(ItemKind::Heading2.tag(), "H2");
        assert_eq!(ItemKind::Paragraph.tag(), "P");
        assert_eq!(ItemKind::Table.tag(), "Table");
    }

    #[test]
    fn test_display_rect_flip() {
        let bbox = Rect::from_points(10.0, 700.0, 110.0, 720.0);
        let rect = display_rect(&bbox, 792.0);
        assert_eq!(rect.x, 10.0);
        assert_eq!(rect.y, 72.0);
        assert_eq!(rect.width, 100.0);
        assert_eq!(rect.height, 20.0);
    }
}
