//! Layout classification: raw page blocks → ordered structure items.
//!
//! Classification is rule-based on font size and weight. The thresholds are
//! fixed constants tuned for common office documents; they are deliberately
//! not configurable per document.

use crate::layout::table::extract_table;
use crate::layout::types::{
    display_rect, ItemKind, PageLayout, RawTextBlock, StructureItem, TableDetection,
};

/// Font size above which a block is tagged H1.
pub const H1_FONT_SIZE: f32 = 14.0;

/// Font size above which a block is tagged H2 (bold blocks qualify at any size).
pub const H2_FONT_SIZE: f32 = 12.0;

/// Tolerance, in points, when testing whether a text block sits inside a
/// table region.
pub const TABLE_MARGIN: f32 = 5.0;

/// Classify one page's raw layout into an ordered sequence of structure items.
///
/// Table detections are normalized first; text blocks that fall inside any
/// table region (within [`TABLE_MARGIN`]) or whose trimmed text is empty are
/// dropped. The surviving text items and table items are merged and sorted by
/// their top edge, top of page first, with discovery order as the tie-break.
///
/// # Arguments
///
/// * `page_number` - 1-based page number recorded on each item
/// * `layout` - the page's raw blocks and table detections
pub fn classify_page(page_number: usize, layout: &PageLayout) -> Vec<StructureItem> {
    let mut items = Vec::new();

    let table_boxes: Vec<_> = layout.tables.iter().map(|t| t.bbox).collect();

    for detection in &layout.tables {
        match table_item(page_number, detection, layout.height) {
            Some(item) => items.push(item),
            None => {
                log::warn!(
                    "page {}: discarding table detection without usable header and body rows",
                    page_number
                );
            },
        }
    }

    for block in &layout.blocks {
        let in_table = table_boxes
            .iter()
            .any(|t| block.bbox.inside_with_margin(t, TABLE_MARGIN));
        if in_table {
            continue;
        }

        if let Some(item) = text_item(page_number, block, layout.height) {
            items.push(item);
        }
    }

    // Stable sort keeps discovery order for blocks sharing a top edge.
    items.sort_by(|a, b| {
        a.bbox
            .top()
            .partial_cmp(&b.bbox.top())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    log::debug!(
        "page {}: {} structure items ({} tables)",
        page_number,
        items.len(),
        items.iter().filter(|i| i.is_table()).count()
    );

    items
}

/// Classify a single text block, or drop it if its trimmed text is empty.
fn text_item(page_number: usize, block: &RawTextBlock, page_height: f32) -> Option<StructureItem> {
    let text = block.text.trim();
    if text.is_empty() {
        return None;
    }

    let kind = if block.max_font_size > H1_FONT_SIZE {
        ItemKind::Heading1
    } else if block.max_font_size > H2_FONT_SIZE || block.is_bold {
        ItemKind::Heading2
    } else {
        ItemKind::Paragraph
    };

    Some(StructureItem {
        page: page_number,
        kind,
        text: Some(text.to_string()),
        table: None,
        bbox: block.bbox,
        display_rect: display_rect(&block.bbox, page_height),
    })
}

/// Normalize a table detection into a table item.
fn table_item(
    page_number: usize,
    detection: &TableDetection,
    page_height: f32,
) -> Option<StructureItem> {
    let rows = extract_table(detection)?;

    Some(StructureItem {
        page: page_number,
        kind: ItemKind::Table,
        text: None,
        table: Some(rows),
        bbox: detection.bbox,
        display_rect: display_rect(&detection.bbox, page_height),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn block(text: &str, size: f32, bold: bool, y0: f32) -> RawTextBlock {
        RawTextBlock {
            bbox: Rect::from_points(72.0, y0, 300.0, y0 + size * 1.2),
            max_font_size: size,
            is_bold: bold,
            text: text.to_string(),
        }
    }

    fn page(blocks: Vec<RawTextBlock>, tables: Vec<TableDetection>) -> PageLayout {
        PageLayout {
            height: 792.0,
            blocks,
            tables,
        }
    }

    #[test]
    fn test_large_font_is_heading1() {
        let layout = page(vec![block("Invoice Total: $500", 16.0, false, 100.0)], vec![]);
        let items = classify_page(1, &layout);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, ItemKind::Heading1);
        assert_eq!(items[0].text.as_deref(), Some("Invoice Total: $500"));
    }

    #[test]
    fn test_small_regular_font_is_paragraph() {
        let layout = page(vec![block("Invoice Total: $500", 11.0, false, 100.0)], vec![]);
        let items = classify_page(1, &layout);
        assert_eq!(items[0].kind, ItemKind::Paragraph);
    }

    #[test]
    fn test_bold_body_text_is_heading2() {
        let layout = page(vec![block("Summary", 11.0, true, 100.0)], vec![]);
        let items = classify_page(1, &layout);
        assert_eq!(items[0].kind, ItemKind::Heading2);

        let layout = page(vec![block("Summary", 13.0, false, 100.0)], vec![]);
        let items = classify_page(1, &layout);
        assert_eq!(items[0].kind, ItemKind::Heading2);
    }

    #[test]
    fn test_threshold_boundaries_are_exclusive() {
        // Exactly 14pt is not H1, exactly 12pt non-bold is not H2.
        let layout = page(vec![block("x", 14.0, false, 100.0)], vec![]);
        assert_eq!(classify_page(1, &layout)[0].kind, ItemKind::Heading2);

        let layout = page(vec![block("x", 12.0, false, 100.0)], vec![]);
        assert_eq!(classify_page(1, &layout)[0].kind, ItemKind::Paragraph);
    }

    #[test]
    fn test_whitespace_only_block_dropped() {
        let layout = page(vec![block("   \n\t ", 12.0, false, 100.0)], vec![]);
        assert!(classify_page(1, &layout).is_empty());
    }

    #[test]
    fn test_block_inside_table_dropped() {
        let detection = TableDetection {
            bbox: Rect::from_points(70.0, 90.0, 400.0, 200.0),
            cells: vec![
                vec![Some("Name".to_string()), Some("Age".to_string())],
                vec![Some("Ann".to_string()), Some("30".to_string())],
            ],
        };
        let layout = page(
            vec![
                block("Ann", 11.0, false, 120.0),
                block("After the table", 11.0, false, 300.0),
            ],
            vec![detection],
        );

        let items = classify_page(1, &layout);
        assert_eq!(items.len(), 2);
        assert!(items[0].is_table());
        assert_eq!(items[1].text.as_deref(), Some("After the table"));
    }

    #[test]
    fn test_items_sorted_by_top_edge() {
        let layout = page(
            vec![
                block("second", 11.0, false, 400.0),
                block("first", 16.0, false, 100.0),
                block("third", 11.0, false, 600.0),
            ],
            vec![],
        );
        let items = classify_page(1, &layout);
        let texts: Vec<_> = items.iter().map(|i| i.text.as_deref().unwrap()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert!(items.windows(2).all(|w| w[0].bbox.top() <= w[1].bbox.top()));
    }

    #[test]
    fn test_tables_interleave_with_text_by_position() {
        let detection = TableDetection {
            bbox: Rect::from_points(70.0, 200.0, 400.0, 300.0),
            cells: vec![
                vec![Some("H".to_string())],
                vec![Some("b".to_string())],
            ],
        };
        let layout = page(
            vec![
                block("above", 11.0, false, 100.0),
                block("below", 11.0, false, 500.0),
            ],
            vec![detection],
        );
        let items = classify_page(1, &layout);
        assert_eq!(items.len(), 3);
        assert!(items[1].is_table());
    }
}
