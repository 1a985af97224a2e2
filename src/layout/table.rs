//! Table normalization: raw cell matrices → header/body rows.

use crate::layout::types::{Cell, TableDetection};

/// Normalize a raw table detection into header and body cell rows.
///
/// The first row of the matrix becomes the header row; every later row is
/// body. Cells that are blank after trimming are omitted from their row, and
/// rows left with no cells are dropped entirely. A table that does not retain
/// at least a header row plus one body row is rejected.
///
/// Returns `None` when the detection yields no usable table.
pub fn extract_table(detection: &TableDetection) -> Option<Vec<Vec<Cell>>> {
    let mut rows = Vec::new();

    for (row_index, raw_row) in detection.cells.iter().enumerate() {
        let is_header = row_index == 0;
        let row: Vec<Cell> = raw_row
            .iter()
            .filter_map(|cell| cell.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(|text| Cell::new(text, is_header))
            .collect();

        if !row.is_empty() {
            rows.push(row);
        }
    }

    // Header plus at least one body row, otherwise the table is unusable.
    if rows.len() < 2 {
        return None;
    }

    Some(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn detection(cells: Vec<Vec<Option<&str>>>) -> TableDetection {
        TableDetection {
            bbox: Rect::from_points(0.0, 0.0, 100.0, 100.0),
            cells: cells
                .into_iter()
                .map(|row| row.into_iter().map(|c| c.map(str::to_string)).collect())
                .collect(),
        }
    }

    #[test]
    fn test_header_and_body_rows() {
        let rows = extract_table(&detection(vec![
            vec![Some("Name"), Some("Age")],
            vec![Some("Ann"), Some("30")],
        ]))
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert!(rows[0].iter().all(|c| c.is_header));
        assert!(rows[1].iter().all(|c| !c.is_header));
        assert_eq!(rows[0][0].text, "Name");
        assert_eq!(rows[1][1].text, "30");
    }

    #[test]
    fn test_blank_cells_omitted() {
        let rows = extract_table(&detection(vec![
            vec![Some("Name"), None, Some("  ")],
            vec![Some("Ann"), Some("30"), None],
        ]))
        .unwrap();

        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[1].len(), 2);
    }

    #[test]
    fn test_cell_text_trimmed() {
        let rows = extract_table(&detection(vec![
            vec![Some("  Name  ")],
            vec![Some("\tAnn\n")],
        ]))
        .unwrap();
        assert_eq!(rows[0][0].text, "Name");
        assert_eq!(rows[1][0].text, "Ann");
    }

    #[test]
    fn test_header_only_rejected() {
        assert!(extract_table(&detection(vec![vec![Some("Name"), Some("Age")]])).is_none());
    }

    #[test]
    fn test_all_blank_rejected() {
        assert!(extract_table(&detection(vec![
            vec![None, Some(" ")],
            vec![Some(""), None],
        ]))
        .is_none());
    }

    #[test]
    fn test_empty_rows_dropped_but_table_survives() {
        let rows = extract_table(&detection(vec![
            vec![Some("Name")],
            vec![None, Some("  ")],
            vec![Some("Ann")],
        ]))
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0][0].is_header);
        assert_eq!(rows[1][0].text, "Ann");
    }
}
