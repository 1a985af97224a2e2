//! Content-stream rewriting: marked-content wrapping of matched runs.
//!
//! The rewriter copies the original stream byte-for-byte and only splices
//! `BDC`/`EMC` operator pairs around the runs the matcher paired with a
//! structure item. Unmatched runs and all non-text content pass through
//! untouched, so a page with nothing to tag round-trips exactly.

use crate::content::scanner::TextRun;
use crate::layout::StructureItem;
use crate::structure::PageMcids;

/// Rewrite a page's content stream, wrapping matched runs in marked content.
///
/// `assignments` is the matcher's output, parallel to `runs`. For each run
/// paired with a text item, the item's allocated MCID and tag are spliced in
/// as `/<Tag> <</MCID <n>>> BDC` before the run and `EMC` after it. Runs
/// paired with an item that has no text MCID (out-of-range or a table item,
/// which the matcher never produces) are copied unchanged.
///
/// Returns the original bytes unmodified when there are no runs to consider.
pub fn rewrite_content(
    content: &[u8],
    runs: &[TextRun],
    assignments: &[Option<usize>],
    items: &[StructureItem],
    mcids: &PageMcids,
) -> Vec<u8> {
    if runs.is_empty() {
        return content.to_vec();
    }

    let mut out = Vec::with_capacity(content.len() + runs.len() * 32);
    let mut cursor = 0usize;

    for (run, assignment) in runs.iter().zip(assignments) {
        out.extend_from_slice(&content[cursor..run.start]);

        let wrapped = assignment.and_then(|item_index| {
            let tag = items.get(item_index)?.kind.tag();
            let mcid = mcids.text_mcid(item_index)?;
            Some((tag, mcid))
        });

        match wrapped {
            Some((tag, mcid)) => {
                out.extend_from_slice(format!("/{} <</MCID {}>> BDC\n", tag, mcid).as_bytes());
                out.extend_from_slice(&content[run.start..run.end]);
                out.extend_from_slice(b"\nEMC");
            },
            None => {
                out.extend_from_slice(&content[run.start..run.end]);
            },
        }

        cursor = run.end;
    }

    out.extend_from_slice(&content[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::scanner::scan_text_runs;
    use crate::geometry::Rect;
    use crate::layout::{ItemKind, StructureItem};

    fn item(kind: ItemKind, text: &str) -> StructureItem {
        StructureItem {
            page: 1,
            kind,
            text: Some(text.to_string()),
            table: None,
            bbox: Rect::new(0.0, 0.0, 10.0, 10.0),
            display_rect: Rect::new(0.0, 0.0, 10.0, 10.0),
        }
    }

    #[test]
    fn test_matched_run_wrapped_with_mcid() {
        let content = b"q Q BT (Invoice Total: $500) Tj ET 0 0 m";
        let runs = scan_text_runs(content);
        let items = vec![item(ItemKind::Heading1, "Invoice Total: $500")];
        let mcids = PageMcids::allocate(&items);

        let out = rewrite_content(content, &runs, &[Some(0)], &items, &mcids);
        let text = String::from_utf8_lossy(&out);

        assert!(text.starts_with("q Q "));
        assert!(text.contains("/H1 <</MCID 0>> BDC\nBT (Invoice Total: $500) Tj ET\nEMC"));
        assert!(text.ends_with(" 0 0 m"));
    }

    #[test]
    fn test_unmatched_run_copied_verbatim() {
        let content = b"BT (decoration) Tj ET";
        let runs = scan_text_runs(content);
        let items = vec![item(ItemKind::Paragraph, "something else")];
        let mcids = PageMcids::allocate(&items);

        let out = rewrite_content(content, &runs, &[None], &items, &mcids);
        assert_eq!(out, content.to_vec());
    }

    #[test]
    fn test_no_runs_returns_original() {
        let content = b"q 10 10 100 50 re f Q";
        let out = rewrite_content(content, &[], &[], &[], &PageMcids::allocate(&[]));
        assert_eq!(out, content.to_vec());
    }

    #[test]
    fn test_mixed_runs_keep_surrounding_bytes() {
        let content = b"A BT (one) Tj ET B BT (two) Tj ET C";
        let runs = scan_text_runs(content);
        assert_eq!(runs.len(), 2);
        let items = vec![item(ItemKind::Paragraph, "one"), item(ItemKind::Heading2, "two")];
        let mcids = PageMcids::allocate(&items);

        let out = rewrite_content(content, &runs, &[Some(0), Some(1)], &items, &mcids);
        let text = String::from_utf8_lossy(&out);

        assert!(text.starts_with("A /P <</MCID 0>> BDC\n"));
        assert!(text.contains("EMC B /H2 <</MCID 1>> BDC\n"));
        assert!(text.ends_with("ET\nEMC C"));
    }

    #[test]
    fn test_mcids_follow_item_allocation_not_run_order() {
        // The second run matches the first item: it must carry that item's
        // MCID, not a counter keyed to run order.
        let content = b"BT (beta) Tj ET BT (alpha) Tj ET";
        let runs = scan_text_runs(content);
        let items = vec![item(ItemKind::Paragraph, "alpha"), item(ItemKind::Paragraph, "beta")];
        let mcids = PageMcids::allocate(&items);

        let out = rewrite_content(content, &runs, &[Some(1), Some(0)], &items, &mcids);
        let text = String::from_utf8_lossy(&out);

        let first_bdc = text.find("/P <</MCID 1>> BDC").unwrap();
        let second_bdc = text.find("/P <</MCID 0>> BDC").unwrap();
        assert!(first_bdc < second_bdc);
    }

    #[test]
    fn test_emitted_mcids_unique() {
        let content = b"BT (a) Tj ET BT (b) Tj ET BT (c) Tj ET";
        let runs = scan_text_runs(content);
        let items = vec![
            item(ItemKind::Paragraph, "a"),
            item(ItemKind::Paragraph, "b"),
            item(ItemKind::Paragraph, "c"),
        ];
        let mcids = PageMcids::allocate(&items);

        let out = rewrite_content(content, &runs, &[Some(0), Some(1), Some(2)], &items, &mcids);
        let text = String::from_utf8_lossy(&out);

        let mut seen = Vec::new();
        for part in text.split("/MCID ").skip(1) {
            let id: u32 = part.split('>').next().unwrap().trim().parse().unwrap();
            assert!(!seen.contains(&id));
            seen.push(id);
        }
        assert_eq!(seen.len(), 3);
    }
}
