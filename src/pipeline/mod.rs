//! The tagging pipeline: orchestration of the per-page stages.
//!
//! ```text
//! PDF file
//!     ↓
//! [LayoutReader]  (page → RawTextBlock[] + TableDetection[])
//!     ↓
//! [classify_page] (blocks + tables → ordered StructureItem[])
//!     ↓
//! [scan_text_runs / match_runs]  (content stream → run↔item pairing)
//!     ↓                               ↓
//! [rewrite_content]          [build_page_structure]
//!     ↓                               ↓
//! [TaggedDocument]  (new stream bytes + structure elements, then save)
//! ```
//!
//! Pages are processed strictly in order, each through the same sequence of
//! stages, with one [`PageMcids`] allocation shared by the rewrite and the
//! tree build. A page that fails is logged and skipped; only opening and
//! saving the document are fatal.

use crate::content::{match_runs, rewrite_content, scan_text_runs};
use crate::document::TaggedDocument;
use crate::error::Result;
use crate::layout::{classify_page, ContentLayoutReader, LayoutReader, StructureItem};
use crate::sidecar::write_sidecar;
use crate::structure::{build_page_structure, PageMcids};
use std::path::Path;

/// Outcome of a tagging run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSummary {
    /// Total structure items across the document
    pub item_count: usize,
    /// Pages that received marked content and structure elements
    pub pages_tagged: usize,
}

/// The autotagging pipeline.
///
/// Owns no document state between runs; each [`Autotagger::run`] opens the
/// input twice (once for layout analysis, once for rewriting), mirrors the
/// sequential page loop, and writes both output artifacts.
#[derive(Debug, Default)]
pub struct Autotagger;

impl Autotagger {
    /// Create a pipeline.
    pub fn new() -> Self {
        Self
    }

    /// Tag `input` and write the result to `output`, plus `<output>.json`.
    ///
    /// Uses the built-in [`ContentLayoutReader`] for layout analysis.
    pub fn run(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<TagSummary> {
        let mut reader = ContentLayoutReader::open(input.as_ref())?;
        self.run_with_reader(&mut reader, input.as_ref(), output.as_ref())
    }

    /// Tag `input` using a caller-supplied layout reader.
    pub fn run_with_reader(
        &self,
        reader: &mut dyn LayoutReader,
        input: &Path,
        output: &Path,
    ) -> Result<TagSummary> {
        let items = analyze_layout(reader)?;
        log::info!("extracted {} structure items", items.len());

        let mut doc = TaggedDocument::open(input)?;
        let pages_tagged = tag_document(&mut doc, &items);
        doc.save(output)?;

        let sidecar_path = sidecar_path(output);
        write_sidecar(&sidecar_path, &items)?;
        log::info!(
            "tagged {} pages; sidecar written to {}",
            pages_tagged,
            sidecar_path.display()
        );

        Ok(TagSummary {
            item_count: items.len(),
            pages_tagged,
        })
    }
}

/// Classify every page of the document, in page order.
///
/// Page numbers on the returned items are 1-based. A page whose layout
/// cannot be read is skipped with a warning.
pub fn analyze_layout(reader: &mut dyn LayoutReader) -> Result<Vec<StructureItem>> {
    let page_count = reader.page_count()?;
    let mut items = Vec::new();

    for index in 0..page_count {
        let layout = match reader.page_layout(index) {
            Ok(layout) => layout,
            Err(err) => {
                log::warn!("page {}: layout analysis failed: {}", index + 1, err);
                continue;
            },
        };
        items.extend(classify_page(index + 1, &layout));
    }

    Ok(items)
}

/// Rewrite content and build structure for every page that has items.
///
/// Returns the number of pages tagged. Page-level failures are logged and
/// the remaining pages continue.
pub fn tag_document(doc: &mut TaggedDocument, items: &[StructureItem]) -> usize {
    let mut pages_tagged = 0;

    for index in 0..doc.page_count() {
        let page_items: Vec<StructureItem> = items
            .iter()
            .filter(|item| item.page == index + 1)
            .cloned()
            .collect();
        if page_items.is_empty() {
            continue;
        }

        match tag_page(doc, index, &page_items) {
            Ok(()) => {
                log::debug!(
                    "page {}: wrapped content for {} structure items",
                    index + 1,
                    page_items.len()
                );
                pages_tagged += 1;
            },
            Err(err) => {
                log::warn!("page {}: tagging failed: {}", index + 1, err);
            },
        }
    }

    pages_tagged
}

/// Run the four per-page stages for one page.
fn tag_page(doc: &mut TaggedDocument, index: usize, items: &[StructureItem]) -> Result<()> {
    let content = doc.page_content(index)?;

    let runs = scan_text_runs(&content);
    let assignments = match_runs(&runs, items);
    let mcids = PageMcids::allocate(items);

    let rewritten = rewrite_content(&content, &runs, &assignments, items, &mcids);
    doc.replace_page_content(index, rewritten)?;

    let structure = build_page_structure(index + 1, items, &mcids);
    doc.write_page_structure(index, &structure)?;

    Ok(())
}

/// Sidecar path: the output path with `.json` appended.
fn sidecar_path(output: &Path) -> std::path::PathBuf {
    let mut name = output.as_os_str().to_os_string();
    name.push(".json");
    std::path::PathBuf::from(name)
}
