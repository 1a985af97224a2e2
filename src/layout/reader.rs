//! Layout acquisition: the collaborator seam for raw page layout.
//!
//! [`LayoutReader`] is the interface a metrics-accurate text-extraction
//! library would implement. The built-in [`ContentLayoutReader`] is a
//! best-effort stand-in that derives blocks straight from the page content
//! stream: one block per text run, font size from `Tf`, boldness from the
//! page's font resource name, and a bounding box estimated from the run
//! origin. It is good enough to drive tagging of simple documents; it is not
//! a glyph-metrics extractor. It yields no table detections — table finding
//! is an external collaborator.

use crate::content::scan_text_runs;
use crate::error::Result;
use crate::geometry::Rect;
use crate::layout::types::{PageLayout, RawTextBlock};
use lopdf::{Document, Object, ObjectId};
use std::path::Path;

/// Source of per-page layout: height, text blocks, table detections.
pub trait LayoutReader {
    /// Number of pages available.
    fn page_count(&mut self) -> Result<usize>;

    /// Raw layout for the 0-based page `index`.
    fn page_layout(&mut self, index: usize) -> Result<PageLayout>;
}

/// Fallback letter-size page height when no media box is present.
const DEFAULT_PAGE_HEIGHT: f32 = 792.0;

/// Rough glyph advance as a fraction of the font size, used to estimate
/// block widths without font metrics.
const GLYPH_WIDTH_FACTOR: f32 = 0.5;

/// Content-stream-derived layout reader.
pub struct ContentLayoutReader {
    doc: Document,
    pages: Vec<ObjectId>,
}

impl ContentLayoutReader {
    /// Open a document from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let doc = Document::load(path)?;
        Ok(Self::from_document(doc))
    }

    /// Wrap an already-loaded document.
    pub fn from_document(doc: Document) -> Self {
        let pages = doc.get_pages().into_values().collect();
        Self { doc, pages }
    }

    fn page_height(&self, page_id: ObjectId) -> f32 {
        let media_box = resolve_inherited(&self.doc, page_id, b"MediaBox")
            .map(|obj| resolve(&self.doc, obj))
            .and_then(|obj| obj.as_array().ok());
        let corners: Option<Vec<f32>> =
            media_box.map(|arr| arr.iter().filter_map(number).collect());
        match corners.as_deref() {
            Some([_, y0, _, y1]) => y1 - y0,
            _ => DEFAULT_PAGE_HEIGHT,
        }
    }

    fn is_bold_font(&self, page_id: ObjectId, font_name: &str) -> bool {
        base_font_name(&self.doc, page_id, font_name)
            .map(|base| base.to_ascii_lowercase().contains("bold"))
            .unwrap_or(false)
    }
}

impl LayoutReader for ContentLayoutReader {
    fn page_count(&mut self) -> Result<usize> {
        Ok(self.pages.len())
    }

    fn page_layout(&mut self, index: usize) -> Result<PageLayout> {
        let page_id = match self.pages.get(index) {
            Some(id) => *id,
            None => return Err(crate::error::Error::MissingPage(index + 1)),
        };
        let height = self.page_height(page_id);

        let content = match self.doc.get_page_content(page_id) {
            Ok(content) => content,
            Err(err) => {
                log::warn!("page {}: no readable content stream: {}", index + 1, err);
                return Ok(PageLayout {
                    height,
                    ..PageLayout::default()
                });
            },
        };

        let mut blocks = Vec::new();
        for run in scan_text_runs(&content) {
            let text = run.text.trim();
            if text.is_empty() {
                continue;
            }

            let size = run.font_size.unwrap_or(12.0);
            let is_bold = run
                .font_name
                .as_deref()
                .map(|name| self.is_bold_font(page_id, name))
                .unwrap_or(false);

            // Estimate extents around the baseline; runs without an origin
            // all land at the top edge, so document order decides their
            // relative position after the classifier's stable sort.
            let bbox = match run.origin {
                Some(origin) => {
                    let width = GLYPH_WIDTH_FACTOR * size * text.chars().count() as f32;
                    Rect::from_points(
                        origin.x,
                        height - (origin.y + 0.8 * size),
                        origin.x + width,
                        height - (origin.y - 0.2 * size),
                    )
                },
                None => Rect::new(0.0, 0.0, 0.0, size),
            };

            blocks.push(RawTextBlock {
                bbox,
                max_font_size: size,
                is_bold,
                text: text.to_string(),
            });
        }

        Ok(PageLayout {
            height,
            blocks,
            tables: Vec::new(),
        })
    }
}

/// Follow a reference to its target object, or return the object itself.
fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Look up a page-dictionary key, walking `/Parent` links for inheritable
/// entries such as `/MediaBox` and `/Resources`.
fn resolve_inherited<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut current = page_id;
    loop {
        let dict = doc.get_object(current).ok()?.as_dict().ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value);
        }
        current = dict.get(b"Parent").ok()?.as_reference().ok()?;
    }
}

/// `/BaseFont` of a font resource named in the page's `/Resources`.
fn base_font_name(doc: &Document, page_id: ObjectId, font_name: &str) -> Option<String> {
    let resources = resolve_inherited(doc, page_id, b"Resources")?;
    let resources = resolve(doc, resources).as_dict().ok()?;
    let fonts = resolve(doc, resources.get(b"Font").ok()?).as_dict().ok()?;
    let font = resolve(doc, fonts.get(font_name.as_bytes()).ok()?).as_dict().ok()?;
    let base = font.get(b"BaseFont").ok()?.as_name().ok()?;
    Some(String::from_utf8_lossy(base).into_owned())
}

/// Convert a numeric object to f32.
fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(value) => Some(*value as f32),
        Object::Real(value) => Some(*value),
        _ => None,
    }
}
