//! Layout analysis for untagged pages.
//!
//! This module turns raw per-page layout (text blocks with bounding box,
//! font size, and weight, plus externally detected tables) into the ordered
//! [`StructureItem`] sequence the rest of the pipeline consumes:
//! - rule-based heading/paragraph classification
//! - table normalization into header/body cell rows
//! - table-region text suppression and top-to-bottom ordering

pub mod classifier;
pub mod reader;
pub mod table;
pub mod types;

// Re-export main types
pub use classifier::{classify_page, H1_FONT_SIZE, H2_FONT_SIZE, TABLE_MARGIN};
pub use reader::{ContentLayoutReader, LayoutReader};
pub use table::extract_table;
pub use types::{Cell, ItemKind, PageLayout, RawTextBlock, StructureItem, TableDetection};
