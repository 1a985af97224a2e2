//! # PDF Autotag
//!
//! Accessibility autotagger for untagged PDFs: analyzes page layout,
//! classifies text blocks and tables, and rewrites the document with a
//! logical structure tree whose elements point at marked-content ranges in
//! the page content streams.
//!
//! ## Pipeline
//!
//! 1. **Layout classification** — per-page text blocks (bounding box, font
//!    size, weight) and table detections become an ordered sequence of
//!    structure items (`H1`/`H2`/`P`/`Table`).
//! 2. **Text-run scanning** — the raw content stream is re-scanned for
//!    `BT`..`ET` regions and the text each one shows.
//! 3. **Matching** — runs are paired with structure items by lexical
//!    similarity; ambiguous runs stay unmatched rather than guessed at.
//! 4. **Rewriting** — matched runs are wrapped in `BDC`/`EMC` marked-content
//!    operators carrying the item's tag and MCID.
//! 5. **Tree building** — one section per page, one element per item (with
//!    nested row/cell elements for tables), every MCID consistent with the
//!    rewritten stream via a single per-page allocation.
//!
//! ## Quick Start
//!
//! ```ignore
//! use pdf_autotag::pipeline::Autotagger;
//!
//! # fn main() -> pdf_autotag::error::Result<()> {
//! let summary = Autotagger::new().run("report.pdf", "report-tagged.pdf")?;
//! println!("tagged {} pages, {} items", summary.pages_tagged, summary.item_count);
//! # Ok(())
//! # }
//! ```
//!
//! The heuristics are deliberately simple and lexical: false matches and
//! missed matches are expected on ambiguous or repeated text, and the design
//! favors producing a best-effort tagged document over failing the run.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Geometric primitives
pub mod geometry;

// Layout analysis
pub mod layout;

// Content-stream scanning, matching, rewriting
pub mod content;

// Logical structure construction
pub mod structure;

// Document object-model access
pub mod document;

// Orchestration and output artifacts
pub mod pipeline;
pub mod sidecar;

pub use error::{Error, Result};
pub use pipeline::{Autotagger, TagSummary};
