//! Logical structure (Tagged PDF) construction.
//!
//! A tagged document overlays a role-tagged hierarchy on the page's visual
//! content: a structure tree root owns one section per page, sections own
//! heading/paragraph/table elements, and leaf elements reference marked
//! content in the page's rewritten stream by MCID.
//!
//! The modules here build that hierarchy as plain data:
//! - [`mcid`] allocates each page's identifiers once, for both the content
//!   rewriter and the tree builder
//! - [`builder`] converts classified items into the per-page element tree
//! - [`types`] defines the roles and node shapes
//!
//! Writing the hierarchy into the document object model is the job of
//! [`crate::document::TaggedDocument`].

pub mod builder;
pub mod mcid;
pub mod types;

// Re-export main types
pub use builder::build_page_structure;
pub use mcid::{ItemMcids, PageMcids};
pub use types::{Kids, PageStructure, Role, StructureNode};
