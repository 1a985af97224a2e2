//! Types for the logical structure tree this tool emits.
//!
//! A page's structure is built as plain data first ([`PageStructure`]) and
//! written into the document object model afterwards; see
//! [`crate::document::TaggedDocument`].

/// Structure roles emitted by the autotagger.
///
/// A small subset of the standard structure types: one section per page,
/// heading/paragraph elements for text items, and the table hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Section (one per page)
    Sect,
    /// Heading level 1
    H1,
    /// Heading level 2
    H2,
    /// Paragraph
    P,
    /// Table
    Table,
    /// Table row
    TR,
    /// Table header cell
    TH,
    /// Table data cell
    TD,
}

impl Role {
    /// The PDF name written to the element's `/S` entry.
    pub fn as_name(&self) -> &'static str {
        match self {
            Role::Sect => "Sect",
            Role::H1 => "H1",
            Role::H2 => "H2",
            Role::P => "P",
            Role::Table => "Table",
            Role::TR => "TR",
            Role::TH => "TH",
            Role::TD => "TD",
        }
    }

    /// Parse a structure tag string (e.g. from [`crate::layout::ItemKind::tag`]).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Sect" => Some(Role::Sect),
            "H1" => Some(Role::H1),
            "H2" => Some(Role::H2),
            "P" => Some(Role::P),
            "Table" => Some(Role::Table),
            "TR" => Some(Role::TR),
            "TH" => Some(Role::TH),
            "TD" => Some(Role::TD),
            _ => None,
        }
    }
}

/// Children of a structure node: either one marked-content identifier or
/// nested structure nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Kids {
    /// Leaf node referencing marked content on the node's page
    Mcid(u32),
    /// Interior node owning child elements in order
    Nodes(Vec<StructureNode>),
}

/// One structure element, before it is written as an indirect object.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureNode {
    /// Role written to `/S`
    pub role: Role,
    /// Title written to `/T` (already truncated)
    pub title: Option<String>,
    /// Children written to `/K`
    pub kids: Kids,
}

impl StructureNode {
    /// Create a leaf node referencing one MCID.
    pub fn leaf(role: Role, title: Option<String>, mcid: u32) -> Self {
        Self {
            role,
            title,
            kids: Kids::Mcid(mcid),
        }
    }

    /// Create an interior node with child elements.
    pub fn branch(role: Role, children: Vec<StructureNode>) -> Self {
        Self {
            role,
            title: None,
            kids: Kids::Nodes(children),
        }
    }

    /// All MCIDs referenced by this node and its descendants, in order.
    pub fn mcids(&self) -> Vec<u32> {
        match &self.kids {
            Kids::Mcid(id) => vec![*id],
            Kids::Nodes(children) => children.iter().flat_map(StructureNode::mcids).collect(),
        }
    }
}

/// The structure built for one page: the children of that page's section.
#[derive(Debug, Clone, Default)]
pub struct PageStructure {
    /// 1-based page number (used for the section title)
    pub page_number: usize,
    /// Elements parented at the page's section, in reading order
    pub nodes: Vec<StructureNode>,
}

impl PageStructure {
    /// Section title, `Page-<n>`.
    pub fn section_title(&self) -> String {
        format!("Page-{}", self.page_number)
    }

    /// All MCIDs referenced anywhere under the page's section.
    pub fn mcids(&self) -> Vec<u32> {
        self.nodes.iter().flat_map(StructureNode::mcids).collect()
    }
}
