//! Document object-model access for tagging.
//!
//! [`TaggedDocument`] wraps an open [`lopdf::Document`] and exposes exactly
//! the operations the pipeline needs: page content get/replace, idempotent
//! structure-tree-root creation, structure element writing, and save. All
//! other object-model concerns stay inside lopdf.

use crate::error::{Error, Result};
use crate::structure::{Kids, PageStructure, StructureNode};
use lopdf::{Dictionary, Object, ObjectId};
use std::path::Path;

/// A PDF document being rewritten with logical structure.
pub struct TaggedDocument {
    doc: lopdf::Document,
    /// Ordered 0-based page object ids
    pages: Vec<ObjectId>,
    /// Cached root element id once ensured
    struct_tree_root: Option<ObjectId>,
}

impl std::fmt::Debug for TaggedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaggedDocument")
            .field("page_count", &self.pages.len())
            .finish_non_exhaustive()
    }
}

impl TaggedDocument {
    /// Open a document from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let doc = lopdf::Document::load(path)?;
        Ok(Self::from_document(doc))
    }

    /// Wrap an already-loaded document.
    pub fn from_document(doc: lopdf::Document) -> Self {
        let pages = doc.get_pages().into_values().collect();
        Self {
            doc,
            pages,
            struct_tree_root: None,
        }
    }

    /// Access the underlying lopdf document.
    pub fn inner(&self) -> &lopdf::Document {
        &self.doc
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_id(&self, index: usize) -> Result<ObjectId> {
        self.pages
            .get(index)
            .copied()
            .ok_or(Error::MissingPage(index + 1))
    }

    /// The page's content-stream bytes, concatenated and decompressed.
    pub fn page_content(&self, index: usize) -> Result<Vec<u8>> {
        Ok(self.doc.get_page_content(self.page_id(index)?)?)
    }

    /// Replace the page's content stream with new bytes.
    pub fn replace_page_content(&mut self, index: usize, content: Vec<u8>) -> Result<()> {
        let page_id = self.page_id(index)?;
        self.doc.change_page_content(page_id, content)?;
        Ok(())
    }

    fn catalog_id(&self) -> Result<ObjectId> {
        Ok(self.doc.trailer.get(b"Root")?.as_reference()?)
    }

    /// Ensure the document has a structure tree root and is marked as tagged.
    ///
    /// Idempotent: the first call creates (or adopts) the root and sets
    /// `/MarkInfo`; later calls return the cached id.
    pub fn ensure_struct_tree_root(&mut self) -> Result<ObjectId> {
        if let Some(id) = self.struct_tree_root {
            return Ok(id);
        }

        let catalog_id = self.catalog_id()?;
        let existing = self
            .doc
            .get_object(catalog_id)?
            .as_dict()?
            .get(b"StructTreeRoot")
            .ok()
            .and_then(|obj| obj.as_reference().ok());

        let root_id = match existing {
            Some(id) => id,
            None => {
                log::info!("initializing structure tree root");
                let mut root = Dictionary::new();
                root.set("Type", Object::Name(b"StructTreeRoot".to_vec()));
                root.set("K", Object::Array(Vec::new()));
                let root_id = self.doc.add_object(root);
                let catalog = self.doc.get_object_mut(catalog_id)?.as_dict_mut()?;
                catalog.set("StructTreeRoot", Object::Reference(root_id));
                root_id
            },
        };

        let mut mark_info = Dictionary::new();
        mark_info.set("Marked", Object::Boolean(true));
        let catalog = self.doc.get_object_mut(catalog_id)?.as_dict_mut()?;
        catalog.set("MarkInfo", Object::Dictionary(mark_info));

        self.struct_tree_root = Some(root_id);
        Ok(root_id)
    }

    /// Write one page's structure under a fresh `Sect` element.
    ///
    /// Creates the section parented at the root, then one indirect
    /// `StructElem` per node. A failure creating an individual element is
    /// logged and the remaining elements continue.
    pub fn write_page_structure(&mut self, index: usize, structure: &PageStructure) -> Result<()> {
        let page_id = self.page_id(index)?;
        let root_id = self.ensure_struct_tree_root()?;

        {
            let page = self.doc.get_object_mut(page_id)?.as_dict_mut()?;
            page.set("StructParents", Object::Integer(index as i64));
        }

        let mut sect = Dictionary::new();
        sect.set("Type", Object::Name(b"StructElem".to_vec()));
        sect.set("S", Object::Name(b"Sect".to_vec()));
        sect.set("T", Object::string_literal(structure.section_title()));
        sect.set("P", Object::Reference(root_id));
        sect.set("K", Object::Array(Vec::new()));
        let sect_id = self.doc.add_object(sect);
        self.append_kid(root_id, sect_id)?;

        for node in &structure.nodes {
            if let Err(err) = self.write_node(node, sect_id, page_id) {
                log::warn!(
                    "page {}: failed to create structure element: {}",
                    structure.page_number,
                    err
                );
            }
        }

        Ok(())
    }

    /// Persist the document.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.doc.save(path)?;
        Ok(())
    }

    fn write_node(
        &mut self,
        node: &StructureNode,
        parent_id: ObjectId,
        page_id: ObjectId,
    ) -> Result<ObjectId> {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"StructElem".to_vec()));
        dict.set("S", Object::Name(node.role.as_name().as_bytes().to_vec()));
        dict.set("P", Object::Reference(parent_id));
        if let Some(title) = &node.title {
            dict.set("T", Object::string_literal(title.as_str()));
        }
        match &node.kids {
            Kids::Mcid(mcid) => {
                dict.set("K", Object::Integer(i64::from(*mcid)));
                dict.set("Pg", Object::Reference(page_id));
            },
            Kids::Nodes(_) => {
                dict.set("K", Object::Array(Vec::new()));
            },
        }

        let elem_id = self.doc.add_object(dict);
        self.append_kid(parent_id, elem_id)?;

        if let Kids::Nodes(children) = &node.kids {
            for child in children {
                self.write_node(child, elem_id, page_id)?;
            }
        }

        Ok(elem_id)
    }

    fn append_kid(&mut self, parent_id: ObjectId, child_id: ObjectId) -> Result<()> {
        let parent = self.doc.get_object_mut(parent_id)?.as_dict_mut()?;
        let kids = parent.get_mut(b"K")?.as_array_mut()?;
        kids.push(Object::Reference(child_id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::Role;
    use lopdf::{dictionary, Stream};

    fn minimal_document(content: &[u8]) -> lopdf::Document {
        let mut doc = lopdf::Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.to_vec()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }

    #[test]
    fn test_page_content_round_trip() {
        let mut tagged = TaggedDocument::from_document(minimal_document(b"BT (x) Tj ET"));
        assert_eq!(tagged.page_count(), 1);
        assert_eq!(tagged.page_content(0).unwrap(), b"BT (x) Tj ET".to_vec());

        tagged.replace_page_content(0, b"BT (y) Tj ET".to_vec()).unwrap();
        assert_eq!(tagged.page_content(0).unwrap(), b"BT (y) Tj ET".to_vec());
    }

    #[test]
    fn test_missing_page_error() {
        let tagged = TaggedDocument::from_document(minimal_document(b""));
        assert!(matches!(tagged.page_content(3), Err(Error::MissingPage(4))));
    }

    #[test]
    fn test_ensure_struct_tree_root_idempotent() {
        let mut tagged = TaggedDocument::from_document(minimal_document(b""));
        let first = tagged.ensure_struct_tree_root().unwrap();
        let second = tagged.ensure_struct_tree_root().unwrap();
        assert_eq!(first, second);

        let catalog_id = tagged.doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
        let catalog = tagged.doc.get_object(catalog_id).unwrap().as_dict().unwrap();
        assert_eq!(
            catalog.get(b"StructTreeRoot").unwrap().as_reference().unwrap(),
            first
        );
        let mark_info = catalog.get(b"MarkInfo").unwrap().as_dict().unwrap();
        assert!(mark_info.get(b"Marked").unwrap().as_bool().unwrap());
    }

    #[test]
    fn test_write_page_structure_creates_section_and_elements() {
        let mut tagged = TaggedDocument::from_document(minimal_document(b""));
        let structure = PageStructure {
            page_number: 1,
            nodes: vec![
                StructureNode::leaf(Role::H1, Some("Title".into()), 0),
                StructureNode::branch(
                    Role::Table,
                    vec![StructureNode::branch(
                        Role::TR,
                        vec![StructureNode::leaf(Role::TH, Some("Name".into()), 1)],
                    )],
                ),
            ],
        };
        tagged.write_page_structure(0, &structure).unwrap();

        let root_id = tagged.struct_tree_root.unwrap();
        let root = tagged.doc.get_object(root_id).unwrap().as_dict().unwrap();
        let root_kids = root.get(b"K").unwrap().as_array().unwrap();
        assert_eq!(root_kids.len(), 1);

        let sect_id = root_kids[0].as_reference().unwrap();
        let sect = tagged.doc.get_object(sect_id).unwrap().as_dict().unwrap();
        assert_eq!(sect.get(b"S").unwrap().as_name().unwrap(), b"Sect");
        let sect_kids = sect.get(b"K").unwrap().as_array().unwrap();
        assert_eq!(sect_kids.len(), 2);

        let h1 = tagged
            .doc
            .get_object(sect_kids[0].as_reference().unwrap())
            .unwrap()
            .as_dict()
            .unwrap();
        assert_eq!(h1.get(b"S").unwrap().as_name().unwrap(), b"H1");
        assert_eq!(h1.get(b"K").unwrap().as_i64().unwrap(), 0);
        assert!(h1.get(b"Pg").is_ok());

        let table = tagged
            .doc
            .get_object(sect_kids[1].as_reference().unwrap())
            .unwrap()
            .as_dict()
            .unwrap();
        assert_eq!(table.get(b"S").unwrap().as_name().unwrap(), b"Table");
        let rows = table.get(b"K").unwrap().as_array().unwrap();
        assert_eq!(rows.len(), 1);

        let tr = tagged
            .doc
            .get_object(rows[0].as_reference().unwrap())
            .unwrap()
            .as_dict()
            .unwrap();
        assert_eq!(tr.get(b"S").unwrap().as_name().unwrap(), b"TR");
        let cells = tr.get(b"K").unwrap().as_array().unwrap();
        let th = tagged
            .doc
            .get_object(cells[0].as_reference().unwrap())
            .unwrap()
            .as_dict()
            .unwrap();
        assert_eq!(th.get(b"S").unwrap().as_name().unwrap(), b"TH");
        assert_eq!(th.get(b"K").unwrap().as_i64().unwrap(), 1);
    }

    #[test]
    fn test_struct_parents_set_on_page() {
        let mut tagged = TaggedDocument::from_document(minimal_document(b""));
        tagged
            .write_page_structure(0, &PageStructure { page_number: 1, nodes: vec![] })
            .unwrap();
        let page_id = tagged.pages[0];
        let page = tagged.doc.get_object(page_id).unwrap().as_dict().unwrap();
        assert_eq!(page.get(b"StructParents").unwrap().as_i64().unwrap(), 0);
    }
}
