//! lopdf-backed implementation of the PDF capability traits

use std::collections::BTreeSet;

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId};

use super::error::{PdfError, PdfResult};
use super::traits::{PdfDocument, PdfEngine};

/// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic `Parent` chains in broken files
const MAX_TREE_DEPTH: usize = 64;

/// PDF version written for merged documents
const OUTPUT_VERSION: &str = "1.5";

/// [`PdfEngine`] backed by the `lopdf` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfEngine;

impl LopdfEngine {
    pub fn new() -> Self {
        Self
    }
}

impl PdfEngine for LopdfEngine {
    fn open(&self, bytes: &[u8]) -> PdfResult<Box<dyn PdfDocument>> {
        Ok(Box::new(LopdfDocument::load(bytes)?))
    }

    fn merge(&self, sources: &[&[u8]]) -> PdfResult<Vec<u8>> {
        let mut merged = Document::with_version(OUTPUT_VERSION);
        let pages_id = merged.new_object_id();
        let mut kids: Vec<ObjectId> = Vec::new();

        for bytes in sources {
            let mut doc = LopdfDocument::load(bytes)?.doc;

            // Move every object id above what the merged document already uses
            doc.renumber_objects_with(merged.max_id + 1);
            let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();

            for &page_id in &page_ids {
                inline_inherited_attributes(&mut doc, page_id)?;
                reparent(&mut doc, page_id, pages_id)?;
            }

            let source_max = doc.objects.keys().map(|(id, _)| *id).max().unwrap_or(0);
            merged.max_id = merged.max_id.max(source_max);
            merged.objects.extend(doc.objects);
            kids.extend(page_ids);
        }

        let count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids.into_iter().map(Object::Reference).collect::<Vec<_>>(),
            "Count" => count,
        };
        merged.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = merged.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        merged.trailer.set("Root", catalog_id);

        // Source catalogs and page tree nodes are unreachable now
        merged.prune_objects();

        tracing::debug!(sources = sources.len(), pages = count, "Merged PDF documents");

        serialize(&mut merged)
    }
}

/// A parsed PDF held in memory
pub struct LopdfDocument {
    doc: Document,
    pages: Vec<ObjectId>,
    page_set: BTreeSet<ObjectId>,
    /// Catalog and page tree nodes, never copied into a page subset
    tree_nodes: BTreeSet<ObjectId>,
}

impl LopdfDocument {
    /// Parse a document from an in-memory byte slice
    pub fn load(bytes: &[u8]) -> PdfResult<Self> {
        let doc = Document::load_mem(bytes)?;
        if doc.is_encrypted() {
            return Err(PdfError::Encrypted);
        }

        let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
        let page_set = pages.iter().copied().collect();
        let tree_nodes = structural_nodes(&doc, &pages);
        Ok(Self {
            doc,
            pages,
            page_set,
            tree_nodes,
        })
    }

    fn page_id(&self, index: usize) -> PdfResult<ObjectId> {
        self.pages
            .get(index)
            .copied()
            .ok_or(PdfError::PageOutOfRange {
                index,
                count: self.pages.len(),
            })
    }
}

impl PdfDocument for LopdfDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> PdfResult<String> {
        self.page_id(index)?;

        // lopdf numbers pages from 1
        let page_number = (index + 1) as u32;
        self.doc
            .extract_text(&[page_number])
            .map_err(|e| PdfError::TextExtraction {
                page: index + 1,
                message: e.to_string(),
            })
    }

    fn extract_pages(&self, indices: &[usize]) -> PdfResult<Vec<u8>> {
        let selected = indices
            .iter()
            .map(|&index| self.page_id(index))
            .collect::<PdfResult<Vec<_>>>()?;

        let mut subset = Document::with_version(self.doc.version.clone());
        // Keep source ids so copied references stay valid without renumbering
        subset.max_id = self.doc.max_id;
        let pages_id = subset.new_object_id();

        let mut copier = SubsetCopier {
            source: self,
            selected: selected.iter().copied().collect(),
            pending: Vec::new(),
        };
        for &page_id in &selected {
            let mut page = self.doc.get_object(page_id)?.clone();
            let page_dict = page.as_dict_mut()?;
            for (key, value) in inherited_attributes(&self.doc, page_id)? {
                page_dict.set(key, value);
            }
            page_dict.remove(b"Parent");
            copier.detach(&mut page);
            page.as_dict_mut()?.set("Parent", pages_id);
            subset.objects.insert(page_id, page);
        }

        while let Some(id) = copier.pending.pop() {
            if subset.objects.contains_key(&id) {
                continue;
            }
            let Ok(object) = self.doc.get_object(id) else {
                continue;
            };
            let mut object = object.clone();
            copier.detach(&mut object);
            subset.objects.insert(id, object);
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => selected.iter().copied().map(Object::Reference).collect::<Vec<_>>(),
            "Count" => selected.len() as i64,
        };
        subset.objects.insert(pages_id, Object::Dictionary(pages));

        let root_id = subset.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        subset.trailer.set("Root", root_id);

        tracing::debug!(
            pages = selected.len(),
            objects = subset.objects.len(),
            "Extracted page subset"
        );

        serialize(&mut subset)
    }
}

/// Walks the object graph reachable from a set of pages.
///
/// References to the catalog, page tree nodes and pages outside the set are
/// replaced with `null`, so document-level structures (outlines, structure
/// trees, named destinations, form fields) never pull other pages along.
/// Link annotations left without a target lose their `Dest`/`A` entry.
struct SubsetCopier<'a> {
    source: &'a LopdfDocument,
    selected: BTreeSet<ObjectId>,
    pending: Vec<ObjectId>,
}

impl SubsetCopier<'_> {
    fn is_excluded(&self, id: ObjectId) -> bool {
        self.source.tree_nodes.contains(&id)
            || (self.source.page_set.contains(&id) && !self.selected.contains(&id))
    }

    fn detach(&mut self, object: &mut Object) {
        match object {
            Object::Reference(id) => {
                let id = *id;
                if self.is_excluded(id) {
                    *object = Object::Null;
                } else {
                    self.pending.push(id);
                }
            }
            Object::Array(items) => {
                for item in items.iter_mut() {
                    self.detach(item);
                }
            }
            Object::Dictionary(dict) => self.detach_dictionary(dict),
            Object::Stream(stream) => self.detach_dictionary(&mut stream.dict),
            _ => {}
        }
    }

    fn detach_dictionary(&mut self, dict: &mut Dictionary) {
        for (_, value) in dict.iter_mut() {
            self.detach(value);
        }

        if dict.get(b"Dest").is_ok_and(is_dead_destination) {
            dict.remove(b"Dest");
        }
        let dead_action = dict
            .get(b"A")
            .and_then(Object::as_dict)
            .and_then(|action| action.get(b"D"))
            .is_ok_and(is_dead_destination);
        if dead_action {
            dict.remove(b"A");
        }
    }
}

/// An explicit destination whose page reference was cut
fn is_dead_destination(dest: &Object) -> bool {
    matches!(dest.as_array().map(|parts| parts.first()), Ok(Some(Object::Null)))
}

fn catalog_id(doc: &Document) -> PdfResult<ObjectId> {
    Ok(doc.trailer.get(b"Root").and_then(Object::as_reference)?)
}

/// Catalog plus every page tree node above the given pages
fn structural_nodes(doc: &Document, pages: &[ObjectId]) -> BTreeSet<ObjectId> {
    let mut nodes = BTreeSet::new();
    if let Ok(root) = catalog_id(doc) {
        nodes.insert(root);
    }
    for &page_id in pages {
        let mut current = page_id;
        for _ in 0..MAX_TREE_DEPTH {
            let parent = doc
                .get_dictionary(current)
                .and_then(|node| node.get(b"Parent"))
                .and_then(Object::as_reference);
            match parent {
                Ok(parent) if nodes.insert(parent) => current = parent,
                _ => break,
            }
        }
    }
    nodes
}

/// Attributes the page inherits from ancestor nodes and does not set itself
fn inherited_attributes(
    doc: &Document,
    page_id: ObjectId,
) -> PdfResult<Vec<(&'static [u8], Object)>> {
    let page = doc.get_dictionary(page_id)?;
    let mut missing: Vec<&'static [u8]> = INHERITABLE_KEYS
        .iter()
        .copied()
        .filter(|key| !page.has(key))
        .collect();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    let mut inherited = Vec::new();
    let mut depth = 0;
    while let Some(node_id) = parent {
        if missing.is_empty() || depth >= MAX_TREE_DEPTH {
            break;
        }
        let Ok(node) = doc.get_dictionary(node_id) else {
            break;
        };
        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                inherited.push((*key, value.clone()));
                false
            }
            Err(_) => true,
        });
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
        depth += 1;
    }
    Ok(inherited)
}

/// Copy attributes the page inherits from ancestor nodes onto the page itself,
/// so it renders the same once moved under a different parent.
fn inline_inherited_attributes(doc: &mut Document, page_id: ObjectId) -> PdfResult<()> {
    let inherited = inherited_attributes(doc, page_id)?;
    if !inherited.is_empty() {
        let page = doc.get_object_mut(page_id).and_then(Object::as_dict_mut)?;
        for (key, value) in inherited {
            page.set(key, value);
        }
    }
    Ok(())
}

fn reparent(doc: &mut Document, page_id: ObjectId, parent_id: ObjectId) -> PdfResult<()> {
    let page = doc.get_object_mut(page_id).and_then(Object::as_dict_mut)?;
    page.set("Parent", parent_id);
    Ok(())
}

fn serialize(doc: &mut Document) -> PdfResult<Vec<u8>> {
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| PdfError::Write(e.to_string()))?;
    Ok(buffer)
}
