//! Page-level concatenation of several PDFs into one document.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, warn};

use crate::error::MergeError;

/// Page attributes that may be inherited from the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// A merged document ready to be written.
pub struct MergedDocument {
    document: Document,
    /// Number of pages in the merged document.
    pub page_count: usize,
    /// Inputs that could not be read and were left out.
    pub skipped: Vec<PathBuf>,
}

impl MergedDocument {
    /// Write the merged document to `path`.
    pub fn save(mut self, path: &Path) -> Result<(), MergeError> {
        self.document
            .save(path)
            .map_err(|e| MergeError::Save(format!("{}: {}", path.display(), e)))?;
        debug!("Wrote merged PDF with {} pages to {}", self.page_count, path.display());
        Ok(())
    }

    /// Serialize the merged document into memory.
    pub fn to_bytes(mut self) -> Result<Vec<u8>, MergeError> {
        let mut output = Vec::new();
        self.document
            .save_to(&mut output)
            .map_err(|e| MergeError::Save(e.to_string()))?;
        Ok(output)
    }
}

/// Merge the pages of `paths`, in order, into one document.
///
/// Inputs that cannot be loaded are skipped with a warning. Fails only when
/// no input could be read at all.
pub fn merge_documents<P: AsRef<Path>>(paths: &[P]) -> Result<MergedDocument, MergeError> {
    let mut loaded = Vec::with_capacity(paths.len());
    let mut skipped = Vec::new();

    for path in paths {
        let path = path.as_ref();
        match Document::load(path) {
            Ok(doc) if !doc.get_pages().is_empty() => loaded.push(doc),
            Ok(_) => {
                warn!("Skipping {}: PDF has no pages", path.display());
                skipped.push(path.to_path_buf());
            }
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                skipped.push(path.to_path_buf());
            }
        }
    }

    let mut merged = combine(loaded)?;
    merged.skipped = skipped;
    Ok(merged)
}

/// Merge already-loaded PDF bytes, in order.
pub fn merge_bytes(inputs: &[Vec<u8>]) -> Result<MergedDocument, MergeError> {
    let docs = inputs
        .iter()
        .enumerate()
        .filter_map(|(i, data)| match Document::load_mem(data) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!("Skipping input {}: {}", i + 1, e);
                None
            }
        })
        .collect();
    combine(docs)
}

fn combine(docs: Vec<Document>) -> Result<MergedDocument, MergeError> {
    if docs.is_empty() {
        return Err(MergeError::NoInput);
    }

    let mut max_id: u32 = 1;
    let mut pages: Vec<(ObjectId, Dictionary)> = Vec::new();
    let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();
    let mut document = Document::with_version("1.5");

    for mut doc in docs {
        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        for &page_id in doc.get_pages().values() {
            if let Ok(Object::Dictionary(dict)) = doc.get_object(page_id) {
                let mut dict = dict.clone();
                inherit_attributes(&doc, &mut dict);
                pages.push((page_id, dict));
            }
        }

        for (object_id, object) in doc.objects {
            match object.type_name().unwrap_or(b"") {
                b"Catalog" | b"Pages" | b"Page" | b"Outlines" | b"Outline" => {}
                _ => {
                    objects.insert(object_id, object);
                }
            }
        }
    }

    document.objects.extend(objects);
    document.max_id = max_id;

    let pages_id = document.new_object_id();
    let mut kids = Vec::with_capacity(pages.len());
    for (page_id, mut dict) in pages {
        dict.set("Parent", Object::Reference(pages_id));
        document.objects.insert(page_id, Object::Dictionary(dict));
        kids.push(Object::Reference(page_id));
    }
    let page_count = kids.len();

    let pages_dict = Dictionary::from_iter([
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(page_count as i64)),
    ]);
    document.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = document.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    document.trailer.set("Root", Object::Reference(catalog_id));

    document.renumber_objects();
    document.compress();

    debug!("Merged {} pages", page_count);
    Ok(MergedDocument {
        document,
        page_count,
        skipped: Vec::new(),
    })
}

/// Copy inheritable attributes from the page tree onto the page itself,
/// since the source page tree nodes are dropped.
fn inherit_attributes(doc: &Document, page: &mut Dictionary) {
    for key in INHERITABLE {
        if page.has(key) {
            continue;
        }
        let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
        while let Some(parent_id) = parent {
            let Ok(node) = doc.get_dictionary(parent_id) else {
                break;
            };
            if let Ok(value) = node.get(key) {
                page.set(key.to_vec(), value.clone());
                break;
            }
            parent = node.get(b"Parent").and_then(Object::as_reference).ok();
        }
    }
}
