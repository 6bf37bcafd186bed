//! Page-tree editing
//!
//! Every derived document is produced the same way: pick the leaf page
//! objects that should survive, copy inherited attributes onto them, hang
//! them directly under the root `/Pages` node and prune whatever is no
//! longer reachable.

use std::collections::BTreeSet;

use lopdf::{Document, Object, ObjectId};

use crate::document::{DocumentError, DocumentResult};

/// Attributes a page may inherit from its ancestors in the page tree
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Upper bound on page-tree depth when walking `/Parent` links
const MAX_TREE_DEPTH: usize = 64;

/// Keep only the given 1-based pages, in the given order.
///
/// Callers validate the selection; a page number past the end is reported
/// as `InvalidArgument` rather than silently dropped.
pub fn extract_pages(mut doc: Document, pages: &[u32]) -> DocumentResult<Document> {
    let tree = doc.get_pages();

    let mut keep = Vec::with_capacity(pages.len());
    for page in pages {
        let id = tree.get(page).copied().ok_or_else(|| {
            DocumentError::invalid(format!(
                "Page {} is out of range (document has {} pages)",
                page,
                tree.len()
            ))
        })?;
        keep.push(id);
    }

    rebuild_page_tree(&mut doc, keep)?;
    doc.prune_objects();
    doc.compress();
    Ok(doc)
}

/// Concatenate documents in order into the first one
pub fn concatenate(documents: Vec<Document>) -> DocumentResult<Document> {
    let mut documents = documents.into_iter();
    let mut dest = documents
        .next()
        .ok_or_else(|| DocumentError::invalid("No documents provided for merging"))?;

    let mut page_ids: Vec<ObjectId> = dest.get_pages().into_values().collect();

    for mut source in documents {
        // Shift the source's object ids past everything already in dest
        source.renumber_objects_with(dest.max_id + 1);
        page_ids.extend(source.get_pages().into_values());
        dest.max_id = dest.max_id.max(source.max_id);
        dest.objects.extend(source.objects);
    }

    rebuild_page_tree(&mut dest, page_ids)?;
    dest.prune_objects();
    dest.compress();
    Ok(dest)
}

/// Add `angle` degrees to the rotation of each 1-based page in `pages`.
///
/// All pages are kept in their original order.
pub fn rotate_pages(mut doc: Document, pages: &BTreeSet<u32>, angle: i64) -> DocumentResult<Document> {
    if angle % 90 != 0 {
        return Err(DocumentError::invalid(format!(
            "Rotation angle must be a multiple of 90 degrees, got {}",
            angle
        )));
    }

    let tree = doc.get_pages();
    for page in pages {
        let id = tree.get(page).copied().ok_or_else(|| {
            DocumentError::invalid(format!(
                "Page {} is out of range (document has {} pages)",
                page,
                tree.len()
            ))
        })?;

        let rotation = (effective_rotation(&doc, id).rem_euclid(360) + angle.rem_euclid(360)).rem_euclid(360);
        doc.get_dictionary_mut(id)?
            .set("Rotate", Object::Integer(rotation));
    }

    Ok(doc)
}

/// The `/Rotate` value that applies to a page, following inheritance
pub fn effective_rotation(doc: &Document, page_id: ObjectId) -> i64 {
    inherited_attribute(doc, page_id, b"Rotate")
        .and_then(|value| value.as_i64().ok())
        .unwrap_or(0)
}

/// Look up `key` on a page or the nearest ancestor that defines it
pub(crate) fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut node = doc.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        let parent = node.get(b"Parent").and_then(|p| p.as_reference()).ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }
    None
}

/// Replace the page tree with a flat one holding exactly `page_ids`
fn rebuild_page_tree(doc: &mut Document, page_ids: Vec<ObjectId>) -> DocumentResult<()> {
    // Resolve inheritance while the old parents are still linked
    for &id in &page_ids {
        let inherited: Vec<(&[u8], Object)> = INHERITABLE_KEYS
            .iter()
            .filter_map(|key| inherited_attribute(doc, id, key).map(|value| (*key, value)))
            .collect();

        let page = doc.get_dictionary_mut(id)?;
        for (key, value) in inherited {
            if !page.has(key) {
                page.set(key.to_vec(), value);
            }
        }
    }

    let pages_id = root_pages_id(doc)?;

    for &id in &page_ids {
        doc.get_dictionary_mut(id)?
            .set("Parent", Object::Reference(pages_id));
    }

    let pages_dict = doc.get_dictionary_mut(pages_id)?;
    pages_dict.set(
        "Kids",
        Object::Array(page_ids.iter().map(|&id| Object::Reference(id)).collect()),
    );
    pages_dict.set("Count", Object::Integer(page_ids.len() as i64));
    for key in INHERITABLE_KEYS {
        pages_dict.remove(key);
    }

    Ok(())
}

fn root_pages_id(doc: &Document) -> DocumentResult<ObjectId> {
    let catalog_id = doc
        .trailer
        .get(b"Root")
        .and_then(|root| root.as_reference())
        .map_err(|_| DocumentError::ParseError("No Root in trailer".into()))?;

    doc.get_dictionary(catalog_id)
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(|pages| pages.as_reference())
        .map_err(|_| DocumentError::ParseError("No Pages in catalog".into()))
}
