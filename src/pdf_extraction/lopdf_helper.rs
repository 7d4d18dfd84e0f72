// lopdf helper - Pure Rust PDF operations
use lopdf::{Document, Object, ObjectId};
use std::collections::HashSet;

use crate::types::{Result, VizError};

/// Load a PDF document from memory, decrypting with the empty user password when needed
pub fn load_pdf_bytes(bytes: &[u8]) -> Result<Document> {
    if !looks_like_pdf(bytes) {
        return Err(VizError::InvalidPdf("missing %PDF header".to_string()));
    }

    let mut document = Document::load_mem(bytes)
        .map_err(|e| VizError::InvalidPdf(e.to_string()))?;

    if document.is_encrypted() {
        log::debug!("PDF is encrypted, trying empty user password");
        document.decrypt("").map_err(|_| VizError::Encrypted)?;
    }

    check_page_tree(&document)?;
    Ok(document)
}

/// Reject page trees lopdf would walk forever: a node reachable twice through
/// `/Kids`, or a page whose `/Parent` chain loops.
pub fn check_page_tree(document: &Document) -> Result<()> {
    let cyclic = || VizError::InvalidPdf("cyclic page tree".to_string());

    let root = document
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .and_then(|id| document.get_dictionary(id))
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference);
    let Ok(root) = root else {
        return Ok(());
    };

    let mut seen: HashSet<ObjectId> = HashSet::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            return Err(cyclic());
        }
        let kids = document
            .get_dictionary(id)
            .and_then(|node| node.get(b"Kids"))
            .and_then(Object::as_array);
        if let Ok(kids) = kids {
            stack.extend(kids.iter().filter_map(|kid| kid.as_reference().ok()));
        }
    }

    for page_id in document.get_pages().into_values() {
        let mut chain: HashSet<ObjectId> = HashSet::new();
        let mut current = Some(page_id);
        while let Some(id) = current {
            if !chain.insert(id) {
                return Err(cyclic());
            }
            current = document
                .get_dictionary(id)
                .and_then(|node| node.get(b"Parent"))
                .and_then(Object::as_reference)
                .ok();
        }
    }

    Ok(())
}

// Some writers put junk (BOM, whitespace) before the header; readers accept it within the first KB
fn looks_like_pdf(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(1024)];
    window.windows(4).any(|w| w == b"%PDF")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    // Catalog -> Pages -> one Page; returns (document, pages id, page id)
    fn one_page_document(page_parent_is_self: bool) -> (Document, ObjectId, ObjectId) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let page_id = doc.new_object_id();
        let parent = if page_parent_is_self { page_id } else { pages_id };
        doc.objects.insert(page_id, Object::Dictionary(dictionary! { "Type" => "Page", "Parent" => parent }));
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! { "Type" => "Pages", "Kids" => vec![page_id.into()], "Count" => 1 }),
        );
        let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        doc.trailer.set("Root", catalog_id);
        (doc, pages_id, page_id)
    }

    #[test]
    fn test_page_tree_ok() {
        assert!(check_page_tree(&one_page_document(false).0).is_ok());
    }

    #[test]
    fn test_self_parented_page_rejected() {
        let err = check_page_tree(&one_page_document(true).0).unwrap_err();
        assert!(matches!(err, VizError::InvalidPdf(ref msg) if msg == "cyclic page tree"));
    }

    #[test]
    fn test_kids_loop_rejected() {
        let (mut doc, pages_id, page_id) = one_page_document(false);
        doc.get_object_mut(pages_id)
            .unwrap()
            .as_dict_mut()
            .unwrap()
            .set("Kids", vec![Object::Reference(page_id), Object::Reference(pages_id)]);
        assert!(matches!(check_page_tree(&doc), Err(VizError::InvalidPdf(_))));
    }

    #[test]
    fn test_document_without_catalog_passes() {
        assert!(check_page_tree(&Document::with_version("1.5")).is_ok());
    }

    #[test]
    fn test_rejects_non_pdf() {
        let err = load_pdf_bytes(b"just some plain text").unwrap_err();
        assert!(matches!(err, VizError::InvalidPdf(_)));
    }

    #[test]
    fn test_rejects_truncated_pdf() {
        let err = load_pdf_bytes(b"%PDF-1.5\n1 0 obj\n<<").unwrap_err();
        assert!(matches!(err, VizError::InvalidPdf(_)));
    }

    #[test]
    fn test_header_search_window() {
        assert!(looks_like_pdf(b"\xEF\xBB\xBF%PDF-1.4"));
        assert!(!looks_like_pdf(b""));
    }
}
