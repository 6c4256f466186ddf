//! Fallback detection of methods that live in a supplementary file.
//!
//! Cell Press and similar journals sometimes publish the methods section
//! only as a supplementary document, leaving just a pointer in the article
//! XML. This module is invoked only when the locator found nothing inline.

use crate::jats::{Document, NodeId};

/// A detected pointer to supplementary methods content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplementaryPointer {
    /// Filename of the linked media resource, when resolvable.
    pub href: Option<String>,
}

/// Scan supplementary-material containers for a methods pointer.
///
/// A container is either a `supplementary-material` element or a `sec` with
/// `sec-type="supplementary-material"`. The first container whose text
/// mentions methods together with "supplemental"/"supplementary" wins.
pub fn find_supplementary_pointer(doc: &Document) -> Option<SupplementaryPointer> {
    for node in doc.descendants(doc.root()) {
        if !is_supplementary_container(doc, node) {
            continue;
        }
        let text = doc.collect_text(node).to_lowercase();
        if text.contains("method")
            && (text.contains("supplemental") || text.contains("supplementary"))
        {
            let href = doc
                .descendants(node)
                .find(|&n| doc.tag(n) == "media")
                .and_then(|media| doc.attr(media, "href"))
                .map(str::to_string);
            return Some(SupplementaryPointer { href });
        }
    }
    None
}

fn is_supplementary_container(doc: &Document, node: NodeId) -> bool {
    match doc.tag(node) {
        "supplementary-material" => true,
        "sec" => doc.attr(node, "sec-type") == Some("supplementary-material"),
        _ => false,
    }
}
