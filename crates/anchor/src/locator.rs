//! Two-tier text search over the live tree.
//!
//! Tier one scans individual text nodes in document order and returns the
//! first node that contains the whole needle. Only when no single node
//! holds it does tier two consult the flattened whole-document index, which
//! can place a range across element boundaries. Ties always go to the first
//! occurrence in document order within a tier; there is no "best match"
//! ranking and no fuzzy matching.

use crate::MARK_CLASS;
use dom::traverse::{TextNodeView, collect_text_nodes};
use dom::{Document, TextIndex, TextRange};
use memchr::memmem;

/// Find `search` in the document. `None` means the page no longer carries
/// the text, which is a normal outcome rather than an error.
pub fn locate(doc: &Document, search: &str) -> Option<TextRange> {
    if search.is_empty() {
        return None;
    }

    let mut views: Vec<TextNodeView<'_>> = Vec::new();
    collect_text_nodes(doc.root(), MARK_CLASS, &mut views);
    for view in &views {
        if view.marked {
            continue;
        }
        if let Some(pos) = memmem::find(view.text.as_bytes(), search.as_bytes()) {
            log::trace!(target: "anchor.locator", "single-node hit in {}", view.id.0);
            return Some(TextRange::new(view.id, pos, view.id, pos + search.len()));
        }
    }

    let index = TextIndex::build(doc.root(), MARK_CLASS);
    for pos in index.matches(search) {
        if index.starts_marked(pos) {
            continue;
        }
        if let Some(range) = index.resolve(pos, search.len()) {
            log::trace!(target: "anchor.locator", "cross-node hit at byte {pos}");
            return Some(range);
        }
    }
    log::debug!(target: "anchor.locator", "text not present: {search:?}");
    None
}

/// True when `search` already sits inside a wrapper somewhere in the tree,
/// meaning the descriptor was anchored on an earlier pass.
pub fn already_anchored(doc: &Document, search: &str) -> bool {
    if search.is_empty() {
        return false;
    }
    let index = TextIndex::build(doc.root(), MARK_CLASS);
    index.matches(search).any(|pos| index.starts_marked(pos))
}
