//! Flattened rendered-text index for whole-document substring search.
//!
//! Contract:
//! - Text node contents are concatenated directly, in document order, with
//!   no synthesized separators: exactly the string a range read across the
//!   same nodes produces. A needle that spans node boundaries is therefore
//!   found at the concatenation seam.
//! - Non-rendering subtrees (`head`, `style`, `script`, …) are excluded.
//! - Hit positions are byte offsets into the flattened text; `resolve` maps
//!   a hit back to node-addressed range boundaries.

use crate::range::TextRange;
use crate::traverse::{TextNodeView, collect_text_nodes};
use crate::types::{Id, Node};
use memchr::memmem;

#[derive(Clone, Copy, Debug)]
struct Span {
    node: Id,
    start: usize,
    len: usize,
    marked: bool,
}

#[derive(Debug)]
pub struct TextIndex {
    text: String,
    spans: Vec<Span>,
}

impl TextIndex {
    pub fn build(root: &Node, marker: &str) -> Self {
        let mut views: Vec<TextNodeView<'_>> = Vec::new();
        collect_text_nodes(root, marker, &mut views);

        let mut text = String::new();
        let mut spans = Vec::with_capacity(views.len());
        for view in views {
            if view.text.is_empty() {
                continue;
            }
            spans.push(Span {
                node: view.id,
                start: text.len(),
                len: view.text.len(),
                marked: view.marked,
            });
            text.push_str(view.text);
        }
        Self { text, spans }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte positions of every occurrence of `needle`, in document order.
    pub fn matches<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = usize> + 'a {
        memmem::find_iter(self.text.as_bytes(), needle.as_bytes())
    }

    /// True when the hit at `pos` starts inside an already-marked span.
    pub fn starts_marked(&self, pos: usize) -> bool {
        self.span_at(pos).is_some_and(|s| s.marked)
    }

    /// Map a hit back to node boundaries. `len` must be non-zero and
    /// `pos + len` must not exceed the flattened text.
    pub fn resolve(&self, pos: usize, len: usize) -> Option<TextRange> {
        if len == 0 || pos + len > self.text.len() {
            return None;
        }
        let start_span = self.span_at(pos)?;
        let end_span = self.span_at(pos + len - 1)?;
        Some(TextRange::new(
            start_span.node,
            pos - start_span.start,
            end_span.node,
            pos + len - end_span.start,
        ))
    }

    fn span_at(&self, pos: usize) -> Option<&Span> {
        let ix = self
            .spans
            .partition_point(|s| s.start + s.len <= pos)
            .min(self.spans.len().saturating_sub(1));
        let span = self.spans.get(ix)?;
        (span.start <= pos && pos < span.start + span.len).then_some(span)
    }
}
