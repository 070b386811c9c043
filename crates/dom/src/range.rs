//! Text ranges addressed as (text node, byte offset) pairs.
//!
//! Contract:
//! - Offsets are byte offsets into the node's text and must fall on UTF-8
//!   code-point boundaries.
//! - A range may start in one text node and end in another; document order
//!   of the two boundaries is validated where the range is consumed.
//! - `end.offset` is exclusive.

use crate::types::Id;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Boundary {
    pub node: Id,
    pub offset: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextRange {
    pub start: Boundary,
    pub end: Boundary,
}

impl TextRange {
    pub fn new(start_node: Id, start_offset: usize, end_node: Id, end_offset: usize) -> Self {
        Self {
            start: Boundary {
                node: start_node,
                offset: start_offset,
            },
            end: Boundary {
                node: end_node,
                offset: end_offset,
            },
        }
    }

    /// True when both boundaries sit in the same text node.
    pub fn in_single_node(&self) -> bool {
        self.start.node == self.end.node
    }

    pub fn is_collapsed(&self) -> bool {
        self.in_single_node() && self.start.offset == self.end.offset
    }
}

/// One text node's share of a decomposed range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeSlice {
    pub node: Id,
    pub start: usize,
    pub end: usize,
}
