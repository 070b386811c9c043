//! Errors for document edit operations.

use crate::types::Id;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DomError {
    NodeNotFound(Id),
    NotAText(Id),
    NotAContainer(Id),
    /// Offsets are out of bounds, inverted, or split a UTF-8 code point.
    BadOffsets { start: usize, end: usize },
    /// Range boundaries do not name text nodes of this document in order.
    BadRange,
    /// The target already sits under a marked wrapper element.
    AlreadyWrapped(Id),
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::NodeNotFound(id) => write!(f, "node {} not in document", id.0),
            DomError::NotAText(id) => write!(f, "node {} is not a text node", id.0),
            DomError::NotAContainer(id) => write!(f, "node {} cannot hold children", id.0),
            DomError::BadOffsets { start, end } => {
                write!(f, "invalid text offsets {start}..{end}")
            }
            DomError::BadRange => write!(f, "range boundaries invalid for this document"),
            DomError::AlreadyWrapped(id) => write!(f, "node {} already under a wrapper", id.0),
        }
    }
}

impl std::error::Error for DomError {}
