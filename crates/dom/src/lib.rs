pub mod document;
pub mod error;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
pub mod mutation;
pub mod range;
pub mod text_index;
pub mod traverse;

mod types;

pub use crate::document::{Document, WrapTemplate};
pub use crate::error::DomError;
pub use crate::mutation::{MutationKind, MutationRecord, NodeSummary};
pub use crate::range::{Boundary, RangeSlice, TextRange};
pub use crate::text_index::TextIndex;
pub use crate::types::{Id, Node, NodeId};
