//! Highlight re-anchoring over a live document tree.
//!
//! Mark passages of text, persist them as portable descriptors (text +
//! origin URL + style), and re-apply them whenever the page is revisited or
//! its tree is rebuilt underneath, without double-wrapping, corrupting the
//! tree, or feeding the mutation observer back into itself.
//!
//! The workspace divides as: `dom` owns the tree, ranges, and the
//! mutation-record feed; `store` owns descriptor persistence over an opaque
//! key-value backend; `bus` carries collaborator events (badge counts,
//! storage changes); `anchor` is the engine tying them together. This crate
//! re-exports the surface an embedder needs.

pub use anchor::{Engine, EngineConfig, MARK_CLASS, MutationGuard, WrapError, WrapOutcome};
pub use bus::{Bus, EngineEvent, StoreChange};
pub use dom::{Document, MutationRecord, Node, TextRange, WrapTemplate};
pub use store::{
    DEFAULT_COLOR, Highlight, HighlightKey, KeyValue, MemoryStore, StoreError, TimeRange,
};
