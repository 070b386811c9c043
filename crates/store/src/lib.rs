pub mod error;
pub mod highlight;
pub mod highlights;
pub mod kv;
pub mod settings;

pub use crate::error::StoreError;
pub use crate::highlight::{DEFAULT_COLOR, Highlight, HighlightKey, TimeRange};
pub use crate::kv::{KeyValue, MemoryStore};
