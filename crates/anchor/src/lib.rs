pub mod engine;
pub mod guard;
pub mod locator;
pub mod wrapper;

/// Class carried by every wrapper element the engine inserts. This is the
/// only signal distinguishing our own tree changes from the page's.
pub const MARK_CLASS: &str = "anchor-highlight";

pub use crate::engine::{Engine, EngineConfig};
pub use crate::guard::MutationGuard;
pub use crate::locator::{already_anchored, locate};
pub use crate::wrapper::{WrapError, WrapOutcome, wrap};
