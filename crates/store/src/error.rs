//! Persistence errors. Callers log and drop the failed operation; nothing
//! here is allowed to take the page down.

use std::fmt;

#[derive(Debug)]
pub enum StoreError {
    /// The underlying key-value backend failed.
    Backend(String),
    /// A stored value did not decode as the expected shape.
    Decode(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Backend(msg) => write!(f, "storage backend: {msg}"),
            StoreError::Decode(err) => write!(f, "stored value malformed: {err}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Decode(err) => Some(err),
            StoreError::Backend(_) => None,
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Decode(err)
    }
}
