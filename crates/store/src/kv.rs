//! Opaque key-value persistence boundary.
//!
//! The engine treats every call as a suspension point: values read here may
//! be stale by the time the continuation runs, and consumers re-read the
//! live tree afterwards rather than trusting call-time state.

use crate::error::StoreError;
use bus::StoreChange;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::sync::mpsc::Sender;

pub trait KeyValue {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;
    fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
    /// Register a change-feed listener. Every mutation delivers one
    /// `StoreChange` per affected key; dead listeners are pruned silently.
    fn watch(&self, tx: Sender<StoreChange>);
}

/// In-process backend used by tests and hermetic embeddings.
pub struct MemoryStore {
    data: RefCell<BTreeMap<String, Value>>,
    watchers: RefCell<Vec<Sender<StoreChange>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            data: RefCell::new(BTreeMap::new()),
            watchers: RefCell::new(Vec::new()),
        }
    }

    fn notify(&self, change: StoreChange) {
        self.watchers
            .borrow_mut()
            .retain(|tx| tx.send(change.clone()).is_ok());
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValue for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.data.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let old = self.data.borrow_mut().insert(key.to_string(), value.clone());
        self.notify(StoreChange {
            key: key.to_string(),
            old,
            new: Some(value),
        });
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let drained = std::mem::take(&mut *self.data.borrow_mut());
        for (key, old) in drained {
            self.notify(StoreChange {
                key,
                old: Some(old),
                new: None,
            });
        }
        Ok(())
    }

    fn watch(&self, tx: Sender<StoreChange>) {
        self.watchers.borrow_mut().push(tx);
    }
}
