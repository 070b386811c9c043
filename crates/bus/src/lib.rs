use serde_json::Value;
use std::sync::mpsc::{Receiver, Sender, channel};

/// Engine -> collaborator notifications.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineEvent {
    /// Number of stored descriptors for the current page, sent after every
    /// restore pass and every successful capture. Counts stored knowledge,
    /// not rendering success.
    BadgeUpdate { count: usize },
    /// A persistence key changed; list/badge consumers refresh from here.
    StoreChanged { key: String },
}

/// One key's transition in the persistence layer, delivered on every write.
#[derive(Clone, Debug, PartialEq)]
pub struct StoreChange {
    pub key: String,
    pub old: Option<Value>,
    pub new: Option<Value>,
}

pub struct Bus {
    pub evt_tx: Sender<EngineEvent>,
    pub evt_rx: Receiver<EngineEvent>,
}

impl Bus {
    pub fn new() -> Self {
        let (evt_tx, evt_rx) = channel();
        Self { evt_tx, evt_rx }
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
