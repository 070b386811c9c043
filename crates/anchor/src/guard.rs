//! Rescan scheduling over the mutation feed.
//!
//! Two states: idle (no deadline) and pending (a rescan is scheduled).
//! Every incoming batch is first checked for self-inflicted changes: a
//! batch in which any added node carries the marker class was produced by
//! the wrapper and is discarded outright, which is the one mechanism
//! keeping wrapper insertions from re-triggering the pass that made them.
//! Qualifying batches arm or extend a single debounce deadline, so a burst
//! of page mutations coalesces into one rescan.

use dom::{MutationKind, MutationRecord};
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct MutationGuard {
    marker: String,
    debounce: Duration,
    deadline: Option<Instant>,
}

impl MutationGuard {
    pub fn new(marker: impl Into<String>, debounce: Duration) -> Self {
        Self {
            marker: marker.into(),
            debounce,
            deadline: None,
        }
    }

    /// Feed one observer batch. Character-data records never arm the
    /// deadline; only child-list changes can move text around.
    pub fn observe(&mut self, records: &[MutationRecord], now: Instant) {
        if records.is_empty() {
            return;
        }
        let ours = records
            .iter()
            .any(|r| r.added.iter().any(|n| n.has_class(&self.marker)));
        if ours {
            log::trace!(target: "anchor.guard", "self-inflicted batch discarded");
            return;
        }
        let structural = records.iter().any(|r| r.kind == MutationKind::ChildList);
        if !structural {
            return;
        }
        // restart, not stack: a pending deadline is pushed out
        self.deadline = Some(now + self.debounce);
        log::trace!(target: "anchor.guard", "rescan armed");
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the deadline once it has passed. Fires at most once per
    /// armed deadline, then returns to idle.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
