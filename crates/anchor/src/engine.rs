//! Page-level orchestration: restore on load and on guarded mutations,
//! capture on selection.
//!
//! Failure policy: a descriptor that no longer locates is silently skipped;
//! a store that errors is logged and the operation dropped. Nothing here
//! surfaces an error to the page.

use crate::MARK_CLASS;
use crate::guard::MutationGuard;
use crate::locator;
use crate::wrapper;
use bus::{EngineEvent, StoreChange};
use chrono::Local;
use dom::Document;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::{Duration, Instant};
use store::{Highlight, KeyValue, highlights, settings};

#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Quiet period after the last qualifying page mutation before a
    /// rescan fires.
    pub debounce: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_secs(1),
        }
    }
}

pub struct Engine<S: KeyValue> {
    kv: S,
    guard: MutationGuard,
    events: Sender<EngineEvent>,
    changes: Receiver<StoreChange>,
}

impl<S: KeyValue> Engine<S> {
    pub fn new(kv: S, events: Sender<EngineEvent>, config: EngineConfig) -> Self {
        let (tx, changes) = channel();
        kv.watch(tx);
        Self {
            kv,
            guard: MutationGuard::new(MARK_CLASS, config.debounce),
            events,
            changes,
        }
    }

    /// Direct access for list-management consumers (note edits, purges).
    pub fn store(&self) -> &S {
        &self.kv
    }

    fn send(&self, event: EngineEvent) {
        // a departed collaborator is not our problem
        let _ = self.events.send(event);
    }

    /// Re-anchor every stored descriptor for this page. Returns the number
    /// of descriptors stored for the URL (the badge figure) regardless of
    /// how many re-wrapped.
    pub fn restore(&mut self, doc: &mut Document) -> usize {
        match settings::is_paused(&self.kv) {
            Ok(false) => {}
            Ok(true) => return 0,
            Err(err) => {
                log::warn!(target: "anchor.engine", "pause state unreadable: {err}");
                return 0;
            }
        }
        let page = match highlights::for_url(&self.kv, doc.url()) {
            Ok(page) => page,
            Err(err) => {
                log::warn!(target: "anchor.engine", "descriptor read failed: {err}");
                return 0;
            }
        };
        let count = page.len();
        self.send(EngineEvent::BadgeUpdate { count });

        let scroll = doc.scroll();
        let selection = doc.selection().copied();
        for h in &page {
            if locator::already_anchored(doc, &h.text) {
                continue;
            }
            let Some(range) = locator::locate(doc, &h.text) else {
                log::debug!(target: "anchor.engine", "no anchor for {:?} on this pass", h.text);
                continue;
            };
            match wrapper::wrap(doc, &range, &h.color) {
                Ok(outcome) => log::trace!(
                    target: "anchor.engine",
                    "re-anchored {:?} in {} part(s)",
                    h.text,
                    outcome.wrapped
                ),
                Err(err) => log::debug!(target: "anchor.engine", "wrap failed: {err}"),
            }
        }
        doc.set_scroll(scroll.0, scroll.1);
        match selection {
            Some(range) => doc.select(range),
            None => doc.clear_selection(),
        }
        count
    }

    /// Turn the current selection into a stored highlight. `None` when
    /// paused, the selection is empty, the wrap failed entirely, or the
    /// store dropped the write. On total wrap failure the native selection
    /// is left untouched.
    pub fn capture(&mut self, doc: &mut Document) -> Option<Highlight> {
        match settings::is_paused(&self.kv) {
            Ok(false) => {}
            Ok(true) => return None,
            Err(err) => {
                log::warn!(target: "anchor.engine", "pause state unreadable: {err}");
                return None;
            }
        }
        let range = doc.selection().copied()?;
        let raw = match doc.range_text(&range) {
            Ok(text) => text,
            Err(err) => {
                log::debug!(target: "anchor.engine", "stale selection: {err}");
                return None;
            }
        };
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        let color = match settings::user_color(&self.kv) {
            Ok(color) => color,
            Err(err) => {
                log::warn!(target: "anchor.engine", "color unreadable: {err}");
                return None;
            }
        };

        if let Err(err) = wrapper::wrap(doc, &range, &color) {
            log::debug!(target: "anchor.engine", "capture wrap failed: {err}");
            return None;
        }

        let highlight = Highlight::new(text, doc.url(), color, Local::now());
        if let Err(err) = highlights::append(&self.kv, highlight.clone()) {
            log::warn!(target: "anchor.engine", "descriptor not persisted: {err}");
            return None;
        }
        match highlights::count_for_url(&self.kv, doc.url()) {
            Ok(count) => self.send(EngineEvent::BadgeUpdate { count }),
            Err(err) => log::warn!(target: "anchor.engine", "count unreadable: {err}"),
        }
        // drop the native selection so only the wrapper is visible
        doc.clear_selection();
        Some(highlight)
    }

    /// Drain the document's observer feed into the guard.
    pub fn on_mutations(&mut self, doc: &mut Document, now: Instant) {
        let records = doc.take_mutations();
        self.guard.observe(&records, now);
    }

    /// Run the debounced rescan when due. Returns the restored count when a
    /// pass actually ran.
    pub fn tick(&mut self, doc: &mut Document, now: Instant) -> Option<usize> {
        self.pump_store_changes();
        if !self.guard.take_due(now) {
            return None;
        }
        Some(self.restore(doc))
    }

    pub fn rescan_pending(&self) -> bool {
        self.guard.is_pending()
    }

    /// Forward persistence-change notifications to the event bus.
    pub fn pump_store_changes(&self) {
        for change in self.changes.try_iter() {
            self.send(EngineEvent::StoreChanged { key: change.key });
        }
    }
}
