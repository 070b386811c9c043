//! Descriptor collection operations over the key-value boundary.
//!
//! The collection is one JSON array under a single key, insertion order =
//! chronological (oldest first). Every operation is a full read-modify-write
//! of that array; concurrent writers can overwrite each other based on stale
//! reads, which the record shape accepts (no per-record versioning).

use crate::error::StoreError;
use crate::highlight::{Highlight, HighlightKey, TimeRange};
use crate::kv::KeyValue;

pub const HIGHLIGHTS_KEY: &str = "highlights";

fn read<S: KeyValue>(kv: &S) -> Result<Vec<Highlight>, StoreError> {
    match kv.get(HIGHLIGHTS_KEY)? {
        Some(value) => Ok(serde_json::from_value(value)?),
        None => Ok(Vec::new()),
    }
}

fn write<S: KeyValue>(kv: &S, all: &[Highlight]) -> Result<(), StoreError> {
    kv.set(HIGHLIGHTS_KEY, serde_json::to_value(all)?)
}

/// Full collection, oldest first.
pub fn all<S: KeyValue>(kv: &S) -> Result<Vec<Highlight>, StoreError> {
    read(kv)
}

/// Listing order for UI consumers.
pub fn newest_first<S: KeyValue>(kv: &S) -> Result<Vec<Highlight>, StoreError> {
    let mut records = read(kv)?;
    records.reverse();
    Ok(records)
}

/// Records for one page. Exact string equality on the stored URL; a query
/// or fragment change is a different page.
pub fn for_url<S: KeyValue>(kv: &S, url: &str) -> Result<Vec<Highlight>, StoreError> {
    Ok(read(kv)?.into_iter().filter(|h| h.url == url).collect())
}

pub fn count_for_url<S: KeyValue>(kv: &S, url: &str) -> Result<usize, StoreError> {
    Ok(read(kv)?.iter().filter(|h| h.url == url).count())
}

pub fn append<S: KeyValue>(kv: &S, highlight: Highlight) -> Result<(), StoreError> {
    let mut records = read(kv)?;
    records.push(highlight);
    write(kv, &records)
}

/// Replace the note on the first record matching `key`. Returns whether a
/// record was found; `note` is the only field an edit may touch.
pub fn update_note<S: KeyValue>(
    kv: &S,
    key: &HighlightKey,
    note: &str,
) -> Result<bool, StoreError> {
    let mut records = read(kv)?;
    let Some(record) = records.iter_mut().find(|h| key.matches(h)) else {
        return Ok(false);
    };
    record.note = note.to_string();
    write(kv, &records)?;
    Ok(true)
}

/// Remove the first record matching `key`. Returns whether one was removed.
pub fn delete<S: KeyValue>(kv: &S, key: &HighlightKey) -> Result<bool, StoreError> {
    let mut records = read(kv)?;
    let Some(ix) = records.iter().position(|h| key.matches(h)) else {
        return Ok(false);
    };
    records.remove(ix);
    write(kv, &records)?;
    Ok(true)
}

pub fn clear<S: KeyValue>(kv: &S) -> Result<(), StoreError> {
    write(kv, &[])
}

/// Remove every record whose effective timestamp falls inside `range`,
/// measured back from `now_millis`. Returns how many were removed.
pub fn purge_range<S: KeyValue>(
    kv: &S,
    range: TimeRange,
    now_millis: i64,
) -> Result<usize, StoreError> {
    let records = read(kv)?;
    let before = records.len();
    let kept: Vec<Highlight> = records
        .into_iter()
        .filter(|h| !range.contains(h.effective_timestamp(), now_millis))
        .collect();
    let removed = before - kept.len();
    if removed > 0 {
        write(kv, &kept)?;
    }
    log::debug!(target: "store.highlights", "purged {removed} of {before} records");
    Ok(removed)
}
