//! Persisted highlight descriptor.
//!
//! A descriptor is immutable except for `note`. Identity for update and
//! delete is the composite `(text, url, date)`: two records captured within
//! the same second with identical text are indistinguishable. That is a
//! known limitation of the record shape, kept as-is.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

pub const DEFAULT_COLOR: &str = "#ffff00";

const DATE_FORMAT: &str = "%m/%d/%Y, %H:%M:%S";
// Older records carried 12-hour locale dates.
const LEGACY_DATE_FORMATS: &[&str] = &[DATE_FORMAT, "%m/%d/%Y, %I:%M:%S %p"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub text: String,
    pub url: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub note: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl Highlight {
    pub fn new(
        text: impl Into<String>,
        url: impl Into<String>,
        color: impl Into<String>,
        at: DateTime<Local>,
    ) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
            color: color.into(),
            note: String::new(),
            date: at.format(DATE_FORMAT).to_string(),
            timestamp: Some(at.timestamp_millis()),
        }
    }

    /// Epoch millis for sorting and time-range filtering. Records predating
    /// the `timestamp` field fall back to parsing their display date; a
    /// record with neither yields `None`.
    pub fn effective_timestamp(&self) -> Option<i64> {
        if let Some(ts) = self.timestamp {
            return Some(ts);
        }
        parse_legacy_date(&self.date)
    }

    pub fn key(&self) -> HighlightKey {
        HighlightKey {
            text: self.text.clone(),
            url: self.url.clone(),
            date: self.date.clone(),
        }
    }
}

fn parse_legacy_date(date: &str) -> Option<i64> {
    for fmt in LEGACY_DATE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(date, fmt) {
            if let Some(local) = Local.from_local_datetime(&naive).earliest() {
                return Some(local.timestamp_millis());
            }
        }
    }
    None
}

/// Composite record identity used for note edits and deletion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighlightKey {
    pub text: String,
    pub url: String,
    pub date: String,
}

impl HighlightKey {
    pub fn matches(&self, h: &Highlight) -> bool {
        self.text == h.text && self.url == h.url && self.date == h.date
    }
}

/// Bulk-deletion window, measured back from "now".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeRange {
    LastHour,
    LastDay,
    LastWeek,
    All,
}

impl TimeRange {
    pub const HOUR_MS: i64 = 3_600_000;

    fn cutoff(self, now_millis: i64) -> Option<i64> {
        match self {
            TimeRange::LastHour => Some(now_millis - Self::HOUR_MS),
            TimeRange::LastDay => Some(now_millis - 24 * Self::HOUR_MS),
            TimeRange::LastWeek => Some(now_millis - 7 * 24 * Self::HOUR_MS),
            TimeRange::All => None,
        }
    }

    /// Whether a record with the given effective timestamp falls inside the
    /// window. `All` matches every record, including undatable ones; a
    /// bounded window never matches a record with no derivable time.
    pub fn contains(self, timestamp: Option<i64>, now_millis: i64) -> bool {
        match self.cutoff(now_millis) {
            None => true,
            Some(cut) => timestamp.is_some_and(|t| t >= cut),
        }
    }
}
