//! Read-only view of the user settings stored beside the highlights.

use crate::error::StoreError;
use crate::highlight::DEFAULT_COLOR;
use crate::kv::KeyValue;

pub const PAUSED_KEY: &str = "isPaused";
pub const COLOR_KEY: &str = "userColor";

/// When true the engine neither captures nor restores.
pub fn is_paused<S: KeyValue>(kv: &S) -> Result<bool, StoreError> {
    Ok(kv
        .get(PAUSED_KEY)?
        .and_then(|v| v.as_bool())
        .unwrap_or(false))
}

/// Color applied to new captures and to restorations lacking a stored color.
pub fn user_color<S: KeyValue>(kv: &S) -> Result<String, StoreError> {
    Ok(kv
        .get(COLOR_KEY)?
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| DEFAULT_COLOR.to_string()))
}
