//! Size Estimation
//!
//! Approximates an entry's footprint by serializing the value to JSON and
//! counting two bytes per UTF-16 code unit. This is an estimate, not
//! allocation accounting.

use serde::Serialize;
use tracing::warn;

/// Size assumed for values that cannot be serialized.
pub const DEFAULT_ENTRY_SIZE: usize = 1024;

/// Estimates the size of `value` in bytes.
///
/// Never fails: serialization errors fall back to [`DEFAULT_ENTRY_SIZE`].
pub fn estimate_size<V: Serialize + ?Sized>(value: &V) -> usize {
    match serde_json::to_string(value) {
        Ok(json) => json.encode_utf16().count() * 2,
        Err(err) => {
            warn!(
                "Size estimation failed ({}), assuming {} bytes",
                err, DEFAULT_ENTRY_SIZE
            );
            DEFAULT_ENTRY_SIZE
        }
    }
}
