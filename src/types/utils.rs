//! Shared utility functions for JSON access and text handling.
//!
//! ## JSON Extraction Helpers
//!
//! Provides ergonomic helpers for extracting values from `serde_json::Value`:
//! - `json_string` - Extract a string field
//! - `json_str_items` - Extract the string elements of an array

// =============================================================================
// JSON Value Extraction Helpers
// =============================================================================

/// Extract string from JSON value by key.
///
/// Replaces verbose `v.get("key")?.as_str()?.to_string()` patterns.
#[inline]
pub fn json_string(value: &serde_json::Value, key: &str) -> Option<String> {
    value.get(key)?.as_str().map(String::from)
}

/// Extract the string elements of a JSON array.
///
/// Returns `None` when the value is not an array. Non-string elements are skipped.
#[inline]
pub fn json_str_items(value: &serde_json::Value) -> Option<Vec<&str>> {
    value
        .as_array()
        .map(|arr| arr.iter().filter_map(|s| s.as_str()).collect())
}

/// Pretty-print JSON with two-space indentation, keeping key order.
pub fn pretty_json(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

// =============================================================================
// String Utilities
// =============================================================================

/// Take at most `max_chars` characters from `s`.
///
/// Returns the prefix and whether anything was cut off. Counts characters,
/// not bytes, so multi-byte text is never split mid-codepoint.
pub fn truncate_chars(s: &str, max_chars: usize) -> (&str, bool) {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => (&s[..idx], true),
        None => (s, false),
    }
}
