//! String utilities for the domain layer.

/// Shorten a message for log output, cutting after `max_chars` characters.
///
/// Counts characters rather than bytes so multi-byte input never splits
/// inside a code point. Appends `...` only when something was cut.
pub fn preview(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &s[..cut]),
        None => s.to_string(),
    }
}
