//! Shared utility functions.

/// Shorten `s` to at most `max_chars` characters for log lines, marking the
/// cut with `…`. Newlines are flattened to spaces.
pub fn preview(s: &str, max_chars: usize) -> String {
    let flat = s.replace(['\n', '\r'], " ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let mut out: String = flat.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
