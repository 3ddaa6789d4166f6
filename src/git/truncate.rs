//! Character budget for the diff sent to the model.

/// Appended to a diff that was cut short.
pub const TRUNCATION_MARKER: &str = "\n[Diff truncated]";

/// Default budget, in characters.
pub const DEFAULT_MAX_DIFF_CHARS: usize = 4000;

/// Cut `diff` down to at most `max_chars` characters.
///
/// Counts chars, not bytes, so a multi-byte character is never split. The cut
/// may land mid-line. Returns the text and whether anything was dropped.
pub fn truncate_diff(diff: &str, max_chars: usize) -> (String, bool) {
    match diff.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            let mut truncated = String::with_capacity(cut + TRUNCATION_MARKER.len());
            truncated.push_str(&diff[..cut]);
            truncated.push_str(TRUNCATION_MARKER);
            (truncated, true)
        }
        None => (diff.to_string(), false),
    }
}
