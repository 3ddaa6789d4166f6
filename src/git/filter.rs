//! Noise filtering for staged diffs.
//!
//! Binary changes already arrive as a single `Binary files ... differ` line, so
//! they pass through untouched. Whole-file deletions are collapsed to their
//! `diff --git` header plus a placeholder, since the removed body carries no
//! signal for a commit message.

use tracing::debug;

/// Prefix of the line that opens each per-file block.
const DIFF_HEADER: &str = "diff --git";

/// Prefix of git's summary line for binary changes.
const BINARY_MARKER: &str = "Binary files";

/// Extended header line marking a deleted file.
const DELETED_MARKER: &str = "deleted file mode";

/// Line emitted in place of a deleted file's content.
pub const DELETED_PLACEHOLDER: &str = "deleted file mode (content omitted)";

/// How many lines, counting the header itself, are searched for the deletion
/// marker. Files whose extended header is longer than this are not collapsed.
pub const DELETION_LOOKAHEAD: usize = 10;

/// Filter state while walking the diff line by line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterState {
    /// Copying lines verbatim and watching for headers.
    Scanning,
    /// Current header belongs to a deleted file; placeholder not yet emitted.
    ConfirmedDeletion,
    /// Dropping a deleted file's body until the next header.
    SkippingBody,
}

/// Strip deleted-file bodies from a unified diff, keeping everything else.
///
/// Output lines keep their input order. A diff with no deletions comes back
/// byte-identical.
pub fn filter_diff_noise(diff: &str) -> String {
    if diff.is_empty() {
        return String::new();
    }

    let lines: Vec<&str> = diff.split('\n').collect();
    let mut result: Vec<&str> = Vec::with_capacity(lines.len());
    let mut state = FilterState::Scanning;

    for (i, line) in lines.iter().enumerate() {
        let line = *line;

        if state == FilterState::SkippingBody {
            if !line.starts_with(DIFF_HEADER) {
                continue;
            }
            state = FilterState::Scanning;
        }

        if line.starts_with(BINARY_MARKER) {
            result.push(line);
            continue;
        }

        if line.starts_with(DIFF_HEADER) && is_deletion_block(&lines, i) {
            state = FilterState::ConfirmedDeletion;
        }

        result.push(line);

        if state == FilterState::ConfirmedDeletion {
            debug!("Omitting content of deleted file: {}", line);
            result.push(DELETED_PLACEHOLDER);
            state = FilterState::SkippingBody;
        }
    }

    result.join("\n")
}

/// Whether the block opened by the header at `header` is a file deletion.
///
/// Looks at the lines after the header, inside a window of
/// [`DELETION_LOOKAHEAD`] lines, and stops at the next header.
pub fn is_deletion_block(lines: &[&str], header: usize) -> bool {
    let window_end = (header + DELETION_LOOKAHEAD).min(lines.len());

    lines
        .get(header + 1..window_end)
        .unwrap_or_default()
        .iter()
        .take_while(|line| !line.starts_with(DIFF_HEADER))
        .any(|line| line.starts_with(DELETED_MARKER))
}
