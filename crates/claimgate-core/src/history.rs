//! Text-history reconstruction at merge time.
//!
//! Eligibility is decided on the text reviewers could see when the
//! pull request merged, not on the text as it reads today. A closing
//! reference added after the merge must not unlock a claim, and one
//! removed after the merge must still count.

use chrono::{DateTime, Utc};

use crate::timeline::EditRecord;

/// Reconstruct a text field as it existed at merge time.
///
/// - Not merged (or no merge timestamp): "at merge time" is undefined
///   for this candidate; the current text is returned and callers must
///   not rely on it for eligibility.
/// - Zero edits: the field was never revised; the current text holds
///   at any cutoff.
/// - Otherwise the most recent revision at or before the merge wins.
///   When every recorded revision postdates the merge, the original
///   creation content (the oldest record, anchored at `created_at`) is
///   returned, never the current post-edit text.
///
/// `created_at` anchors fields without a native creation revision: a
/// pull-request body is anchored to the pull request's own creation
/// time, a comment to the comment's.
pub fn content_at_merge(
    merged: bool,
    merged_at: Option<DateTime<Utc>>,
    current_text: &str,
    edits: &[EditRecord],
    created_at: DateTime<Utc>,
) -> String {
    let cutoff = match merged_at {
        Some(cutoff) if merged => cutoff,
        _ => return current_text.to_string(),
    };

    if edits.is_empty() {
        return current_text.to_string();
    }

    let latest = edits
        .iter()
        .filter(|edit| edit.edited_at <= cutoff)
        .max_by_key(|edit| edit.edited_at);
    if let Some(edit) = latest {
        return edit.text.clone();
    }

    // Every recorded revision postdates the merge. The oldest record
    // carries the creation content; its effective timestamp is the
    // field's own creation time, not the remote's revision stamp.
    if created_at <= cutoff {
        edits
            .first()
            .map(|edit| edit.text.clone())
            .unwrap_or_default()
    } else {
        // The field itself did not exist at merge time.
        String::new()
    }
}
