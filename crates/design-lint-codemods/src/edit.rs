//! Rewrite plans: byte-range edits computed against the original text.
//!
//! Detection produces a [`RewritePlan`] without touching the file; applying
//! the plan is a separate step, so a dry run simply never applies it.

use std::ops::Range;

/// A single replacement of a byte range. An empty range is an insertion,
/// an empty replacement is a deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Byte range in the original text.
    pub range: Range<usize>,
    /// Replacement text.
    pub replacement: String,
}

impl TextEdit {
    /// Replaces `range` with `text`.
    #[must_use]
    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            replacement: text.into(),
        }
    }

    /// Inserts `text` at `offset`.
    #[must_use]
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self::replace(offset..offset, text)
    }

    /// Deletes `range`.
    #[must_use]
    pub fn delete(range: Range<usize>) -> Self {
        Self::replace(range, String::new())
    }
}

/// An ordered set of edits for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewritePlan {
    edits: Vec<TextEdit>,
}

impl RewritePlan {
    /// Creates an empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an edit.
    pub fn push(&mut self, edit: TextEdit) {
        self.edits.push(edit);
    }

    /// Adds a replacement.
    pub fn replace(&mut self, range: Range<usize>, text: impl Into<String>) {
        self.push(TextEdit::replace(range, text));
    }

    /// Adds an insertion.
    pub fn insert(&mut self, offset: usize, text: impl Into<String>) {
        self.push(TextEdit::insert(offset, text));
    }

    /// Adds a deletion.
    pub fn delete(&mut self, range: Range<usize>) {
        self.push(TextEdit::delete(range));
    }

    /// Appends every edit of another plan.
    pub fn extend(&mut self, other: Self) {
        self.edits.extend(other.edits);
    }

    /// Whether the plan changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Number of edits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// The edits in the order they were added.
    #[must_use]
    pub fn edits(&self) -> &[TextEdit] {
        &self.edits
    }

    /// Applies the plan to `text`.
    ///
    /// Edits are applied in position order; edits at the same position keep
    /// the order they were added in. An edit that starts inside an earlier
    /// edit's range conflicts and is dropped whole. Edits outside the text
    /// are dropped as well.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        let mut ordered: Vec<&TextEdit> = self.edits.iter().collect();
        ordered.sort_by_key(|e| (e.range.start, e.range.end));

        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for edit in ordered {
            let Range { start, end } = edit.range;
            if start < cursor {
                tracing::debug!(
                    "Dropping conflicting edit {}..{} (already rewritten up to {})",
                    start,
                    end,
                    cursor
                );
                continue;
            }
            let (Some(keep), Some(_)) = (text.get(cursor..start), text.get(start..end)) else {
                tracing::warn!("Dropping edit {}..{} outside the source text", start, end);
                continue;
            };
            out.push_str(keep);
            out.push_str(&edit.replacement);
            cursor = end;
        }
        out.push_str(text.get(cursor..).unwrap_or(""));
        out
    }
}
