//! Per-traversal deduplication of reported nodes.

use std::collections::HashSet;
use std::ops::Range;

/// Identity set of syntax nodes that already produced a diagnostic.
///
/// Nodes are identified by byte span, which also covers template-literal
/// quasis (static parts that have no node of their own). A set lives for
/// one rule's traversal of one file.
#[derive(Debug, Default)]
pub struct ReportedNodeSet {
    spans: HashSet<(usize, usize)>,
}

impl ReportedNodeSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a span; returns `false` if it was already recorded.
    pub fn insert(&mut self, span: Range<usize>) -> bool {
        self.spans.insert((span.start, span.end))
    }

    /// Whether a span has been recorded.
    #[must_use]
    pub fn contains(&self, span: &Range<usize>) -> bool {
        self.spans.contains(&(span.start, span.end))
    }

    /// Number of recorded spans.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_insert_is_rejected() {
        let mut set = ReportedNodeSet::new();
        assert!(set.insert(3..9));
        assert!(!set.insert(3..9));
        assert!(set.insert(3..10));
        assert!(set.contains(&(3..9)));
        assert_eq!(set.len(), 2);
    }
}
