//! Source spans for declarations

use std::ops::Range;

/// Byte range of a declaration in the source it was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Span {
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Span used for declarations built in code rather than read from a file
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no bytes
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Byte range, for diagnostic labels
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Slice the source text covered by this span
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start..self.end).unwrap_or("")
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}
