//! Byte ranges into scanned source text.

use std::ops::Range;

/// A half-open byte range `start..end` into source text.
///
/// Spans produced while scanning one unit are relative to that unit and
/// are moved into the coordinates of the full input with
/// [`Span::offset_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Creates a span from a byte range. An inverted range is clamped to
    /// an empty span at `range.start`.
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the smallest span covering both `self` and `other`.
    pub fn union(self, other: Span) -> Span {
        Span::new(self.start.min(other.start)..self.end.max(other.end))
    }

    /// Shifts the span right by `offset` bytes.
    pub fn offset_by(self, offset: usize) -> Span {
        Span::new(self.start + offset..self.end + offset)
    }

    pub fn to_range(self) -> Range<usize> {
        self.start..self.end
    }
}
