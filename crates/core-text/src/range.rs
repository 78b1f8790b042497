//! Half-open character ranges used for selections and paragraph spans.

use std::ops::Range;

/// A `(location, length)` span over the buffer, measured in `char`s.
///
/// A zero length denotes a caret. [`TextRange::NOT_FOUND`] stands for "no
/// selection / no focus".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextRange {
    pub location: usize,
    pub length: usize,
}

impl TextRange {
    /// Sentinel selection meaning the view holds no selection at all.
    pub const NOT_FOUND: TextRange = TextRange {
        location: usize::MAX,
        length: 0,
    };

    pub const fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }

    pub const fn caret(location: usize) -> Self {
        Self {
            location,
            length: 0,
        }
    }

    pub const fn is_not_found(&self) -> bool {
        self.location == usize::MAX
    }

    pub const fn is_caret(&self) -> bool {
        self.length == 0
    }

    /// Exclusive end (`location + length`), saturating for the sentinel.
    pub const fn end(&self) -> usize {
        self.location.saturating_add(self.length)
    }

    pub const fn as_range(&self) -> Range<usize> {
        self.location..self.end()
    }

    /// Smallest range covering both `self` and `other`.
    pub fn union(&self, other: TextRange) -> TextRange {
        let start = self.location.min(other.location);
        let end = self.end().max(other.end());
        TextRange::new(start, end - start)
    }

    /// Overlap of two ranges, `None` when they are disjoint or only touch.
    pub fn intersection(&self, other: TextRange) -> Option<TextRange> {
        let start = self.location.max(other.location);
        let end = self.end().min(other.end());
        if start < end {
            Some(TextRange::new(start, end - start))
        } else {
            None
        }
    }
}

impl From<Range<usize>> for TextRange {
    fn from(r: Range<usize>) -> Self {
        TextRange::new(r.start, r.end.saturating_sub(r.start))
    }
}
