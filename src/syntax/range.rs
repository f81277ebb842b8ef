//! Half-open match ranges
//!
//! All ranges are UTF-8 byte offsets into the pattern they came from.

/// A half-open span `[start, end)` of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchRange {
    /// Byte offset where the range starts (inclusive)
    pub start: usize,
    /// Byte offset where the range ends (exclusive)
    pub end: usize,
}

impl MatchRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create a range from a location and a length
    pub fn with_length(location: usize, length: usize) -> Self {
        Self::new(location, location + length)
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check if this range contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Convert to a `(location, length)` pair in UTF-16 code units
    ///
    /// Returns `None` if the range does not fall on char boundaries of
    /// `pattern`.
    pub fn to_utf16(&self, pattern: &str) -> Option<(usize, usize)> {
        let location = pattern.get(..self.start)?.encode_utf16().count();
        let length = pattern.get(self.start..self.end)?.encode_utf16().count();
        Some((location, length))
    }
}
