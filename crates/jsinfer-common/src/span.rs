//! Text spans and edit ranges (byte offsets).

use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, start + length)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextSpan {
    pub start: u32,
    pub length: u32,
}

impl TextSpan {
    #[inline]
    pub fn new(start: u32, length: u32) -> Self {
        TextSpan { start, length }
    }

    /// Create a span from start and end offsets.
    #[inline]
    pub fn from_bounds(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "span start {start} is after end {end}");
        TextSpan {
            start,
            length: end.saturating_sub(start),
        }
    }

    #[inline]
    pub fn end(&self) -> u32 {
        self.start + self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Whether `[start, end)` lies entirely inside this span's bounds.
    #[inline]
    pub fn contains_range(&self, start: u32, end: u32) -> bool {
        self.start <= start && end <= self.end()
    }
}

/// An edit: the old text covered by `span` was replaced with `new_length`
/// bytes of new text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextChangeRange {
    pub span: TextSpan,
    pub new_length: u32,
}

impl TextChangeRange {
    #[inline]
    pub fn new(span: TextSpan, new_length: u32) -> Self {
        TextChangeRange { span, new_length }
    }

    /// The span the replacement text occupies in the new text.
    #[inline]
    pub fn new_span(&self) -> TextSpan {
        TextSpan::new(self.span.start, self.new_length)
    }

    /// Signed change in total text length.
    #[inline]
    pub fn delta(&self) -> i64 {
        i64::from(self.new_length) - i64::from(self.span.length)
    }

    /// A change that replaces nothing with nothing.
    #[inline]
    pub fn is_unchanged(&self) -> bool {
        self.span.is_empty() && self.new_length == 0
    }
}

#[cfg(test)]
#[path = "../tests/span_tests.rs"]
mod span_tests;
