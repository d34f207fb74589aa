use std::ops::Range;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: usize, // Character offset
    pub end: usize,   // Character offset (inclusive)
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    // Half-open range for diagnostic rendering
    pub fn to_range(&self) -> Range<usize> {
        self.start..self.end + 1
    }
}
