use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// A best-effort byte range into the original source. Hand-constructed
/// trees use [`Span::default`].
#[derive(Debug, PartialEq, Default, Clone, Serialize, Deserialize)]
pub struct Span {
    pub range: Range<usize>,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { range: start..end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.range.start, self.range.end)
    }
}
