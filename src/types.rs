use std::fmt;

/// Sort key of an entry. Ordered with `f64::total_cmp`, so NaN has a fixed
/// place instead of poisoning comparisons.
pub type Score = f64;

/// Borrowed view of one entry in the index.
///
/// Returned by search and by level traversal. Never refers to a sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry<'a> {
    pub key: &'a str,
    pub score: Score,
}

impl<'a> Entry<'a> {
    pub fn new(key: &'a str, score: Score) -> Self {
        Entry { key, score }
    }
}

impl fmt::Display for Entry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.6}", self.key, self.score)
    }
}
