//! Half-open circular intervals on the ring.

use crate::id::Identifier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The interval `[start, end)` walking clockwise from `start`.
///
/// When `start > end` the interval wraps past zero. When `start == end`
/// it covers the whole ring.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Interval {
    pub start: Identifier,
    pub end: Identifier,
}

impl Interval {
    pub fn new(start: Identifier, end: Identifier) -> Self {
        Self { start, end }
    }

    /// Circular membership test.
    #[inline]
    pub fn contains(&self, key: Identifier) -> bool {
        use std::cmp::Ordering::*;
        match self.start.cmp(&self.end) {
            Less => self.start <= key && key < self.end,
            Greater => key >= self.start || key < self.end,
            Equal => true,
        }
    }

    /// True if the interval wraps past zero.
    #[inline]
    pub fn wraps(&self) -> bool {
        self.start > self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: u64, end: u64) -> Interval {
        Interval::new(Identifier(start), Identifier(end))
    }

    #[test]
    fn test_plain_interval() {
        let i = iv(3, 5);
        assert!(!i.wraps());
        assert!(!i.contains(Identifier(2)));
        assert!(i.contains(Identifier(3)));
        assert!(i.contains(Identifier(4)));
        assert!(!i.contains(Identifier(5)));
    }

    #[test]
    fn test_wrapping_interval() {
        let i = iv(5, 1);
        assert!(i.wraps());
        assert!(i.contains(Identifier(5)));
        assert!(i.contains(Identifier(7)));
        assert!(i.contains(Identifier(0)));
        assert!(!i.contains(Identifier(1)));
        assert!(!i.contains(Identifier(3)));
    }

    #[test]
    fn test_degenerate_interval_covers_ring() {
        let i = iv(4, 4);
        for k in 0..8 {
            assert!(i.contains(Identifier(k)));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(iv(5, 1).to_string(), "[5, 1)");
    }
}
