//! Closed ranges of code points.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// A closed, inclusive range `[lo, hi]` of Unicode scalar values.
///
/// Invariant: `lo <= hi`. Intervals produced by
/// [`CodePointSet`](crate::CodePointSet) never span the surrogate block.
///
/// # Examples
///
/// ```rust
/// use utf8_fields::Interval;
///
/// let tab_to_lf = Interval::new(0x09, 0x0A).unwrap();
/// assert!(tab_to_lf.contains(0x0A));
/// assert_eq!(tab_to_lf.len(), 2);
/// assert_eq!(tab_to_lf.to_string(), "U+0009-U+000A");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct Interval {
    pub(crate) lo: u32,
    pub(crate) hi: u32,
}

impl Interval {
    /// Creates an interval, or `None` if `lo > hi`.
    #[must_use]
    pub const fn new(lo: u32, hi: u32) -> Option<Self> {
        if lo <= hi {
            Some(Interval { lo, hi })
        } else {
            None
        }
    }

    /// Creates the single-point interval `[cp, cp]`.
    #[must_use]
    pub const fn singleton(cp: u32) -> Self {
        Interval { lo: cp, hi: cp }
    }

    /// Lower bound, inclusive.
    #[must_use]
    pub const fn lo(&self) -> u32 {
        self.lo
    }

    /// Upper bound, inclusive.
    #[must_use]
    pub const fn hi(&self) -> u32 {
        self.hi
    }

    /// Number of code points covered. Never zero.
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> u32 {
        self.hi - self.lo + 1
    }

    /// True if `lo <= cp <= hi`.
    #[must_use]
    pub const fn contains(&self, cp: u32) -> bool {
        self.lo <= cp && cp <= self.hi
    }

    /// True if `self` and `other` overlap or touch, so their union is one interval.
    #[must_use]
    pub const fn mergeable(&self, other: &Interval) -> bool {
        self.lo <= other.hi.saturating_add(1) && other.lo <= self.hi.saturating_add(1)
    }

    /// The code points of this interval as a `RangeInclusive<u32>`.
    #[must_use]
    pub const fn range(&self) -> RangeInclusive<u32> {
        self.lo..=self.hi
    }
}

#[derive(Deserialize)]
struct RawInterval {
    lo: u32,
    hi: u32,
}

impl TryFrom<RawInterval> for Interval {
    type Error = Error;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        Interval::new(raw.lo, raw.hi).ok_or_else(|| {
            Error::custom(format!("interval lower bound {} exceeds upper bound {}", raw.lo, raw.hi))
        })
    }
}

impl From<Interval> for RangeInclusive<u32> {
    fn from(interval: Interval) -> Self {
        interval.range()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lo == self.hi {
            write!(f, "U+{:04X}", self.lo)
        } else {
            write!(f, "U+{:04X}-U+{:04X}", self.lo, self.hi)
        }
    }
}
