//! Two-tier interval set of delimiter code points.
//!
//! This module provides [`CodePointSet`], the membership structure behind a
//! [`Splitter`](crate::Splitter). Code points are stored as closed
//! [`Interval`]s in two tiers split by magnitude:
//!
//! - **narrow**: code points `<= 0xFFFF` (the Basic Multilingual Plane)
//! - **wide**: code points `> 0xFFFF`
//!
//! Each tier is kept sorted, with no two intervals overlapping or touching.
//! Inserting a code point next to an existing interval extends it, and a
//! code point that closes the gap between two intervals fuses them. Lookups
//! are a binary search, with a bitmap fast path for Latin-1.
//!
//! ## Examples
//!
//! ```rust
//! use utf8_fields::CodePointSet;
//!
//! let mut set = CodePointSet::new();
//! set.insert('a');
//! set.insert('c');
//! assert_eq!(set.len(), 2);
//!
//! // 'b' bridges the two singletons
//! set.insert('b');
//! assert_eq!(set.len(), 1);
//! assert_eq!(set.to_string(), "[U+0061-U+0063]");
//! ```

use crate::error::{Error, Result, Tier};
use crate::interval::Interval;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Largest code point stored in the narrow tier.
pub const NARROW_MAX: u32 = 0xFFFF;

/// Largest code point covered by the Latin-1 bitmap.
const LATIN1_MAX: u32 = 0xFF;

const SURROGATES: RangeInclusive<u32> = 0xD800..=0xDFFF;

/// A set of Unicode code points stored as merged intervals in two tiers.
///
/// The set only grows. Once built it is read-only through
/// [`Splitter`](crate::Splitter), and is `Send + Sync`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCodePointSet")]
pub struct CodePointSet {
    narrow: Vec<Interval>,
    wide: Vec<Interval>,
    #[serde(skip)]
    latin1: [u64; 4],
}

impl CodePointSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a code point, returning `true` if the set changed.
    ///
    /// Inserting a code point that is already covered is a no-op.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use utf8_fields::CodePointSet;
    ///
    /// let mut set = CodePointSet::new();
    /// assert!(set.insert('🙌'));
    /// assert!(!set.insert('🙌'));
    /// assert_eq!(set.wide().len(), 1);
    /// assert!(set.narrow().is_empty());
    /// ```
    pub fn insert(&mut self, ch: char) -> bool {
        let cp = ch as u32;
        if cp <= LATIN1_MAX {
            self.latin1[(cp >> 6) as usize] |= 1 << (cp & 63);
        }
        if cp > NARROW_MAX {
            insert_span(&mut self.wide, cp, cp)
        } else {
            insert_span(&mut self.narrow, cp, cp)
        }
    }

    /// Inserts every code point of `range`, returning `true` if the set changed.
    ///
    /// The range is merged as whole intervals, one piece per side of the
    /// surrogate block and one for the wide tier.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use utf8_fields::CodePointSet;
    ///
    /// let mut set = CodePointSet::new();
    /// assert!(set.insert_range('\0'..=char::MAX));
    /// assert_eq!(set.len(), 3);
    /// assert!(!set.insert_range('a'..='z'));
    /// ```
    pub fn insert_range(&mut self, range: RangeInclusive<char>) -> bool {
        let (lo, hi) = (*range.start() as u32, *range.end() as u32);
        if lo > hi {
            return false;
        }
        for cp in lo..=hi.min(LATIN1_MAX) {
            self.latin1[(cp >> 6) as usize] |= 1 << (cp & 63);
        }

        let mut changed = false;
        let pieces = [
            (0, *SURROGATES.start() - 1),
            (*SURROGATES.end() + 1, NARROW_MAX),
        ];
        for (piece_lo, piece_hi) in pieces {
            let (lo, hi) = (lo.max(piece_lo), hi.min(piece_hi));
            if lo <= hi {
                changed |= insert_span(&mut self.narrow, lo, hi);
            }
        }
        let wide_lo = lo.max(NARROW_MAX + 1);
        if wide_lo <= hi {
            changed |= insert_span(&mut self.wide, wide_lo, hi);
        }
        changed
    }

    /// True iff `ch` lies within an interval of either tier.
    #[must_use]
    #[inline]
    pub fn contains(&self, ch: char) -> bool {
        self.contains_code_point(ch as u32)
    }

    /// True iff the raw code point `cp` lies within an interval of either tier.
    ///
    /// Values that are not Unicode scalar values are never contained.
    #[must_use]
    pub fn contains_code_point(&self, cp: u32) -> bool {
        if cp <= LATIN1_MAX {
            return (self.latin1[(cp >> 6) as usize] >> (cp & 63)) & 1 == 1;
        }
        let tier = if cp > NARROW_MAX { &self.wide } else { &self.narrow };
        let idx = tier.partition_point(|iv| iv.hi < cp);
        tier.get(idx).is_some_and(|iv| iv.lo <= cp)
    }

    /// True iff at least one of `chars` is in the set. False for empty input.
    pub fn any_in<I>(&self, chars: I) -> bool
    where
        I: IntoIterator<Item = char>,
    {
        chars.into_iter().any(|ch| self.contains(ch))
    }

    /// True iff `chars` is non-empty and every one of them is in the set.
    ///
    /// Empty input yields `false`, not a vacuous `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use utf8_fields::CodePointSet;
    ///
    /// let set: CodePointSet = " \t".chars().collect();
    /// assert!(set.all_in("\t \t".chars()));
    /// assert!(!set.all_in("".chars()));
    /// ```
    pub fn all_in<I>(&self, chars: I) -> bool
    where
        I: IntoIterator<Item = char>,
    {
        let mut seen = false;
        for ch in chars {
            if !self.contains(ch) {
                return false;
            }
            seen = true;
        }
        seen
    }

    /// Number of intervals across both tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.narrow.len() + self.wide.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.narrow.is_empty() && self.wide.is_empty()
    }

    /// Number of distinct code points in the set.
    #[must_use]
    pub fn code_point_count(&self) -> usize {
        self.intervals().map(|iv| iv.len() as usize).sum()
    }

    /// Intervals of the narrow tier, ascending.
    #[must_use]
    pub fn narrow(&self) -> &[Interval] {
        &self.narrow
    }

    /// Intervals of the wide tier, ascending.
    #[must_use]
    pub fn wide(&self) -> &[Interval] {
        &self.wide
    }

    /// All intervals in ascending order, narrow tier first.
    pub fn intervals(&self) -> impl Iterator<Item = Interval> + '_ {
        self.narrow.iter().chain(self.wide.iter()).copied()
    }

    fn rebuild_latin1(&mut self) {
        self.latin1 = [0; 4];
        for iv in self.narrow.iter().take_while(|iv| iv.lo <= LATIN1_MAX) {
            for cp in iv.lo..=iv.hi.min(LATIN1_MAX) {
                self.latin1[(cp >> 6) as usize] |= 1 << (cp & 63);
            }
        }
    }
}

/// Merges `[lo, hi]` into a sorted, merged tier.
fn insert_span(tier: &mut Vec<Interval>, lo: u32, hi: u32) -> bool {
    // Intervals in start..end overlap or touch the new span.
    let start = tier.partition_point(|iv| iv.hi.saturating_add(1) < lo);
    let end = tier.partition_point(|iv| iv.lo <= hi.saturating_add(1));
    if start == end {
        tier.insert(start, Interval { lo, hi });
        return true;
    }
    if tier[start].lo <= lo && tier[start].hi >= hi {
        return false;
    }

    let merged = Interval {
        lo: lo.min(tier[start].lo),
        hi: hi.max(tier[end - 1].hi),
    };
    tier[start] = merged;
    tier.drain(start + 1..end);
    true
}

fn validate_tier(tier: Tier, intervals: &[Interval]) -> Result<()> {
    let bounds = match tier {
        Tier::Narrow => 0..=NARROW_MAX,
        Tier::Wide => NARROW_MAX + 1..=char::MAX as u32,
    };
    for iv in intervals {
        if !bounds.contains(&iv.lo) || !bounds.contains(&iv.hi) {
            return Err(Error::invalid_tier(
                tier,
                &format!("interval {iv} lies outside the tier range"),
            ));
        }
        if iv.lo <= *SURROGATES.end() && iv.hi >= *SURROGATES.start() {
            return Err(Error::invalid_tier(
                tier,
                &format!("interval {iv} covers surrogate code points"),
            ));
        }
    }
    for pair in intervals.windows(2) {
        if pair[0].hi.saturating_add(1) >= pair[1].lo {
            return Err(Error::invalid_tier(
                tier,
                &format!(
                    "intervals {} and {} are unsorted, overlapping or adjacent",
                    pair[0], pair[1]
                ),
            ));
        }
    }
    Ok(())
}

#[derive(Deserialize)]
struct RawCodePointSet {
    narrow: Vec<Interval>,
    wide: Vec<Interval>,
}

impl TryFrom<RawCodePointSet> for CodePointSet {
    type Error = Error;

    fn try_from(raw: RawCodePointSet) -> Result<Self> {
        validate_tier(Tier::Narrow, &raw.narrow)?;
        validate_tier(Tier::Wide, &raw.wide)?;
        let mut set = CodePointSet {
            narrow: raw.narrow,
            wide: raw.wide,
            latin1: [0; 4],
        };
        set.rebuild_latin1();
        Ok(set)
    }
}

impl Extend<char> for CodePointSet {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        for ch in iter {
            self.insert(ch);
        }
    }
}

impl FromIterator<char> for CodePointSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut set = CodePointSet::new();
        set.extend(iter);
        set
    }
}

impl fmt::Display for CodePointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, iv) in self.intervals().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{iv}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(intervals: &[Interval]) -> Vec<(u32, u32)> {
        intervals.iter().map(|iv| (iv.lo(), iv.hi())).collect()
    }

    #[test]
    fn test_empty_set() {
        let set = CodePointSet::new();
        assert!(set.is_empty());
        assert!(!set.contains('a'));
        assert!(!set.contains('🙌'));
        assert_eq!(set.to_string(), "[]");
    }

    #[test]
    fn test_adjacent_inserts_merge_in_either_order() {
        let mut up = CodePointSet::new();
        up.insert('x');
        up.insert('y');

        let mut down = CodePointSet::new();
        down.insert('y');
        down.insert('x');

        assert_eq!(bounds(up.narrow()), vec![(0x78, 0x79)]);
        assert_eq!(up, down);
    }

    #[test]
    fn test_bridging_insert_fuses_neighbours() {
        let mut set: CodePointSet = ['1', '2', '4', '5'].into_iter().collect();
        assert_eq!(set.len(), 2);
        set.insert('3');
        assert_eq!(bounds(set.narrow()), vec![(0x31, 0x35)]);
    }

    #[test]
    fn test_duplicate_insert_is_noop() {
        let mut set: CodePointSet = "abc".chars().collect();
        let before = set.clone();
        assert!(!set.insert('b'));
        assert!(!set.insert('a'));
        assert_eq!(set, before);
    }

    #[test]
    fn test_tiers_split_by_magnitude() {
        let set: CodePointSet = ['\u{FFFF}', '\u{10000}', '♔', '🙌'].into_iter().collect();
        assert_eq!(bounds(set.narrow()), vec![(0x2654, 0x2654), (0xFFFF, 0xFFFF)]);
        assert_eq!(bounds(set.wide()), vec![(0x10000, 0x10000), (0x1F64C, 0x1F64C)]);
        assert!(set.contains('\u{FFFF}'));
        assert!(set.contains('\u{10000}'));
        assert!(!set.contains('\u{FFFE}'));
    }

    #[test]
    fn test_surrogate_gap_never_merges() {
        let set: CodePointSet = ['\u{D7FF}', '\u{E000}'].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_contains_code_point_rejects_non_scalars() {
        let set: CodePointSet = ['\u{D7FF}', '\u{E000}'].into_iter().collect();
        assert!(!set.contains_code_point(0xD800));
        assert!(!set.contains_code_point(0x110000));
    }

    #[test]
    fn test_insert_range() {
        let mut set = CodePointSet::new();
        assert!(set.insert_range('a'..='z'));
        assert!(!set.insert_range('c'..='f'));
        assert_eq!(set.len(), 1);
        assert_eq!(set.code_point_count(), 26);
    }

    #[test]
    fn test_insert_full_range_skips_surrogates() {
        let mut set = CodePointSet::new();
        assert!(set.insert_range('\0'..=char::MAX));
        assert_eq!(bounds(set.narrow()), vec![(0, 0xD7FF), (0xE000, 0xFFFF)]);
        assert_eq!(bounds(set.wide()), vec![(0x10000, 0x10FFFF)]);
        assert_eq!(set.code_point_count(), 0x110000 - 0x800);
        assert!(set.contains('\0'));
        assert!(set.contains('\u{FF}'));
        assert!(!set.insert('\u{E000}'));
    }

    #[test]
    fn test_insert_range_bridges_intervals() {
        let mut set: CodePointSet = ['a', 'c', 'x', '\u{10FFFF}'].into_iter().collect();
        assert!(set.insert_range('b'..='w'));
        assert_eq!(bounds(set.narrow()), vec![(0x61, 0x78)]);

        assert!(set.insert_range('\u{FFF0}'..='\u{10FFFE}'));
        assert_eq!(bounds(set.narrow()), vec![(0x61, 0x78), (0xFFF0, 0xFFFF)]);
        assert_eq!(bounds(set.wide()), vec![(0x10000, 0x10FFFF)]);
    }

    #[test]
    fn test_insert_range_updates_latin1() {
        let mut set = CodePointSet::new();
        set.insert_range('\u{F0}'..='\u{110}');
        for cp in 0..=LATIN1_MAX {
            assert_eq!(set.contains_code_point(cp), cp >= 0xF0, "cp {cp:#x}");
        }
        assert!(set.contains('\u{110}'));
    }

    #[test]
    fn test_empty_range_is_noop() {
        let mut set = CodePointSet::new();
        #[allow(clippy::reversed_empty_ranges)]
        let changed = set.insert_range('z'..='a');
        assert!(!changed);
        assert!(set.is_empty());
    }

    #[test]
    fn test_any_in_all_in() {
        let set: CodePointSet = ",;".chars().collect();
        assert!(set.any_in("a;b".chars()));
        assert!(!set.any_in("ab".chars()));
        assert!(!set.any_in(std::iter::empty()));
        assert!(set.all_in(";,;".chars()));
        assert!(!set.all_in(";a".chars()));
        assert!(!set.all_in(std::iter::empty()));
    }

    #[test]
    fn test_latin1_bitmap_matches_tiers() {
        let set: CodePointSet = "\t\n \u{A0}\u{FF}".chars().collect();
        for cp in 0..=LATIN1_MAX {
            let in_tier = set.narrow().iter().any(|iv| iv.contains(cp));
            assert_eq!(set.contains_code_point(cp), in_tier, "cp {cp:#x}");
        }
    }

    #[test]
    fn test_display() {
        let set: CodePointSet = "\t\n 🙌".chars().collect();
        assert_eq!(set.to_string(), "[U+0009-U+000A, U+0020, U+1F64C]");
    }

    #[test]
    fn test_serde_rebuilds_latin1() {
        let set: CodePointSet = " ,♘🙌".chars().collect();
        let json = serde_json::to_string(&set).unwrap();
        let back: CodePointSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
        assert!(back.contains(','));
    }

    #[test]
    fn test_deserialize_rejects_adjacent_intervals() {
        let json = r#"{"narrow":[{"lo":1,"hi":2},{"lo":3,"hi":3}],"wide":[]}"#;
        let err = serde_json::from_str::<CodePointSet>(json).unwrap_err();
        assert!(err.to_string().contains("invalid narrow tier"));
    }

    #[test]
    fn test_deserialize_rejects_wrong_tier() {
        let json = r#"{"narrow":[],"wide":[{"lo":65,"hi":65}]}"#;
        assert!(serde_json::from_str::<CodePointSet>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_surrogates() {
        let json = r#"{"narrow":[{"lo":55296,"hi":55296}],"wide":[]}"#;
        assert!(serde_json::from_str::<CodePointSet>(json).is_err());
    }
}
