//! Field splitting over bytes and text.
//!
//! A [`Splitter`] owns one [`CodePointSet`] of delimiters and scans input
//! one code point at a time. Maximal runs of non-delimiter code points are
//! the output fields; delimiter runs are dropped entirely, so no field is
//! ever empty, including at the start or end of the input.
//!
//! ## Usage
//!
//! ```rust
//! use utf8_fields::Splitter;
//!
//! let splitter = Splitter::with_delimiters(["\t🙌\n "]);
//! let fields = splitter.split_str("a   b c dd_d  a\tb e🙌emoji🙌e");
//! assert_eq!(fields, vec!["a", "b", "c", "dd_d", "a", "b", "e", "emoji", "e"]);
//! ```
//!
//! Byte input need not be valid UTF-8. Bytes that do not decode are kept as
//! ordinary field content:
//!
//! ```rust
//! use utf8_fields::Splitter;
//!
//! let splitter = Splitter::new([" "]);
//! let fields = splitter.split(b"ok \xFF\xFEbad ");
//! assert_eq!(fields, vec![&b"ok"[..], &b"\xFF\xFEbad"[..]]);
//! ```

use crate::builder::{set_from_bytes, set_from_strs, SplitterBuilder};
use crate::decode::CodePoints;
use crate::error::Result;
use crate::CodePointSet;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;
use std::str::CharIndices;

/// Splits bytes or text into fields on a fixed set of delimiter code points.
///
/// A `Splitter` is immutable once built and can be shared freely across
/// threads; every scan is a pure function of the delimiter set and the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Splitter {
    set: CodePointSet,
}

impl Splitter {
    /// Creates a splitter from UTF-8 encoded delimiter byte sequences.
    ///
    /// Every code point of every sequence becomes a delimiter.
    ///
    /// # Panics
    ///
    /// Panics if a sequence does not begin with a complete UTF-8 code point.
    /// Use [`Splitter::try_new`] to handle that case as an error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use utf8_fields::Splitter;
    ///
    /// let splitter = Splitter::new(["♘".as_bytes(), "♔".as_bytes()]);
    /// assert!(splitter.contains('♔'));
    /// ```
    #[must_use]
    pub fn new<I, B>(delims: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        match Self::try_new(delims) {
            Ok(splitter) => splitter,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a splitter from UTF-8 encoded delimiter byte sequences.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDelimiter`](crate::Error::InvalidDelimiter)
    /// for the first sequence that does not begin with a complete code point.
    pub fn try_new<I, B>(delims: I) -> Result<Self>
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        set_from_bytes(delims).map(Splitter::from)
    }

    /// Creates a splitter from delimiter strings.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use utf8_fields::Splitter;
    ///
    /// let splitter = Splitter::with_delimiters([",", ";"]);
    /// assert_eq!(splitter.split_str(";a,,b;"), vec!["a", "b"]);
    /// ```
    #[must_use]
    pub fn with_delimiters<I, S>(delims: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Splitter::from(set_from_strs(delims))
    }

    /// Returns a builder for incremental construction.
    #[must_use]
    pub fn builder() -> SplitterBuilder {
        SplitterBuilder::new()
    }

    /// True if `ch` is one of the delimiters.
    #[must_use]
    #[inline]
    pub fn contains(&self, ch: char) -> bool {
        self.set.contains(ch)
    }

    /// True if the raw code point `cp` is one of the delimiters.
    #[must_use]
    pub fn contains_code_point(&self, cp: u32) -> bool {
        self.set.contains_code_point(cp)
    }

    /// True if any of `chars` is a delimiter.
    pub fn any_in<I>(&self, chars: I) -> bool
    where
        I: IntoIterator<Item = char>,
    {
        self.set.any_in(chars)
    }

    /// True if `chars` is non-empty and all of them are delimiters.
    pub fn all_in<I>(&self, chars: I) -> bool
    where
        I: IntoIterator<Item = char>,
    {
        self.set.all_in(chars)
    }

    /// The delimiter set.
    #[must_use]
    pub fn code_points(&self) -> &CodePointSet {
        &self.set
    }

    /// Lazily iterates the fields of `bytes`.
    pub fn fields<'a>(&self, bytes: &'a [u8]) -> ByteFields<'a, '_> {
        ByteFields {
            set: &self.set,
            bytes,
            code_points: CodePoints::new(bytes),
        }
    }

    /// Lazily iterates the fields of `text`.
    pub fn str_fields<'a>(&self, text: &'a str) -> StrFields<'a, '_> {
        StrFields {
            set: &self.set,
            text,
            chars: text.char_indices(),
        }
    }

    /// Splits `bytes` into its fields, in input order.
    ///
    /// Runs of delimiters collapse, and no field is empty.
    #[must_use]
    pub fn split<'a>(&self, bytes: &'a [u8]) -> Vec<&'a [u8]> {
        self.fields(bytes).collect()
    }

    /// Splits `text` into its fields, in input order.
    #[must_use]
    pub fn split_str<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.str_fields(text).collect()
    }
}

impl From<CodePointSet> for Splitter {
    fn from(set: CodePointSet) -> Self {
        Splitter { set }
    }
}

/// Iterator over the fields of a byte slice. See [`Splitter::fields`].
#[derive(Debug, Clone)]
pub struct ByteFields<'a, 's> {
    set: &'s CodePointSet,
    bytes: &'a [u8],
    code_points: CodePoints<'a>,
}

impl<'a> Iterator for ByteFields<'a, '_> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let mut start = None;
        for (offset, _, ch) in self.code_points.by_ref() {
            // Undecodable bytes are content, never delimiters.
            let is_delim = ch.is_some_and(|ch| self.set.contains(ch));
            match (is_delim, start) {
                (true, Some(s)) => return Some(&self.bytes[s..offset]),
                (false, None) => start = Some(offset),
                _ => {}
            }
        }
        start.map(|s| &self.bytes[s..])
    }
}

impl FusedIterator for ByteFields<'_, '_> {}

/// Iterator over the fields of a string slice. See [`Splitter::str_fields`].
#[derive(Debug, Clone)]
pub struct StrFields<'a, 's> {
    set: &'s CodePointSet,
    text: &'a str,
    chars: CharIndices<'a>,
}

impl<'a> Iterator for StrFields<'a, '_> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let mut start = None;
        for (offset, ch) in self.chars.by_ref() {
            match (self.set.contains(ch), start) {
                (true, Some(s)) => return Some(&self.text[s..offset]),
                (false, None) => start = Some(offset),
                _ => {}
            }
        }
        start.map(|s| &self.text[s..])
    }
}

impl FusedIterator for StrFields<'_, '_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn chess() -> Splitter {
        Splitter::new(["♘".as_bytes(), "♔".as_bytes()])
    }

    #[test]
    fn test_chess_pieces_split_bytes() {
        let input = "a,b c;d♘rook♔castle;4".as_bytes();
        let fields = chess().split(input);
        assert_eq!(fields, vec![&b"a,b c;d"[..], &b"rook"[..], &b"castle;4"[..]]);
    }

    #[test]
    fn test_leading_and_trailing_delimiters() {
        let splitter = Splitter::with_delimiters([" "]);
        assert_eq!(splitter.split_str("   a b   "), vec!["a", "b"]);
        assert_eq!(splitter.split(b"  a  "), vec![&b"a"[..]]);
    }

    #[test]
    fn test_empty_and_all_delimiter_input() {
        let splitter = Splitter::with_delimiters([" \t"]);
        assert!(splitter.split_str("").is_empty());
        assert!(splitter.split_str(" \t \t").is_empty());
        assert!(splitter.split(b"").is_empty());
        assert!(splitter.split(b"\t\t ").is_empty());
    }

    #[test]
    fn test_empty_splitter_yields_whole_input() {
        let splitter = Splitter::default();
        assert_eq!(splitter.split_str("a b"), vec!["a b"]);
    }

    #[test]
    fn test_invalid_bytes_are_field_content() {
        let splitter = Splitter::with_delimiters(["\u{FFFD}", " "]);
        // A lone 0xFF never decodes, so it cannot match U+FFFD.
        let fields = splitter.split(b"\xFFa \xE2\x99b");
        assert_eq!(fields, vec![&b"\xFFa"[..], &b"\xE2\x99b"[..]]);
    }

    #[test]
    fn test_invalid_byte_before_delimiter() {
        let splitter = chess();
        let mut input = vec![0xE2];
        input.extend_from_slice("♘x".as_bytes());
        assert_eq!(splitter.split(&input), vec![&[0xE2][..], &b"x"[..]]);
    }

    #[test]
    fn test_fields_iterator_is_fused() {
        let splitter = Splitter::with_delimiters([","]);
        let mut fields = splitter.str_fields("a,b");
        assert_eq!(fields.next(), Some("a"));
        assert_eq!(fields.next(), Some("b"));
        assert_eq!(fields.next(), None);
        assert_eq!(fields.next(), None);
    }

    #[test]
    fn test_repeated_scans_are_identical() {
        let splitter = chess();
        let input = "♔♔x♘♘y♔";
        assert_eq!(splitter.split_str(input), splitter.split_str(input));
        assert_eq!(splitter.split_str(input), vec!["x", "y"]);
    }

    #[test]
    #[should_panic(expected = "invalid utf8 encoding")]
    fn test_new_panics_on_truncated_delimiter() {
        let _ = Splitter::new([&[0xE2u8, 0x99][..]]);
    }

    #[test]
    fn test_try_new_reports_offending_bytes() {
        let err = Splitter::try_new([&b","[..], &[0xC3][..]]).unwrap_err();
        assert_eq!(err, Error::InvalidDelimiter { bytes: vec![0xC3] });
    }

    #[test]
    fn test_predicates() {
        let splitter = Splitter::with_delimiters(["\t🙌\n "]);
        assert!(splitter.contains('🙌'));
        assert!(splitter.contains_code_point(0x20));
        assert!(!splitter.contains('a'));
        assert!(splitter.any_in(['a', '\n']));
        assert!(!splitter.all_in(['a', '\n']));
        assert!(splitter.all_in(['\t', '🙌']));
        assert!(!splitter.any_in([]));
        assert!(!splitter.all_in([]));
    }

    #[test]
    fn test_splitter_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Splitter>();
    }

    #[test]
    fn test_serde_transparent() {
        let splitter = Splitter::with_delimiters([","]);
        let json = serde_json::to_string(&splitter).unwrap();
        assert_eq!(json, r#"{"narrow":[{"lo":44,"hi":44}],"wide":[]}"#);
        let back: Splitter = serde_json::from_str(&json).unwrap();
        assert_eq!(back, splitter);
    }
}
