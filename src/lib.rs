//! # utf8_fields
//!
//! Split byte slices and strings into fields on an arbitrary, caller-supplied
//! set of UTF-8 delimiter code points.
//!
//! ## How it works
//!
//! Delimiters are given as UTF-8 byte sequences or strings; every code point
//! they contain becomes a delimiter. The code points are stored in a
//! [`CodePointSet`]: merged, sorted [`Interval`]s kept in two tiers, one for
//! the Basic Multilingual Plane (`<= 0xFFFF`) and one above it. A
//! [`Splitter`] owns one such set and scans input one code point at a time,
//! emitting the maximal runs of non-delimiter code points.
//!
//! - **No empty fields**: runs of delimiters collapse, including at the
//!   start and end of the input
//! - **Zero-copy**: fields borrow from the input
//! - **Forgiving input**: bytes that do not decode as UTF-8 are kept as
//!   ordinary field content
//! - **Strict delimiters**: a delimiter that starts with a truncated code
//!   point is a caller bug and is reported as [`Error::InvalidDelimiter`]
//!
//! ## Quick Start
//!
//! ```rust
//! use utf8_fields::Splitter;
//!
//! let splitter = Splitter::with_delimiters(["♘♔"]);
//! let fields = splitter.split_str("a,b c;d♘rook♔castle;4");
//! assert_eq!(fields, vec!["a,b c;d", "rook", "castle;4"]);
//! ```
//!
//! ### One-shot splitting
//!
//! ```rust
//! use utf8_fields::split_str;
//!
//! let fields = split_str("k1=v1; k2=v2", ";", &["="]);
//! assert_eq!(fields, Some(vec!["k1", "v1", " k2", "v2"]));
//!
//! // No delimiters at all: nothing is scanned.
//! assert_eq!(split_str("a b", "", &[]), None);
//! ```
//!
//! ### Incremental construction
//!
//! ```rust
//! use utf8_fields::Splitter;
//!
//! let splitter = Splitter::builder()
//!     .with_str(" \t")
//!     .with_range('0'..='9')
//!     .build();
//!
//! assert!(splitter.all_in("\t42 ".chars()));
//! assert!(!splitter.all_in("".chars()));
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade:
//! construction summaries and rejected delimiters at `debug`, skipped invalid
//! bytes at `trace`. No logger is installed.

pub mod builder;
pub mod code_point_set;
pub mod decode;
pub mod error;
pub mod interval;
pub mod splitter;

pub use builder::SplitterBuilder;
pub use code_point_set::CodePointSet;
pub use error::{Error, Result, Tier};
pub use interval::Interval;
pub use splitter::{ByteFields, Splitter, StrFields};

use builder::{set_from_bytes, set_from_strs};
use std::iter;

/// Splits `src` on the code points of `delims` and of every `addl` sequence.
///
/// Returns `None` without scanning when the delimiters decode to no code
/// points at all.
///
/// # Panics
///
/// Panics if a delimiter sequence does not begin with a complete UTF-8 code
/// point. See [`try_split_bytes`].
///
/// # Examples
///
/// ```rust
/// use utf8_fields::split_bytes;
///
/// let fields = split_bytes(b"a\tb  c", b" ", &[&b"\t"[..]]);
/// assert_eq!(fields, Some(vec![&b"a"[..], &b"b"[..], &b"c"[..]]));
/// ```
#[must_use]
pub fn split_bytes<'a>(src: &'a [u8], delims: &[u8], addl: &[&[u8]]) -> Option<Vec<&'a [u8]>> {
    match try_split_bytes(src, delims, addl) {
        Ok(fields) => fields,
        Err(err) => panic!("{err}"),
    }
}

/// Fallible form of [`split_bytes`].
///
/// # Errors
///
/// Returns [`Error::InvalidDelimiter`] for the first delimiter sequence that
/// does not begin with a complete UTF-8 code point.
pub fn try_split_bytes<'a>(
    src: &'a [u8],
    delims: &[u8],
    addl: &[&[u8]],
) -> Result<Option<Vec<&'a [u8]>>> {
    let set = set_from_bytes(iter::once(delims).chain(addl.iter().copied()))?;
    if set.is_empty() {
        return Ok(None);
    }
    Ok(Some(Splitter::from(set).split(src)))
}

/// Splits `src` on the code points of `delims` and of every `addl` string.
///
/// Returns `None` without scanning when the delimiters are all empty.
///
/// # Examples
///
/// ```rust
/// use utf8_fields::split_str;
///
/// let fields = split_str("a   b c dd_d  a\tb e🙌emoji🙌e", "\t🙌", &["\n", " "]);
/// assert_eq!(
///     fields,
///     Some(vec!["a", "b", "c", "dd_d", "a", "b", "e", "emoji", "e"])
/// );
/// ```
#[must_use]
pub fn split_str<'a>(src: &'a str, delims: &str, addl: &[&str]) -> Option<Vec<&'a str>> {
    let set = set_from_strs(iter::once(delims).chain(addl.iter().copied()));
    if set.is_empty() {
        return None;
    }
    Some(Splitter::from(set).split_str(src))
}
