//! Delimiter-set construction.
//!
//! [`SplitterBuilder`] decodes delimiter material into a [`CodePointSet`] and
//! finishes into an immutable [`Splitter`]. Every `add_*`/`with_*` call
//! accumulates into the same set; nothing is ever reset.
//!
//! ## Byte delimiters
//!
//! Each byte sequence is first checked as a whole: it must begin with a
//! complete UTF-8 encoded code point. A sequence that starts with a
//! truncated multi-byte prefix is rejected with
//! [`Error::InvalidDelimiter`]. Past that check, decoding is forgiving: an
//! invalid byte is skipped on its own and decoding resumes at the next one.
//!
//! ## Examples
//!
//! ```rust
//! use utf8_fields::SplitterBuilder;
//!
//! let splitter = SplitterBuilder::new()
//!     .with_str(", ")
//!     .with_char('\t')
//!     .with_bytes(b";")
//!     .unwrap()
//!     .build();
//!
//! assert_eq!(splitter.split_str("a, b;\tc"), vec!["a", "b", "c"]);
//! ```

use crate::decode::{starts_with_full_char, CodePoints};
use crate::error::{Error, Result};
use crate::{CodePointSet, Splitter};
use std::ops::RangeInclusive;

/// Accumulates delimiter code points and builds a [`Splitter`].
#[derive(Debug, Clone, Default)]
pub struct SplitterBuilder {
    set: CodePointSet,
}

impl SplitterBuilder {
    /// Creates a builder with an empty delimiter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every code point decoded from the UTF-8 byte sequence `delims`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDelimiter`] if `delims` does not begin with a
    /// complete encoded code point. The set is left unchanged in that case.
    pub fn add_bytes(&mut self, delims: &[u8]) -> Result<&mut Self> {
        if !starts_with_full_char(delims) {
            log::debug!("rejecting delimiter with truncated leading code point {:?}", delims);
            return Err(Error::invalid_delimiter(delims));
        }
        let mut skipped = 0usize;
        for (_, _, ch) in CodePoints::new(delims) {
            match ch {
                Some(ch) => {
                    self.set.insert(ch);
                }
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            log::debug!("skipped {} invalid byte(s) in delimiter {:?}", skipped, delims);
        }
        Ok(self)
    }

    /// Adds every code point of `delims`.
    pub fn add_str(&mut self, delims: &str) -> &mut Self {
        self.set.extend(delims.chars());
        self
    }

    /// Adds a single delimiter code point.
    pub fn add_char(&mut self, ch: char) -> &mut Self {
        self.set.insert(ch);
        self
    }

    /// Adds every code point in `range`.
    pub fn add_range(&mut self, range: RangeInclusive<char>) -> &mut Self {
        self.set.insert_range(range);
        self
    }

    /// Consuming form of [`add_bytes`](Self::add_bytes).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDelimiter`] if `delims` does not begin with a
    /// complete encoded code point.
    pub fn with_bytes(mut self, delims: &[u8]) -> Result<Self> {
        self.add_bytes(delims)?;
        Ok(self)
    }

    /// Consuming form of [`add_str`](Self::add_str).
    #[must_use]
    pub fn with_str(mut self, delims: &str) -> Self {
        self.add_str(delims);
        self
    }

    /// Consuming form of [`add_char`](Self::add_char).
    #[must_use]
    pub fn with_char(mut self, ch: char) -> Self {
        self.add_char(ch);
        self
    }

    /// Consuming form of [`add_range`](Self::add_range).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use utf8_fields::SplitterBuilder;
    ///
    /// let digits = SplitterBuilder::new().with_range('0'..='9').build();
    /// assert_eq!(digits.split_str("ab12cd3"), vec!["ab", "cd"]);
    /// ```
    #[must_use]
    pub fn with_range(mut self, range: RangeInclusive<char>) -> Self {
        self.add_range(range);
        self
    }

    /// The delimiter set accumulated so far.
    #[must_use]
    pub fn code_points(&self) -> &CodePointSet {
        &self.set
    }

    /// Finishes construction.
    #[must_use]
    pub fn build(self) -> Splitter {
        log::debug!(
            "built delimiter set: {} code point(s) in {} interval(s)",
            self.set.code_point_count(),
            self.set.len()
        );
        Splitter::from(self.set)
    }
}

/// Builds a set from byte delimiters, stopping at the first invalid one.
pub(crate) fn set_from_bytes<I, B>(delims: I) -> Result<CodePointSet>
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut builder = SplitterBuilder::new();
    for delim in delims {
        builder.add_bytes(delim.as_ref())?;
    }
    Ok(builder.set)
}

/// Builds a set from text delimiters.
pub(crate) fn set_from_strs<I, S>(delims: I) -> CodePointSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = SplitterBuilder::new();
    for delim in delims {
        builder.add_str(delim.as_ref());
    }
    builder.set
}
