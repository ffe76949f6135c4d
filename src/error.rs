//! Error types for delimiter-set construction.
//!
//! Splitting itself never fails: malformed bytes in the scanned input are
//! treated as ordinary field content. Errors only arise while building a
//! delimiter set.
//!
//! ## Error Categories
//!
//! - **Invalid delimiters**: a delimiter byte sequence that does not begin
//!   with a complete UTF-8 encoded code point. This is a contract violation
//!   by the caller; the panicking constructors abort with this message.
//! - **Invalid tiers**: a deserialized [`CodePointSet`](crate::CodePointSet)
//!   whose intervals break the set invariants.
//!
//! ## Examples
//!
//! ```rust
//! use utf8_fields::{Error, Splitter};
//!
//! // A lone 3-byte lead byte is a truncated code point.
//! let result = Splitter::try_new([&[0xE2u8][..]]);
//! assert!(matches!(result, Err(Error::InvalidDelimiter { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Which magnitude tier of a [`CodePointSet`](crate::CodePointSet) an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Code points `<= 0xFFFF`.
    Narrow,
    /// Code points `> 0xFFFF`.
    Wide,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Narrow => f.write_str("narrow"),
            Tier::Wide => f.write_str("wide"),
        }
    }
}

/// Represents all possible errors raised while building a delimiter set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A delimiter sequence does not start with a complete UTF-8 code point.
    #[error("invalid utf8 encoding '{bytes:?}'")]
    InvalidDelimiter { bytes: Vec<u8> },

    /// A tier of a deserialized set violates the interval invariants.
    #[error("invalid {tier} tier: {msg}")]
    InvalidTier { tier: Tier, msg: String },

    /// Free-form error, such as an interval with inverted bounds.
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an invalid delimiter error holding a copy of the offending bytes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use utf8_fields::Error;
    ///
    /// let err = Error::invalid_delimiter(&[0xF0, 0x9F]);
    /// assert_eq!(err.to_string(), "invalid utf8 encoding '[240, 159]'");
    /// ```
    pub fn invalid_delimiter(bytes: &[u8]) -> Self {
        Error::InvalidDelimiter {
            bytes: bytes.to_vec(),
        }
    }

    /// Creates an invalid tier error.
    pub fn invalid_tier(tier: Tier, msg: &str) -> Self {
        Error::InvalidTier {
            tier,
            msg: msg.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
