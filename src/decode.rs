//! UTF-8 decoding with one-byte recovery.
//!
//! Delimiter material and scanned input arrive as raw bytes. Decoding walks
//! them one code point at a time; a position that does not start a valid
//! encoding yields no code point and advances by exactly one byte.

use std::str;

/// Longest UTF-8 encoding of a single code point.
const MAX_UTF8_LEN: usize = 4;

/// Decodes the code point at the start of `bytes`.
///
/// Returns the decoded `char` (or `None` when the leading bytes are not a
/// valid encoding) and the number of bytes consumed. Invalid input always
/// consumes exactly one byte. Empty input returns `(None, 0)`.
///
/// # Examples
///
/// ```rust
/// use utf8_fields::decode::decode_utf8;
///
/// assert_eq!(decode_utf8("♘x".as_bytes()), (Some('♘'), 3));
/// assert_eq!(decode_utf8(&[0xFF, b'a']), (None, 1));
/// assert_eq!(decode_utf8(&[]), (None, 0));
/// ```
#[must_use]
pub fn decode_utf8(bytes: &[u8]) -> (Option<char>, usize) {
    if bytes.is_empty() {
        return (None, 0);
    }
    let head = &bytes[..bytes.len().min(MAX_UTF8_LEN)];
    let valid = match str::from_utf8(head) {
        Ok(s) => s,
        Err(e) => str::from_utf8(&head[..e.valid_up_to()]).unwrap_or_default(),
    };
    match valid.chars().next() {
        Some(ch) => (Some(ch), ch.len_utf8()),
        None => (None, 1),
    }
}

/// Reports whether `bytes` begins with a structurally complete encoding.
///
/// A truncated multi-byte prefix (a lead byte without all of its
/// continuation bytes) is incomplete. Invalid bytes are complete one-byte
/// units: they decode to nothing but are never truncated. Empty input has
/// nothing to truncate and is considered complete.
///
/// # Examples
///
/// ```rust
/// use utf8_fields::decode::starts_with_full_char;
///
/// assert!(starts_with_full_char("🙌".as_bytes()));
/// assert!(!starts_with_full_char(&"🙌".as_bytes()[..3]));
/// assert!(starts_with_full_char(&[0x80]));
/// ```
#[must_use]
pub fn starts_with_full_char(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(MAX_UTF8_LEN)];
    match str::from_utf8(head) {
        Ok(_) => true,
        Err(e) => e.valid_up_to() > 0 || e.error_len().is_some(),
    }
}

/// Iterator over the code points of a byte slice.
///
/// Yields `(offset, len, Option<char>)` for every decoding step, including
/// the one-byte steps over invalid input, so the spans cover `bytes`
/// exactly.
#[derive(Debug, Clone)]
pub struct CodePoints<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> CodePoints<'a> {
    /// Creates an iterator starting at the beginning of `bytes`.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        CodePoints { bytes, offset: 0 }
    }
}

impl Iterator for CodePoints<'_> {
    type Item = (usize, usize, Option<char>);

    fn next(&mut self) -> Option<Self::Item> {
        let (ch, len) = decode_utf8(&self.bytes[self.offset..]);
        if len == 0 {
            return None;
        }
        let start = self.offset;
        self.offset += len;
        if ch.is_none() {
            log::trace!(
                "skipping invalid utf8 byte {:#04x} at offset {}",
                self.bytes[start],
                start
            );
        }
        Some((start, len, ch))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bytes.len() - self.offset;
        (remaining.div_ceil(MAX_UTF8_LEN), Some(remaining))
    }
}

impl std::iter::FusedIterator for CodePoints<'_> {}
