//! Error types used to report failure in word-level stream access
//!
//! Every read or seek performed on a [`WordStream`](super::WordStream)
//! is validated against the buffer length before it happens; when that
//! check fails, one of the cases below is returned instead.

use std::error::Error;
use std::fmt::{Display, Formatter, Result};

/// Enumeration over all errors that may be encountered when calling
/// methods on a `WordStream`, or when constructing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// A word-read or seek targeted an index at or beyond the end of
    /// the buffer
    IndexOutOfRange { index: usize, limit: usize },
    /// A contiguous byte-run requested by a sequence coder would extend
    /// past the end of the buffer
    RunOutOfRange {
        start: usize,
        requested: usize,
        limit: usize,
    },
    /// An offset or length word held a value that cannot address any
    /// position in a buffer, either because it overflows `usize` or because
    /// it is not aligned to a word boundary
    InvalidPointer(String),
    /// The input buffer is not a whole number of words
    Misaligned { len: usize, word: usize },
}

impl Display for StreamError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            StreamError::IndexOutOfRange { index, limit } => {
                write!(
                    f,
                    "stream index error: word {index} is out of range for a {limit}-word stream"
                )
            }
            StreamError::RunOutOfRange {
                start,
                requested,
                limit,
            } => {
                write!(
                    f,
                    "stream index error: {requested} bytes from byte {start} exceed the {limit}-byte stream"
                )
            }
            StreamError::InvalidPointer(word) => {
                write!(f, "stream index error: word {word} is not a valid offset")
            }
            StreamError::Misaligned { len, word } => {
                write!(
                    f,
                    "stream index error: {len}-byte buffer is not a multiple of the {word}-byte word"
                )
            }
        }
    }
}

impl Error for StreamError {}

/// Type alias for Result with an error type of [`StreamError`]
pub type StreamResult<T> = std::result::Result<T, StreamError>;

/// Errors raised by decoders when the `check_padding` feature is enabled
/// and a word is not in the canonical form its coder would have written.
///
/// With the feature disabled, decoders accept any padding and never
/// produce this error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Boolean word held a value other than `0` or `1`
    InvalidBoolean(Vec<u8>),
    /// Implicitly NIL-valued padding contained non-NIL byte
    NonNullPaddingByte { padding: Vec<u8> },
}

impl Display for TokenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::InvalidBoolean(word) => {
                write!(
                    f,
                    "invalid boolean encoding {}",
                    crate::hexstring::util::hex_of_bytes(word)
                )
            }
            Self::NonNullPaddingByte { padding } => {
                write!(
                    f,
                    "non-null byte found in padding: {}",
                    crate::hexstring::util::hex_of_bytes(padding)
                )
            }
        }
    }
}

impl Error for TokenError {}
