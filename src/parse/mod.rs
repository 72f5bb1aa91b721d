//! Word-oriented stream model
//!
//! Every value in the contract ABI wire format occupies a whole number of
//! fixed-width *words*. This module defines [`WordStream`], the buffer
//! that coders append words to while encoding and read words from while
//! decoding, along with the [`TryIntoStream`] conversion trait that the
//! public decode entry points accept.
//!
//! # Cursor model
//!
//! A `WordStream` holds a single read cursor, measured in words. Sequential
//! reads ([`WordStream::read_word`]) advance it; random-access reads
//! ([`WordStream::read_word_at`], [`WordStream::read_bytes`]) leave it where
//! it is. Composite decoders that need to follow an offset into the tail
//! region use [`WordStream::tell`] and [`WordStream::seek`] to jump there and
//! back. Every position is validated against the buffer before use.
//!
//! # Word width
//!
//! The width of a word is [`WORD_BYTES`]. Addresses are right-aligned within
//! a single word and occupy its low [`ADDRESS_BYTES`] bytes.

pub mod error;

use crate::conv::error::CoderError;
use crate::hexstring::HexString;
use crate::internal::offset::WordCursor;
use error::{StreamError, StreamResult};

/// Number of bytes in a single word of the wire format
pub const WORD_BYTES: usize = 32;

/// Number of low-order bytes of a word that hold an address
pub const ADDRESS_BYTES: usize = 20;

/// A single word of the wire format, big-endian
pub type Word = [u8; WORD_BYTES];

/// Returns the number of words required to hold `nbytes` bytes
#[inline]
#[must_use]
pub const fn words_for(nbytes: usize) -> usize {
    nbytes.div_ceil(WORD_BYTES)
}

/// Ordered sequence of words plus a read cursor.
///
/// Built either empty, for encoding, or from an existing buffer whose
/// length is a multiple of [`WORD_BYTES`], for decoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordStream {
    buf: Vec<u8>,
    cursor: WordCursor,
}

impl Default for WordStream {
    fn default() -> Self {
        Self::new()
    }
}

impl WordStream {
    /// Creates an empty stream, positioned at word `0`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            cursor: WordCursor::with_limit(0),
        }
    }

    /// Creates a stream over an existing buffer.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Misaligned`] if `buf.len()` is not a multiple
    /// of [`WORD_BYTES`].
    pub fn from_bytes(buf: Vec<u8>) -> StreamResult<Self> {
        if buf.len() % WORD_BYTES != 0 {
            return Err(StreamError::Misaligned {
                len: buf.len(),
                word: WORD_BYTES,
            });
        }
        let cursor = WordCursor::with_limit(buf.len() / WORD_BYTES);
        Ok(Self { buf, cursor })
    }

    /// Appends one word to the end of the stream.
    pub fn append(&mut self, word: Word) {
        self.buf.extend_from_slice(&word);
        self.cursor.grow(1);
    }

    /// Returns the number of words held by the stream
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cursor.limit()
    }

    /// Returns `true` if the stream holds no words
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the current cursor position, in words
    #[inline]
    #[must_use]
    pub fn tell(&self) -> usize {
        self.cursor.index()
    }

    /// Returns the number of words between the cursor and the end of the stream
    #[inline]
    #[must_use]
    pub fn remainder(&self) -> usize {
        self.cursor.rem()
    }

    /// Moves the cursor to the absolute word index `index`.
    ///
    /// Seeking to exactly the end of the stream is allowed; any subsequent
    /// read will fail.
    pub fn seek(&mut self, index: usize) -> StreamResult<()> {
        if self.cursor.set(index) {
            Ok(())
        } else {
            Err(StreamError::IndexOutOfRange {
                index,
                limit: self.len(),
            })
        }
    }

    /// Advances the cursor by `n` words without reading them.
    pub fn skip(&mut self, n: usize) -> StreamResult<()> {
        match self.cursor.advance(n) {
            (_, true) => Ok(()),
            (ix, false) => Err(StreamError::IndexOutOfRange {
                index: ix.saturating_add(n),
                limit: self.len(),
            }),
        }
    }

    /// Returns the word at the cursor and advances the cursor by one.
    pub fn read_word(&mut self) -> StreamResult<Word> {
        let ix = self.tell();
        let word = self.read_word_at(ix)?;
        let _ = self.cursor.advance(1);
        Ok(word)
    }

    /// Returns the word at the absolute index `index`, leaving the cursor
    /// where it is.
    pub fn read_word_at(&self, index: usize) -> StreamResult<Word> {
        if index >= self.len() {
            return Err(StreamError::IndexOutOfRange {
                index,
                limit: self.len(),
            });
        }
        let start = index * WORD_BYTES;
        let mut word = [0u8; WORD_BYTES];
        word.copy_from_slice(&self.buf[start..start + WORD_BYTES]);
        Ok(word)
    }

    /// Returns `nbytes` contiguous bytes starting at the first byte of word
    /// `start`, leaving the cursor where it is.
    pub fn read_bytes(&self, start: usize, nbytes: usize) -> StreamResult<&[u8]> {
        let lo = start.checked_mul(WORD_BYTES);
        let hi = lo.and_then(|lo| lo.checked_add(nbytes));
        match (lo, hi) {
            (Some(lo), Some(hi)) if hi <= self.buf.len() => Ok(&self.buf[lo..hi]),
            _ => Err(StreamError::RunOutOfRange {
                start: start.saturating_mul(WORD_BYTES),
                requested: nbytes,
                limit: self.buf.len(),
            }),
        }
    }

    /// Returns the entire underlying buffer
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Destructs the stream into its underlying buffer
    #[inline]
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Conversion into a [`WordStream`] positioned at word `0`.
///
/// This is the bound on the input of [`Codec::decode`](crate::conv::Codec::decode),
/// and is implemented for raw byte buffers, [`HexString`], and hex literals.
pub trait TryIntoStream {
    type Error;

    fn try_into_stream(self) -> Result<WordStream, Self::Error>;
}

impl TryIntoStream for WordStream {
    type Error = std::convert::Infallible;

    fn try_into_stream(self) -> Result<WordStream, Self::Error> {
        Ok(self)
    }
}

impl TryIntoStream for Vec<u8> {
    type Error = StreamError;

    fn try_into_stream(self) -> Result<WordStream, Self::Error> {
        WordStream::from_bytes(self)
    }
}

impl TryIntoStream for &[u8] {
    type Error = StreamError;

    fn try_into_stream(self) -> Result<WordStream, Self::Error> {
        WordStream::from_bytes(self.to_vec())
    }
}

impl TryIntoStream for HexString {
    type Error = StreamError;

    fn try_into_stream(self) -> Result<WordStream, Self::Error> {
        WordStream::from_bytes(self.into_vec())
    }
}

impl TryIntoStream for &str {
    type Error = CoderError;

    fn try_into_stream(self) -> Result<WordStream, Self::Error> {
        let hex = HexString::from_hex(self)?;
        Ok(WordStream::from_bytes(hex.into_vec())?)
    }
}
