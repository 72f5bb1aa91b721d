use crate::parse::Word;

/// Marker trait for byte-oriented buffers with incremental append operations
///
/// In most ways, it is convenient to think of `Target` as an analogous trait to
/// [`std::io::Write`]. The principal difference between the two is the fact
/// that the `push_XXX` methods on `Target` are infallible and total; while they
/// return a `usize` value representing the number of bytes written, this is used
/// only for summary book-keeping on the caller side.
///
/// Coders only ever push whole words, or byte-runs that are themselves a
/// whole number of words long, so a `Target` that started empty is always
/// word-aligned between coder calls.
pub trait Target {
    /// Performs any necessary operations that amortize the cost incurred by
    /// writing a certain number of additional bytes to the end of the `Target`.
    ///
    /// For many implementors, this may simply be a no-op.
    fn anticipate(&mut self, extra: usize);

    /// Returns a fresh object of the `Self` type with an initially empty buffer.
    fn create() -> Self;

    /// Appends a single word to a Target object.
    ///
    /// The return value must be [`WORD_BYTES`](crate::parse::WORD_BYTES).
    fn push_word(&mut self, word: Word) -> usize;

    /// Appends the bytes in an arbitrary-length byte-slice to a Target object.
    ///
    /// The return value must be the number of bytes appended, which is the
    /// length of the slice for every byte-granular target.
    fn push_all(&mut self, buf: &[u8]) -> usize;
}

/// Useful alias for `std::io::Sink` that is used to count the number of
/// bytes an encoding would occupy, without performing any memory operations.
pub type ByteCounter = std::io::Sink;

impl Target for ByteCounter {
    #[inline(always)]
    fn anticipate(&mut self, _: usize) {}

    #[inline]
    fn create() -> Self {
        std::io::sink()
    }

    #[inline(always)]
    fn push_word(&mut self, word: Word) -> usize {
        word.len()
    }

    #[inline(always)]
    fn push_all(&mut self, buf: &[u8]) -> usize {
        buf.len()
    }
}

impl Target for Vec<u8> {
    #[inline]
    fn anticipate(&mut self, extra: usize) {
        self.reserve(extra)
    }

    #[inline]
    fn create() -> Self {
        Self::new()
    }

    #[inline]
    fn push_word(&mut self, word: Word) -> usize {
        self.extend_from_slice(&word);
        word.len()
    }

    #[inline]
    fn push_all(&mut self, buf: &[u8]) -> usize {
        self.extend_from_slice(buf);
        buf.len()
    }
}

impl Target for crate::parse::WordStream {
    #[inline(always)]
    fn anticipate(&mut self, _: usize) {}

    #[inline]
    fn create() -> Self {
        Self::new()
    }

    #[inline]
    fn push_word(&mut self, word: Word) -> usize {
        self.append(word);
        word.len()
    }

    /// Appends `buf` word by word, zero-padding the final word on the right.
    ///
    /// The return value is the number of bytes actually appended, which is
    /// `buf.len()` rounded up to the next whole word.
    fn push_all(&mut self, buf: &[u8]) -> usize {
        let mut n = 0;
        for chunk in buf.chunks(crate::parse::WORD_BYTES) {
            let mut word = [0u8; crate::parse::WORD_BYTES];
            word[..chunk.len()].copy_from_slice(chunk);
            n += self.push_word(word);
        }
        n
    }
}
