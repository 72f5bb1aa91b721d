//! Cursor bookkeeping for [`WordStream`](crate::parse::WordStream)
//!
//! The types in this module only track word indices; they never touch the
//! underlying buffer. Every movement is checked against an absolute limit
//! fixed when the tracker is created, so that a malformed offset read off
//! the wire can never move the cursor outside of the buffer.

/// Wrapper around [`usize`] that represents an index, in words, into a
/// word-aligned buffer.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[repr(transparent)]
pub struct Index(usize);

impl Index {
    /// Constructs a new `Index` object initialized to `0`
    #[inline(always)]
    #[must_use]
    pub fn new() -> Self {
        Self(0usize)
    }

    /// Advances the held value by `n` unless this would cause it to exceed
    /// `lim`.
    ///
    /// Returns the original value (before incrementation), along with a boolean
    /// value that is equal to  `true` if and only if the increment occurred.
    ///
    /// Ths increment will always occur if `n == 0`, and in general if
    /// `ix + n <= lim`, where `ix` is the value held at the time this method
    /// was called.
    #[inline]
    pub fn increment_checked(&mut self, n: usize, lim: usize) -> (usize, bool) {
        let ret = self.0;
        let is_valid = self.0.checked_add(n).map_or(false, |tgt| tgt <= lim);
        if is_valid {
            self.0 += n;
        }
        (ret, is_valid)
    }

    /// Unwraps the `usize` stored within an `Index` value.
    #[must_use]
    #[inline(always)]
    pub fn to_usize(self) -> usize {
        self.0
    }
}

impl From<usize> for Index {
    #[inline]
    fn from(ix: usize) -> Self {
        Self(ix)
    }
}

/// Tracker of a word index with an invariant absolute limit, which the
/// index is allowed to reach but never exceed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordCursor {
    abs: usize,
    cur: Index,
}

impl WordCursor {
    /// Creates a cursor at index `0` over a buffer of `abs` words.
    #[must_use]
    pub fn with_limit(abs: usize) -> Self {
        Self {
            abs,
            cur: Index::new(),
        }
    }

    /// Returns the current value of the index being tracked.
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.cur.to_usize()
    }

    /// Returns the absolute upper bound on the index.
    #[inline(always)]
    #[must_use]
    pub fn limit(&self) -> usize {
        self.abs
    }

    /// Returns the number of words between the current index and the limit.
    #[inline]
    #[must_use]
    pub fn rem(&self) -> usize {
        debug_assert!(self.abs >= self.index(), "WordCursor: limit < index");
        self.abs - self.index()
    }

    /// Attempt to increment the index by `n`.
    ///
    /// Returns the original index along with whether the increment was
    /// performed. Saturation is not an option; the index either stays
    /// where it was or moves by exactly `n`.
    #[inline]
    pub fn advance(&mut self, n: usize) -> (usize, bool) {
        self.cur.increment_checked(n, self.abs)
    }

    /// Raises the absolute limit by `n`, leaving the index untouched.
    #[inline]
    pub fn grow(&mut self, n: usize) {
        self.abs += n;
    }

    /// Repositions the index at `ix`, which may be anywhere in `0..=limit`.
    ///
    /// Returns `false`, leaving the index untouched, if `ix` exceeds the limit.
    #[inline]
    pub fn set(&mut self, ix: usize) -> bool {
        if ix <= self.abs {
            self.cur = Index::from(ix);
            true
        } else {
            false
        }
    }
}
