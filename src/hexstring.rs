//! Validated conversion to and from `0x`-prefixed hex literals
//!
//! # Background
//!
//! Callers of a contract ABI codec almost never handle raw byte buffers
//! directly: call payloads, return data, addresses, and byte-string
//! arguments all travel as *hex literals*, strings of the form
//! `0x([0-9a-fA-F]{2})*`. Case is not significant on input, and output is
//! always lowercase.
//!
//! # `HexString`
//!
//! The struct `HexString` defined in this module provides an unambiguous
//! boundary type for such literals. A `HexString` can be created from:
//!
//!   * hex text, by the fallible [`HexString::from_hex`]
//!   * byte buffers: `[u8; N]`, `&[u8]`, `Vec<u8>`, infallibly through `From`
//!
//! For lightweight construction from literals in tests and examples, the
//! [`hex`] macro is also provided.

use crate::conv::target::Target;
use crate::error::HexConvError;

pub(crate) mod util {
    use crate::error::HexConvError;
    use std::fmt::Write;

    /// Strips a leading `0x` or `0X` from `src`, if present.
    #[inline]
    #[must_use]
    pub fn strip_prefix(src: &str) -> &str {
        src.strip_prefix("0x")
            .or_else(|| src.strip_prefix("0X"))
            .unwrap_or(src)
    }

    /// Formats a sequence of bytes into a `0x`-prefixed lowercase hexadecimal `String`
    #[must_use]
    #[inline]
    pub fn hex_of_bytes(bytes: &[u8]) -> String {
        let mut hex: String = String::with_capacity(2 + bytes.len() * 2);
        hex.push_str("0x");
        for &byte in bytes {
            match write!(&mut hex, "{byte:02x}") {
                Ok(_) => (),
                Err(_) => unreachable!("write to String should never fail"),
            };
        }
        hex
    }

    /// Attempt to parse a hexadecimally encoded string, with or without the
    /// `0x` prefix, returning a `Vec<u8>` holding the decoded bytes.
    ///
    /// # Errors
    ///
    /// If the digits following the prefix have odd parity, `Err(OddParity)`
    /// is returned.
    ///
    /// Otherwise, if the string contains any character that is not a valid
    /// hexadecimal digit (case-insensitive), returns `Err(NonHex(s))` where `s`
    /// is the string in question.
    #[inline]
    pub fn bytes_of_hex(src: &str) -> Result<Vec<u8>, HexConvError> {
        let digits = strip_prefix(src);
        let ascii_len = digits.len();

        if ascii_len == 0 {
            return Ok(Vec::new());
        } else if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(HexConvError::NonHex(src.to_owned()));
        } else if ascii_len % 2 != 0 {
            return Err(HexConvError::OddParity(src.to_owned()));
        }

        let mut dst = Vec::with_capacity(ascii_len / 2);

        for ix in (0..ascii_len).step_by(2) {
            match u8::from_str_radix(&digits[ix..ix + 2], 16) {
                Ok(word) => dst.push(word),
                Err(_) => return Err(HexConvError::NonHex(src.to_owned())),
            }
        }
        Ok(dst)
    }

    /// Zero-alloc short-circuiting equality test between hex literals and
    /// byte-arrays
    ///
    /// Returns `true` if `src` represents a valid hexadecimal encoding of `tgt`,
    /// and `false` otherwise, including when `src` is not valid hex.
    #[inline]
    #[must_use]
    pub fn eq_hex_bytes(src: &str, tgt: &[u8]) -> bool {
        let digits = strip_prefix(src);
        let ascii_len: usize = digits.len();

        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) || tgt.len() * 2 != ascii_len {
            return false;
        }

        let mut pat = tgt;

        for ix in (0..ascii_len).step_by(2) {
            if let &[head, ref tail @ ..] = pat {
                match u8::from_str_radix(&digits[ix..ix + 2], 16) {
                    Ok(word) if word == head => (),
                    _ => return false,
                }
                pat = tail;
            }
        }
        pat.is_empty()
    }
}

/// Newtype representing byte-arrays that are parsed from and displayed as
/// `0x`-prefixed hex literals, but stored in memory as raw bytes.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
#[repr(transparent)]
pub struct HexString {
    bytes: Vec<u8>,
}

impl HexString {
    /// Extracts a slice containing the entirety of the underlying vector
    #[inline(always)]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Constructs a `HexString` from an existing `Vec<u8>` without copying
    #[inline]
    #[must_use]
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Destructs a `HexString` into its underlying byte-vector
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    /// Returns `true` if the `HexString` has length 0
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the number of bytes in `self`
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Constructs a new, empty `HexString`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Constructs a new `HexString` around a newly allocated
    /// `Vec<u8>` containing the bytes of `src.as_ref()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use abicoder::{hex, HexString};
    /// assert_eq!(hex!("0xdeadbeef"), HexString::clone_from_bytes([0xdeu8, 0xad, 0xbe, 0xef]));
    /// ```
    #[must_use]
    pub fn clone_from_bytes<T>(src: T) -> Self
    where
        T: AsRef<[u8]>,
    {
        Self {
            bytes: src.as_ref().to_vec(),
        }
    }

    /// Returns the `0x`-prefixed lowercase hex literal of `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use abicoder::HexString;
    /// assert_eq!(HexString::new().to_hex(), "0x");
    /// assert_eq!(HexString::from(vec![0xde, 0xad, 0xbe, 0xef]).to_hex(), "0xdeadbeef");
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn to_hex(&self) -> String {
        util::hex_of_bytes(&self.bytes)
    }

    /// Attempt to parse a hex literal, with or without its `0x` prefix,
    /// into the sequence of bytes it represents
    pub fn from_hex<S>(hex: S) -> Result<Self, HexConvError>
    where
        S: AsRef<str>,
    {
        Ok(Self {
            bytes: util::bytes_of_hex(hex.as_ref())?,
        })
    }

    /// Returns `true` if `other` is a hex literal that represents the
    /// same byte-sequence as `self`.
    #[must_use]
    pub fn eq_hex<S>(&self, other: &S) -> bool
    where
        S: AsRef<str> + ?Sized,
    {
        util::eq_hex_bytes(other.as_ref(), self.as_bytes())
    }
}

impl AsRef<[u8]> for HexString {
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl std::fmt::Debug for HexString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("HexString").field(&self.to_hex()).finish()
    }
}

impl std::fmt::Display for HexString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        String::fmt(&self.to_hex(), f)
    }
}

impl Target for HexString {
    fn anticipate(&mut self, extra: usize) {
        self.bytes.anticipate(extra)
    }

    fn create() -> Self {
        HexString { bytes: Vec::new() }
    }

    fn push_word(&mut self, word: crate::parse::Word) -> usize {
        self.bytes.push_word(word)
    }

    fn push_all(&mut self, buf: &[u8]) -> usize {
        self.bytes.push_all(buf)
    }
}

impl From<HexString> for Vec<u8> {
    fn from(val: HexString) -> Self {
        val.bytes
    }
}

macro_rules! impl_from {
    ( $src:ty ) => {
        impl From<$src> for HexString {
            fn from(bytes: $src) -> Self {
                Self { bytes }
            }
        }
    };
    ( $src:ty, $meth:ident ) => {
        impl From<$src> for HexString {
            fn from(src: $src) -> Self {
                Self { bytes: src.$meth() }
            }
        }
    };
    ( $cg:ident, $src:ty, $meth:ident ) => {
        impl<const $cg: usize> From<$src> for HexString {
            fn from(src: $src) -> Self {
                Self { bytes: src.$meth() }
            }
        }
    };
}

impl_from!(Vec<u8>);
impl_from!(&[u8], to_vec);

impl_from!(N, [u8; N], to_vec);

/// Converts a string-like literal or expression into a HexString by parsing it
/// as hexadecimal
///
/// Will panic if the argument is not a valid hex literal and therefore cannot
/// be converted.
#[macro_export]
macro_rules! hex {
    ($s : expr) => {{
        $crate::hexstring::HexString::from_hex($s).expect("hex! macro encountered error")
    }};
}

macro_rules! impl_partialeq_hexstr {
    ( $other:ty ) => {
        impl PartialEq<HexString> for $other {
            #[inline]
            fn eq(&self, other: &HexString) -> bool {
                other.eq_hex(self)
            }
        }

        impl PartialEq<$other> for HexString {
            #[inline]
            fn eq(&self, other: &$other) -> bool {
                self.eq_hex(other)
            }
        }
    };
}

// Partial equality between HexString and basic string types
impl_partialeq_hexstr!(&'_ str);
impl_partialeq_hexstr!(String);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn prefix_optional_on_input() {
        assert_eq!(hex!("0xdeadbeef").as_bytes(), &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(hex!("DEADBEEF").as_bytes(), &[0xde, 0xad, 0xbe, 0xef]);
        assert!(hex!("0x").is_empty());
    }

    #[test]
    fn invalid_literals() {
        assert!(matches!(
            HexString::from_hex("0xabc"),
            Err(HexConvError::OddParity(_))
        ));
        assert!(matches!(
            HexString::from_hex("0xzz"),
            Err(HexConvError::NonHex(_))
        ));
        assert!(matches!(
            HexString::from_hex("0x中文"),
            Err(HexConvError::NonHex(_))
        ));
        assert!(matches!(
            HexString::from_hex("+f"),
            Err(HexConvError::NonHex(_))
        ));
    }

    #[test]
    fn case_insensitive_eq() {
        let h = HexString::from([0xab, 0xcd]);
        assert_eq!(h, "0xABCD");
        assert_eq!(h.to_string(), "0xabcd");
        assert!(h != "0xabce");
    }
}
