//! Core of the transcoding API
//!
//! This module contains the definition of the [`Codec`] trait, the uniform
//! surface shared by every coder variant: `encode` a [`Value`] into a
//! word-aligned buffer, `decode` a [`Value`] back out of a [`WordStream`],
//! and report the static properties of the type being coded (canonical
//! name, whether its encoding is dynamic, and its declared size).
//!
//! Implementors only provide [`Codec::write_to`] and [`Codec::parse`]; the
//! remaining entry points are defined in terms of those two and should not
//! normally be overridden.
//!
//! The submodule [`target`] offers an abstraction along the lines of
//! [`std::io::Write`], namely the [`target::Target`] trait, which serves as
//! the generic bound for serialization in [`Codec::write_to`]. The
//! submodule [`error`] defines the top-level [`CoderError`] that every
//! fallible operation of this crate returns.

pub mod error;
pub mod target;

use crate::hexstring::HexString;
use crate::parse::{TryIntoStream, WordStream, WORD_BYTES};
use crate::value::Value;

pub use error::{CoderError, CoderResult};
use target::{ByteCounter, Target};

/// Trait for coders that transcode [`Value`]s of a single, fixed type to and
/// from the word-oriented wire format.
///
/// A coder's configuration is fixed when it is constructed, so every method
/// takes `&self` and coders may be shared freely between threads. The only
/// mutable state involved in decoding is the cursor of the [`WordStream`]
/// passed in by the caller.
pub trait Codec {
    /// Returns the canonical name of the type being coded, such as
    /// `uint256` or `(uint256,bool)`
    fn type_name(&self) -> String;

    /// Returns `true` if the length of an encoding depends on the value
    /// being encoded
    fn dynamic(&self) -> bool;

    /// Returns the declared size of the type, if it has one.
    ///
    /// This is the byte-width of an integer or fixed-point type, the byte
    /// length of a fixed-length `bytes<N>`, the element count of a
    /// fixed-length array, and the component count of a tuple.
    fn size(&self) -> Option<usize>;

    /// Returns the number of words this type occupies in the head region
    /// of an enclosing tuple or array.
    ///
    /// Dynamic types occupy a single offset word; static types occupy the
    /// full width of their encoding.
    fn head_words(&self) -> usize;

    /// Appends the encoding of `value` to a generic buffer, returning the
    /// number of bytes written.
    ///
    /// The bytes written are always a whole number of words. On failure, an
    /// unspecified prefix of the encoding may already have been pushed to
    /// `buf`; the public entry points never expose such a buffer.
    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> CoderResult<usize>;

    /// Reads one value of this type from `stream`, starting at its cursor.
    ///
    /// On success, the cursor is left immediately past the head words of
    /// the value; any tail data reached through offsets is read without
    /// moving it.
    fn parse(&self, stream: &mut WordStream) -> CoderResult<Value>;

    /// Encodes `value` into a freshly allocated [`HexString`].
    fn encode(&self, value: &Value) -> CoderResult<HexString> {
        let mut buf: Vec<u8> = Vec::create();
        buf.anticipate(self.head_words() * WORD_BYTES);
        match self.write_to(value, &mut buf) {
            Ok(_) => Ok(HexString::from_vec(buf)),
            Err(err) => {
                tracing::debug!(type_name = %self.type_name(), error = %err, "encode failed");
                Err(err)
            }
        }
    }

    /// Computes the number of bytes `value` would encode to, without
    /// allocating an output buffer.
    fn encoded_len(&self, value: &Value) -> CoderResult<usize> {
        let mut counter = ByteCounter::create();
        self.write_to(value, &mut counter)
    }

    /// Decodes a single value from anything that converts into a
    /// [`WordStream`], starting at word `0`.
    ///
    /// Words following the value in the buffer are ignored.
    fn decode<T>(&self, input: T) -> CoderResult<Value>
    where
        T: TryIntoStream,
        CoderError: From<T::Error>,
    {
        let mut stream = input.try_into_stream()?;
        match self.parse(&mut stream) {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::debug!(type_name = %self.type_name(), error = %err, "decode failed");
                Err(err)
            }
        }
    }

    /// Decodes a single value from a hex literal, with or without the `0x`
    /// prefix.
    fn decode_hex(&self, hex: &str) -> CoderResult<Value> {
        self.decode(hex)
    }

    /// Decodes a single value from a raw byte buffer.
    fn decode_bytes(&self, bytes: &[u8]) -> CoderResult<Value> {
        self.decode(bytes)
    }
}
