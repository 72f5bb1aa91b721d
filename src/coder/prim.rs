//! Single-word coders for `null`, `bool` and `address`

use crate::conv::target::Target;
use crate::conv::{Codec, CoderResult};
use crate::error::WidthError;
use crate::hexstring::util::hex_of_bytes;
use crate::parse::{WordStream, ADDRESS_BYTES, WORD_BYTES};
use crate::value::Value;

use super::check_padding;

/// Coder for the `null` type, whose encoding is empty
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NullCoder;

impl Codec for NullCoder {
    fn type_name(&self) -> String {
        "null".into()
    }

    fn dynamic(&self) -> bool {
        false
    }

    fn size(&self) -> Option<usize> {
        None
    }

    fn head_words(&self) -> usize {
        0
    }

    fn write_to<U: Target>(&self, value: &Value, _buf: &mut U) -> CoderResult<usize> {
        match value {
            Value::Null => Ok(0),
            other => Err(other.unexpected("null")),
        }
    }

    fn parse(&self, _stream: &mut WordStream) -> CoderResult<Value> {
        Ok(Value::Null)
    }
}

/// Coder for `bool`.
///
/// Any value is accepted on encode and coerced by [`Value::is_truthy`]. On
/// decode, any non-zero word is `true`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoolCoder;

impl Codec for BoolCoder {
    fn type_name(&self) -> String {
        "bool".into()
    }

    fn dynamic(&self) -> bool {
        false
    }

    fn size(&self) -> Option<usize> {
        None
    }

    fn head_words(&self) -> usize {
        1
    }

    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> CoderResult<usize> {
        let mut word = [0u8; WORD_BYTES];
        word[WORD_BYTES - 1] = u8::from(value.is_truthy());
        Ok(buf.push_word(word))
    }

    fn parse(&self, stream: &mut WordStream) -> CoderResult<Value> {
        let word = stream.read_word()?;
        #[cfg(feature = "check_padding")]
        {
            if word[WORD_BYTES - 1] > 1 {
                return Err(crate::parse::error::TokenError::InvalidBoolean(word.to_vec()).into());
            }
            check_padding(&word[..WORD_BYTES - 1], 0)?;
        }
        Ok(Value::Bool(word.iter().any(|&b| b != 0)))
    }
}

/// Coder for `address`, an [`ADDRESS_BYTES`]-byte account hash carried in
/// the low-order bytes of a word.
///
/// Decoded addresses are returned as lowercase `0x`-prefixed hex text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AddressCoder;

impl Codec for AddressCoder {
    fn type_name(&self) -> String {
        "address".into()
    }

    fn dynamic(&self) -> bool {
        false
    }

    fn size(&self) -> Option<usize> {
        None
    }

    fn head_words(&self) -> usize {
        1
    }

    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> CoderResult<usize> {
        let bytes = value.to_byte_vec()?;
        if bytes.len() != ADDRESS_BYTES {
            return Err(WidthError::WrongWidth {
                exact: ADDRESS_BYTES,
                actual: bytes.len(),
            }
            .into());
        }
        let mut word = [0u8; WORD_BYTES];
        word[WORD_BYTES - ADDRESS_BYTES..].copy_from_slice(&bytes);
        Ok(buf.push_word(word))
    }

    fn parse(&self, stream: &mut WordStream) -> CoderResult<Value> {
        let word = stream.read_word()?;
        let (padding, addr) = word.split_at(WORD_BYTES - ADDRESS_BYTES);
        check_padding(padding, 0)?;
        Ok(Value::String(hex_of_bytes(addr)))
    }
}
