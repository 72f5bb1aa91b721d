//! Integer coder and word-level integer conversions

use lazy_static::lazy_static;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Signed, ToPrimitive};

use crate::conv::target::Target;
use crate::conv::{Codec, CoderResult};
use crate::error::BoundsError;
use crate::hexstring::util::hex_of_bytes;
use crate::parse::error::StreamError;
use crate::parse::{Word, WordStream, WORD_BYTES};
use crate::value::Value;

use super::check_padding;

lazy_static! {
    /// `2^(8 * WORD_BYTES)`, added to negative values to obtain their
    /// full-word two's-complement representation
    static ref WORD_MODULUS: BigInt = BigInt::one() << (8 * WORD_BYTES);
}

/// Encodes a non-negative machine integer (a length or an offset) as a word.
pub(crate) fn usize_to_word(n: usize) -> Word {
    let mut word = [0u8; WORD_BYTES];
    let bytes = (n as u64).to_be_bytes();
    word[WORD_BYTES - bytes.len()..].copy_from_slice(&bytes);
    word
}

/// Reads a word holding a length or an offset.
///
/// Fails if the unsigned value of the word does not fit into `usize`, which
/// is always the case for words that could not possibly address a position
/// in any buffer.
pub(crate) fn word_to_usize(word: &Word) -> CoderResult<usize> {
    BigUint::from_bytes_be(word)
        .to_usize()
        .ok_or_else(|| StreamError::InvalidPointer(hex_of_bytes(word)).into())
}

/// Coder for two's-complement integers of `bits` bits, sign- or
/// zero-extended to a full word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegerCoder {
    bits: usize,
    signed: bool,
    min: BigInt,
    max: BigInt,
}

impl IntegerCoder {
    /// Constructs a coder for an integer type whose bit-width has already
    /// been validated.
    pub(crate) fn new(bits: usize, signed: bool) -> Self {
        let (min, max) = if signed {
            let half = BigInt::one() << (bits - 1);
            (-half.clone(), half - 1u8)
        } else {
            (BigInt::from(0u8), (BigInt::one() << bits) - 1u8)
        };
        Self {
            bits,
            signed,
            min,
            max,
        }
    }

    #[must_use]
    pub fn bits(&self) -> usize {
        self.bits
    }

    #[must_use]
    pub fn signed(&self) -> bool {
        self.signed
    }

    /// Returns the inclusive range `[min, max]` of representable values
    #[must_use]
    pub fn bounds(&self) -> (&BigInt, &BigInt) {
        (&self.min, &self.max)
    }

    /// Bound-checks `val` and renders it as a full word.
    pub(crate) fn integer_to_word(&self, val: &BigInt) -> CoderResult<Word> {
        let val = BoundsError::restrict(val, &self.min, &self.max)?;
        let unsigned = if val.is_negative() {
            val + &*WORD_MODULUS
        } else {
            val.clone()
        };
        let (_, bytes) = unsigned.to_bytes_be();
        let mut word = [0u8; WORD_BYTES];
        word[WORD_BYTES - bytes.len()..].copy_from_slice(&bytes);
        Ok(word)
    }

    /// Interprets the low-order `bits` bits of `word`, ignoring the rest.
    pub(crate) fn word_to_integer(&self, word: &Word) -> CoderResult<BigInt> {
        let (padding, low) = word.split_at(WORD_BYTES - self.bits / 8);
        let val = if self.signed {
            BigInt::from_signed_bytes_be(low)
        } else {
            BigInt::from_bytes_be(Sign::Plus, low)
        };
        let fill = if val.is_negative() { 0xff } else { 0x00 };
        check_padding(padding, fill)?;
        Ok(val)
    }
}

impl Codec for IntegerCoder {
    fn type_name(&self) -> String {
        format!("{}int{}", if self.signed { "" } else { "u" }, self.bits)
    }

    fn dynamic(&self) -> bool {
        false
    }

    fn size(&self) -> Option<usize> {
        Some(self.bits / 8)
    }

    fn head_words(&self) -> usize {
        1
    }

    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> CoderResult<usize> {
        let val = value.to_integer()?;
        Ok(buf.push_word(self.integer_to_word(&val)?))
    }

    fn parse(&self, stream: &mut WordStream) -> CoderResult<Value> {
        let word = stream.read_word()?;
        Ok(Value::Int(self.word_to_integer(&word)?))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::conv::CoderError;
    use crate::hexstring::HexString;

    fn word_hex(coder: &IntegerCoder, val: i64) -> String {
        coder.encode(&Value::from(val)).unwrap().to_hex()
    }

    #[test]
    fn int8_bounds() {
        let coder = IntegerCoder::new(8, true);
        assert_eq!(
            word_hex(&coder, 127),
            "0x000000000000000000000000000000000000000000000000000000000000007f"
        );
        assert_eq!(
            word_hex(&coder, -128),
            "0xffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff80"
        );
        let err = coder.encode(&Value::from(128)).unwrap_err();
        assert!(matches!(err, CoderError::Bounds(BoundsError::Overflow { .. })));
        assert!(err.to_string().contains("bound error"));
        assert!(matches!(
            coder.encode(&Value::from(-129)),
            Err(CoderError::Bounds(BoundsError::Underflow { .. }))
        ));
    }

    #[test]
    fn uint_max() {
        let coder = IntegerCoder::new(256, false);
        let max: BigInt = (BigInt::one() << 256usize) - 1u8;
        let hex = coder.encode(&Value::Int(max.clone())).unwrap();
        assert_eq!(hex.as_bytes(), &[0xff; WORD_BYTES]);
        assert_eq!(coder.decode(hex).unwrap(), Value::Int(max.clone()));
        assert!(coder.encode(&Value::Int(max + 1u8)).is_err());
        assert!(coder.encode(&Value::from(-1)).is_err());
    }

    #[test]
    fn non_integral_input() {
        let coder = IntegerCoder::new(256, true);
        let err = coder.encode(&Value::try_from(0.1).unwrap()).unwrap_err();
        assert!(err.to_string().contains("do not match hex string"));
        assert_eq!(
            coder.encode(&Value::try_from(1.0).unwrap()).unwrap(),
            coder.encode(&Value::from(1)).unwrap()
        );
    }

    #[cfg(not(feature = "check_padding"))]
    #[test]
    fn decode_ignores_padding() {
        let coder = IntegerCoder::new(8, true);
        let hex = "0x0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcd80";
        assert_eq!(coder.decode_hex(hex).unwrap(), Value::from(-128));
        let coder = IntegerCoder::new(8, false);
        assert_eq!(coder.decode_hex(hex).unwrap(), Value::from(128));
    }

    #[cfg(feature = "check_padding")]
    #[test]
    fn decode_rejects_padding() {
        let coder = IntegerCoder::new(8, false);
        let hex = "0xffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff80";
        assert!(matches!(coder.decode_hex(hex), Err(CoderError::Token(_))));
    }

    #[test]
    fn offset_words() {
        assert_eq!(word_to_usize(&usize_to_word(0x40)).unwrap(), 0x40);
        let word: Word = HexString::from_vec(vec![0xff; WORD_BYTES])
            .as_bytes()
            .try_into()
            .unwrap();
        assert!(matches!(
            word_to_usize(&word),
            Err(CoderError::Stream(StreamError::InvalidPointer(_)))
        ));
    }
}
