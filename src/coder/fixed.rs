//! Fixed-point decimal coder
//!
//! A `fixed<M>x<N>` value `v` is carried on the wire as the `M`-bit integer
//! `round(v × 10^N)`, with ties rounded away from zero. Bounds are checked
//! on the rounded integer, so a value whose unrounded magnitude lies just
//! outside the range still encodes if it rounds into it.

use crate::conv::target::Target;
use crate::conv::{Codec, CoderResult};
use crate::decimal::Decimal;
use crate::parse::WordStream;
use crate::value::Value;

use super::int::IntegerCoder;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedCoder {
    inner: IntegerCoder,
    exponent: u32,
}

impl FixedCoder {
    pub(crate) fn new(bits: usize, signed: bool, exponent: u32) -> Self {
        Self {
            inner: IntegerCoder::new(bits, signed),
            exponent,
        }
    }

    #[must_use]
    pub fn bits(&self) -> usize {
        self.inner.bits()
    }

    #[must_use]
    pub fn signed(&self) -> bool {
        self.inner.signed()
    }

    /// Returns the number of decimal digits after the point
    #[must_use]
    pub fn exponent(&self) -> u32 {
        self.exponent
    }
}

impl Codec for FixedCoder {
    fn type_name(&self) -> String {
        format!(
            "{}fixed{}x{}",
            if self.signed() { "" } else { "u" },
            self.bits(),
            self.exponent
        )
    }

    fn dynamic(&self) -> bool {
        false
    }

    fn size(&self) -> Option<usize> {
        self.inner.size()
    }

    fn head_words(&self) -> usize {
        1
    }

    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> CoderResult<usize> {
        let scaled = value.to_decimal()?.scale_up(self.exponent).round_half_away();
        Ok(buf.push_word(self.inner.integer_to_word(&scaled)?))
    }

    fn parse(&self, stream: &mut WordStream) -> CoderResult<Value> {
        let word = stream.read_word()?;
        let scaled = self.inner.word_to_integer(&word)?;
        Ok(Value::Decimal(Decimal::new(scaled, self.exponent)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::conv::CoderError;

    fn dec(s: &str) -> Value {
        Value::Decimal(s.parse().unwrap())
    }

    fn last_byte(coder: &FixedCoder, v: &Value) -> u8 {
        let hex = coder.encode(v).unwrap();
        hex.as_bytes()[hex.len() - 1]
    }

    #[test]
    fn fixed8x1_rounding() {
        let coder = FixedCoder::new(8, true, 1);
        assert_eq!(coder.type_name(), "fixed8x1");
        assert_eq!(coder.size(), Some(1));
        assert_eq!(last_byte(&coder, &dec("-3.15")), 0xe0);
        assert_eq!(last_byte(&coder, &dec("-3.14")), 0xe1);
        assert_eq!(last_byte(&coder, &dec("3.14")), 0x1f);
        assert_eq!(last_byte(&coder, &dec("3.15")), 0x20);
        assert_eq!(last_byte(&coder, &dec("12.7")), 0x7f);
        assert!(matches!(coder.encode(&dec("12.8")), Err(CoderError::Bounds(_))));
        assert!(matches!(coder.encode(&dec("-12.9")), Err(CoderError::Bounds(_))));
    }

    #[test]
    fn bounds_apply_after_rounding() {
        let coder = FixedCoder::new(8, false, 1);
        assert_eq!(last_byte(&coder, &dec("-0.04")), 0x00);
        assert!(coder.encode(&dec("-0.05")).is_err());
        assert_eq!(last_byte(&coder, &dec("25.5")), 0xff);
        assert!(coder.encode(&dec("25.6")).is_err());
    }

    #[test]
    fn decode_divides_by_scale() {
        let coder = FixedCoder::new(128, true, 18);
        let hex = coder.encode(&dec("-12.9")).unwrap();
        assert_eq!(
            hex.to_hex(),
            "0xffffffffffffffffffffffffffffffffffffffffffffffff4cf9fe58dd760000"
        );
        assert_eq!(coder.decode(hex).unwrap(), dec("-12.9"));
        assert_eq!(coder.encode(&Value::from("12.8")).unwrap(), coder.encode(&dec("12.8")).unwrap());
    }
}
