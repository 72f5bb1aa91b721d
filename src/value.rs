//! Dynamic application values
//!
//! [`Value`] is the currency of the coder API: `encode` takes one and
//! `decode` returns one. The variants cover every shape a contract argument
//! can take, plus [`Value::Map`] for supplying tuple arguments by field
//! name.
//!
//! Coders accept a range of input shapes for the same logical type (an
//! integer can arrive as a number, as decimal text, or as a hex literal),
//! and the coercions that implement that leniency live here, so that every
//! coder applies them identically.

use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{Num, ToPrimitive};

use crate::conv::error::{CoderError, CoderResult};
use crate::decimal::{Decimal, ParseDecimalError};
use crate::error::{HexConvError, TypeError};
use crate::hexstring::{util, HexString};
use crate::named::NamedTuple;

/// Structured application value
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Int(BigInt),
    Decimal(Decimal),
    Bytes(Vec<u8>),
    String(String),
    Array(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Tuple(NamedTuple),
}

impl Value {
    /// Short name of the variant, used in error reports
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Decimal(_) => "decimal",
            Value::Bytes(_) => "bytes",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::Tuple(_) => "tuple",
        }
    }

    /// Constructs a [`Value::Bytes`]
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(bytes.into())
    }

    pub(crate) fn unexpected(&self, expected: &'static str) -> CoderError {
        CoderError::Type(TypeError::Unexpected {
            expected,
            found: self.kind(),
        })
    }

    /// Boolean coercion: `null`, `false`, zero and the empty string are
    /// falsy, everything else (including the text `"false"`) is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => i.sign() != num_bigint::Sign::NoSign,
            Value::Decimal(d) => !d.is_zero(),
            Value::String(s) => !s.is_empty(),
            Value::Bytes(_) | Value::Array(_) | Value::Map(_) | Value::Tuple(_) => true,
        }
    }

    /// Reads the value as an exact decimal number.
    ///
    /// Accepts integers, decimals, decimal text, and `0x` hex text (an
    /// optional leading `-` is allowed on either kind of text).
    pub fn to_decimal(&self) -> CoderResult<Decimal> {
        match self {
            Value::Int(i) => Ok(Decimal::from(i.clone())),
            Value::Decimal(d) => Ok(d.clone()),
            Value::String(s) => parse_numeric_text(s),
            other => Err(other.unexpected("number")),
        }
    }

    /// Reads the value as an exact integer, rejecting anything with a
    /// fractional part.
    pub fn to_integer(&self) -> CoderResult<BigInt> {
        let dec = self.to_decimal()?;
        match dec.to_integer() {
            Some(int) => Ok(int),
            None => Err(CoderError::NonIntegral(dec)),
        }
    }

    /// Reads the value as a raw byte sequence.
    ///
    /// Accepts raw bytes, `0x` hex literals, and arrays of integers in `0..=255`.
    pub fn to_byte_vec(&self) -> CoderResult<Vec<u8>> {
        match self {
            Value::Bytes(b) => Ok(b.clone()),
            Value::String(s) => Ok(HexString::from_hex(s)?.into_vec()),
            Value::Array(elems) => elems
                .iter()
                .map(|e| {
                    e.to_integer()?
                        .to_u8()
                        .ok_or_else(|| e.unexpected("byte in 0..=255"))
                })
                .collect(),
            other => Err(other.unexpected("bytes")),
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&BigInt> {
        match self {
            Value::Int(i) => Some(i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_decimal(&self) -> Option<&Decimal> {
        match self {
            Value::Decimal(d) => Some(d),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_tuple(&self) -> Option<&NamedTuple> {
        match self {
            Value::Tuple(t) => Some(t),
            _ => None,
        }
    }
}

fn parse_numeric_text(s: &str) -> CoderResult<Decimal> {
    let text = s.trim();
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if body.starts_with("0x") || body.starts_with("0X") {
        let digits = util::strip_prefix(body);
        let non_hex = || CoderError::Hex(HexConvError::NonHex(s.to_owned()));
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(non_hex());
        }
        let mag = BigInt::from_str_radix(digits, 16).map_err(|_| non_hex())?;
        Ok(Decimal::from(if negative { -mag } else { mag }))
    } else {
        Ok(Decimal::from_str(text)?)
    }
}

/// Sequence-like values compare element-wise across `Array` and `Tuple`,
/// so that a decoded record equals the positional array it was encoded from.
/// Likewise an `Int` equals any `Decimal` of the same numeric value.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::Int(i), Value::Decimal(d)) | (Value::Decimal(d), Value::Int(i)) => {
                d.to_integer().as_ref() == Some(i)
            }
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Tuple(t), Value::Array(a)) | (Value::Array(a), Value::Tuple(t)) => {
                t.values() == a.as_slice()
            }
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! impl_from_int {
    ( $( $t:ty ),+ ) => {
        $( impl From<$t> for Value {
            fn from(value: $t) -> Self {
                Value::Int(BigInt::from(value))
            }
        } )+
    };
}

impl_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::Int(value)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Value::Decimal(value)
    }
}

impl TryFrom<f64> for Value {
    type Error = ParseDecimalError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Ok(Value::Decimal(Decimal::try_from(value)?))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<HexString> for Value {
    fn from(value: HexString) -> Self {
        Value::Bytes(value.into_vec())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(value: BTreeMap<String, Value>) -> Self {
        Value::Map(value)
    }
}

impl From<NamedTuple> for Value {
    fn from(value: NamedTuple) -> Self {
        Value::Tuple(value)
    }
}
