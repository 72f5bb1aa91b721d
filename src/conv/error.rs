use std::string::FromUtf8Error;

use crate::decimal::{Decimal, ParseDecimalError};
use crate::error::{BoundsError, DescriptorError, HexConvError, LengthError, TypeError, WidthError};
use crate::named::FrozenError;
use crate::parse::error::{StreamError, TokenError};

/// Top-level error type for every fallible operation of this crate.
///
/// Descriptor errors only ever come out of coder resolution; the other
/// cases come out of `encode` and `decode`. None of them is fatal, and an
/// operation that fails has produced no output.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum CoderError {
    Descriptor(DescriptorError),
    Type(TypeError),
    Length(LengthError),
    Width(WidthError),
    Bounds(BoundsError),
    Hex(HexConvError),
    Number(ParseDecimalError),
    /// A value with a fractional part was given where an exact integer is required
    NonIntegral(Decimal),
    Stream(StreamError),
    /// Only produced with the `check_padding` feature enabled
    Token(TokenError),
    Utf8(FromUtf8Error),
    Frozen(FrozenError),
}

impl From<std::convert::Infallible> for CoderError {
    fn from(_void: std::convert::Infallible) -> Self {
        match _void {}
    }
}

macro_rules! impl_from_leaf {
    ( $( $variant:ident ( $leaf:ty ) ),+ $(,)? ) => {
        $( impl From<$leaf> for CoderError {
            fn from(err: $leaf) -> Self {
                Self::$variant(err)
            }
        } )+
    };
}

impl_from_leaf!(
    Descriptor(DescriptorError),
    Type(TypeError),
    Length(LengthError),
    Width(WidthError),
    Bounds(BoundsError),
    Hex(HexConvError),
    Number(ParseDecimalError),
    Stream(StreamError),
    Token(TokenError),
    Utf8(FromUtf8Error),
    Frozen(FrozenError),
);

impl std::fmt::Display for CoderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoderError::Descriptor(err) => std::fmt::Display::fmt(err, f),
            CoderError::Type(err) => std::fmt::Display::fmt(err, f),
            CoderError::Length(err) => std::fmt::Display::fmt(err, f),
            CoderError::Width(err) => std::fmt::Display::fmt(err, f),
            CoderError::Bounds(err) => std::fmt::Display::fmt(err, f),
            CoderError::Hex(err) => std::fmt::Display::fmt(err, f),
            CoderError::Number(err) => std::fmt::Display::fmt(err, f),
            CoderError::NonIntegral(val) => {
                write!(f, "non-integral value {val} do not match hex string of an integer")
            }
            CoderError::Stream(err) => std::fmt::Display::fmt(err, f),
            CoderError::Token(err) => std::fmt::Display::fmt(err, f),
            CoderError::Utf8(err) => {
                write!(f, "decoded bytes are not valid UTF-8: {}", err)
            }
            CoderError::Frozen(err) => std::fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for CoderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CoderError::Descriptor(err) => Some(err),
            CoderError::Type(err) => Some(err),
            CoderError::Length(err) => Some(err),
            CoderError::Width(err) => Some(err),
            CoderError::Bounds(err) => Some(err),
            CoderError::Hex(err) => Some(err),
            CoderError::Number(err) => Some(err),
            CoderError::NonIntegral(_) => None,
            CoderError::Stream(err) => Some(err),
            CoderError::Token(err) => Some(err),
            CoderError::Utf8(err) => Some(err),
            CoderError::Frozen(err) => Some(err),
        }
    }
}

pub type CoderResult<T> = std::result::Result<T, CoderError>;

#[cfg(test)]
mod test {
    fn dummy<T: Send + Sync>() {}

    #[test]
    fn coder_error_threadsafe() {
        dummy::<super::CoderError>()
    }
}
