//! General error types
//!
//! This module contains the leaf error types that individual coders and
//! the descriptor parser report. They are aggregated into the top-level
//! [`CoderError`](crate::conv::error::CoderError), which is what every
//! public operation of this crate ultimately returns.

use std::error::Error;
use std::fmt::{Debug, Display};

use num_bigint::BigInt;

/// Enumerated error type for failures related to coders that impose
/// a check on the byte-width of their prospective values.
///
/// Structurally similar to [`LengthError`], an analogous error-type
/// relating to the number of elements in a collection-type, rather than
/// the number of bytes in an opaque byte-sequence.
#[derive(Clone, PartialEq, PartialOrd, Eq, Ord, Debug)]
pub enum WidthError {
    /// Requirement of precise byte-width not satisfied
    WrongWidth { exact: usize, actual: usize },
}

impl Display for WidthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WidthError::WrongWidth { exact, actual } => {
                write!(
                    f,
                    "length not match: {actual}-byte value violated requirement of {exact} bytes"
                )
            }
        }
    }
}

impl Error for WidthError {}

/// Enumerated error type for failures related to coders that impose a
/// check on the element-count of their prospective values, namely
/// fixed-length arrays and tuples.
#[derive(Clone, PartialEq, PartialOrd, Eq, Ord, Debug)]
pub enum LengthError {
    /// Requirement of precise element-count not satisfied
    WrongLength { exact: usize, actual: usize },
}

impl Display for LengthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LengthError::WrongLength { exact, actual } => {
                write!(
                    f,
                    "length not match: {actual}-element value violated requirement of {exact} elements"
                )
            }
        }
    }
}

impl Error for LengthError {}

/// Error type representing all possible conditions for invalidity
/// encountered when attempting to parse a string-type as a series
/// of hex-encoded bytes.
#[derive(Clone, PartialEq, Eq, Ord, PartialOrd)]
pub enum HexConvError {
    /// Error case for odd-length strings
    OddParity(String),
    /// Error case for strings containing non-hex characters,
    /// i.e. anything not in `[0-9a-fA-F]` after the optional `0x` prefix.
    NonHex(String),
}

impl Debug for HexConvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OddParity(invalid) => {
                write!(f, "non-even length-parity for string `{}`", invalid)
            }
            Self::NonHex(invalid) => write!(f, "non-hex character found in string `{}`", invalid),
        }
    }
}

impl Display for HexConvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OddParity(s) => {
                write!(f, "`{s}` do not match hex string: odd length")
            }
            Self::NonHex(s) => {
                write!(f, "`{s}` do not match hex string: non-hex character")
            }
        }
    }
}

impl Error for HexConvError {}

/// Error type representing invalidity of a numeric value with respect
/// to the inclusive two's-complement range of an integer coder.
///
/// * `Underflow {..}` contains the illegal value in question, as well as the lower bound it falls below
/// * `Overflow {..}` contains the illegal value in question, as well as the upper bound it falls above
///
/// For fixed-point coders the reported value is the scaled integer
/// obtained after rounding, not the decimal supplied by the caller.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum BoundsError {
    Underflow { min: BigInt, val: BigInt },
    Overflow { max: BigInt, val: BigInt },
}

impl BoundsError {
    /// Checks that a value `val` falls into the specified range `[min, max]`,
    /// returning `Ok(val)` if this condition holds.
    ///
    /// If `val < min`, returns `Err(BoundsError::Underflow { .. })`
    ///
    /// If `val > max`, returns `Err(BoundsError::Overflow { .. })`
    pub fn restrict<'a>(val: &'a BigInt, min: &BigInt, max: &BigInt) -> Result<&'a BigInt, Self> {
        if val < min {
            Err(Self::Underflow {
                min: min.clone(),
                val: val.clone(),
            })
        } else if val > max {
            Err(Self::Overflow {
                max: max.clone(),
                val: val.clone(),
            })
        } else {
            Ok(val)
        }
    }
}

impl Display for BoundsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundsError::Underflow { ref min, ref val } => {
                write!(f, "bound error: value {} less than minimum bound {}", val, min)
            }
            BoundsError::Overflow { ref max, ref val } => {
                write!(
                    f,
                    "bound error: value {} greater than maximum bound {}",
                    val, max
                )
            }
        }
    }
}

impl Error for BoundsError {}

/// Error type for values whose shape does not fit the coder they were
/// handed to, e.g. a string given to an array coder.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TypeError {
    /// The value's kind is not accepted by the coder at all
    Unexpected {
        expected: &'static str,
        found: &'static str,
    },
    /// A named field required by a tuple coder was absent from the mapping
    MissingField(String),
}

impl Display for TypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeError::Unexpected { expected, found } => {
                write!(f, "unexpected type: expected {expected}, found {found}")
            }
            TypeError::MissingField(name) => {
                write!(f, "unexpected type: mapping has no field `{name}`")
            }
        }
    }
}

impl Error for TypeError {}

/// Errors raised while resolving a type descriptor into a coder.
///
/// These are only ever produced by [`get_coder`](crate::coder::get_coder)
/// and by the descriptor parser; an already-constructed coder never
/// reports one.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum DescriptorError {
    /// Type name does not name any known coder
    UnknownType(String),
    /// Integer or fixed bit-width not a multiple of 8 in `(0, 256]`
    InvalidBits { type_name: String, bits: usize },
    /// Fixed decimal exponent not in `(0, 80]`
    InvalidOffset { type_name: String, exponent: usize },
    /// Byte length not in `(0, 32]`, or an array declared with zero length
    InvalidSize { type_name: String, size: usize },
    /// `tuple` given without any components
    MissingComponents(String),
}

impl Display for DescriptorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DescriptorError::UnknownType(name) => {
                write!(f, "can not find matched coder for type `{name}`")
            }
            DescriptorError::InvalidBits { type_name, bits } => {
                write!(f, "invalid bits {bits} in type `{type_name}`")
            }
            DescriptorError::InvalidOffset {
                type_name,
                exponent,
            } => {
                write!(f, "invalid offset {exponent} in type `{type_name}`")
            }
            DescriptorError::InvalidSize { type_name, size } => {
                write!(f, "invalid size {size} in type `{type_name}`")
            }
            DescriptorError::MissingComponents(name) => {
                write!(f, "tuple type `{name}` requires a non-empty component list")
            }
        }
    }
}

impl Error for DescriptorError {}
