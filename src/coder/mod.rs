//! Coder registry and the closed set of coder variants
//!
//! [`get_coder`] is the single entry point for turning a [`Descriptor`] into
//! a [`Coder`]. Resolution parses and validates the descriptor once, up
//! front, and selects one variant per type kind; after that, encoding and
//! decoding dispatch on the variant tag alone and never re-inspect the
//! type.
//!
//! Coders for composite types own the coders of their components, so a
//! resolved `Coder` is a self-contained tree that can be cloned, shared
//! between threads, and reused for any number of calls.

pub mod array;
pub mod bytes;
pub mod fixed;
pub mod int;
pub(crate) mod layout;
pub mod prim;
pub mod tuple;

use crate::conv::target::Target;
use crate::conv::{Codec, CoderResult};
use crate::parse::WordStream;
use crate::schema::{Descriptor, TypeKind};
use crate::value::Value;

pub use array::ArrayCoder;
pub use bytes::{BytesCoder, StringCoder};
pub use fixed::FixedCoder;
pub use int::IntegerCoder;
pub use prim::{AddressCoder, BoolCoder, NullCoder};
pub use tuple::TupleCoder;

/// Coder resolved from a type descriptor
#[derive(Clone, Debug, PartialEq)]
pub enum Coder {
    Null(NullCoder),
    Bool(BoolCoder),
    Address(AddressCoder),
    Integer(IntegerCoder),
    Fixed(FixedCoder),
    Bytes(BytesCoder),
    String(StringCoder),
    Array(ArrayCoder),
    Tuple(TupleCoder),
}

/// Resolves a type descriptor into a coder.
///
/// # Errors
///
/// Fails with [`CoderError::Descriptor`](crate::conv::CoderError::Descriptor)
/// if the type name is unknown or malformed, if a numeric parameter is out
/// of range, or if a tuple has no components.
///
/// # Examples
///
/// ```
/// use abicoder::{get_coder, Codec, Descriptor, Value};
///
/// let coder = get_coder(&Descriptor::new("uint8[]")).unwrap();
/// assert!(coder.dynamic());
/// let hex = coder.encode(&Value::Array(vec![Value::from(1), Value::from(2)])).unwrap();
/// assert_eq!(coder.decode(hex).unwrap(), Value::Array(vec![Value::from(1), Value::from(2)]));
/// ```
pub fn get_coder(desc: &Descriptor) -> CoderResult<Coder> {
    let kind = match TypeKind::parse(desc) {
        Ok(kind) => kind,
        Err(err) => {
            tracing::debug!(type_name = %desc.type_name, error = %err, "descriptor rejected");
            return Err(err.into());
        }
    };
    let coder = Coder::from_kind(kind);
    tracing::debug!(
        type_name = %desc.type_name,
        canonical = %coder.type_name(),
        dynamic = coder.dynamic(),
        "resolved coder"
    );
    Ok(coder)
}

impl Coder {
    /// Builds the coder for an already-validated [`TypeKind`]
    #[must_use]
    pub fn from_kind(kind: TypeKind) -> Self {
        match kind {
            TypeKind::Null => Coder::Null(NullCoder),
            TypeKind::Bool => Coder::Bool(BoolCoder),
            TypeKind::Address => Coder::Address(AddressCoder),
            TypeKind::Int { bits, signed } => Coder::Integer(IntegerCoder::new(bits, signed)),
            TypeKind::Fixed {
                bits,
                signed,
                exponent,
            } => Coder::Fixed(FixedCoder::new(bits, signed, exponent)),
            TypeKind::Bytes { size } => Coder::Bytes(BytesCoder::new(size)),
            TypeKind::String => Coder::String(StringCoder),
            TypeKind::Array { element, length } => {
                Coder::Array(ArrayCoder::new(Self::from_kind(*element), length))
            }
            TypeKind::Tuple { components } => Coder::Tuple(TupleCoder::new(
                components
                    .into_iter()
                    .map(|(name, kind)| (name, Self::from_kind(kind)))
                    .collect(),
            )),
        }
    }

    /// Returns the signedness of integer and fixed-point coders
    #[must_use]
    pub fn signed(&self) -> Option<bool> {
        match self {
            Coder::Integer(c) => Some(c.signed()),
            Coder::Fixed(c) => Some(c.signed()),
            _ => None,
        }
    }

    /// Returns the field names of a tuple coder
    #[must_use]
    pub fn names(&self) -> Option<&[String]> {
        match self {
            Coder::Tuple(c) => Some(c.names()),
            _ => None,
        }
    }
}

macro_rules! dispatch {
    ($self:expr, $c:ident => $e:expr) => {
        match $self {
            Coder::Null($c) => $e,
            Coder::Bool($c) => $e,
            Coder::Address($c) => $e,
            Coder::Integer($c) => $e,
            Coder::Fixed($c) => $e,
            Coder::Bytes($c) => $e,
            Coder::String($c) => $e,
            Coder::Array($c) => $e,
            Coder::Tuple($c) => $e,
        }
    };
}

impl Codec for Coder {
    fn type_name(&self) -> String {
        dispatch!(self, c => c.type_name())
    }

    fn dynamic(&self) -> bool {
        dispatch!(self, c => c.dynamic())
    }

    fn size(&self) -> Option<usize> {
        dispatch!(self, c => c.size())
    }

    fn head_words(&self) -> usize {
        dispatch!(self, c => c.head_words())
    }

    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> CoderResult<usize> {
        dispatch!(self, c => c.write_to(value, buf))
    }

    fn parse(&self, stream: &mut WordStream) -> CoderResult<Value> {
        dispatch!(self, c => c.parse(stream))
    }
}

impl TryFrom<&Descriptor> for Coder {
    type Error = crate::conv::CoderError;

    fn try_from(desc: &Descriptor) -> Result<Self, Self::Error> {
        get_coder(desc)
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "check_padding")] {
        /// Fails unless every byte of `padding` equals `fill`.
        pub(crate) fn check_padding(padding: &[u8], fill: u8) -> CoderResult<()> {
            if padding.iter().all(|&b| b == fill) {
                Ok(())
            } else {
                Err(crate::parse::error::TokenError::NonNullPaddingByte {
                    padding: padding.to_vec(),
                }
                .into())
            }
        }
    } else {
        /// Padding is not inspected unless the `check_padding` feature is enabled.
        #[inline(always)]
        pub(crate) fn check_padding(_padding: &[u8], _fill: u8) -> CoderResult<()> {
            Ok(())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::conv::CoderError;
    use crate::error::DescriptorError;

    fn coder(name: &str) -> Coder {
        get_coder(&Descriptor::new(name)).unwrap()
    }

    #[test]
    fn variant_selection() {
        assert!(matches!(coder(""), Coder::Null(_)));
        assert!(matches!(coder("bool"), Coder::Bool(_)));
        assert!(matches!(coder("address"), Coder::Address(_)));
        assert!(matches!(coder("int8"), Coder::Integer(_)));
        assert!(matches!(coder("ufixed"), Coder::Fixed(_)));
        assert!(matches!(coder("bytes4"), Coder::Bytes(_)));
        assert!(matches!(coder("string"), Coder::String(_)));
        assert!(matches!(coder("string[]"), Coder::Array(_)));
    }

    #[test]
    fn static_properties() {
        let c = coder("int");
        assert_eq!((c.type_name(), c.signed(), c.size()), ("int256".into(), Some(true), Some(32)));
        let c = coder("ufixed");
        assert_eq!((c.type_name(), c.signed(), c.size()), ("ufixed128x18".into(), Some(false), Some(16)));
        let c = coder("bytes");
        assert_eq!((c.dynamic(), c.size()), (true, None));
        assert_eq!(coder("bool").signed(), None);
        assert_eq!(coder("string").names(), None);
    }

    #[test]
    fn descriptor_errors_surface_at_resolution() {
        let cases = [
            ("invalidType", "can not find matched coder"),
            ("int100", "invalid bits"),
            ("fixed128x0", "invalid offset"),
            ("bytes100", "invalid size"),
            ("uint8[0]", "invalid size"),
        ];
        for (name, msg) in cases {
            let err = get_coder(&Descriptor::new(name)).unwrap_err();
            assert!(matches!(err, CoderError::Descriptor(_)));
            assert!(err.to_string().contains(msg), "{name}: {err}");
        }
        assert!(matches!(
            Coder::try_from(&Descriptor::new("tuple")),
            Err(CoderError::Descriptor(DescriptorError::MissingComponents(_)))
        ));
    }

    #[test]
    fn coders_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Coder>();
    }
}
