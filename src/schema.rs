//! Type descriptors
//!
//! Callers describe the type of an argument the same way a JSON contract
//! ABI does: a type name plus, for tuples, an ordered list of named or
//! unnamed component descriptors. That caller-facing shape is
//! [`Descriptor`]. Before any coder is built, a `Descriptor` is parsed and
//! validated into a [`TypeKind`], the structured form every coder is
//! configured from.
//!
//! # Type names
//!
//! | name                     | kind                                       |
//! |--------------------------|--------------------------------------------|
//! | `""`, `null`             | null                                       |
//! | `bool`                   | boolean                                    |
//! | `address`                | address                                    |
//! | `int<M>`, `uint<M>`      | integer, `M` bits (default 256)            |
//! | `fixed<M>x<N>`, `ufixed<M>x<N>` | fixed-point, `M` bits, `N` decimals (default `128x18`) |
//! | `bytes<N>`, `bytes`      | fixed- or dynamic-length byte sequence     |
//! | `string`                 | UTF-8 text                                 |
//! | `tuple`                  | record over `components`                   |
//! | `<T>[<K>]`, `<T>[]`      | fixed- or dynamic-length array of `T`      |
//!
//! Array suffixes nest left to right: `string[2][]` is a dynamic-length
//! array whose elements are `string[2]`.
//!
//! # Validation
//!
//! Every constraint on a type is checked here, when the descriptor is
//! parsed, so that a constructed coder never reports a descriptor error.

#[cfg(feature = "serde_impls")]
use serde::{Deserialize, Serialize};

use crate::error::DescriptorError;
use crate::parse::WORD_BYTES;

/// Bit width of `int`, `uint`
pub const DEFAULT_INT_BITS: usize = 256;
/// Bit width of `fixed`, `ufixed`
pub const DEFAULT_FIXED_BITS: usize = 128;
/// Decimal exponent of `fixed`, `ufixed`
pub const DEFAULT_FIXED_EXPONENT: u32 = 18;
/// Largest decimal exponent a fixed-point type may declare
pub const MAX_FIXED_EXPONENT: u32 = 80;
/// Largest bit width an integer or fixed-point type may declare
pub const MAX_BITS: usize = 256;

/// Caller-facing type descriptor, shaped like a JSON ABI parameter.
///
/// # Examples
///
/// ```
/// # use abicoder::Descriptor;
/// let person = Descriptor::new("tuple").with_components(vec![
///     Descriptor::new("uint").named("age"),
///     Descriptor::new("bool").named("adult"),
/// ]);
/// assert_eq!(person.components.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde_impls", derive(Serialize, Deserialize))]
pub struct Descriptor {
    #[cfg_attr(
        feature = "serde_impls",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde_impls", serde(rename = "type"))]
    pub type_name: String,
    #[cfg_attr(
        feature = "serde_impls",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub components: Vec<Descriptor>,
}

impl Descriptor {
    /// Constructs an unnamed descriptor for the type called `type_name`
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            name: None,
            type_name: type_name.into(),
            components: Vec::new(),
        }
    }

    /// Sets the field name this descriptor carries inside a tuple
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the component descriptors of a tuple (or array-of-tuple) type
    #[must_use]
    pub fn with_components(mut self, components: Vec<Descriptor>) -> Self {
        self.components = components;
        self
    }
}

impl From<&str> for Descriptor {
    fn from(type_name: &str) -> Self {
        Self::new(type_name)
    }
}

impl From<String> for Descriptor {
    fn from(type_name: String) -> Self {
        Self::new(type_name)
    }
}

/// Validated, structured type descriptor
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeKind {
    Null,
    Bool,
    Address,
    Int {
        bits: usize,
        signed: bool,
    },
    Fixed {
        bits: usize,
        signed: bool,
        exponent: u32,
    },
    /// `size == None` for the dynamic-length `bytes`
    Bytes {
        size: Option<usize>,
    },
    String,
    /// `length == None` for a dynamic-length array
    Array {
        element: Box<TypeKind>,
        length: Option<usize>,
    },
    Tuple {
        components: Vec<(Option<String>, TypeKind)>,
    },
}

impl TypeKind {
    /// Parses and validates a [`Descriptor`].
    ///
    /// # Errors
    ///
    /// Returns the [`DescriptorError`] describing the first constraint
    /// the descriptor violates.
    pub fn parse(desc: &Descriptor) -> Result<Self, DescriptorError> {
        let name = desc.type_name.trim();
        if let Some(stripped) = name.strip_suffix(']') {
            let lb = match stripped.rfind('[') {
                Some(lb) => lb,
                None => return Err(DescriptorError::UnknownType(name.to_owned())),
            };
            let length = match &stripped[lb + 1..] {
                "" => None,
                digits => match parse_digits(digits) {
                    Some(0) => {
                        return Err(DescriptorError::InvalidSize {
                            type_name: name.to_owned(),
                            size: 0,
                        })
                    }
                    Some(n) => Some(n),
                    None => return Err(DescriptorError::UnknownType(name.to_owned())),
                },
            };
            let inner = Descriptor {
                name: desc.name.clone(),
                type_name: stripped[..lb].to_owned(),
                components: desc.components.clone(),
            };
            let element = Box::new(Self::parse(&inner)?);
            // a length word alone could not bound the element count on decode
            if length.is_none() && element.is_zero_width() {
                return Err(DescriptorError::InvalidSize {
                    type_name: name.to_owned(),
                    size: 0,
                });
            }
            return Ok(TypeKind::Array { element, length });
        }
        Self::parse_base(name, &desc.components)
    }

    fn parse_base(name: &str, components: &[Descriptor]) -> Result<Self, DescriptorError> {
        let unknown = || DescriptorError::UnknownType(name.to_owned());
        match name {
            "" | "null" => return Ok(TypeKind::Null),
            "bool" => return Ok(TypeKind::Bool),
            "address" => return Ok(TypeKind::Address),
            "string" => return Ok(TypeKind::String),
            "bytes" => return Ok(TypeKind::Bytes { size: None }),
            "tuple" => {
                if components.is_empty() {
                    return Err(DescriptorError::MissingComponents(name.to_owned()));
                }
                let components = components
                    .iter()
                    .map(|c| Ok((c.name.clone(), Self::parse(c)?)))
                    .collect::<Result<Vec<_>, DescriptorError>>()?;
                return Ok(TypeKind::Tuple { components });
            }
            _ => (),
        }

        if let Some(digits) = name.strip_prefix("bytes") {
            let size = parse_digits(digits).ok_or_else(unknown)?;
            if size == 0 || size > WORD_BYTES {
                return Err(DescriptorError::InvalidSize {
                    type_name: name.to_owned(),
                    size,
                });
            }
            return Ok(TypeKind::Bytes { size: Some(size) });
        }

        if let Some((signed, rest)) = strip_signed(name, "int") {
            let bits = match rest {
                "" => DEFAULT_INT_BITS,
                digits => parse_digits(digits).ok_or_else(unknown)?,
            };
            check_bits(name, bits)?;
            return Ok(TypeKind::Int { bits, signed });
        }

        if let Some((signed, rest)) = strip_signed(name, "fixed") {
            let (bits, exponent) = match rest {
                "" => (DEFAULT_FIXED_BITS, DEFAULT_FIXED_EXPONENT as usize),
                params => {
                    let (m, n) = params.split_once('x').ok_or_else(unknown)?;
                    (
                        parse_digits(m).ok_or_else(unknown)?,
                        parse_digits(n).ok_or_else(unknown)?,
                    )
                }
            };
            check_bits(name, bits)?;
            if exponent == 0 || exponent > MAX_FIXED_EXPONENT as usize {
                return Err(DescriptorError::InvalidOffset {
                    type_name: name.to_owned(),
                    exponent,
                });
            }
            return Ok(TypeKind::Fixed {
                bits,
                signed,
                exponent: exponent as u32,
            });
        }

        Err(unknown())
    }

    /// Returns `true` for types whose encoding is always empty
    fn is_zero_width(&self) -> bool {
        match self {
            TypeKind::Null => true,
            TypeKind::Array {
                element,
                length: Some(_),
            } => element.is_zero_width(),
            TypeKind::Tuple { components } => components.iter().all(|(_, k)| k.is_zero_width()),
            _ => false,
        }
    }

    /// Returns the canonical type name, e.g. `uint256` for `uint` and
    /// `(uint256,bool)` for a tuple of those two fields
    #[must_use]
    pub fn canonical_name(&self) -> String {
        match self {
            TypeKind::Null => "null".into(),
            TypeKind::Bool => "bool".into(),
            TypeKind::Address => "address".into(),
            TypeKind::Int { bits, signed } => {
                format!("{}int{bits}", if *signed { "" } else { "u" })
            }
            TypeKind::Fixed {
                bits,
                signed,
                exponent,
            } => format!("{}fixed{bits}x{exponent}", if *signed { "" } else { "u" }),
            TypeKind::Bytes { size: Some(n) } => format!("bytes{n}"),
            TypeKind::Bytes { size: None } => "bytes".into(),
            TypeKind::String => "string".into(),
            TypeKind::Array { element, length } => match length {
                Some(n) => format!("{}[{n}]", element.canonical_name()),
                None => format!("{}[]", element.canonical_name()),
            },
            TypeKind::Tuple { components } => {
                let inner: Vec<String> = components.iter().map(|(_, k)| k.canonical_name()).collect();
                format!("({})", inner.join(","))
            }
        }
    }
}

/// Splits a leading `u` off of `name` if the remainder starts with `base`,
/// returning the signedness and whatever follows `base`.
fn strip_signed<'a>(name: &'a str, base: &str) -> Option<(bool, &'a str)> {
    match name.strip_prefix('u') {
        Some(rest) => rest.strip_prefix(base).map(|r| (false, r)),
        None => name.strip_prefix(base).map(|r| (true, r)),
    }
}

fn parse_digits(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn check_bits(type_name: &str, bits: usize) -> Result<(), DescriptorError> {
    if bits == 0 || bits > MAX_BITS || bits % 8 != 0 {
        Err(DescriptorError::InvalidBits {
            type_name: type_name.to_owned(),
            bits,
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn kind(name: &str) -> Result<TypeKind, DescriptorError> {
        TypeKind::parse(&Descriptor::new(name))
    }

    #[test]
    fn defaults() {
        assert_eq!(kind("int").unwrap(), TypeKind::Int { bits: 256, signed: true });
        assert_eq!(kind("uint").unwrap().canonical_name(), "uint256");
        assert_eq!(kind("fixed").unwrap().canonical_name(), "fixed128x18");
        assert_eq!(kind("ufixed").unwrap().canonical_name(), "ufixed128x18");
        assert_eq!(kind("").unwrap(), TypeKind::Null);
    }

    #[test]
    fn invalid_parameters() {
        assert!(matches!(kind("int100"), Err(DescriptorError::InvalidBits { bits: 100, .. })));
        assert!(matches!(kind("uint0"), Err(DescriptorError::InvalidBits { .. })));
        assert!(matches!(kind("int264"), Err(DescriptorError::InvalidBits { .. })));
        assert!(matches!(kind("fixed127x18"), Err(DescriptorError::InvalidBits { .. })));
        assert!(matches!(kind("fixed128x0"), Err(DescriptorError::InvalidOffset { .. })));
        assert!(matches!(kind("fixed128x81"), Err(DescriptorError::InvalidOffset { .. })));
        assert!(matches!(kind("bytes100"), Err(DescriptorError::InvalidSize { .. })));
        assert!(matches!(kind("bytes0"), Err(DescriptorError::InvalidSize { .. })));
        assert!(matches!(kind("uint8[0]"), Err(DescriptorError::InvalidSize { size: 0, .. })));
    }

    #[test]
    fn malformed_names() {
        for name in ["invalidType", "fixed8", "intx", "uint8[", "uint8]", "uint8[x]", "bytes-1", "Bool"] {
            assert!(
                matches!(kind(name), Err(DescriptorError::UnknownType(_))),
                "{name} should be unknown"
            );
        }
        let err = kind("invalidType").unwrap_err();
        assert!(err.to_string().contains("can not find matched coder"));
    }

    #[test]
    fn nested_arrays() {
        let k = kind("string[2][]").unwrap();
        assert_eq!(k.canonical_name(), "string[2][]");
        match k {
            TypeKind::Array { element, length: None } => {
                assert_eq!(
                    *element,
                    TypeKind::Array { element: Box::new(TypeKind::String), length: Some(2) }
                );
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn zero_width_dynamic_arrays() {
        for name in ["[]", "null[]", "null[2][]"] {
            assert!(
                matches!(kind(name), Err(DescriptorError::InvalidSize { size: 0, .. })),
                "{name}"
            );
        }
        let empty = Descriptor::new("tuple[]").with_components(vec![Descriptor::new("null")]);
        assert!(TypeKind::parse(&empty).is_err());
        assert_eq!(kind("null[2]").unwrap().canonical_name(), "null[2]");
        assert_eq!(kind("null[2][3]").unwrap().canonical_name(), "null[2][3]");
    }

    #[test]
    fn tuples() {
        assert!(matches!(kind("tuple"), Err(DescriptorError::MissingComponents(_))));
        let desc = Descriptor::new("tuple[]").with_components(vec![
            Descriptor::new("uint").named("age"),
            Descriptor::new("tuple")
                .named("location")
                .with_components(vec![Descriptor::new("int"), Descriptor::new("int")]),
        ]);
        assert_eq!(
            TypeKind::parse(&desc).unwrap().canonical_name(),
            "(uint256,(int256,int256))[]"
        );
    }

    #[cfg(feature = "serde_impls")]
    #[test]
    fn json_abi_fragment() {
        let json = r#"{"name":"person","type":"tuple","components":[
            {"name":"age","type":"uint8"},
            {"type":"string[]"}
        ]}"#;
        let desc: Descriptor = serde_json::from_str(json).unwrap();
        assert_eq!(desc.name.as_deref(), Some("person"));
        assert_eq!(desc.components[1], Descriptor::new("string[]"));
        assert_eq!(TypeKind::parse(&desc).unwrap().canonical_name(), "(uint8,string[])");
        let back = serde_json::to_value(&desc.components[1]).unwrap();
        assert_eq!(back, serde_json::json!({"type": "string[]"}));
    }
}
