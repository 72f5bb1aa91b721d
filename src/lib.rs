//! Contract-ABI argument codec
//!
//! # Overview
//!
//! This library converts structured application values to and from the
//! fixed-word binary format used to pass arguments to, and read results
//! from, smart-contract functions. Callers describe the type of each
//! argument with a [`Descriptor`] (a type name such as `uint256`,
//! `bytes4` or `string[2][]`, plus component descriptors for tuples), and
//! resolve it with [`get_coder`] into a [`Coder`] that encodes and decodes
//! [`Value`]s of that type.
//!
//! ```
//! use abicoder::prelude::*;
//!
//! let coder = get_coder(&Descriptor::new("tuple").with_components(vec![
//!     Descriptor::new("uint").named("age"),
//!     Descriptor::new("string").named("name"),
//! ]))
//! .unwrap();
//! assert_eq!(coder.type_name(), "(uint256,string)");
//!
//! let hex = coder.encode(&Value::Array(vec![Value::from(15), Value::from("abc")])).unwrap();
//! let decoded = coder.decode(hex).unwrap();
//! assert_eq!(decoded.as_tuple().unwrap()["name"], Value::from("abc"));
//! ```
//!
//! # Wire format
//!
//! Every value occupies a whole number of [`WORD_BYTES`]-byte words, with
//! multi-byte integers stored big-endian. Scalars take exactly one word.
//! Tuples and arrays use a head/tail layout: static components are stored
//! in place, while dynamic components (`bytes`, `string`, `T[]`, and
//! anything containing them) are stored after the head region and
//! referenced from it by a byte offset relative to the start of the
//! enclosing value.
//!
//! # Features
//!
//! * `check_padding` makes decoders reject words whose padding is not what
//!   the corresponding encoder would have written. By default, padding is
//!   ignored on decode.
//! * `serde_impls` derives `Serialize`/`Deserialize` for [`Descriptor`], so
//!   that JSON ABI parameter lists can be loaded directly.

pub mod coder;
pub mod conv;
pub mod decimal;
pub mod error;
pub mod hexstring;
mod internal;
pub mod named;
pub mod parse;
pub mod prelude;
pub mod schema;
pub mod value;

pub use crate::coder::{get_coder, Coder};
pub use crate::conv::{Codec, CoderError, CoderResult};
pub use crate::decimal::Decimal;
pub use crate::hexstring::HexString;
pub use crate::named::NamedTuple;
pub use crate::parse::{WordStream, ADDRESS_BYTES, WORD_BYTES};
pub use crate::schema::Descriptor;
pub use crate::value::Value;
