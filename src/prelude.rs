//! Assorted imports for downstream users of the coder API

pub use crate::coder::{get_coder, Coder};
pub use crate::conv::{target::Target, Codec, CoderError, CoderResult};
pub use crate::decimal::Decimal;
pub use crate::hexstring::HexString;
pub use crate::named::NamedTuple;
pub use crate::parse::{TryIntoStream, WordStream, WORD_BYTES};
pub use crate::schema::Descriptor;
pub use crate::value::Value;
