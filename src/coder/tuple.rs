//! Heterogeneous tuple coder

use std::sync::Arc;

use crate::conv::target::Target;
use crate::conv::{Codec, CoderError, CoderResult};
use crate::error::{LengthError, TypeError};
use crate::named::{FieldNames, NamedTuple};
use crate::parse::WordStream;
use crate::value::Value;

use super::{layout, Coder};

/// Coder for a tuple over an ordered list of (optionally named) components.
///
/// Encodes from a positional array, a [`NamedTuple`], or a mapping from field
/// name to value; decodes to a [`NamedTuple`] sharing this coder's field
/// names.
#[derive(Clone, Debug, PartialEq)]
pub struct TupleCoder {
    components: Vec<Coder>,
    fields: Arc<FieldNames>,
}

impl TupleCoder {
    /// Constructs a tuple coder; unnamed components are named by position.
    pub(crate) fn new(components: Vec<(Option<String>, Coder)>) -> Self {
        let (names, components): (Vec<String>, Vec<Coder>) = components
            .into_iter()
            .enumerate()
            .map(|(ix, (name, coder))| (name.unwrap_or_else(|| ix.to_string()), coder))
            .unzip();
        Self {
            components,
            fields: Arc::new(FieldNames::new(names)),
        }
    }

    /// Returns the field names, in declaration order
    #[must_use]
    pub fn names(&self) -> &[String] {
        self.fields.as_slice()
    }

    #[must_use]
    pub fn components(&self) -> &[Coder] {
        &self.components
    }

    fn check_len(&self, actual: usize) -> CoderResult<()> {
        if actual == self.components.len() {
            Ok(())
        } else {
            Err(LengthError::WrongLength {
                exact: self.components.len(),
                actual,
            }
            .into())
        }
    }
}

impl Codec for TupleCoder {
    fn type_name(&self) -> String {
        let inner: Vec<String> = self.components.iter().map(Codec::type_name).collect();
        format!("({})", inner.join(","))
    }

    fn dynamic(&self) -> bool {
        self.components.iter().any(Codec::dynamic)
    }

    fn size(&self) -> Option<usize> {
        Some(self.components.len())
    }

    fn head_words(&self) -> usize {
        if self.dynamic() {
            1
        } else {
            self.components.iter().map(Codec::head_words).sum()
        }
    }

    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> CoderResult<usize> {
        let values: Vec<&Value> = match value {
            Value::Array(elems) => {
                self.check_len(elems.len())?;
                elems.iter().collect()
            }
            Value::Tuple(t) => {
                self.check_len(t.len())?;
                t.iter().collect()
            }
            Value::Map(map) => self
                .names()
                .iter()
                .map(|name| {
                    map.get(name)
                        .ok_or_else(|| CoderError::from(TypeError::MissingField(name.clone())))
                })
                .collect::<CoderResult<_>>()?,
            other => return Err(other.unexpected("tuple")),
        };
        let items: Vec<(&Coder, &Value)> = self.components.iter().zip(values).collect();
        layout::write_sequence(&items, buf)
    }

    fn parse(&self, stream: &mut WordStream) -> CoderResult<Value> {
        let values = layout::read_sequence(stream, &self.components)?;
        Ok(Value::Tuple(NamedTuple::new(Arc::clone(&self.fields), values)))
    }
}

#[cfg(test)]
mod test {
    use std::collections::BTreeMap;

    use super::*;
    use crate::coder::get_coder;
    use crate::parse::WORD_BYTES;
    use crate::schema::Descriptor;

    fn person() -> Coder {
        get_coder(&Descriptor::new("tuple").with_components(vec![
            Descriptor::new("uint").named("age"),
            Descriptor::new("bool").named("adult"),
        ]))
        .unwrap()
    }

    #[test]
    fn static_record() {
        let c = person();
        assert_eq!(c.type_name(), "(uint256,bool)");
        assert_eq!((c.dynamic(), c.size()), (false, Some(2)));
        assert_eq!(c.names(), Some(&["age".to_owned(), "adult".to_owned()][..]));
        let hex = c.encode(&Value::Array(vec![Value::from(15), Value::Bool(false)])).unwrap();
        assert_eq!(hex.len(), 2 * WORD_BYTES);
        let decoded = c.decode(hex).unwrap();
        let record = decoded.as_tuple().unwrap();
        assert_eq!(record["age"], Value::from(15));
        assert_eq!(record.get("age"), Some(&record[0]));
        assert_eq!(record.type_name(), "NamedTuple(age,adult)");
        assert!(record.set("age", Value::from(18)).is_err());
    }

    #[test]
    fn shape_errors() {
        let c = person();
        let err = c.encode(&Value::from("string")).unwrap_err();
        assert!(err.to_string().contains("unexpected type"));
        let err = c.encode(&Value::Array(vec![])).unwrap_err();
        assert!(err.to_string().contains("length not match"));
        let mut partial = BTreeMap::new();
        partial.insert("age".to_owned(), Value::from(1));
        assert!(matches!(
            c.encode(&Value::Map(partial)),
            Err(CoderError::Type(TypeError::MissingField(name))) if name == "adult"
        ));
    }

    #[test]
    fn dynamic_record() {
        let c = get_coder(&Descriptor::new("tuple").with_components(vec![
            Descriptor::new("uint").named("age"),
            Descriptor::new("string").named("name"),
        ]))
        .unwrap();
        assert!(c.dynamic());
        let v = Value::Array(vec![Value::from(15), Value::from("abc")]);
        let hex = c.encode(&v).unwrap();
        assert_eq!(hex.len(), 4 * WORD_BYTES);
        assert_eq!(hex.as_bytes()[2 * WORD_BYTES - 1], 0x40);
        assert_eq!(c.decode(hex).unwrap(), v);
    }

    #[test]
    fn unnamed_components() {
        let c = get_coder(&Descriptor::new("tuple").with_components(vec![
            Descriptor::new("uint"),
            Descriptor::new("string").named("name"),
        ]))
        .unwrap();
        assert_eq!(c.names(), Some(&["0".to_owned(), "name".to_owned()][..]));
    }

    #[test]
    fn bad_offset_is_stream_error() {
        let c = get_coder(&Descriptor::new("tuple").with_components(vec![
            Descriptor::new("uint").named("age"),
            Descriptor::new("string").named("name"),
        ]))
        .unwrap();
        let mut hex = String::from("0x");
        hex.push_str(&format!("{:0>64}", "f"));
        hex.push_str(&"ff".repeat(32));
        hex.push_str(&format!("{:0>64}", "3"));
        hex.push_str(&format!("{:0<64}", "616263"));
        let err = c.decode_hex(&hex).unwrap_err();
        assert!(err.to_string().starts_with("stream index error"));

        let mut far = String::from("0x");
        far.push_str(&format!("{:0>64}", "f"));
        far.push_str(&format!("{:0>64}", "1000"));
        assert!(matches!(c.decode_hex(&far), Err(CoderError::Stream(_))));
    }
}
