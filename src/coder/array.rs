//! Homogeneous array coder

use crate::conv::target::Target;
use crate::conv::{Codec, CoderResult};
use crate::error::LengthError;
use crate::parse::error::StreamError;
use crate::parse::WordStream;
use crate::value::Value;

use super::int::{usize_to_word, word_to_usize};
use super::{layout, Coder};

/// Coder for `T[N]` (`length == Some(N)`) and `T[]` (`length == None`).
///
/// Dynamic-length arrays carry their element count in a leading word; the
/// elements follow in the head/tail layout, with offsets measured from the
/// word after the count.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayCoder {
    element: Box<Coder>,
    length: Option<usize>,
}

impl ArrayCoder {
    pub(crate) fn new(element: Coder, length: Option<usize>) -> Self {
        Self {
            element: Box::new(element),
            length,
        }
    }

    /// Returns the coder of the elements
    #[must_use]
    pub fn element(&self) -> &Coder {
        &self.element
    }
}

impl Codec for ArrayCoder {
    fn type_name(&self) -> String {
        match self.length {
            Some(n) => format!("{}[{n}]", self.element.type_name()),
            None => format!("{}[]", self.element.type_name()),
        }
    }

    fn dynamic(&self) -> bool {
        self.length.is_none() || self.element.dynamic()
    }

    fn size(&self) -> Option<usize> {
        self.length
    }

    fn head_words(&self) -> usize {
        match self.length {
            Some(n) if !self.element.dynamic() => n.saturating_mul(self.element.head_words()),
            _ => 1,
        }
    }

    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> CoderResult<usize> {
        let elems = match value {
            Value::Array(elems) => elems.as_slice(),
            Value::Tuple(t) => t.values(),
            other => return Err(other.unexpected("array")),
        };
        let mut n = 0;
        match self.length {
            Some(exact) if exact != elems.len() => {
                return Err(LengthError::WrongLength {
                    exact,
                    actual: elems.len(),
                }
                .into())
            }
            Some(_) => (),
            None => n += buf.push_word(usize_to_word(elems.len())),
        }
        let items: Vec<(&Coder, &Value)> = elems.iter().map(|e| (&*self.element, e)).collect();
        Ok(n + layout::write_sequence(&items, buf)?)
    }

    fn parse(&self, stream: &mut WordStream) -> CoderResult<Value> {
        let count = match self.length {
            Some(n) => n,
            None => {
                let word = stream.read_word()?;
                let count = word_to_usize(&word)?;
                // dynamic-length arrays never have zero-width elements, so each takes a word
                if count > stream.remainder() {
                    return Err(StreamError::IndexOutOfRange {
                        index: stream.tell().saturating_add(count),
                        limit: stream.len(),
                    }
                    .into());
                }
                count
            }
        };
        let values = layout::read_sequence(stream, std::iter::repeat(&*self.element).take(count))?;
        Ok(Value::Array(values))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coder::get_coder;
    use crate::conv::CoderError;
    use crate::schema::Descriptor;

    fn coder(name: &str) -> Coder {
        get_coder(&Descriptor::new(name)).unwrap()
    }

    #[test]
    fn static_fixed_length() {
        let c = coder("uint8[2]");
        assert_eq!((c.dynamic(), c.size()), (false, Some(2)));
        assert_eq!(c.head_words(), 2);
        let hex = c.encode(&Value::Array(vec![Value::from(0xab), Value::from("0xcd")])).unwrap();
        assert_eq!(
            hex.to_hex(),
            concat!(
                "0x",
                "00000000000000000000000000000000000000000000000000000000000000ab",
                "00000000000000000000000000000000000000000000000000000000000000cd",
            )
        );
        assert_eq!(
            c.decode(hex).unwrap(),
            Value::Array(vec![Value::from(0xab), Value::from(0xcd)])
        );
        let err = c.encode(&Value::from("string")).unwrap_err();
        assert!(err.to_string().contains("unexpected type"));
        let err = c.encode(&Value::Array(vec![])).unwrap_err();
        assert!(matches!(err, CoderError::Length(_)));
    }

    #[test]
    fn dynamic_length_prefix() {
        let c = coder("uint8[]");
        assert_eq!((c.dynamic(), c.size()), (true, None));
        let v = Value::Array(vec![Value::from(0xab), Value::from(0xcd)]);
        let hex = c.encode(&v).unwrap();
        assert_eq!(hex.len(), 3 * crate::parse::WORD_BYTES);
        assert_eq!(hex.as_bytes()[crate::parse::WORD_BYTES - 1], 2);
        assert_eq!(c.decode(hex).unwrap(), v);
        assert_eq!(c.decode_hex(&"00".repeat(32)).unwrap(), Value::Array(vec![]));
    }

    #[test]
    fn dynamic_elements() {
        let c = coder("string[2]");
        assert!(c.dynamic());
        assert_eq!(c.head_words(), 1);
        let v = Value::Array(vec![Value::from("ab"), Value::from("cd")]);
        let hex = c.encode(&v).unwrap();
        assert_eq!(hex.len(), 6 * crate::parse::WORD_BYTES);
        assert_eq!(hex.as_bytes()[crate::parse::WORD_BYTES - 1], 0x40);
        assert_eq!(hex.as_bytes()[2 * crate::parse::WORD_BYTES - 1], 0x80);
        assert_eq!(c.decode(hex).unwrap(), v);
    }

    #[test]
    fn nested_dynamic() {
        let c = coder("string[2][]");
        let pair = |a: &str, b: &str| Value::Array(vec![Value::from(a), Value::from(b)]);
        let v = Value::Array(vec![pair("a", "b"), pair("", "cd")]);
        assert_eq!(c.decode(c.encode(&v).unwrap()).unwrap(), v);
    }

    #[test]
    fn oversized_count_rejected() {
        let c = coder("uint8[]");
        let hex = format!("0x{}{}", "00".repeat(31), "05");
        let err = c.decode_hex(&hex).unwrap_err();
        assert!(err.to_string().starts_with("stream index error"));
    }

    #[test]
    fn zero_width_elements() {
        let c = coder("null[2]");
        let v = Value::Array(vec![Value::Null, Value::Null]);
        let hex = c.encode(&v).unwrap();
        assert!(hex.is_empty());
        assert_eq!(c.decode(hex).unwrap(), v);
        assert!(matches!(
            get_coder(&Descriptor::new("null[]")),
            Err(CoderError::Descriptor(_))
        ));
    }
}
