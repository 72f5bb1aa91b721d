//! Byte-sequence and text coders
//!
//! Fixed-length `bytes<N>` occupy a single word, left-aligned and
//! zero-padded on the right. Dynamic `bytes` and `string` are written as a
//! length word holding the byte count, followed by the payload right-padded
//! to a whole number of words.

use crate::conv::target::Target;
use crate::conv::{Codec, CoderResult};
use crate::error::WidthError;
use crate::parse::{words_for, WordStream, WORD_BYTES};
use crate::value::Value;

use super::check_padding;
use super::int::{usize_to_word, word_to_usize};

/// Appends `bytes` as a length word followed by the padded payload.
pub(crate) fn write_dynamic_bytes<U: Target>(bytes: &[u8], buf: &mut U) -> usize {
    let nwords = words_for(bytes.len());
    buf.anticipate((nwords + 1) * WORD_BYTES);
    let mut n = buf.push_word(usize_to_word(bytes.len()));
    for chunk in bytes.chunks(WORD_BYTES) {
        let mut word = [0u8; WORD_BYTES];
        word[..chunk.len()].copy_from_slice(chunk);
        n += buf.push_word(word);
    }
    n
}

/// Reads a length word and the payload following it, leaving the cursor
/// after the last payload word.
pub(crate) fn read_dynamic_bytes(stream: &mut WordStream) -> CoderResult<Vec<u8>> {
    let len = word_to_usize(&stream.read_word()?)?;
    let start = stream.tell();
    let nwords = words_for(len);
    let payload = stream.read_bytes(start, len)?.to_vec();
    let padding = stream.read_bytes(start, nwords * WORD_BYTES)?;
    check_padding(&padding[len..], 0)?;
    stream.skip(nwords)?;
    Ok(payload)
}

/// Coder for `bytes<N>` (`size == Some(N)`) and `bytes` (`size == None`)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BytesCoder {
    size: Option<usize>,
}

impl BytesCoder {
    pub(crate) fn new(size: Option<usize>) -> Self {
        Self { size }
    }
}

impl Codec for BytesCoder {
    fn type_name(&self) -> String {
        match self.size {
            Some(n) => format!("bytes{n}"),
            None => "bytes".into(),
        }
    }

    fn dynamic(&self) -> bool {
        self.size.is_none()
    }

    fn size(&self) -> Option<usize> {
        self.size
    }

    fn head_words(&self) -> usize {
        1
    }

    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> CoderResult<usize> {
        let bytes = value.to_byte_vec()?;
        match self.size {
            None => Ok(write_dynamic_bytes(&bytes, buf)),
            Some(exact) if exact != bytes.len() => Err(WidthError::WrongWidth {
                exact,
                actual: bytes.len(),
            }
            .into()),
            Some(exact) => {
                let mut word = [0u8; WORD_BYTES];
                word[..exact].copy_from_slice(&bytes);
                Ok(buf.push_word(word))
            }
        }
    }

    fn parse(&self, stream: &mut WordStream) -> CoderResult<Value> {
        match self.size {
            None => Ok(Value::Bytes(read_dynamic_bytes(stream)?)),
            Some(n) => {
                let word = stream.read_word()?;
                let (data, padding) = word.split_at(n);
                check_padding(padding, 0)?;
                Ok(Value::Bytes(data.to_vec()))
            }
        }
    }
}

/// Coder for `string`, UTF-8 text in the dynamic `bytes` layout
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StringCoder;

impl Codec for StringCoder {
    fn type_name(&self) -> String {
        "string".into()
    }

    fn dynamic(&self) -> bool {
        true
    }

    fn size(&self) -> Option<usize> {
        None
    }

    fn head_words(&self) -> usize {
        1
    }

    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> CoderResult<usize> {
        match value {
            Value::String(s) => Ok(write_dynamic_bytes(s.as_bytes(), buf)),
            other => Err(other.unexpected("string")),
        }
    }

    fn parse(&self, stream: &mut WordStream) -> CoderResult<Value> {
        let bytes = read_dynamic_bytes(stream)?;
        Ok(Value::String(String::from_utf8(bytes)?))
    }
}
