//! Head/tail layout shared by tuples and arrays
//!
//! A sequence of components is laid out as a *head* region holding, in
//! order, either the full encoding of each static component or a single
//! offset word for each dynamic one, followed by a *tail* region holding
//! the encodings of the dynamic components. Offsets are byte distances
//! from the first byte of the head region.

use crate::conv::target::Target;
use crate::conv::{Codec, CoderResult};
use crate::hexstring::util::hex_of_bytes;
use crate::parse::error::StreamError;
use crate::parse::{Word, WordStream, WORD_BYTES};
use crate::value::Value;

use super::int::{usize_to_word, word_to_usize};
use super::Coder;

/// Appends the head/tail encoding of `items` to `buf`.
pub(crate) fn write_sequence<U: Target>(
    items: &[(&Coder, &Value)],
    buf: &mut U,
) -> CoderResult<usize> {
    let head_bytes: usize = items
        .iter()
        .map(|(coder, _)| coder.head_words().saturating_mul(WORD_BYTES))
        .sum();
    let mut tail: Vec<u8> = Vec::new();
    let mut n = 0;
    buf.anticipate(head_bytes);
    for (coder, value) in items {
        if coder.dynamic() {
            n += buf.push_word(usize_to_word(head_bytes + tail.len()));
            coder.write_to(value, &mut tail)?;
        } else {
            n += coder.write_to(value, buf)?;
        }
    }
    buf.anticipate(tail.len());
    Ok(n + buf.push_all(&tail))
}

/// Converts an offset word read at `base` into an absolute word index.
fn resolve_offset(base: usize, word: &Word) -> CoderResult<usize> {
    let offset = word_to_usize(word)?;
    if offset % WORD_BYTES != 0 {
        return Err(StreamError::InvalidPointer(hex_of_bytes(word)).into());
    }
    match base.checked_add(offset / WORD_BYTES) {
        Some(target) => {
            tracing::trace!(base, offset, target, "resolved tail offset");
            Ok(target)
        }
        None => Err(StreamError::InvalidPointer(hex_of_bytes(word)).into()),
    }
}

/// Reads one value per coder in `coders`, treating the cursor position on
/// entry as the start of the head region.
///
/// On success the cursor is left at the end of the head region. Dynamic
/// components are read by seeking into the tail and back.
pub(crate) fn read_sequence<'a, I>(stream: &mut WordStream, coders: I) -> CoderResult<Vec<Value>>
where
    I: IntoIterator<Item = &'a Coder>,
{
    let coders = coders.into_iter();
    let base = stream.tell();
    let mut values = Vec::with_capacity(coders.size_hint().0.min(stream.remainder()));
    for coder in coders {
        if coder.dynamic() {
            let word = stream.read_word()?;
            let target = resolve_offset(base, &word)?;
            let resume = stream.tell();
            stream.seek(target)?;
            let value = coder.parse(stream);
            stream.seek(resume)?;
            values.push(value?);
        } else {
            values.push(coder.parse(stream)?);
        }
    }
    Ok(values)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coder::get_coder;
    use crate::schema::Descriptor;

    #[test]
    fn offsets_account_for_inline_static_heads() {
        let pair = get_coder(&Descriptor::new("uint8[2]")).unwrap();
        let text = get_coder(&Descriptor::new("string")).unwrap();
        let a = Value::Array(vec![Value::from(1), Value::from(2)]);
        let b = Value::from("x");
        let mut buf: Vec<u8> = Vec::new();
        let n = write_sequence(&[(&pair, &a), (&text, &b)], &mut buf).unwrap();
        assert_eq!(n, buf.len());
        assert_eq!(buf.len(), 5 * WORD_BYTES);
        // offset word sits after the two inline words of the static array
        assert_eq!(buf[3 * WORD_BYTES - 1], 0x60);

        let mut stream = WordStream::from_bytes(buf).unwrap();
        let values = read_sequence(&mut stream, [&pair, &text]).unwrap();
        assert_eq!(values, vec![a, b]);
        assert_eq!(stream.tell(), 3);
    }

    #[test]
    fn unaligned_offset_rejected() {
        let mut word = [0u8; WORD_BYTES];
        word[WORD_BYTES - 1] = 0x21;
        assert!(resolve_offset(0, &word).is_err());
        word[WORD_BYTES - 1] = 0x40;
        assert_eq!(resolve_offset(3, &word).unwrap(), 5);
    }
}
