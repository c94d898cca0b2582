//! Fixed-width slot I/O shared by the field value codecs.

use std::io::{BufRead, Read, Write};

use super::error::DbaseError;
use super::field::DbaseField;

/// Byte that marks a physically blank (deleted) field slot.
pub(crate) const NULL_SENTINEL: u8 = 0;

const PADDING: u8 = b' ';

/// Returns the next byte without consuming it, or `None` at end of stream.
pub(crate) fn peek_byte<R: BufRead>(reader: &mut R) -> Result<Option<u8>, DbaseError> {
    let buffer = reader.fill_buf()?;
    Ok(buffer.first().copied())
}

/// Reads exactly `field.length()` bytes.
///
/// # Returns
/// `Err(DbaseError::TruncatedStream)` naming the field and the shortfall when the
/// stream ends early.
pub(crate) fn read_slot<R: BufRead>(
    reader: &mut R,
    field: &DbaseField,
) -> Result<Vec<u8>, DbaseError> {
    let expected = usize::from(field.length());
    let mut buffer = Vec::with_capacity(expected);
    let available = reader
        .by_ref()
        .take(expected as u64)
        .read_to_end(&mut buffer)?;

    if available < expected {
        return Err(DbaseError::TruncatedStream {
            field: field.name().to_string(),
            expected,
            available,
        });
    }

    Ok(buffer)
}

/// Consumes the slot if it starts with the null sentinel.
///
/// # Returns
/// `true` when a null slot was consumed, `false` when the stream was left untouched.
pub(crate) fn skip_null_slot<R: BufRead>(
    reader: &mut R,
    field: &DbaseField,
) -> Result<bool, DbaseError> {
    if peek_byte(reader)? == Some(NULL_SENTINEL) {
        read_slot(reader, field)?;
        return Ok(true);
    }
    Ok(false)
}

/// Reads a value right-aligned in its slot, stripping the leading padding.
pub(crate) fn read_left_padded_string<R: BufRead>(
    reader: &mut R,
    field: &DbaseField,
) -> Result<String, DbaseError> {
    let slot = read_slot(reader, field)?;
    let start = slot
        .iter()
        .position(|&b| b != PADDING)
        .unwrap_or(slot.len());
    Ok(decode_latin1(&slot[start..]))
}

/// Reads a value left-aligned in its slot, stripping the trailing padding.
pub(crate) fn read_right_padded_string<R: BufRead>(
    reader: &mut R,
    field: &DbaseField,
) -> Result<String, DbaseError> {
    let slot = read_slot(reader, field)?;
    let end = slot
        .iter()
        .rposition(|&b| b != PADDING)
        .map_or(0, |last| last + 1);
    Ok(decode_latin1(&slot[..end]))
}

/// Writes `text` right-aligned in a slot of `field.length()` bytes.
///
/// The slot is rendered in full before anything reaches the writer.
pub(crate) fn write_left_padded<W: Write>(
    writer: &mut W,
    text: &[u8],
    field: &DbaseField,
) -> Result<(), DbaseError> {
    let length = usize::from(field.length());
    let mut slot = vec![PADDING; length.saturating_sub(text.len())];
    slot.extend_from_slice(&text[..text.len().min(length)]);
    writer.write_all(&slot)?;
    Ok(())
}

/// Writes `text` left-aligned in a slot of `field.length()` bytes.
pub(crate) fn write_right_padded<W: Write>(
    writer: &mut W,
    text: &[u8],
    field: &DbaseField,
) -> Result<(), DbaseError> {
    let length = usize::from(field.length());
    let mut slot = text[..text.len().min(length)].to_vec();
    slot.resize(length, PADDING);
    writer.write_all(&slot)?;
    Ok(())
}

/// Writes a blank slot of `field.length()` spaces.
pub(crate) fn write_blank<W: Write>(writer: &mut W, field: &DbaseField) -> Result<(), DbaseError> {
    writer.write_all(&vec![PADDING; usize::from(field.length())])?;
    Ok(())
}

pub(crate) fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Encodes `text` as Latin-1, returning the first character outside its range on failure.
pub(crate) fn encode_latin1(text: &str) -> Result<Vec<u8>, char> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).map_err(|_| c))
        .collect()
}
