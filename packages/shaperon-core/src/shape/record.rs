//! Shape records and the index entries pointing at them.

use std::io::{Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};

use super::content::ShapeContent;
use super::error::ShapeError;
use super::units::{RecordNumber, WordLength, WordOffset};

/// Record number and content length preceding every record, both big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeRecordHeader {
    pub record_number: RecordNumber,
    pub content_length: WordLength,
}

impl ShapeRecordHeader {
    pub const LENGTH: WordLength = WordLength::from_words(4);

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), ShapeError> {
        writer.write_i32::<BigEndian>(self.record_number.to_i32())?;
        writer.write_i32::<BigEndian>(self.content_length.to_i32())?;
        Ok(())
    }

    pub fn read<R: Read>(reader: &mut R) -> Result<Self, ShapeError> {
        let record_number = RecordNumber::new(reader.read_i32::<BigEndian>()?)?;
        let content_length = WordLength::new(reader.read_i32::<BigEndian>()?)?;
        Ok(Self {
            record_number,
            content_length,
        })
    }
}

/// A numbered geometry payload of the primary stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeRecord {
    header: ShapeRecordHeader,
    content: ShapeContent,
}

impl ShapeRecord {
    /// Built through [`ShapeContent::record_as`], which validates the length.
    pub(crate) fn new(header: ShapeRecordHeader, content: ShapeContent) -> Self {
        Self { header, content }
    }

    pub fn header(&self) -> &ShapeRecordHeader {
        &self.header
    }

    pub fn content(&self) -> &ShapeContent {
        &self.content
    }

    /// Total on-disk length in words, record header included.
    pub fn length(&self) -> WordLength {
        WordLength::from_words(ShapeRecordHeader::LENGTH.to_i32() + self.header.content_length.to_i32())
    }

    /// Index entry for this record when it starts at `offset`.
    pub fn index_at(&self, offset: WordOffset) -> ShapeIndexRecord {
        ShapeIndexRecord {
            offset,
            content_length: self.header.content_length,
        }
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), ShapeError> {
        self.header.write(writer)?;
        self.content.write(writer)
    }

    pub fn read<R: Read>(reader: &mut R) -> Result<Self, ShapeError> {
        let header = ShapeRecordHeader::read(reader)?;
        header.content_length.plus(ShapeRecordHeader::LENGTH)?;
        let content = ShapeContent::read(reader, header.content_length)?;
        Ok(Self { header, content })
    }
}

/// Offset and content length of one record, as stored in the index stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeIndexRecord {
    pub offset: WordOffset,
    pub content_length: WordLength,
}

impl ShapeIndexRecord {
    /// Offset of the first record: right after the 100 byte file header.
    pub const INITIAL_OFFSET: WordOffset = WordOffset::from_words(50);
    pub const LENGTH: WordLength = WordLength::from_words(4);

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), ShapeError> {
        writer.write_i32::<BigEndian>(self.offset.to_i32())?;
        writer.write_i32::<BigEndian>(self.content_length.to_i32())?;
        Ok(())
    }

    pub fn read<R: Read>(reader: &mut R) -> Result<Self, ShapeError> {
        let offset = WordOffset::new(reader.read_i32::<BigEndian>()?)?;
        let content_length = WordLength::new(reader.read_i32::<BigEndian>()?)?;
        Ok(Self {
            offset,
            content_length,
        })
    }
}
