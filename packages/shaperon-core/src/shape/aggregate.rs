//! Running totals over the records of one primary stream.
//!
//! Offsets in the index stream must match the records' positions in the
//! primary stream byte for byte. Folding records through a
//! [`ShapeFileAggregate`] yields those offsets along with the file length and
//! extent that go into both headers.

use std::io::{self, Read};

use super::bounding_box::BoundingBox3D;
use super::error::ShapeError;
use super::header::ShapeFileHeader;
use super::record::{ShapeIndexRecord, ShapeRecord, ShapeRecordHeader};
use super::shape_type::ShapeType;
use super::units::{WordLength, WordOffset};

#[derive(Debug, Clone, PartialEq)]
pub struct ShapeFileAggregate {
    shape_type: ShapeType,
    next_offset: WordOffset,
    file_length: WordLength,
    bounding_box: BoundingBox3D,
    index_records: Vec<ShapeIndexRecord>,
}

impl ShapeFileAggregate {
    pub fn new(shape_type: ShapeType) -> Self {
        Self {
            shape_type,
            next_offset: ShapeIndexRecord::INITIAL_OFFSET,
            file_length: ShapeFileHeader::LENGTH,
            bounding_box: BoundingBox3D::EMPTY,
            index_records: Vec::new(),
        }
    }

    /// Folds all `records` into a new aggregate.
    pub fn from_records<'a, I>(shape_type: ShapeType, records: I) -> Result<Self, ShapeError>
    where
        I: IntoIterator<Item = &'a ShapeRecord>,
    {
        let mut aggregate = Self::new(shape_type);
        for record in records {
            aggregate.push(record)?;
        }
        Ok(aggregate)
    }

    /// Adds `record` at the current offset and returns its index entry.
    ///
    /// Null content fits any file; other content must match the file's shape type.
    pub fn push(&mut self, record: &ShapeRecord) -> Result<ShapeIndexRecord, ShapeError> {
        let content = record.content();
        let found = content.shape_type();
        if found != ShapeType::NullShape && found != self.shape_type {
            return Err(ShapeError::ShapeTypeMismatch {
                expected: self.shape_type,
                found,
            });
        }

        let length = record.length();
        let index_record = record.index_at(self.next_offset);
        let next_offset = self.next_offset.plus(length)?;
        let file_length = self.file_length.plus(length)?;

        self.next_offset = next_offset;
        self.file_length = file_length;
        self.bounding_box = self.bounding_box.expand_with(&content.bounding_box());
        self.index_records.push(index_record);
        Ok(index_record)
    }

    pub fn shape_type(&self) -> ShapeType {
        self.shape_type
    }

    pub fn record_count(&self) -> usize {
        self.index_records.len()
    }

    pub fn index_records(&self) -> &[ShapeIndexRecord] {
        &self.index_records
    }

    /// Length of the primary stream in words, header included.
    pub fn file_length(&self) -> WordLength {
        self.file_length
    }

    pub fn bounding_box(&self) -> BoundingBox3D {
        self.bounding_box
    }

    /// Header of the primary stream.
    pub fn shape_header(&self) -> ShapeFileHeader {
        ShapeFileHeader::new(self.file_length, self.shape_type, self.bounding_box)
    }

    /// Header of the index stream.
    pub fn index_header(&self) -> Result<ShapeFileHeader, ShapeError> {
        self.shape_header().for_index(self.record_count())
    }
}

/// Rebuilds the index entries of a primary stream from its record headers.
///
/// Record contents are skipped, not decoded.
///
/// # Returns
/// The primary header and one index entry per record, in stream order.
pub fn shape_index_from_primary<R: Read>(
    reader: &mut R,
) -> Result<(ShapeFileHeader, Vec<ShapeIndexRecord>), ShapeError> {
    let header = ShapeFileHeader::read(reader)?;
    let end = WordOffset::from_words(header.file_length.to_i32());

    let mut index_records = Vec::new();
    let mut offset = ShapeIndexRecord::INITIAL_OFFSET;
    while offset < end {
        let record_header = ShapeRecordHeader::read(reader)?;
        let content_bytes = record_header.content_length.to_byte_length();
        let skipped = io::copy(&mut reader.by_ref().take(content_bytes), &mut io::sink())?;
        if skipped < content_bytes {
            return Err(ShapeError::InvalidLength {
                message: format!(
                    "record {} declares {content_bytes} content bytes but the stream ended after {skipped}",
                    record_header.record_number
                ),
            });
        }

        index_records.push(ShapeIndexRecord {
            offset,
            content_length: record_header.content_length,
        });
        offset = offset
            .plus(ShapeRecordHeader::LENGTH)?
            .plus(record_header.content_length)?;
    }

    if offset != end {
        return Err(ShapeError::InvalidLength {
            message: format!("the records end at word {offset} but the header declares {end} words"),
        });
    }

    tracing::debug!(records = index_records.len(), "rebuilt index from shape stream");
    Ok((header, index_records))
}
