//! The 100 byte header shared by the primary and index streams.

use std::io::{Read, Write};

use byteorder::{BigEndian, LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};

use super::bounding_box::BoundingBox3D;
use super::error::ShapeError;
use super::record::ShapeIndexRecord;
use super::shape_type::ShapeType;
use super::units::WordLength;

const FILE_CODE: i32 = 9994;
const VERSION: i32 = 1000;
const UNUSED_FIELD_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeFileHeader {
    /// Length of the whole file in words, header included
    pub file_length: WordLength,
    pub shape_type: ShapeType,
    pub bounding_box: BoundingBox3D,
}

impl ShapeFileHeader {
    pub const LENGTH: WordLength = WordLength::from_words(50);

    pub fn new(file_length: WordLength, shape_type: ShapeType, bounding_box: BoundingBox3D) -> Self {
        Self {
            file_length,
            shape_type,
            bounding_box,
        }
    }

    /// Header of the index stream holding `record_count` entries.
    ///
    /// # Arguments
    /// * `record_count` - Number of index entries following the header
    ///
    /// # Returns
    /// The same shape type and extent with a file length of `50 + 4 * record_count` words.
    pub fn for_index(&self, record_count: usize) -> Result<Self, ShapeError> {
        let entries = u64::try_from(record_count)
            .ok()
            .and_then(|count| count.checked_mul(ShapeIndexRecord::LENGTH.to_byte_length()))
            .ok_or_else(|| ShapeError::InvalidLength {
                message: format!("{record_count} index entries exceed the maximum file length"),
            })?;
        let file_length = Self::LENGTH.plus(WordLength::from_byte_length(entries)?)?;
        Ok(Self {
            file_length,
            ..*self
        })
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), ShapeError> {
        writer.write_i32::<BigEndian>(FILE_CODE)?;
        for _ in 0..UNUSED_FIELD_COUNT {
            writer.write_i32::<BigEndian>(0)?;
        }
        writer.write_i32::<BigEndian>(self.file_length.to_i32())?;
        writer.write_i32::<LittleEndian>(VERSION)?;
        writer.write_i32::<LittleEndian>(self.shape_type.code())?;
        self.bounding_box.write(writer)
    }

    pub fn read<R: Read>(reader: &mut R) -> Result<Self, ShapeError> {
        let file_code = reader.read_i32::<BigEndian>()?;
        if file_code != FILE_CODE {
            return Err(ShapeError::InvalidFileCode { found: file_code });
        }
        for _ in 0..UNUSED_FIELD_COUNT {
            reader.read_i32::<BigEndian>()?;
        }
        let file_length = WordLength::new(reader.read_i32::<BigEndian>()?)?;

        let version = reader.read_i32::<LittleEndian>()?;
        if version != VERSION {
            tracing::warn!(version, expected = VERSION, "unexpected shape file version");
        }

        let shape_type = ShapeType::try_from(reader.read_i32::<LittleEndian>()?)?;
        let bounding_box = BoundingBox3D::read(reader)?;
        Ok(Self {
            file_length,
            shape_type,
            bounding_box,
        })
    }
}
