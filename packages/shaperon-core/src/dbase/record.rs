//! One table row: deletion flag followed by the field values.

use std::io::{BufRead, Write};

use byteorder::{ReadBytesExt, WriteBytesExt};

use super::error::DbaseError;
use super::field::DbaseField;
use super::value::DbaseFieldValue;

const LIVE_FLAG: u8 = 0x20;
const DELETED_FLAG: u8 = 0x2A;

/// A row of field values in descriptor order.
#[derive(Debug, Clone, PartialEq)]
pub struct DbaseRecord {
    deleted: bool,
    values: Vec<DbaseFieldValue>,
}

impl DbaseRecord {
    /// Creates a live record of null values, one per field.
    pub fn new(fields: &[DbaseField]) -> Result<Self, DbaseError> {
        let values = fields
            .iter()
            .cloned()
            .map(DbaseFieldValue::for_field)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            deleted: false,
            values,
        })
    }

    /// Creates a live record from values built by the caller.
    pub fn from_values(values: Vec<DbaseFieldValue>) -> Self {
        Self {
            deleted: false,
            values,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn set_deleted(&mut self, deleted: bool) {
        self.deleted = deleted;
    }

    pub fn values(&self) -> &[DbaseFieldValue] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [DbaseFieldValue] {
        &mut self.values
    }

    /// Record length in bytes, deletion flag included.
    pub fn length(&self) -> usize {
        1 + self
            .values
            .iter()
            .map(|value| usize::from(value.field().length()))
            .sum::<usize>()
    }

    pub fn read<R: BufRead>(&mut self, reader: &mut R) -> Result<(), DbaseError> {
        self.deleted = match reader.read_u8()? {
            LIVE_FLAG => false,
            DELETED_FLAG => true,
            flag => return Err(DbaseError::UnexpectedRecordFlag { flag }),
        };

        for value in &mut self.values {
            value.read(reader)?;
        }
        Ok(())
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), DbaseError> {
        writer.write_u8(if self.deleted { DELETED_FLAG } else { LIVE_FLAG })?;
        for value in &self.values {
            value.write(writer)?;
        }
        Ok(())
    }
}
