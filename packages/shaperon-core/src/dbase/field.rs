//! Field descriptor for one fixed-width attribute column.

use std::fmt;
use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use super::error::DbaseError;

/// Largest byte length a field may declare.
pub const MAXIMUM_FIELD_LENGTH: u8 = 254;

/// Size of a field descriptor in the table header, in bytes.
pub const FIELD_DESCRIPTOR_SIZE: usize = 32;

/// Byte terminating the list of field descriptors in the table header.
pub const FIELD_DESCRIPTOR_TERMINATOR: u8 = 0x0D;

/// Field name: 1 to 11 ASCII characters, no NUL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DbaseFieldName(String);

impl DbaseFieldName {
    pub const MAXIMUM_LENGTH: usize = 11;

    /// Creates a field name, trimming surrounding whitespace.
    pub fn new(name: impl AsRef<str>) -> Result<Self, DbaseError> {
        let name = name.as_ref().trim();
        let invalid = |message: String| DbaseError::InvalidField {
            field: name.to_string(),
            message,
        };

        if name.is_empty() {
            return Err(invalid("the name can not be empty".to_string()));
        }
        if name.len() > Self::MAXIMUM_LENGTH {
            return Err(invalid(format!(
                "the name length ({}) must be between 1 and {}",
                name.len(),
                Self::MAXIMUM_LENGTH
            )));
        }
        if !name.bytes().all(|b| b.is_ascii() && b != 0) {
            return Err(invalid(
                "the name must consist of ASCII characters only".to_string(),
            ));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DbaseFieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Declared type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbaseFieldType {
    Character,
    Number,
    Float,
    Date,
    Logical,
}

impl DbaseFieldType {
    /// Type byte stored in the field descriptor.
    pub fn code(self) -> u8 {
        match self {
            DbaseFieldType::Character => b'C',
            DbaseFieldType::Number => b'N',
            DbaseFieldType::Float => b'F',
            DbaseFieldType::Date => b'D',
            DbaseFieldType::Logical => b'L',
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, DbaseFieldType::Number | DbaseFieldType::Float)
    }
}

impl TryFrom<u8> for DbaseFieldType {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            b'C' => Ok(DbaseFieldType::Character),
            b'N' => Ok(DbaseFieldType::Number),
            b'F' => Ok(DbaseFieldType::Float),
            b'D' => Ok(DbaseFieldType::Date),
            b'L' => Ok(DbaseFieldType::Logical),
            other => Err(other),
        }
    }
}

impl fmt::Display for DbaseFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DbaseFieldType::Character => "character",
            DbaseFieldType::Number => "number",
            DbaseFieldType::Float => "float",
            DbaseFieldType::Date => "date",
            DbaseFieldType::Logical => "logical",
        };
        f.write_str(name)
    }
}

/// Byte displacement of a field within a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteOffset(u32);

impl ByteOffset {
    /// Offset of the first field, right after the record's deletion flag.
    pub const INITIAL: ByteOffset = ByteOffset(1);

    pub const fn new(offset: u32) -> Self {
        Self(offset)
    }

    pub fn to_u32(self) -> u32 {
        self.0
    }

    /// Returns the offset `length` bytes further along.
    pub fn plus(self, length: u8) -> Self {
        Self(self.0.saturating_add(u32::from(length)))
    }
}

/// Immutable description of one attribute column.
///
/// Compared and hashed by value: two descriptors with identical attributes
/// are interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DbaseField {
    name: DbaseFieldName,
    field_type: DbaseFieldType,
    offset: ByteOffset,
    length: u8,
    decimal_count: u8,
}

impl DbaseField {
    /// Creates a field descriptor.
    ///
    /// # Arguments
    /// * `name` - Field name
    /// * `field_type` - Declared type
    /// * `offset` - Byte offset within the record
    /// * `length` - Byte length, 1 to 254
    /// * `decimal_count` - Number of decimal digits, only meaningful for numeric types
    ///
    /// # Returns
    /// `Err(DbaseError::InvalidField)` when length or decimal count fall outside the
    /// range allowed for the type.
    pub fn new(
        name: DbaseFieldName,
        field_type: DbaseFieldType,
        offset: ByteOffset,
        length: u8,
        decimal_count: u8,
    ) -> Result<Self, DbaseError> {
        let invalid = |message: String| DbaseError::InvalidField {
            field: name.to_string(),
            message,
        };

        if length == 0 || length > MAXIMUM_FIELD_LENGTH {
            return Err(invalid(format!(
                "the length ({}) must be between 1 and {}",
                length, MAXIMUM_FIELD_LENGTH
            )));
        }

        match field_type {
            DbaseFieldType::Number | DbaseFieldType::Float => {
                // A fractional number needs room for at least "0." in front of its digits.
                if decimal_count != 0 && usize::from(decimal_count) + 2 > usize::from(length) {
                    return Err(invalid(format!(
                        "the decimal count ({}) must be 0 or between 1 and {} for a {} field of length {}",
                        decimal_count,
                        length.saturating_sub(2),
                        field_type,
                        length
                    )));
                }
            }
            DbaseFieldType::Character => {
                if decimal_count != 0 {
                    return Err(invalid(format!(
                        "the decimal count ({}) of a character field must be 0",
                        decimal_count
                    )));
                }
            }
            DbaseFieldType::Date => {
                if length != 8 || decimal_count != 0 {
                    return Err(invalid(format!(
                        "a date field must have length 8 and decimal count 0, got length {} and decimal count {}",
                        length, decimal_count
                    )));
                }
            }
            DbaseFieldType::Logical => {
                if length != 1 || decimal_count != 0 {
                    return Err(invalid(format!(
                        "a logical field must have length 1 and decimal count 0, got length {} and decimal count {}",
                        length, decimal_count
                    )));
                }
            }
        }

        Ok(Self {
            name,
            field_type,
            offset,
            length,
            decimal_count,
        })
    }

    pub fn create_number_field(
        name: DbaseFieldName,
        length: u8,
        decimal_count: u8,
    ) -> Result<Self, DbaseError> {
        Self::new(
            name,
            DbaseFieldType::Number,
            ByteOffset::INITIAL,
            length,
            decimal_count,
        )
    }

    pub fn create_float_field(
        name: DbaseFieldName,
        length: u8,
        decimal_count: u8,
    ) -> Result<Self, DbaseError> {
        Self::new(
            name,
            DbaseFieldType::Float,
            ByteOffset::INITIAL,
            length,
            decimal_count,
        )
    }

    pub fn create_character_field(name: DbaseFieldName, length: u8) -> Result<Self, DbaseError> {
        Self::new(
            name,
            DbaseFieldType::Character,
            ByteOffset::INITIAL,
            length,
            0,
        )
    }

    pub fn create_date_field(name: DbaseFieldName) -> Result<Self, DbaseError> {
        Self::new(name, DbaseFieldType::Date, ByteOffset::INITIAL, 8, 0)
    }

    pub fn create_logical_field(name: DbaseFieldName) -> Result<Self, DbaseError> {
        Self::new(name, DbaseFieldType::Logical, ByteOffset::INITIAL, 1, 0)
    }

    /// Returns a copy of this descriptor positioned at `offset`.
    pub fn at(&self, offset: ByteOffset) -> Self {
        Self {
            offset,
            ..self.clone()
        }
    }

    /// Returns a copy of this descriptor positioned right after `previous`.
    pub fn after(&self, previous: &DbaseField) -> Self {
        self.at(previous.end_offset())
    }

    pub fn name(&self) -> &DbaseFieldName {
        &self.name
    }

    pub fn field_type(&self) -> DbaseFieldType {
        self.field_type
    }

    pub fn offset(&self) -> ByteOffset {
        self.offset
    }

    pub fn length(&self) -> u8 {
        self.length
    }

    pub fn decimal_count(&self) -> u8 {
        self.decimal_count
    }

    /// Returns the offset of the byte following this field.
    pub fn end_offset(&self) -> ByteOffset {
        self.offset.plus(self.length)
    }

    /// Writes the 32-byte descriptor as stored in the table header.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), DbaseError> {
        let mut name = [0u8; DbaseFieldName::MAXIMUM_LENGTH];
        name[..self.name.as_str().len()].copy_from_slice(self.name.as_str().as_bytes());

        let mut buffer = Vec::with_capacity(FIELD_DESCRIPTOR_SIZE);
        buffer.extend_from_slice(&name);
        buffer.push(self.field_type.code());
        buffer.write_u32::<LittleEndian>(self.offset.to_u32())?;
        buffer.push(self.length);
        buffer.push(self.decimal_count);
        buffer.resize(FIELD_DESCRIPTOR_SIZE, 0);

        writer.write_all(&buffer)?;
        Ok(())
    }

    /// Reads a 32-byte descriptor as stored in the table header.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self, DbaseError> {
        let mut raw_name = [0u8; DbaseFieldName::MAXIMUM_LENGTH];
        reader.read_exact(&mut raw_name)?;
        let name_length = raw_name
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(raw_name.len());
        let name = DbaseFieldName::new(String::from_utf8_lossy(&raw_name[..name_length]))?;

        let code = reader.read_u8()?;
        let field_type =
            DbaseFieldType::try_from(code).map_err(|code| DbaseError::InvalidField {
                field: name.to_string(),
                message: format!("unknown field type 0x{:02X}", code),
            })?;
        let offset = ByteOffset::new(reader.read_u32::<LittleEndian>()?);
        let length = reader.read_u8()?;
        let decimal_count = reader.read_u8()?;

        let mut reserved = [0u8; 14];
        reader.read_exact(&mut reserved)?;

        Self::new(name, field_type, offset, length, decimal_count)
    }
}

impl fmt::Display for DbaseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}({},{})",
            self.name, self.field_type, self.length, self.decimal_count
        )
    }
}
