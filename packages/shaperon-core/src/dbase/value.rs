//! Sum type over all field value codecs.

use std::io::{BufRead, Write};
use std::sync::Arc;

use super::character::DbaseCharacter;
use super::date::DbaseDate;
use super::decimal::DbaseDecimal;
use super::double::DbaseDouble;
use super::error::DbaseError;
use super::field::{DbaseField, DbaseFieldType};
use super::int32::DbaseInt32;
use super::logical::DbaseLogical;
use super::single::DbaseSingle;

/// A typed, nullable field value of any supported kind.
#[derive(Debug, Clone, PartialEq)]
pub enum DbaseFieldValue {
    Int32(DbaseInt32),
    Single(DbaseSingle),
    Double(DbaseDouble),
    Decimal(DbaseDecimal),
    Character(DbaseCharacter),
    Date(DbaseDate),
    Logical(DbaseLogical),
}

impl DbaseFieldValue {
    /// Creates a null value of the natural kind for `field`.
    ///
    /// Number and float fields without decimals that fit
    /// [`DbaseInt32::MAXIMUM_INTEGER_DIGITS`] map to [`DbaseInt32`]. Wider or
    /// fractional number fields map to [`DbaseDecimal`], float fields to
    /// [`DbaseSingle`].
    ///
    /// # Returns
    /// `Err(DbaseError::UnsupportedField)` for number fields longer than
    /// [`DbaseDecimal::MAXIMUM_LENGTH`] and float fields longer than
    /// [`DbaseSingle::MAXIMUM_LENGTH`], which no value type can hold without
    /// losing digits.
    pub fn for_field(field: impl Into<Arc<DbaseField>>) -> Result<Self, DbaseError> {
        let field = field.into();
        let value = match field.field_type() {
            DbaseFieldType::Character => DbaseFieldValue::Character(DbaseCharacter::new(field)?),
            DbaseFieldType::Date => DbaseFieldValue::Date(DbaseDate::new(field)?),
            DbaseFieldType::Logical => DbaseFieldValue::Logical(DbaseLogical::new(field)?),
            DbaseFieldType::Number | DbaseFieldType::Float
                if field.decimal_count() == 0
                    && field.length() <= DbaseInt32::MAXIMUM_INTEGER_DIGITS =>
            {
                DbaseFieldValue::Int32(DbaseInt32::new(field)?)
            }
            DbaseFieldType::Number if field.length() <= DbaseDecimal::MAXIMUM_LENGTH => {
                DbaseFieldValue::Decimal(DbaseDecimal::new(field)?)
            }
            DbaseFieldType::Float if field.length() <= DbaseSingle::MAXIMUM_LENGTH => {
                DbaseFieldValue::Single(DbaseSingle::new(field)?)
            }
            field_type @ (DbaseFieldType::Number | DbaseFieldType::Float) => {
                return Err(DbaseError::UnsupportedField {
                    field: field.name().to_string(),
                    field_type,
                    length: field.length(),
                    decimal_count: field.decimal_count(),
                });
            }
        };
        Ok(value)
    }

    pub fn field(&self) -> &DbaseField {
        match self {
            DbaseFieldValue::Int32(value) => value.field(),
            DbaseFieldValue::Single(value) => value.field(),
            DbaseFieldValue::Double(value) => value.field(),
            DbaseFieldValue::Decimal(value) => value.field(),
            DbaseFieldValue::Character(value) => value.field(),
            DbaseFieldValue::Date(value) => value.field(),
            DbaseFieldValue::Logical(value) => value.field(),
        }
    }

    pub fn is_null(&self) -> bool {
        match self {
            DbaseFieldValue::Int32(value) => value.value().is_none(),
            DbaseFieldValue::Single(value) => value.value().is_none(),
            DbaseFieldValue::Double(value) => value.value().is_none(),
            DbaseFieldValue::Decimal(value) => value.value().is_none(),
            DbaseFieldValue::Character(value) => value.value().is_none(),
            DbaseFieldValue::Date(value) => value.value().is_none(),
            DbaseFieldValue::Logical(value) => value.value().is_none(),
        }
    }

    pub fn reset(&mut self) {
        match self {
            DbaseFieldValue::Int32(value) => value.reset(),
            DbaseFieldValue::Single(value) => value.reset(),
            DbaseFieldValue::Double(value) => value.reset(),
            DbaseFieldValue::Decimal(value) => value.reset(),
            DbaseFieldValue::Character(value) => value.reset(),
            DbaseFieldValue::Date(value) => value.reset(),
            DbaseFieldValue::Logical(value) => value.reset(),
        }
    }

    pub fn read<R: BufRead>(&mut self, reader: &mut R) -> Result<(), DbaseError> {
        match self {
            DbaseFieldValue::Int32(value) => value.read(reader),
            DbaseFieldValue::Single(value) => value.read(reader),
            DbaseFieldValue::Double(value) => value.read(reader),
            DbaseFieldValue::Decimal(value) => value.read(reader),
            DbaseFieldValue::Character(value) => value.read(reader),
            DbaseFieldValue::Date(value) => value.read(reader),
            DbaseFieldValue::Logical(value) => value.read(reader),
        }
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), DbaseError> {
        match self {
            DbaseFieldValue::Int32(value) => value.write(writer),
            DbaseFieldValue::Single(value) => value.write(writer),
            DbaseFieldValue::Double(value) => value.write(writer),
            DbaseFieldValue::Decimal(value) => value.write(writer),
            DbaseFieldValue::Character(value) => value.write(writer),
            DbaseFieldValue::Date(value) => value.write(writer),
            DbaseFieldValue::Logical(value) => value.write(writer),
        }
    }
}

impl From<DbaseInt32> for DbaseFieldValue {
    fn from(value: DbaseInt32) -> Self {
        DbaseFieldValue::Int32(value)
    }
}

impl From<DbaseSingle> for DbaseFieldValue {
    fn from(value: DbaseSingle) -> Self {
        DbaseFieldValue::Single(value)
    }
}

impl From<DbaseDouble> for DbaseFieldValue {
    fn from(value: DbaseDouble) -> Self {
        DbaseFieldValue::Double(value)
    }
}

impl From<DbaseDecimal> for DbaseFieldValue {
    fn from(value: DbaseDecimal) -> Self {
        DbaseFieldValue::Decimal(value)
    }
}

impl From<DbaseCharacter> for DbaseFieldValue {
    fn from(value: DbaseCharacter) -> Self {
        DbaseFieldValue::Character(value)
    }
}

impl From<DbaseDate> for DbaseFieldValue {
    fn from(value: DbaseDate) -> Self {
        DbaseFieldValue::Date(value)
    }
}

impl From<DbaseLogical> for DbaseFieldValue {
    fn from(value: DbaseLogical) -> Self {
        DbaseFieldValue::Logical(value)
    }
}
