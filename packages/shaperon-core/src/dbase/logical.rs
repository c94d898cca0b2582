//! Logical (boolean) field value.

use std::io::{BufRead, Write};
use std::sync::Arc;

use super::error::DbaseError;
use super::field::{DbaseField, DbaseFieldType};
use super::io_utils;

/// Nullable `bool` bound to a logical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbaseLogical {
    field: Arc<DbaseField>,
    value: Option<bool>,
}

impl DbaseLogical {
    pub fn new(field: impl Into<Arc<DbaseField>>) -> Result<Self, DbaseError> {
        let field = field.into();
        if field.field_type() != DbaseFieldType::Logical {
            return Err(DbaseError::IncompatibleField {
                field: field.name().to_string(),
                wrapper: "logical",
                message: format!("the field type must be logical, got {}", field.field_type()),
            });
        }
        Ok(Self { field, value: None })
    }

    pub fn with_value(field: impl Into<Arc<DbaseField>>, value: Option<bool>) -> Result<Self, DbaseError> {
        let mut logical = Self::new(field)?;
        logical.set_value(value);
        Ok(logical)
    }

    pub fn field(&self) -> &DbaseField {
        &self.field
    }

    pub fn value(&self) -> Option<bool> {
        self.value
    }

    pub fn require_value(&self) -> Result<bool, DbaseError> {
        self.value.ok_or_else(|| DbaseError::NullValue {
            field: self.field.name().to_string(),
        })
    }

    /// Every value fits a logical slot.
    pub fn accepts_value(&self, _value: Option<bool>) -> bool {
        true
    }

    pub fn set_value(&mut self, value: Option<bool>) {
        self.value = value;
    }

    pub fn reset(&mut self) {
        self.value = None;
    }

    pub fn read<R: BufRead>(&mut self, reader: &mut R) -> Result<(), DbaseError> {
        if io_utils::skip_null_slot(reader, &self.field)? {
            self.value = None;
            return Ok(());
        }

        let slot = io_utils::read_slot(reader, &self.field)?;
        self.value = match slot[0] {
            b'T' | b't' | b'Y' | b'y' => Some(true),
            b'F' | b'f' | b'N' | b'n' => Some(false),
            b'?' | b' ' => None,
            other => {
                tracing::debug!(field = %self.field.name(), byte = other, "malformed logical read as null");
                None
            }
        };
        Ok(())
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), DbaseError> {
        let flag: &[u8] = match self.value {
            Some(true) => b"T",
            Some(false) => b"F",
            None => b" ",
        };
        writer.write_all(flag)?;
        Ok(())
    }
}
