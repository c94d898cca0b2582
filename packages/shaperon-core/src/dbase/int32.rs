//! 32-bit integer field value.

use std::io::{BufRead, Write};
use std::sync::Arc;

use super::error::DbaseError;
use super::field::DbaseField;
use super::io_utils;
use super::numeric;

/// Nullable `i32` bound to a number or float field without decimals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbaseInt32 {
    field: Arc<DbaseField>,
    value: Option<i32>,
}

impl DbaseInt32 {
    pub const MAXIMUM_INTEGER_DIGITS: u8 = 10;

    /// Creates a null value bound to `field`.
    ///
    /// # Returns
    /// `Err(DbaseError::IncompatibleField)` unless `field` is a number or float
    /// field with a decimal count of 0.
    pub fn new(field: impl Into<Arc<DbaseField>>) -> Result<Self, DbaseError> {
        let field = field.into();

        if !field.field_type().is_numeric() {
            return Err(DbaseError::IncompatibleField {
                field: field.name().to_string(),
                wrapper: "integer",
                message: format!(
                    "the field type must be either number or float, got {}",
                    field.field_type()
                ),
            });
        }

        if field.decimal_count() != 0 {
            return Err(DbaseError::IncompatibleField {
                field: field.name().to_string(),
                wrapper: "integer",
                message: format!(
                    "the decimal count must be 0, got {}",
                    field.decimal_count()
                ),
            });
        }

        Ok(Self { field, value: None })
    }

    pub fn with_value(
        field: impl Into<Arc<DbaseField>>,
        value: Option<i32>,
    ) -> Result<Self, DbaseError> {
        let mut int32 = Self::new(field)?;
        int32.set_value(value)?;
        Ok(int32)
    }

    pub fn field(&self) -> &DbaseField {
        &self.field
    }

    pub fn value(&self) -> Option<i32> {
        self.value
    }

    /// Returns the value, failing when it is null.
    pub fn require_value(&self) -> Result<i32, DbaseError> {
        self.value.ok_or_else(|| DbaseError::NullValue {
            field: self.field.name().to_string(),
        })
    }

    pub fn accepts_value(&self, value: Option<i32>) -> bool {
        value.is_none_or(|value| numeric::check_length(&self.field, value.to_string()).is_ok())
    }

    pub fn set_value(&mut self, value: Option<i32>) -> Result<(), DbaseError> {
        if let Some(value) = value {
            numeric::check_length(&self.field, value.to_string())?;
        }
        self.value = value;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.value = None;
    }

    pub fn read<R: BufRead>(&mut self, reader: &mut R) -> Result<(), DbaseError> {
        if io_utils::skip_null_slot(reader, &self.field)? {
            self.value = None;
            return Ok(());
        }

        let text = io_utils::read_left_padded_string(reader, &self.field)?;
        let trimmed = text.trim();
        self.value = trimmed.parse::<i32>().ok();

        if self.value.is_none() && !trimmed.is_empty() {
            tracing::debug!(field = %self.field.name(), text = %text, "malformed integer read as null");
        }
        Ok(())
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), DbaseError> {
        match self.value {
            Some(value) => {
                io_utils::write_left_padded(writer, value.to_string().as_bytes(), &self.field)
            }
            None => io_utils::write_blank(writer, &self.field),
        }
    }
}
