//! Date field value (`yyyyMMdd`).

use std::io::{BufRead, Write};
use std::sync::Arc;

use chrono::NaiveDate;

use super::error::DbaseError;
use super::field::{DbaseField, DbaseFieldType};
use super::io_utils;
use super::numeric;

const DATE_FORMAT: &str = "%Y%m%d";

/// Nullable calendar date bound to a date field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbaseDate {
    field: Arc<DbaseField>,
    value: Option<NaiveDate>,
}

impl DbaseDate {
    pub fn new(field: impl Into<Arc<DbaseField>>) -> Result<Self, DbaseError> {
        let field = field.into();
        if field.field_type() != DbaseFieldType::Date {
            return Err(DbaseError::IncompatibleField {
                field: field.name().to_string(),
                wrapper: "date",
                message: format!("the field type must be date, got {}", field.field_type()),
            });
        }
        Ok(Self { field, value: None })
    }

    pub fn with_value(
        field: impl Into<Arc<DbaseField>>,
        value: Option<NaiveDate>,
    ) -> Result<Self, DbaseError> {
        let mut date = Self::new(field)?;
        date.set_value(value)?;
        Ok(date)
    }

    pub fn field(&self) -> &DbaseField {
        &self.field
    }

    pub fn value(&self) -> Option<NaiveDate> {
        self.value
    }

    pub fn require_value(&self) -> Result<NaiveDate, DbaseError> {
        self.value.ok_or_else(|| DbaseError::NullValue {
            field: self.field.name().to_string(),
        })
    }

    pub fn accepts_value(&self, value: Option<NaiveDate>) -> bool {
        value.is_none_or(|value| self.render(value).is_ok())
    }

    /// Stores `value`; years outside 0..=9999 do not fit the 8-byte slot.
    pub fn set_value(&mut self, value: Option<NaiveDate>) -> Result<(), DbaseError> {
        if let Some(value) = value {
            self.render(value)?;
        }
        self.value = value;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.value = None;
    }

    fn render(&self, value: NaiveDate) -> Result<String, DbaseError> {
        numeric::check_length(&self.field, value.format(DATE_FORMAT).to_string())
    }

    pub fn read<R: BufRead>(&mut self, reader: &mut R) -> Result<(), DbaseError> {
        if io_utils::skip_null_slot(reader, &self.field)? {
            self.value = None;
            return Ok(());
        }

        let text = io_utils::read_left_padded_string(reader, &self.field)?;
        let trimmed = text.trim();
        self.value = NaiveDate::parse_from_str(trimmed, DATE_FORMAT).ok();

        if self.value.is_none() && !trimmed.is_empty() {
            tracing::debug!(field = %self.field.name(), text = %text, "malformed date read as null");
        }
        Ok(())
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), DbaseError> {
        match self.value {
            Some(value) => {
                let rendered = self.render(value)?;
                io_utils::write_left_padded(writer, rendered.as_bytes(), &self.field)
            }
            None => io_utils::write_blank(writer, &self.field),
        }
    }
}
