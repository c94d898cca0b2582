//! Character (text) field value.

use std::io::{BufRead, Write};
use std::sync::Arc;

use super::error::DbaseError;
use super::field::{DbaseField, DbaseFieldType};
use super::io_utils;

/// Nullable Latin-1 text bound to a character field.
///
/// Text is stored left-aligned; a slot holding only padding reads back as null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbaseCharacter {
    field: Arc<DbaseField>,
    value: Option<String>,
}

impl DbaseCharacter {
    pub fn new(field: impl Into<Arc<DbaseField>>) -> Result<Self, DbaseError> {
        let field = field.into();
        if field.field_type() != DbaseFieldType::Character {
            return Err(DbaseError::IncompatibleField {
                field: field.name().to_string(),
                wrapper: "character",
                message: format!("the field type must be character, got {}", field.field_type()),
            });
        }
        Ok(Self { field, value: None })
    }

    pub fn with_value(
        field: impl Into<Arc<DbaseField>>,
        value: Option<String>,
    ) -> Result<Self, DbaseError> {
        let mut character = Self::new(field)?;
        character.set_value(value)?;
        Ok(character)
    }

    pub fn field(&self) -> &DbaseField {
        &self.field
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn require_value(&self) -> Result<&str, DbaseError> {
        self.value.as_deref().ok_or_else(|| DbaseError::NullValue {
            field: self.field.name().to_string(),
        })
    }

    pub fn accepts_value(&self, value: Option<&str>) -> bool {
        value.is_none_or(|value| self.encode(value).is_ok())
    }

    pub fn set_value(&mut self, value: Option<String>) -> Result<(), DbaseError> {
        if let Some(value) = &value {
            self.encode(value)?;
        }
        self.value = value;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.value = None;
    }

    fn encode(&self, value: &str) -> Result<Vec<u8>, DbaseError> {
        let encoded =
            io_utils::encode_latin1(value).map_err(|character| DbaseError::UnencodableCharacter {
                field: self.field.name().to_string(),
                character,
            })?;

        let field_length = usize::from(self.field.length());
        if encoded.len() > field_length {
            return Err(DbaseError::ValueTooLong {
                field: self.field.name().to_string(),
                length: encoded.len(),
                field_length,
            });
        }
        Ok(encoded)
    }

    pub fn read<R: BufRead>(&mut self, reader: &mut R) -> Result<(), DbaseError> {
        if io_utils::skip_null_slot(reader, &self.field)? {
            self.value = None;
            return Ok(());
        }

        let text = io_utils::read_right_padded_string(reader, &self.field)?;
        self.value = if text.is_empty() { None } else { Some(text) };
        Ok(())
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), DbaseError> {
        match &self.value {
            Some(value) => {
                let encoded = self.encode(value)?;
                io_utils::write_right_padded(writer, &encoded, &self.field)
            }
            None => io_utils::write_blank(writer, &self.field),
        }
    }
}
