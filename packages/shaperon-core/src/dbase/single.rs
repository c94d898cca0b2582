//! Single precision float field value.

use std::io::{BufRead, Write};
use std::sync::Arc;

use super::error::DbaseError;
use super::field::{DbaseField, DbaseFieldType};
use super::io_utils;
use super::numeric::{self, FractionalBounds};

const BOUNDS: FractionalBounds = FractionalBounds {
    wrapper: "single",
    field_type: DbaseFieldType::Float,
    minimum_length: DbaseSingle::MINIMUM_LENGTH,
    maximum_length: DbaseSingle::MAXIMUM_LENGTH,
    maximum_decimal_count: DbaseSingle::MAXIMUM_DECIMAL_COUNT,
};

/// Nullable `f32` bound to a float field.
#[derive(Debug, Clone, PartialEq)]
pub struct DbaseSingle {
    field: Arc<DbaseField>,
    value: Option<f32>,
}

impl DbaseSingle {
    // The float type itself carries up to 38 integer digits, the field type only 20.
    pub const MAXIMUM_INTEGER_DIGITS: u8 = 20;
    pub const MAXIMUM_LENGTH: u8 = 20;
    /// "0.0"
    pub const POSITIVE_VALUE_MINIMUM_LENGTH: u8 = 3;
    /// "-0.0"
    pub const NEGATIVE_VALUE_MINIMUM_LENGTH: u8 = 4;
    pub const MINIMUM_LENGTH: u8 = if Self::POSITIVE_VALUE_MINIMUM_LENGTH
        < Self::NEGATIVE_VALUE_MINIMUM_LENGTH
    {
        Self::POSITIVE_VALUE_MINIMUM_LENGTH
    } else {
        Self::NEGATIVE_VALUE_MINIMUM_LENGTH
    };
    pub const MAXIMUM_DECIMAL_COUNT: u8 = 7;

    /// Creates a null value bound to `field`.
    ///
    /// # Returns
    /// `Err(DbaseError::IncompatibleField)` unless `field` is a float field with a
    /// length between `MINIMUM_LENGTH` and `MAXIMUM_LENGTH`.
    pub fn new(field: impl Into<Arc<DbaseField>>) -> Result<Self, DbaseError> {
        let field = field.into();
        BOUNDS.check(&field)?;
        Ok(Self { field, value: None })
    }

    /// Creates a value bound to `field`, validated as by [`DbaseSingle::set_value`].
    pub fn with_value(
        field: impl Into<Arc<DbaseField>>,
        value: Option<f32>,
    ) -> Result<Self, DbaseError> {
        let mut single = Self::new(field)?;
        single.set_value(value)?;
        Ok(single)
    }

    pub fn field(&self) -> &DbaseField {
        &self.field
    }

    pub fn value(&self) -> Option<f32> {
        self.value
    }

    /// Returns the value, failing when it is null.
    pub fn require_value(&self) -> Result<f32, DbaseError> {
        self.value.ok_or_else(|| DbaseError::NullValue {
            field: self.field.name().to_string(),
        })
    }

    /// Returns whether `value` would be accepted by [`DbaseSingle::set_value`].
    pub fn accepts_value(&self, value: Option<f32>) -> bool {
        value.is_none_or(|value| numeric::prepare_float(&self.field, &BOUNDS, value).is_ok())
    }

    /// Truncates (no decimals) or rounds (decimals) `value` and stores it.
    ///
    /// # Returns
    /// `Err(DbaseError::PrecisionLoss)` when the rendered value exceeds the field
    /// length, `Err(DbaseError::NonFiniteValue)` for NaN and infinities.
    pub fn set_value(&mut self, value: Option<f32>) -> Result<(), DbaseError> {
        self.value = match value {
            Some(value) => Some(numeric::prepare_float(&self.field, &BOUNDS, value)?.0),
            None => None,
        };
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
        self.value = numeric::parse_fixed::<f32>(&text)
            .and_then(|parsed| numeric::prepare_float(&self.field, &BOUNDS, parsed).ok())
            .map(|(value, _)| value);

        if self.value.is_none() && !text.trim().is_empty() {
            tracing::debug!(field = %self.field.name(), text = %text, "malformed single read as null");
        }
        Ok(())
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), DbaseError> {
        match self.value {
            Some(value) => {
                let rendered = numeric::render_float(&self.field, &BOUNDS, value);
                let padded = numeric::pad_decimals(&self.field, rendered);
                io_utils::write_left_padded(writer, padded.as_bytes(), &self.field)
            }
            None => io_utils::write_blank(writer, &self.field),
        }
    }
}
