//! Double precision float field value.

use std::io::{BufRead, Write};
use std::sync::Arc;

use super::error::DbaseError;
use super::field::{DbaseField, DbaseFieldType};
use super::io_utils;
use super::numeric::{self, FractionalBounds};

const BOUNDS: FractionalBounds = FractionalBounds {
    wrapper: "double",
    field_type: DbaseFieldType::Number,
    minimum_length: DbaseDouble::MINIMUM_LENGTH,
    maximum_length: DbaseDouble::MAXIMUM_LENGTH,
    maximum_decimal_count: DbaseDouble::MAXIMUM_DECIMAL_COUNT,
};

/// Nullable `f64` bound to a number field.
#[derive(Debug, Clone, PartialEq)]
pub struct DbaseDouble {
    field: Arc<DbaseField>,
    value: Option<f64>,
}

impl DbaseDouble {
    pub const MAXIMUM_INTEGER_DIGITS: u8 = 15;
    pub const MAXIMUM_LENGTH: u8 = 18;
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
    pub const MAXIMUM_DECIMAL_COUNT: u8 = 15;

    /// Creates a null value bound to `field`.
    ///
    /// # Returns
    /// `Err(DbaseError::IncompatibleField)` unless `field` is a number field with a
    /// length between `MINIMUM_LENGTH` and `MAXIMUM_LENGTH`.
    pub fn new(field: impl Into<Arc<DbaseField>>) -> Result<Self, DbaseError> {
        let field = field.into();
        BOUNDS.check(&field)?;
        Ok(Self { field, value: None })
    }

    /// Creates a value bound to `field`, validated as by [`DbaseDouble::set_value`].
    pub fn with_value(
        field: impl Into<Arc<DbaseField>>,
        value: Option<f64>,
    ) -> Result<Self, DbaseError> {
        let mut double = Self::new(field)?;
        double.set_value(value)?;
        Ok(double)
    }

    pub fn field(&self) -> &DbaseField {
        &self.field
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Returns the value, failing when it is null.
    pub fn require_value(&self) -> Result<f64, DbaseError> {
        self.value.ok_or_else(|| DbaseError::NullValue {
            field: self.field.name().to_string(),
        })
    }

    /// Returns whether `value` would be accepted by [`DbaseDouble::set_value`].
    pub fn accepts_value(&self, value: Option<f64>) -> bool {
        value.is_none_or(|value| numeric::prepare_float(&self.field, &BOUNDS, value).is_ok())
    }

    /// Truncates (no decimals) or rounds (decimals) `value` and stores it.
    ///
    /// # Returns
    /// `Err(DbaseError::PrecisionLoss)` when the rendered value exceeds the field
    /// length, `Err(DbaseError::NonFiniteValue)` for NaN and infinities.
    pub fn set_value(&mut self, value: Option<f64>) -> Result<(), DbaseError> {
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
        self.value = numeric::parse_fixed::<f64>(&text)
            .and_then(|parsed| numeric::prepare_float(&self.field, &BOUNDS, parsed).ok())
            .map(|(value, _)| value);

        if self.value.is_none() && !text.trim().is_empty() {
            tracing::debug!(field = %self.field.name(), text = %text, "malformed double read as null");
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
