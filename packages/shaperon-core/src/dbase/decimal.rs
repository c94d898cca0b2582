//! Arbitrary precision decimal field value.

use std::io::{BufRead, Write};
use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::DbaseError;
use super::field::{DbaseField, DbaseFieldType};
use super::io_utils;
use super::numeric::{self, FractionalBounds};

const BOUNDS: FractionalBounds = FractionalBounds {
    wrapper: "decimal",
    field_type: DbaseFieldType::Number,
    minimum_length: DbaseDecimal::MINIMUM_LENGTH,
    maximum_length: DbaseDecimal::MAXIMUM_LENGTH,
    maximum_decimal_count: DbaseDecimal::MAXIMUM_DECIMAL_COUNT,
};

/// Nullable [`Decimal`] bound to a number field.
///
/// Unlike the float wrappers, rounding here is exact and half away from zero.
#[derive(Debug, Clone, PartialEq)]
pub struct DbaseDecimal {
    field: Arc<DbaseField>,
    value: Option<Decimal>,
}

impl DbaseDecimal {
    pub const MAXIMUM_INTEGER_DIGITS: u8 = 18;
    pub const MAXIMUM_LENGTH: u8 = 18;
    pub const POSITIVE_VALUE_MINIMUM_LENGTH: u8 = 3;
    pub const NEGATIVE_VALUE_MINIMUM_LENGTH: u8 = 4;
    pub const MINIMUM_LENGTH: u8 = 3;
    pub const MAXIMUM_DECIMAL_COUNT: u8 = 15;

    pub fn new(field: impl Into<Arc<DbaseField>>) -> Result<Self, DbaseError> {
        let field = field.into();
        BOUNDS.check(&field)?;
        Ok(Self { field, value: None })
    }

    pub fn with_value(
        field: impl Into<Arc<DbaseField>>,
        value: Option<Decimal>,
    ) -> Result<Self, DbaseError> {
        let mut decimal = Self::new(field)?;
        decimal.set_value(value)?;
        Ok(decimal)
    }

    pub fn field(&self) -> &DbaseField {
        &self.field
    }

    pub fn value(&self) -> Option<Decimal> {
        self.value
    }

    pub fn require_value(&self) -> Result<Decimal, DbaseError> {
        self.value.ok_or_else(|| DbaseError::NullValue {
            field: self.field.name().to_string(),
        })
    }

    pub fn accepts_value(&self, value: Option<Decimal>) -> bool {
        value.is_none_or(|value| self.prepare(value).is_ok())
    }

    pub fn set_value(&mut self, value: Option<Decimal>) -> Result<(), DbaseError> {
        self.value = match value {
            Some(value) => Some(self.prepare(value)?),
            None => None,
        };
        Ok(())
    }

    pub fn reset(&mut self) {
        self.value = None;
    }

    /// Truncates or rounds `value` and rescales it to the effective decimal count,
    /// so that its display form is the fixed-width rendering.
    fn prepare(&self, value: Decimal) -> Result<Decimal, DbaseError> {
        let digits = BOUNDS.effective_decimal_count(&self.field) as u32;
        let mut prepared = if self.field.decimal_count() == 0 {
            value.trunc()
        } else {
            value.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero)
        };
        if prepared.is_zero() {
            prepared = Decimal::ZERO;
        }
        prepared.rescale(digits);

        numeric::check_length(&self.field, prepared.to_string())?;
        Ok(prepared)
    }

    pub fn read<R: BufRead>(&mut self, reader: &mut R) -> Result<(), DbaseError> {
        if io_utils::skip_null_slot(reader, &self.field)? {
            self.value = None;
            return Ok(());
        }

        let text = io_utils::read_left_padded_string(reader, &self.field)?;
        self.value = numeric::normalize_fixed_notation(&text)
            .and_then(|normalized| Decimal::from_str(&normalized).ok())
            .and_then(|parsed| self.prepare(parsed).ok());

        if self.value.is_none() && !text.trim().is_empty() {
            tracing::debug!(field = %self.field.name(), text = %text, "malformed decimal read as null");
        }
        Ok(())
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), DbaseError> {
        match self.value {
            Some(value) => {
                let padded = numeric::pad_decimals(&self.field, value.to_string());
                io_utils::write_left_padded(writer, padded.as_bytes(), &self.field)
            }
            None => io_utils::write_blank(writer, &self.field),
        }
    }
}
