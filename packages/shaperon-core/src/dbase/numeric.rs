//! Precision policy shared by the numeric field value codecs.
//!
//! A value is truncated toward zero when the field declares no decimals and
//! rounded to the effective decimal count otherwise. The rendered text must fit
//! the declared field length; the same rendering is used when writing, so a
//! value that was accepted once always writes.

use std::fmt;
use std::str::FromStr;

use super::error::DbaseError;
use super::field::{DbaseField, DbaseFieldType};

/// Floating point representations with fixed-point rendering.
pub(crate) trait FixedPointFloat: Copy + PartialEq + fmt::Display + FromStr {
    const ZERO: Self;

    fn is_finite(self) -> bool;

    fn is_nan(self) -> bool;

    fn trunc(self) -> Self;
}

impl FixedPointFloat for f32 {
    const ZERO: Self = 0.0;

    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }

    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }

    fn trunc(self) -> Self {
        f32::trunc(self)
    }
}

impl FixedPointFloat for f64 {
    const ZERO: Self = 0.0;

    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }

    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }

    fn trunc(self) -> Self {
        f64::trunc(self)
    }
}

/// Static bounds of a fractional wrapper.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FractionalBounds {
    pub wrapper: &'static str,
    pub field_type: DbaseFieldType,
    pub minimum_length: u8,
    pub maximum_length: u8,
    pub maximum_decimal_count: u8,
}

impl FractionalBounds {
    /// Checks that `field` can back a value of this wrapper.
    pub fn check(&self, field: &DbaseField) -> Result<(), DbaseError> {
        if field.field_type() != self.field_type {
            return Err(DbaseError::IncompatibleField {
                field: field.name().to_string(),
                wrapper: self.wrapper,
                message: format!(
                    "the field type must be {}, got {}",
                    self.field_type,
                    field.field_type()
                ),
            });
        }

        if field.length() < self.minimum_length || field.length() > self.maximum_length {
            return Err(DbaseError::IncompatibleField {
                field: field.name().to_string(),
                wrapper: self.wrapper,
                message: format!(
                    "the length ({}) must be between {} and {}",
                    field.length(),
                    self.minimum_length,
                    self.maximum_length
                ),
            });
        }

        Ok(())
    }

    /// Decimal digits honored for `field`, capped at the wrapper's maximum.
    pub fn effective_decimal_count(&self, field: &DbaseField) -> usize {
        usize::from(field.decimal_count().min(self.maximum_decimal_count))
    }
}

/// Truncates or rounds `value` for `field` and renders it.
///
/// # Returns
/// The value as it will be stored and its rendering, or
/// `Err(DbaseError::PrecisionLoss)` when the rendering exceeds the field length.
pub(crate) fn prepare_float<T: FixedPointFloat>(
    field: &DbaseField,
    bounds: &FractionalBounds,
    value: T,
) -> Result<(T, String), DbaseError> {
    if !value.is_finite() {
        let description = if value.is_nan() {
            "not-a-number (NaN)".to_string()
        } else {
            format!("infinite ({})", value)
        };
        return Err(DbaseError::NonFiniteValue {
            field: field.name().to_string(),
            value: description,
        });
    }

    let stored = if field.decimal_count() == 0 {
        normalize_zero(value.trunc())
    } else {
        let digits = bounds.effective_decimal_count(field);
        let rounded = format!("{:.*}", digits, value);
        normalize_zero(rounded.parse::<T>().unwrap_or(value))
    };

    let rendered = render_float(field, bounds, stored);
    check_length(field, rendered)
        .map(|rendered| (stored, rendered))
}

/// Renders an already prepared value with the field's effective decimal count.
pub(crate) fn render_float<T: FixedPointFloat>(
    field: &DbaseField,
    bounds: &FractionalBounds,
    value: T,
) -> String {
    format!("{:.*}", bounds.effective_decimal_count(field), value)
}

fn normalize_zero<T: FixedPointFloat>(value: T) -> T {
    // -0.0 compares equal to 0.0
    if value == T::ZERO {
        T::ZERO
    } else {
        value
    }
}

/// Fails with `PrecisionLoss` when `rendered` does not fit `field`.
pub(crate) fn check_length(field: &DbaseField, rendered: String) -> Result<String, DbaseError> {
    let field_length = usize::from(field.length());
    if rendered.len() > field_length {
        return Err(DbaseError::PrecisionLoss {
            field: field.name().to_string(),
            length: rendered.len(),
            value: rendered,
            field_length,
        });
    }
    Ok(rendered)
}

/// Right-pads the fractional part with zeros up to the declared decimal count,
/// as far as the field length allows.
pub(crate) fn pad_decimals(field: &DbaseField, mut rendered: String) -> String {
    let decimal_count = usize::from(field.decimal_count());
    if decimal_count == 0 {
        return rendered;
    }

    let fraction_length = match rendered.split_once('.') {
        Some((_, fraction)) => fraction.len(),
        None => return rendered,
    };
    let room = usize::from(field.length()).saturating_sub(rendered.len());
    let missing = decimal_count.saturating_sub(fraction_length).min(room);
    rendered.extend(std::iter::repeat_n('0', missing));
    rendered
}

/// Validates fixed notation: optional surrounding whitespace, an optional
/// sign, digits with at most one decimal point and at least one digit.
///
/// # Returns
/// The normalized text (no `+`, no bare leading/trailing point) or `None`.
pub(crate) fn normalize_fixed_notation(text: &str) -> Option<String> {
    let text = text.trim();
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(integer) || !fraction.is_none_or(all_digits) {
        return None;
    }
    if integer.is_empty() && fraction.is_none_or(str::is_empty) {
        return None;
    }

    let mut normalized = String::with_capacity(unsigned.len() + 2);
    if negative {
        normalized.push('-');
    }
    normalized.push_str(if integer.is_empty() { "0" } else { integer });
    if let Some(fraction) = fraction.filter(|fraction| !fraction.is_empty()) {
        normalized.push('.');
        normalized.push_str(fraction);
    }
    Some(normalized)
}

/// Parses fixed notation text into `T`, yielding `None` for anything else.
pub(crate) fn parse_fixed<T: FromStr>(text: &str) -> Option<T> {
    normalize_fixed_notation(text)?.parse().ok()
}
