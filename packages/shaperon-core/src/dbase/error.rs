//! Errors raised by field descriptors and value codecs.

use super::field::DbaseFieldType;

/// Error type for field descriptors and field value codecs.
#[derive(Debug, thiserror::Error)]
pub enum DbaseError {
    #[error("Field '{field}' is invalid: {message}")]
    InvalidField { field: String, message: String },

    #[error(
        "Field '{field}' ({field_type}, length {length}, {decimal_count} decimal(s)) has no matching value type"
    )]
    UnsupportedField {
        field: String,
        field_type: DbaseFieldType,
        length: u8,
        decimal_count: u8,
    },

    #[error("Field '{field}' can not be used as a {wrapper} field: {message}")]
    IncompatibleField {
        field: String,
        wrapper: &'static str,
        message: String,
    },

    #[error(
        "The length ({length}) of the value ({value}) of field '{field}' is greater than its field length {field_length}, which would result in loss of precision"
    )]
    PrecisionLoss {
        field: String,
        value: String,
        length: usize,
        field_length: usize,
    },

    #[error("The value of field '{field}' can not be {value}")]
    NonFiniteValue { field: String, value: String },

    #[error("The value length {length} of field '{field}' is greater than its field length {field_length}")]
    ValueTooLong {
        field: String,
        length: usize,
        field_length: usize,
    },

    #[error("Character {character:?} of field '{field}' can not be encoded as Latin-1")]
    UnencodableCharacter { field: String, character: char },

    #[error("Field '{field}' can not be null when read as non nullable datatype")]
    NullValue { field: String },

    #[error(
        "Unable to read beyond the end of the stream. Expected stream to have {expected} byte(s) available but only found {available} byte(s) as part of reading field '{field}'"
    )]
    TruncatedStream {
        field: String,
        expected: usize,
        available: usize,
    },

    #[error("Unexpected record flag 0x{flag:02X}")]
    UnexpectedRecordFlag { flag: u8 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
