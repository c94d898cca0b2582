//! Errors raised while reading and writing shape and index streams.

use super::shape_type::ShapeType;

/// Error type for shape records, headers and writers.
#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    #[error("The file code {found} is not the expected file code 9994")]
    InvalidFileCode { found: i32 },

    #[error("The shape type {code} is not a known shape type")]
    UnknownShapeType { code: i32 },

    #[error("Invalid length: {message}")]
    InvalidLength { message: String },

    #[error("The record number {number} must be greater than or equal to 1")]
    InvalidRecordNumber { number: i32 },

    #[error("Shape content of type {found} can not be stored in a file of type {expected}")]
    ShapeTypeMismatch { expected: ShapeType, found: ShapeType },

    #[error("Shape content of type {shape_type} is not supported")]
    UnsupportedShapeType { shape_type: ShapeType },

    #[error("The writer has been closed")]
    WriterClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
