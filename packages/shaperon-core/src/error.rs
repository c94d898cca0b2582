//! Crate-level error type.

use thiserror::Error;

use crate::dbase::DbaseError;
use crate::shape::ShapeError;

/// Errors raised by any codec in this crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Attribute table codec error
    #[error(transparent)]
    Dbase(#[from] DbaseError),

    /// Shape or shape index codec error
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

pub type Result<T> = std::result::Result<T, Error>;
