//! Binary codec for dBase attribute tables and shape/shape-index files.
//!
//! Provides fixed-width field value codecs with the format's precision
//! rules, shape records with word-unit offset bookkeeping, 3-D bounding
//! box aggregation, and the shape index writer.

pub mod config;
pub mod dbase;
pub mod error;
pub mod io;
pub mod shape;

pub use error::{Error, Result};
