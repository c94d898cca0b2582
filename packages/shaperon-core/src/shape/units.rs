//! Word based lengths and offsets, and record numbers.
//!
//! Shape and index streams address their content in 16-bit words.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ShapeError;

const BYTES_PER_WORD: u64 = 2;

/// A non-negative length in 16-bit words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordLength(i32);

impl WordLength {
    pub const ZERO: WordLength = WordLength(0);

    pub fn new(words: i32) -> Result<Self, ShapeError> {
        if words < 0 {
            return Err(ShapeError::InvalidLength {
                message: format!("a word length can not be negative, got {words}"),
            });
        }
        Ok(Self(words))
    }

    pub(crate) const fn from_words(words: i32) -> Self {
        Self(words)
    }

    /// Converts an even byte count to words.
    pub fn from_byte_length(bytes: u64) -> Result<Self, ShapeError> {
        if bytes % BYTES_PER_WORD != 0 {
            return Err(ShapeError::InvalidLength {
                message: format!("a byte length must be even to be expressed in words, got {bytes}"),
            });
        }
        let words = i32::try_from(bytes / BYTES_PER_WORD).map_err(|_| ShapeError::InvalidLength {
            message: format!("the byte length {bytes} exceeds the maximum word length"),
        })?;
        Ok(Self(words))
    }

    pub fn to_i32(self) -> i32 {
        self.0
    }

    pub fn to_byte_length(self) -> u64 {
        self.0 as u64 * BYTES_PER_WORD
    }

    pub fn checked_plus(self, other: WordLength) -> Option<WordLength> {
        self.0.checked_add(other.0).map(WordLength)
    }

    /// Sum of both lengths; fails when it exceeds the 32-bit word range.
    pub fn plus(self, other: WordLength) -> Result<WordLength, ShapeError> {
        self.checked_plus(other).ok_or_else(|| ShapeError::InvalidLength {
            message: format!("{} + {} words exceeds the maximum word length", self.0, other.0),
        })
    }
}

impl fmt::Display for WordLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A non-negative position in 16-bit words from the start of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordOffset(i32);

impl WordOffset {
    pub fn new(words: i32) -> Result<Self, ShapeError> {
        if words < 0 {
            return Err(ShapeError::InvalidLength {
                message: format!("a word offset can not be negative, got {words}"),
            });
        }
        Ok(Self(words))
    }

    pub(crate) const fn from_words(words: i32) -> Self {
        Self(words)
    }

    pub fn to_i32(self) -> i32 {
        self.0
    }

    pub fn to_byte_offset(self) -> u64 {
        self.0 as u64 * BYTES_PER_WORD
    }

    /// Advances the offset past `length` words.
    pub fn plus(self, length: WordLength) -> Result<WordOffset, ShapeError> {
        self.0
            .checked_add(length.to_i32())
            .map(WordOffset)
            .ok_or_else(|| ShapeError::InvalidLength {
                message: format!("offset {} + {} words exceeds the maximum word offset", self.0, length),
            })
    }
}

impl fmt::Display for WordOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One-based sequence number of a shape record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordNumber(i32);

impl RecordNumber {
    pub const INITIAL: RecordNumber = RecordNumber(1);

    pub fn new(number: i32) -> Result<Self, ShapeError> {
        if number < 1 {
            return Err(ShapeError::InvalidRecordNumber { number });
        }
        Ok(Self(number))
    }

    pub fn to_i32(self) -> i32 {
        self.0
    }

    pub fn next(self) -> Result<RecordNumber, ShapeError> {
        self.0
            .checked_add(1)
            .map(RecordNumber)
            .ok_or(ShapeError::InvalidRecordNumber { number: self.0 })
    }
}

impl fmt::Display for RecordNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
