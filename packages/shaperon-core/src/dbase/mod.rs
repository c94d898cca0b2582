//! dBase attribute table codec: field descriptors, typed field values and records.


mod character;
mod date;
mod decimal;
mod double;
mod error;
mod field;
mod int32;
pub(crate) mod io_utils;
mod logical;
mod numeric;
mod record;
mod single;
mod value;

pub use character::DbaseCharacter;
pub use date::DbaseDate;
pub use decimal::DbaseDecimal;
pub use double::DbaseDouble;
pub use error::DbaseError;
pub use field::{
    ByteOffset, DbaseField, DbaseFieldName, DbaseFieldType, FIELD_DESCRIPTOR_SIZE,
    FIELD_DESCRIPTOR_TERMINATOR, MAXIMUM_FIELD_LENGTH,
};
pub use int32::DbaseInt32;
pub use logical::DbaseLogical;
pub use record::DbaseRecord;
pub use single::DbaseSingle;
pub use value::DbaseFieldValue;
