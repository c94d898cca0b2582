//! Shape and shape index streams: records, headers, extents and writers.


mod aggregate;
mod bounding_box;
mod content;
mod error;
mod geometry;
mod header;
mod record;
mod shape_type;
mod units;
mod writer;

pub use aggregate::{shape_index_from_primary, ShapeFileAggregate};
pub use bounding_box::BoundingBox3D;
pub use content::ShapeContent;
pub use error::ShapeError;
pub use geometry::{Envelope, Geometry, LineString, MultiLineString, Ordinate, PointM};
pub use header::ShapeFileHeader;
pub use record::{ShapeIndexRecord, ShapeRecord, ShapeRecordHeader};
pub use shape_type::ShapeType;
pub use units::{RecordNumber, WordLength, WordOffset};
pub use writer::{ShapeBinaryWriter, ShapeIndexBinaryWriter};
