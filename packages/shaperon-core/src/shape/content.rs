//! Record content of the primary geometry stream.

use std::io::{Cursor, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use super::bounding_box::BoundingBox3D;
use super::error::ShapeError;
use super::geometry::{LineString, MultiLineString, PointM};
use super::record::{ShapeRecord, ShapeRecordHeader};
use super::shape_type::ShapeType;
use super::units::{RecordNumber, WordLength};

// Word counts of the fixed and per-item parts of each content kind
const SHAPE_TYPE_WORDS: u64 = 2;
const POINT_WORDS: u64 = 8;
const POLYLINE_M_HEADER_WORDS: u64 = 22;
const PART_WORDS: u64 = 2;
const MEASURE_RANGE_WORDS: u64 = 8;
const MEASURE_WORDS: u64 = 4;

/// Geometry payload of one shape record.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeContent {
    Null,
    /// Written as X and Y only. Its Z and M still count towards
    /// [`ShapeContent::bounding_box`], and so towards the header extent.
    Point(PointM),
    PolyLineM(MultiLineString),
}

impl ShapeContent {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            ShapeContent::Null => ShapeType::NullShape,
            ShapeContent::Point(_) => ShapeType::Point,
            ShapeContent::PolyLineM(_) => ShapeType::PolyLineM,
        }
    }

    /// Length of the serialized content in words, shape type included.
    pub fn content_length(&self) -> Result<WordLength, ShapeError> {
        let words = match self {
            ShapeContent::Null => SHAPE_TYPE_WORDS,
            ShapeContent::Point(_) => SHAPE_TYPE_WORDS + POINT_WORDS,
            ShapeContent::PolyLineM(shape) => {
                let parts = shape.lines().len() as u64;
                let points = shape.num_points() as u64;
                POLYLINE_M_HEADER_WORDS
                    + PART_WORDS * parts
                    + POINT_WORDS * points
                    + MEASURE_RANGE_WORDS
                    + MEASURE_WORDS * points
            }
        };
        WordLength::from_byte_length(words * 2)
    }

    /// Extent of the geometry; the empty box for null content.
    pub fn bounding_box(&self) -> BoundingBox3D {
        match self {
            ShapeContent::Null => BoundingBox3D::EMPTY,
            ShapeContent::Point(point) => BoundingBox3D::from_geometry(point),
            ShapeContent::PolyLineM(shape) => BoundingBox3D::from_geometry(shape),
        }
    }

    /// Binds the content to `number`, computing the record length.
    pub fn record_as(self, number: RecordNumber) -> Result<ShapeRecord, ShapeError> {
        let content_length = self.content_length()?;
        content_length.plus(ShapeRecordHeader::LENGTH)?;
        Ok(ShapeRecord::new(
            ShapeRecordHeader {
                record_number: number,
                content_length,
            },
            self,
        ))
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), ShapeError> {
        writer.write_i32::<LittleEndian>(self.shape_type().code())?;
        match self {
            ShapeContent::Null => {}
            ShapeContent::Point(point) => {
                writer.write_f64::<LittleEndian>(point.x)?;
                writer.write_f64::<LittleEndian>(point.y)?;
            }
            ShapeContent::PolyLineM(shape) => write_polyline_m(writer, shape)?,
        }
        Ok(())
    }

    /// Reads content of exactly `content_length` words.
    pub fn read<R: Read>(reader: &mut R, content_length: WordLength) -> Result<Self, ShapeError> {
        let expected = content_length.to_byte_length();
        let mut buffer = Vec::new();
        reader.take(expected).read_to_end(&mut buffer)?;
        if (buffer.len() as u64) < expected {
            return Err(ShapeError::InvalidLength {
                message: format!(
                    "expected {expected} content bytes but the stream ended after {}",
                    buffer.len()
                ),
            });
        }

        let mut cursor = Cursor::new(buffer);
        let shape_type = ShapeType::try_from(cursor.read_i32::<LittleEndian>()?)?;
        let content = match shape_type {
            ShapeType::NullShape => ShapeContent::Null,
            ShapeType::Point => ShapeContent::Point(PointM::new(
                cursor.read_f64::<LittleEndian>()?,
                cursor.read_f64::<LittleEndian>()?,
            )),
            ShapeType::PolyLineM => ShapeContent::PolyLineM(read_polyline_m(&mut cursor)?),
            other => return Err(ShapeError::UnsupportedShapeType { shape_type: other }),
        };

        let actual = content.content_length()?;
        if actual != content_length {
            return Err(ShapeError::InvalidLength {
                message: format!(
                    "the record declares {content_length} content words but its {shape_type} content takes {actual}"
                ),
            });
        }
        Ok(content)
    }
}

fn count_as_i32(count: usize, what: &str) -> Result<i32, ShapeError> {
    i32::try_from(count).map_err(|_| ShapeError::InvalidLength {
        message: format!("{count} {what} exceed the maximum count"),
    })
}

fn write_polyline_m<W: Write>(writer: &mut W, shape: &MultiLineString) -> Result<(), ShapeError> {
    let bounding_box = BoundingBox3D::from_geometry(shape);
    writer.write_f64::<LittleEndian>(bounding_box.x_min)?;
    writer.write_f64::<LittleEndian>(bounding_box.y_min)?;
    writer.write_f64::<LittleEndian>(bounding_box.x_max)?;
    writer.write_f64::<LittleEndian>(bounding_box.y_max)?;
    writer.write_i32::<LittleEndian>(count_as_i32(shape.lines().len(), "parts")?)?;
    writer.write_i32::<LittleEndian>(count_as_i32(shape.num_points(), "points")?)?;

    let mut part_start = 0usize;
    for line in shape.lines() {
        writer.write_i32::<LittleEndian>(count_as_i32(part_start, "points")?)?;
        part_start += line.points().len();
    }
    for point in shape.points() {
        writer.write_f64::<LittleEndian>(point.x)?;
        writer.write_f64::<LittleEndian>(point.y)?;
    }

    writer.write_f64::<LittleEndian>(bounding_box.m_min)?;
    writer.write_f64::<LittleEndian>(bounding_box.m_max)?;
    for point in shape.points() {
        writer.write_f64::<LittleEndian>(point.m.unwrap_or(f64::NAN))?;
    }
    Ok(())
}

fn read_polyline_m<R: Read>(reader: &mut R) -> Result<MultiLineString, ShapeError> {
    // The bounding box is derived from the points
    for _ in 0..4 {
        reader.read_f64::<LittleEndian>()?;
    }
    let part_count = read_count(reader, "part")?;
    let point_count = read_count(reader, "point")?;

    let mut part_starts = Vec::new();
    for _ in 0..part_count {
        part_starts.push(read_count(reader, "part start")?);
    }

    let mut points = Vec::new();
    for _ in 0..point_count {
        let x = reader.read_f64::<LittleEndian>()?;
        let y = reader.read_f64::<LittleEndian>()?;
        points.push(PointM::new(x, y));
    }

    reader.read_f64::<LittleEndian>()?;
    reader.read_f64::<LittleEndian>()?;
    for point in &mut points {
        let m = reader.read_f64::<LittleEndian>()?;
        if !m.is_nan() {
            point.m = Some(m);
        }
    }

    let mut lines = Vec::with_capacity(part_starts.len());
    for (index, &start) in part_starts.iter().enumerate() {
        let end = part_starts.get(index + 1).copied().unwrap_or(point_count);
        if start > end || end > point_count {
            return Err(ShapeError::InvalidLength {
                message: format!("part {index} spans points {start}..{end} of {point_count}"),
            });
        }
        lines.push(LineString::new(points[start..end].to_vec()));
    }
    Ok(MultiLineString::new(lines))
}

fn read_count<R: Read>(reader: &mut R, what: &str) -> Result<usize, ShapeError> {
    let count = reader.read_i32::<LittleEndian>()?;
    usize::try_from(count).map_err(|_| ShapeError::InvalidLength {
        message: format!("the {what} count can not be negative, got {count}"),
    })
}
