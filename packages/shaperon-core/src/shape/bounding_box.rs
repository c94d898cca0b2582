//! Three dimensional (X/Y plus Z and M) extents.
//!
//! [`BoundingBox3D::EMPTY`] is the identity of [`BoundingBox3D::expand_with`].
//! A Z or M range of NaN marks a geometry without elevation or measure values.
//! NaN never wins over a real value, so absent dimensions do not disturb the
//! running extent, while an extent made only of absent dimensions stays NaN.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};

use super::error::ShapeError;
use super::geometry::{Geometry, Ordinate};

/// Axis aligned extent over X, Y, Z and M.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingBox3D {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
    pub z_min: f64,
    pub z_max: f64,
    pub m_min: f64,
    pub m_max: f64,
}

impl BoundingBox3D {
    pub const EMPTY: BoundingBox3D = BoundingBox3D {
        x_min: f64::INFINITY,
        y_min: f64::INFINITY,
        x_max: f64::NEG_INFINITY,
        y_max: f64::NEG_INFINITY,
        z_min: f64::INFINITY,
        z_max: f64::NEG_INFINITY,
        m_min: f64::INFINITY,
        m_max: f64::NEG_INFINITY,
    };

    /// Serialized size in bytes.
    pub const SIZE: usize = 8 * 8;

    /// Extent of `geometry`; Z and M are NaN when the geometry has no such values.
    pub fn from_geometry<G: Geometry + ?Sized>(geometry: &G) -> Self {
        let envelope = geometry.envelope();
        let (z_min, z_max) = ordinate_range(geometry.ordinates(Ordinate::Z));
        let (m_min, m_max) = ordinate_range(geometry.ordinates(Ordinate::M));

        Self {
            x_min: envelope.min_x,
            y_min: envelope.min_y,
            x_max: envelope.max_x,
            y_max: envelope.max_y,
            z_min,
            z_max,
            m_min,
            m_max,
        }
    }

    /// Smallest box enclosing both boxes.
    pub fn expand_with(&self, other: &BoundingBox3D) -> BoundingBox3D {
        BoundingBox3D {
            x_min: min_ordinate(self.x_min, other.x_min),
            y_min: min_ordinate(self.y_min, other.y_min),
            x_max: max_ordinate(self.x_max, other.x_max),
            y_max: max_ordinate(self.y_max, other.y_max),
            z_min: min_ordinate(self.z_min, other.z_min),
            z_max: max_ordinate(self.z_max, other.z_max),
            m_min: min_ordinate(self.m_min, other.m_min),
            m_max: max_ordinate(self.m_max, other.m_max),
        }
    }

    pub fn from_boxes<I>(boxes: I) -> BoundingBox3D
    where
        I: IntoIterator<Item = BoundingBox3D>,
    {
        boxes
            .into_iter()
            .fold(BoundingBox3D::EMPTY, |result, current| result.expand_with(&current))
    }

    /// Parallel reduction of `boxes`, equal to [`BoundingBox3D::from_boxes`].
    #[cfg(feature = "parallel")]
    pub fn from_boxes_par(boxes: &[BoundingBox3D]) -> BoundingBox3D {
        use rayon::prelude::*;

        boxes
            .par_iter()
            .copied()
            .reduce(|| BoundingBox3D::EMPTY, |result, current| result.expand_with(&current))
    }

    pub fn is_empty(&self) -> bool {
        *self == BoundingBox3D::EMPTY
    }

    fn ordinates(&self) -> [f64; 8] {
        [
            self.x_min, self.y_min, self.x_max, self.y_max, self.z_min, self.z_max, self.m_min,
            self.m_max,
        ]
    }

    /// Writes X/Y min, X/Y max, Z range and M range as little-endian doubles.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), ShapeError> {
        for value in self.ordinates() {
            writer.write_f64::<LittleEndian>(value)?;
        }
        Ok(())
    }

    pub fn read<R: Read>(reader: &mut R) -> Result<Self, ShapeError> {
        Ok(Self {
            x_min: reader.read_f64::<LittleEndian>()?,
            y_min: reader.read_f64::<LittleEndian>()?,
            x_max: reader.read_f64::<LittleEndian>()?,
            y_max: reader.read_f64::<LittleEndian>()?,
            z_min: reader.read_f64::<LittleEndian>()?,
            z_max: reader.read_f64::<LittleEndian>()?,
            m_min: reader.read_f64::<LittleEndian>()?,
            m_max: reader.read_f64::<LittleEndian>()?,
        })
    }
}

impl Default for BoundingBox3D {
    fn default() -> Self {
        BoundingBox3D::EMPTY
    }
}

/// NaN compares equal to NaN.
impl PartialEq for BoundingBox3D {
    fn eq(&self, other: &Self) -> bool {
        self.ordinates()
            .iter()
            .zip(other.ordinates().iter())
            .all(|(left, right)| left == right || (left.is_nan() && right.is_nan()))
    }
}

fn ordinate_range(values: Vec<f64>) -> (f64, f64) {
    if values.is_empty() {
        return (f64::NAN, f64::NAN);
    }
    values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
            (min.min(value), max.max(value))
        })
}

// Ordered as reals < NaN < +inf, so NaN loses to any value but the identity.
fn min_ordinate(left: f64, right: f64) -> f64 {
    match (left.is_nan(), right.is_nan()) {
        (true, true) => left,
        (true, false) if right == f64::INFINITY => left,
        (true, false) => right,
        (false, true) if left == f64::INFINITY => right,
        (false, true) => left,
        (false, false) => left.min(right),
    }
}

// Ordered as -inf < NaN < reals.
fn max_ordinate(left: f64, right: f64) -> f64 {
    match (left.is_nan(), right.is_nan()) {
        (true, true) => left,
        (true, false) if right == f64::NEG_INFINITY => left,
        (true, false) => right,
        (false, true) if left == f64::NEG_INFINITY => right,
        (false, true) => left,
        (false, false) => left.max(right),
    }
}
