//! Minimal geometry model consumed by shape contents and bounding boxes.

use serde::{Deserialize, Serialize};

/// Coordinate dimension selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ordinate {
    X,
    Y,
    Z,
    M,
}

/// Planar extent of a geometry. An empty envelope has inverted infinite bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Envelope {
    pub const EMPTY: Envelope = Envelope {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn expand_to_include(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }
}

/// A geometry exposes its planar envelope and the values of one dimension.
pub trait Geometry {
    fn envelope(&self) -> Envelope;

    /// Values of `ordinate` over all coordinates; absent Z or M values are skipped.
    fn ordinates(&self, ordinate: Ordinate) -> Vec<f64>;
}

/// A coordinate with optional elevation and measure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointM {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
    pub m: Option<f64>,
}

impl PointM {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            m: None,
        }
    }

    pub fn with_z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    pub fn with_m(mut self, m: f64) -> Self {
        self.m = Some(m);
        self
    }

    pub fn ordinate(&self, ordinate: Ordinate) -> Option<f64> {
        match ordinate {
            Ordinate::X => Some(self.x),
            Ordinate::Y => Some(self.y),
            Ordinate::Z => self.z,
            Ordinate::M => self.m,
        }
    }
}

impl Geometry for PointM {
    fn envelope(&self) -> Envelope {
        envelope_of(std::iter::once(self))
    }

    fn ordinates(&self, ordinate: Ordinate) -> Vec<f64> {
        self.ordinate(ordinate).into_iter().collect()
    }
}

/// An ordered sequence of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineString {
    points: Vec<PointM>,
}

impl LineString {
    pub fn new(points: Vec<PointM>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[PointM] {
        &self.points
    }
}

impl Geometry for LineString {
    fn envelope(&self) -> Envelope {
        envelope_of(self.points.iter())
    }

    fn ordinates(&self, ordinate: Ordinate) -> Vec<f64> {
        ordinates_of(self.points.iter(), ordinate)
    }
}

/// A collection of line strings, each one part of a polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiLineString {
    lines: Vec<LineString>,
}

impl MultiLineString {
    pub fn new(lines: Vec<LineString>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[LineString] {
        &self.lines
    }

    pub fn num_points(&self) -> usize {
        self.lines.iter().map(|line| line.points.len()).sum()
    }

    pub fn points(&self) -> impl Iterator<Item = &PointM> {
        self.lines.iter().flat_map(|line| line.points.iter())
    }
}

impl Geometry for MultiLineString {
    fn envelope(&self) -> Envelope {
        envelope_of(self.points())
    }

    fn ordinates(&self, ordinate: Ordinate) -> Vec<f64> {
        ordinates_of(self.points(), ordinate)
    }
}

fn envelope_of<'a>(points: impl Iterator<Item = &'a PointM>) -> Envelope {
    points.fold(Envelope::EMPTY, |mut envelope, point| {
        envelope.expand_to_include(point.x, point.y);
        envelope
    })
}

fn ordinates_of<'a>(points: impl Iterator<Item = &'a PointM>, ordinate: Ordinate) -> Vec<f64> {
    points.filter_map(|point| point.ordinate(ordinate)).collect()
}
