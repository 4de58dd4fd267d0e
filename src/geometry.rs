//! Point and rectangle primitives for bobber positions

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// A 2D coordinate in frame pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Euclidean distance between two points
pub fn distance(a: &Point, b: &Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Axis-aligned bounding box (x1, y1) top-left, (x2, y2) bottom-right
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Rect {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build a rect from raw detector corners.
    ///
    /// Inverted corners are swapped into order. Returns `None` if any
    /// coordinate is NaN or infinite.
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64) -> Option<Self> {
        if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
            return None;
        }
        Some(Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        })
    }

    /// Square of half-width `expand` centred on `point`
    pub fn from_point_and_expansion(point: Point, expand: f64) -> Result<Self, GeometryError> {
        if !expand.is_finite() || expand < 0.0 {
            return Err(GeometryError::InvalidExpansion(expand));
        }
        Ok(Self {
            x1: point.x - expand,
            y1: point.y - expand,
            x2: point.x + expand,
            y2: point.y + expand,
        })
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// True only when all four coordinates are exactly zero
    pub fn is_empty(&self) -> bool {
        self.x1 == 0.0 && self.y1 == 0.0 && self.x2 == 0.0 && self.y2 == 0.0
    }

    /// Midpoint of the box; the all-zero rect maps to the origin
    pub fn center(&self) -> Point {
        if self.is_empty() {
            return Point::default();
        }
        Point::new(
            self.x1 + self.width() / 2.0,
            self.y1 + self.height() / 2.0,
        )
    }

    /// Smallest rect covering both boxes
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{:.1}, {:.1}, {:.1}, {:.1}]",
            self.x1, self.y1, self.x2, self.y2
        )
    }
}
