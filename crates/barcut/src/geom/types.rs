//! Basic 2D types for canvas geometry.
//!
//! - `Point2D`: canvas point, an alias for `nalgebra::Vector2<f64>`.
//! - `LineDiff`: unit direction plus length of a directed segment.
//! - `Segment`, `TranslatedLine`: directed segments and parallel offsets.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Point in canvas pixel space (origin top-left, y downward).
pub type Point2D = Vector2<f64>;

/// Angle in degrees.
pub type Degree = f64;

/// Angle in radians.
pub type Radian = f64;

/// Unit direction from `p1` to `p2` and the distance between them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineDiff {
    pub dx: f64,
    pub dy: f64,
    pub length: f64,
}

impl LineDiff {
    #[inline]
    pub fn direction(&self) -> Vector2<f64> {
        Vector2::new(self.dx, self.dy)
    }

    /// Unit normal `(-dy, dx)`: the direction rotated a quarter turn
    /// clockwise on screen (y downward). For a left-to-right edge it points
    /// down the page.
    #[inline]
    pub fn normal(&self) -> Vector2<f64> {
        Vector2::new(-self.dy, self.dx)
    }
}

/// Directed segment `p1 → p2`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub p1: Vector2<f64>,
    pub p2: Vector2<f64>,
}

impl Segment {
    #[inline]
    pub fn new(p1: Vector2<f64>, p2: Vector2<f64>) -> Self {
        Self { p1, p2 }
    }
}

/// Result of `translate_line_through_point`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TranslatedLine {
    pub p1_prime: Vector2<f64>,
    pub p2_prime: Vector2<f64>,
    /// Unsigned perpendicular distance between the two parallel lines.
    pub height: f64,
}

impl TranslatedLine {
    #[inline]
    pub fn segment(&self) -> Segment {
        Segment::new(self.p1_prime, self.p2_prime)
    }
}
