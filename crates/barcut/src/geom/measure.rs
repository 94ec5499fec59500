//! Distances, triangle measures and angles.
//!
//! Heights go through Heron's formula on the three pairwise distances, so a
//! negative radicand (rounding on near-collinear input) is reported as
//! `GeomError::DegenerateTriangle` rather than turning into NaN.

use nalgebra::Vector2;

use super::{
    cfg::MIN_BASE,
    error::GeomError,
    types::{Degree, LineDiff, Radian},
};

#[inline]
pub(crate) fn is_finite(p: Vector2<f64>) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// Unit direction from `p1` to `p2` plus their distance.
///
/// Errors with `CoincidentPoints` when the points coincide (no direction).
pub fn measure_line_diff(p1: Vector2<f64>, p2: Vector2<f64>) -> Result<LineDiff, GeomError> {
    if !is_finite(p1) || !is_finite(p2) {
        return Err(GeomError::NonFinite);
    }
    let d = p2 - p1;
    let length = d.norm();
    if length <= MIN_BASE {
        return Err(GeomError::CoincidentPoints);
    }
    Ok(LineDiff {
        dx: d.x / length,
        dy: d.y / length,
        length,
    })
}

/// Euclidean distance. Zero for identical points.
#[inline]
pub fn measure_distance(p1: Vector2<f64>, p2: Vector2<f64>) -> f64 {
    (p2 - p1).norm()
}

/// Triangle area from Heron's formula.
pub fn measure_triangle_area_from_points(
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    p3: Vector2<f64>,
) -> Result<f64, GeomError> {
    let a = measure_distance(p1, p2);
    let b = measure_distance(p2, p3);
    let c = measure_distance(p3, p1);
    let s = (a + b + c) / 2.0;
    let radicand = s * (s - a) * (s - b) * (s - c);
    if !radicand.is_finite() {
        return Err(GeomError::NonFinite);
    }
    if radicand < 0.0 {
        return Err(GeomError::DegenerateTriangle);
    }
    Ok(radicand.sqrt())
}

/// Perpendicular distance from `p_middle` to the line through `p1, p2`,
/// computed as `2 · area / base`.
pub fn measure_height_from_points(
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    p_middle: Vector2<f64>,
) -> Result<f64, GeomError> {
    let base = measure_line_diff(p1, p2)?.length;
    let area = measure_triangle_area_from_points(p1, p2, p_middle)?;
    Ok(2.0 * area / base)
}

#[inline]
pub fn radian_to_degrees(angle: Radian) -> Degree {
    angle * (180.0 / std::f64::consts::PI)
}

#[inline]
pub fn degrees_to_radian(angle: Degree) -> Radian {
    angle * (std::f64::consts::PI / 180.0)
}

/// Direction angle of `p1 → p2` via `atan2`, in `(-π, π]`.
#[inline]
pub fn get_line_angle(p1: Vector2<f64>, p2: Vector2<f64>) -> Radian {
    let d = p2 - p1;
    d.y.atan2(d.x)
}

/// Interior angle at `p_middle` of the triangle `(p1, p_middle, p2)`, by the
/// law of cosines. The cosine is clamped to `[-1, 1]` against rounding.
pub fn measure_angle_from_points(
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    p_middle: Vector2<f64>,
) -> Result<Radian, GeomError> {
    if !is_finite(p1) || !is_finite(p2) || !is_finite(p_middle) {
        return Err(GeomError::NonFinite);
    }
    let ab = measure_distance(p_middle, p1);
    let bc = measure_distance(p_middle, p2);
    let ac = measure_distance(p1, p2);
    if ab <= MIN_BASE || bc <= MIN_BASE {
        return Err(GeomError::CoincidentPoints);
    }
    let cos = (bc * bc + ab * ab - ac * ac) / (2.0 * bc * ab);
    Ok(cos.clamp(-1.0, 1.0).acos())
}
