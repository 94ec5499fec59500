//! Orthogonal projection, position along a line, and parallel translation.
//!
//! Both projection and translation move a point along a unit normal of the
//! reference line by its *signed* perpendicular offset. Using the signed
//! offset keeps results correct for points on either side of the line.

use nalgebra::Vector2;

use super::{
    cfg::MIN_BASE,
    error::GeomError,
    measure::{is_finite, measure_line_diff},
    types::TranslatedLine,
};

/// Orthogonal projection of `p_project` onto the infinite line through `p1, p2`.
///
/// `flip` selects which of the two unit normals carries the offset (`false`
/// for the top edge of a system, `true` for its translated bottom edge). The
/// offset is signed along the chosen normal, so the projected point is the
/// same for both choices.
///
/// Errors with `CoincidentPoints` if `p1 == p2`; callers abort the operation.
pub fn project_point_on_line(
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    p_project: Vector2<f64>,
    flip: bool,
) -> Result<Vector2<f64>, GeomError> {
    if !is_finite(p_project) {
        return Err(GeomError::NonFinite);
    }
    let diff = measure_line_diff(p1, p2)?;
    let sign = if flip { -1.0 } else { 1.0 };
    let normal = diff.normal() * sign;
    let offset = normal.dot(&(p_project - p1));
    Ok(p_project - normal * offset)
}

/// Fractional position of `p_project` along `p1 → p2` (0 at `p1`, 1 at `p2`).
///
/// Pre: `p_project` already lies on the line (i.e. came out of
/// `project_point_on_line`); the point is not re-projected. The value is
/// unbounded outside the segment, which is how "past the end of the system"
/// is detected. The dominant axis of the segment is used for the ratio.
pub fn proportion_point_on_line(
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    p_project: Vector2<f64>,
    flip: bool,
) -> Result<f64, GeomError> {
    if !is_finite(p1) || !is_finite(p2) || !is_finite(p_project) {
        return Err(GeomError::NonFinite);
    }
    let d = p2 - p1;
    if d.x.abs() <= MIN_BASE && d.y.abs() <= MIN_BASE {
        return Err(GeomError::CoincidentPoints);
    }
    if tracing::enabled!(tracing::Level::TRACE) {
        let on_line = project_point_on_line(p1, p2, p_project, flip)
            .map(|q| (q - p_project).norm() <= 1e-6)
            .unwrap_or(false);
        tracing::trace!(on_line, "proportion_point_on_line");
    }
    if d.x.abs() >= d.y.abs() {
        Ok((p_project.x - p1.x) / d.x)
    } else {
        Ok((p_project.y - p1.y) / d.y)
    }
}

/// Segment parallel to `p1 → p2` on the line through `p_prime`.
///
/// Both endpoints are shifted by the perpendicular vector from the line to
/// `p_prime`; `height` is its length. This is how a system's bottom edge is
/// derived from the top edge and the staff height point.
pub fn translate_line_through_point(
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    p_prime: Vector2<f64>,
) -> Result<TranslatedLine, GeomError> {
    let diff = measure_line_diff(p1, p2)?;
    if !is_finite(p_prime) {
        return Err(GeomError::NonFinite);
    }
    let normal = diff.normal();
    let signed = normal.dot(&(p_prime - p1));
    let shift = normal * signed;
    Ok(TranslatedLine {
        p1_prime: p1 + shift,
        p2_prime: p2 + shift,
        height: signed.abs(),
    })
}
