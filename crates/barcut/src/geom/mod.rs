//! Planar measurements and projections over canvas points.
//!
//! Purpose
//! - Provide the small set of primitives the bar cutter needs: distances,
//!   triangle heights, orthogonal projection onto a line, parallel translation
//!   of a segment, and angle helpers for diagnostics.
//! - Make every degenerate case explicit: functions that can fail return
//!   `Result<_, GeomError>` instead of letting NaN leak into callers.
//!
//! Conventions
//! - Canvas pixel space: origin top-left, y grows downward.
//! - Points are `nalgebra::Vector2<f64>` (aliased `Point2D`).
//! - Code cross-refs: `barbox::SystemFrame`, `cutting::Stage`

mod cfg;
mod error;
mod measure;
mod project;
mod types;

pub use error::{CalibrationPoint, GeomError};
pub use measure::{
    degrees_to_radian, get_line_angle, measure_angle_from_points, measure_distance,
    measure_height_from_points, measure_line_diff, measure_triangle_area_from_points,
    radian_to_degrees,
};
pub use project::{proportion_point_on_line, project_point_on_line, translate_line_through_point};
pub use types::{Degree, LineDiff, Point2D, Radian, Segment, TranslatedLine};

pub(crate) use cfg::MIN_HEIGHT;
pub(crate) use measure::is_finite;
