use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which calibration input of a system is meant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationPoint {
    TopLeft,
    TopRight,
    StaffHeight,
}

impl fmt::Display for CalibrationPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CalibrationPoint::TopLeft => "top-left corner",
            CalibrationPoint::TopRight => "top-right corner",
            CalibrationPoint::StaffHeight => "staff height point",
        };
        f.write_str(name)
    }
}

/// Failure reasons of the geometry and partitioning functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GeomError {
    /// The two points spanning a line coincide, so the line has no direction.
    #[error("coincident points: the base of the line has zero length")]
    CoincidentPoints,

    /// Heron's radicand went negative, or the triangle has no height.
    #[error("degenerate triangle: points are (numerically) collinear")]
    DegenerateTriangle,

    /// A calibration input has not been supplied yet.
    #[error("missing calibration: {0}")]
    MissingCalibration(CalibrationPoint),

    /// Some coordinate is NaN or infinite.
    #[error("non-finite coordinate")]
    NonFinite,
}
