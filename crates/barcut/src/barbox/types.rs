use serde::{Deserialize, Serialize};

use crate::geom::{
    measure_distance, proportion_point_on_line, project_point_on_line,
    translate_line_through_point, CalibrationPoint, GeomError, Point2D, Segment, MIN_HEIGHT,
};

/// One measure's quadrilateral region inside a system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarBox {
    /// Shared with the previous bar's top-right corner.
    pub upper_left_corner: Point2D,
    /// Perpendicular distance between the system's top and bottom edges.
    pub height: f64,
    /// Distance along the top edge between left and right boundary.
    pub width: f64,
    /// Top-left, top-right, bottom-right, bottom-left.
    pub corners: [Point2D; 4],
    pub index_in_row: usize,
    pub index_in_page: usize,
    pub index_in_document: usize,
}

/// Validated bounding parallelogram of one system.
///
/// Invariants: the top edge has non-zero length and `height > 0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemFrame {
    pub top_left: Point2D,
    pub top_right: Point2D,
    pub bottom_right: Point2D,
    pub bottom_left: Point2D,
    pub height: f64,
}

impl SystemFrame {
    /// Build the frame from the top edge and a point on the bottom edge.
    ///
    /// Errors: `CoincidentPoints` if the top corners coincide,
    /// `DegenerateTriangle` if `staff_height` lies on the top edge's line.
    pub fn from_calibration(
        top_left: Point2D,
        top_right: Point2D,
        staff_height: Point2D,
    ) -> Result<Self, GeomError> {
        let bottom = translate_line_through_point(top_left, top_right, staff_height)?;
        if bottom.height <= MIN_HEIGHT {
            return Err(GeomError::DegenerateTriangle);
        }
        Ok(Self {
            top_left,
            top_right,
            bottom_right: bottom.p2_prime,
            bottom_left: bottom.p1_prime,
            height: bottom.height,
        })
    }

    /// Same as `from_calibration`, reporting the first absent input.
    pub fn from_options(
        top_left: Option<Point2D>,
        top_right: Option<Point2D>,
        staff_height: Option<Point2D>,
    ) -> Result<Self, GeomError> {
        let top_left = top_left.ok_or(GeomError::MissingCalibration(CalibrationPoint::TopLeft))?;
        let top_right =
            top_right.ok_or(GeomError::MissingCalibration(CalibrationPoint::TopRight))?;
        let staff_height =
            staff_height.ok_or(GeomError::MissingCalibration(CalibrationPoint::StaffHeight))?;
        Self::from_calibration(top_left, top_right, staff_height)
    }

    #[inline]
    pub fn top(&self) -> Segment {
        Segment::new(self.top_left, self.top_right)
    }

    #[inline]
    pub fn bottom(&self) -> Segment {
        Segment::new(self.bottom_left, self.bottom_right)
    }

    /// Top-left, top-right, bottom-right, bottom-left.
    #[inline]
    pub fn corners(&self) -> [Point2D; 4] {
        [self.top_left, self.top_right, self.bottom_right, self.bottom_left]
    }

    #[inline]
    pub fn width(&self) -> f64 {
        measure_distance(self.top_left, self.top_right)
    }

    pub fn project_on_top(&self, p: Point2D) -> Result<Point2D, GeomError> {
        project_point_on_line(self.top_left, self.top_right, p, false)
    }

    pub fn project_on_bottom(&self, p: Point2D) -> Result<Point2D, GeomError> {
        project_point_on_line(self.bottom_left, self.bottom_right, p, true)
    }

    /// Position of `p` along the top edge after projection (0 left, 1 right).
    pub fn proportion_along_top(&self, p: Point2D) -> Result<f64, GeomError> {
        let q = self.project_on_top(p)?;
        proportion_point_on_line(self.top_left, self.top_right, q, false)
    }
}
