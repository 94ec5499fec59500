use crate::geom::{measure_distance, GeomError, Point2D};

use super::types::{BarBox, SystemFrame};

impl SystemFrame {
    /// Partition the frame at `bar_break_points` (ordered left to right by
    /// the caller; not sorted here).
    ///
    /// Indices follow the loop position, so a skipped break point leaves a
    /// gap but the sequence stays monotonic in input order.
    pub fn bar_boxes(
        &self,
        bar_break_points: &[Point2D],
        first_bar_index_in_page: usize,
        first_bar_index_in_document: usize,
    ) -> Vec<BarBox> {
        let mut boxes = Vec::with_capacity(bar_break_points.len());
        let mut bar_up_left = self.top_left;
        let mut bar_down_left = self.bottom_left;

        for (i, &break_point) in bar_break_points.iter().enumerate() {
            let (bar_up_right, bar_down_right) =
                match (self.project_on_top(break_point), self.project_on_bottom(break_point)) {
                    (Ok(up), Ok(down)) => (up, down),
                    (Err(err), _) | (_, Err(err)) => {
                        tracing::debug!(index = i, %err, "skipping bar break point");
                        continue;
                    }
                };

            boxes.push(BarBox {
                upper_left_corner: bar_up_left,
                height: self.height,
                width: measure_distance(bar_up_left, bar_up_right),
                corners: [bar_up_left, bar_up_right, bar_down_right, bar_down_left],
                index_in_row: i,
                index_in_page: first_bar_index_in_page + i,
                index_in_document: first_bar_index_in_document + i,
            });

            bar_up_left = bar_up_right;
            bar_down_left = bar_down_right;
        }
        boxes
    }
}

/// Bar boxes of one system from its calibration and break points.
///
/// Incomplete or degenerate calibration yields an empty sequence (nothing to
/// report). Use `try_make_bar_boxes` to learn why.
pub fn make_bar_boxes_from_active_bar_cut(
    top_left_corner: Option<Point2D>,
    top_right_corner: Option<Point2D>,
    staff_height_point: Option<Point2D>,
    bar_break_points: &[Point2D],
    first_bar_index_in_page: usize,
    first_bar_index_in_document: usize,
) -> Vec<BarBox> {
    try_make_bar_boxes(
        top_left_corner,
        top_right_corner,
        staff_height_point,
        bar_break_points,
        first_bar_index_in_page,
        first_bar_index_in_document,
    )
    .unwrap_or_else(|err| {
        tracing::debug!(%err, "no bar boxes for system");
        Vec::new()
    })
}

/// Strict variant of `make_bar_boxes_from_active_bar_cut`.
///
/// Errors: `MissingCalibration`, `CoincidentPoints` (zero-length top edge),
/// `DegenerateTriangle` (staff height point on the top edge), `NonFinite`.
pub fn try_make_bar_boxes(
    top_left_corner: Option<Point2D>,
    top_right_corner: Option<Point2D>,
    staff_height_point: Option<Point2D>,
    bar_break_points: &[Point2D],
    first_bar_index_in_page: usize,
    first_bar_index_in_document: usize,
) -> Result<Vec<BarBox>, GeomError> {
    let frame = SystemFrame::from_options(top_left_corner, top_right_corner, staff_height_point)?;
    Ok(frame.bar_boxes(
        bar_break_points,
        first_bar_index_in_page,
        first_bar_index_in_document,
    ))
}
