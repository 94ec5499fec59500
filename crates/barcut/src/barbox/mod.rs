//! Bar boxes: partition one calibrated system into measures.
//!
//! Purpose
//! - `SystemFrame` validates the three calibration points of a system and
//!   derives its bounding parallelogram (top edge plus translated bottom edge).
//! - `make_bar_boxes_from_active_bar_cut` walks the break points left to right,
//!   projecting each onto both edges to close one bar and open the next.
//!
//! Code cross-refs: `geom::{project_point_on_line, translate_line_through_point}`

mod partition;
mod types;

pub use partition::{make_bar_boxes_from_active_bar_cut, try_make_bar_boxes};
pub use types::{BarBox, SystemFrame};
