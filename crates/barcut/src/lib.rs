//! Bar cutting for scanned scores.
//!
//! A user marks one system (staff group) on a rendered page with three
//! calibration clicks (top-left, top-right, a point on the bottom edge) and a
//! sequence of break points; this crate turns those points into one
//! quadrilateral `BarBox` per measure.
//!
//! Layout
//! - `geom`: distances, heights, projections and translations with typed
//!   failure (`GeomError`).
//! - `barbox`: `SystemFrame` and the bar partitioning.
//! - `cutting`: the click workflow as a pure state machine, plus `Session`.
//! - `document`: bar boxes grouped by page and system, with running indices.
//! - `sample`: seeded synthetic systems.

pub mod barbox;
pub mod cutting;
pub mod document;
pub mod geom;
pub mod sample;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use barbox::{make_bar_boxes_from_active_bar_cut, try_make_bar_boxes, BarBox, SystemFrame};
pub use geom::{GeomError, Point2D};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::barbox::{
        make_bar_boxes_from_active_bar_cut, try_make_bar_boxes, BarBox, SystemFrame,
    };
    pub use crate::cutting::{CuttingCfg, Event, Session, Stage, StepError};
    pub use crate::document::{BarDocument, PageBars};
    pub use crate::geom::{
        measure_distance, measure_height_from_points, project_point_on_line,
        proportion_point_on_line, translate_line_through_point, CalibrationPoint, GeomError,
        Point2D, Segment,
    };
    pub use crate::sample::{draw_system, ReplayToken, SampledSystem, SystemCfg};
    pub use nalgebra::Vector2 as Vec2;
}
