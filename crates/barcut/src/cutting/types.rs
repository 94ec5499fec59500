use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::barbox::SystemFrame;
use crate::geom::{GeomError, Point2D};

/// Cutting configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CuttingCfg {
    /// A break point whose position along the top edge exceeds this ratio
    /// finishes the system.
    pub finish_threshold: f64,
    /// Whether the break point that finished the system is kept as its last
    /// bar boundary.
    pub include_trigger_point: bool,
}

impl Default for CuttingCfg {
    fn default() -> Self {
        Self {
            finish_threshold: 0.98,
            include_trigger_point: true,
        }
    }
}

/// Stage of the cutting workflow for one system.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Empty,
    Loaded,
    TopLeft {
        cursor: Option<Point2D>,
    },
    TopRight {
        top_left: Point2D,
        cursor: Option<Point2D>,
    },
    Height {
        top_left: Point2D,
        top_right: Point2D,
        cursor: Option<Point2D>,
    },
    Cutting {
        frame: SystemFrame,
        break_points: Vec<Point2D>,
        cursor: Option<Point2D>,
    },
    Saving {
        frame: SystemFrame,
        break_points: Vec<Point2D>,
    },
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Empty => "empty",
            Stage::Loaded => "loaded",
            Stage::TopLeft { .. } => "top_left",
            Stage::TopRight { .. } => "top_right",
            Stage::Height { .. } => "height",
            Stage::Cutting { .. } => "cutting",
            Stage::Saving { .. } => "saving",
        }
    }
}

/// Input to the cutting workflow.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "at", rename_all = "snake_case")]
pub enum Event {
    PageLoaded,
    Begin,
    PointerMove(Point2D),
    Click(Point2D),
    Commit,
    Reset,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::PageLoaded => "page_loaded",
            Event::Begin => "begin",
            Event::PointerMove(_) => "pointer_move",
            Event::Click(_) => "click",
            Event::Commit => "commit",
            Event::Reset => "reset",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum StepError {
    /// The clicked point would make the system geometry degenerate.
    #[error(transparent)]
    Geometry(#[from] GeomError),

    #[error("event `{event}` is not accepted in stage `{stage}`")]
    Unexpected {
        stage: &'static str,
        event: &'static str,
    },
}
