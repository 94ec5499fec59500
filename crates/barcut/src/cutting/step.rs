use crate::barbox::{BarBox, SystemFrame};
use crate::geom::{is_finite, measure_line_diff, GeomError, Point2D, Segment};

use super::types::{CuttingCfg, Event, Stage, StepError};

impl Stage {
    /// Next stage after `event`. Pure: `self` is left untouched, and a
    /// rejected click leaves the caller's stage as it was.
    pub fn step(&self, event: Event, cfg: &CuttingCfg) -> Result<Stage, StepError> {
        let next = match (self, event) {
            (_, Event::Reset) => Stage::Empty,
            (_, Event::PointerMove(p)) => self.with_cursor(p),
            (Stage::Empty, Event::PageLoaded) => Stage::Loaded,
            (Stage::Loaded, Event::Begin) => Stage::TopLeft { cursor: None },
            (Stage::TopLeft { .. }, Event::Click(p)) => {
                if !is_finite(p) {
                    return Err(GeomError::NonFinite.into());
                }
                Stage::TopRight {
                    top_left: p,
                    cursor: None,
                }
            }
            (Stage::TopRight { top_left, .. }, Event::Click(p)) => {
                measure_line_diff(*top_left, p)?;
                Stage::Height {
                    top_left: *top_left,
                    top_right: p,
                    cursor: None,
                }
            }
            (
                Stage::Height {
                    top_left,
                    top_right,
                    ..
                },
                Event::Click(p),
            ) => Stage::Cutting {
                frame: SystemFrame::from_calibration(*top_left, *top_right, p)?,
                break_points: Vec::new(),
                cursor: None,
            },
            (
                Stage::Cutting {
                    frame,
                    break_points,
                    ..
                },
                Event::Click(p),
            ) => {
                let proportion = frame.proportion_along_top(p)?;
                let mut break_points = break_points.clone();
                if proportion > cfg.finish_threshold {
                    if cfg.include_trigger_point {
                        break_points.push(p);
                    }
                    tracing::debug!(proportion, bars = break_points.len(), "system fully cut");
                    Stage::Saving {
                        frame: *frame,
                        break_points,
                    }
                } else {
                    break_points.push(p);
                    Stage::Cutting {
                        frame: *frame,
                        break_points,
                        cursor: None,
                    }
                }
            }
            (Stage::Saving { .. }, Event::Commit) => Stage::Empty,
            (stage, event) => {
                return Err(StepError::Unexpected {
                    stage: stage.name(),
                    event: event.name(),
                })
            }
        };
        if next.name() != self.name() {
            tracing::trace!(from = self.name(), to = next.name(), "stage transition");
        }
        Ok(next)
    }

    /// Pointer moves only refresh the preview cursor; stages without one
    /// ignore them.
    fn with_cursor(&self, p: Point2D) -> Stage {
        let mut next = self.clone();
        match &mut next {
            Stage::TopLeft { cursor }
            | Stage::TopRight { cursor, .. }
            | Stage::Height { cursor, .. }
            | Stage::Cutting { cursor, .. } => *cursor = Some(p),
            Stage::Empty | Stage::Loaded | Stage::Saving { .. } => {}
        }
        next
    }

    /// Top edge guide: the committed edge, or top-left to cursor while the
    /// top-right corner is being chosen.
    pub fn top_edge(&self) -> Option<Segment> {
        match self {
            Stage::TopRight {
                top_left,
                cursor: Some(c),
            } => Some(Segment::new(*top_left, *c)),
            Stage::Height {
                top_left,
                top_right,
                ..
            } => Some(Segment::new(*top_left, *top_right)),
            Stage::Cutting { frame, .. } | Stage::Saving { frame, .. } => Some(frame.top()),
            _ => None,
        }
    }

    /// Bounding parallelogram, using the cursor as the staff height point
    /// while that point is being chosen.
    pub fn frame(&self) -> Option<SystemFrame> {
        match self {
            Stage::Height {
                top_left,
                top_right,
                cursor: Some(c),
            } => SystemFrame::from_calibration(*top_left, *top_right, *c).ok(),
            Stage::Cutting { frame, .. } | Stage::Saving { frame, .. } => Some(*frame),
            _ => None,
        }
    }

    /// Bars cut so far; while cutting, the cursor acts as a tentative break.
    pub fn preview_bar_boxes(
        &self,
        first_bar_index_in_page: usize,
        first_bar_index_in_document: usize,
    ) -> Vec<BarBox> {
        match self {
            Stage::Cutting {
                frame,
                break_points,
                cursor,
            } => {
                let mut pts = break_points.clone();
                pts.extend(cursor.iter().copied());
                frame.bar_boxes(&pts, first_bar_index_in_page, first_bar_index_in_document)
            }
            Stage::Saving {
                frame,
                break_points,
            } => frame.bar_boxes(
                break_points,
                first_bar_index_in_page,
                first_bar_index_in_document,
            ),
            _ => Vec::new(),
        }
    }

    /// Final bar boxes once the system is fully cut.
    pub fn finished_bar_boxes(
        &self,
        first_bar_index_in_page: usize,
        first_bar_index_in_document: usize,
    ) -> Option<Vec<BarBox>> {
        match self {
            Stage::Saving {
                frame,
                break_points,
            } => Some(frame.bar_boxes(
                break_points,
                first_bar_index_in_page,
                first_bar_index_in_document,
            )),
            _ => None,
        }
    }
}
