//! In-memory bar document: bar boxes grouped by page and system.
//!
//! The document owns the running offsets handed to the partitioner, so
//! `index_in_page` and `index_in_document` keep counting across systems.
//! Offsets advance by the number of break points consumed, not by the number
//! of emitted boxes, so indices stay unique when a break point is skipped.

use serde::{Deserialize, Serialize};

use crate::barbox::{BarBox, SystemFrame};
use crate::geom::{GeomError, Point2D};

/// Bar boxes of one page, one `Vec` per system, top to bottom.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PageBars {
    pub page: u32,
    pub next_index_in_page: usize,
    pub systems: Vec<Vec<BarBox>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BarDocument {
    pub next_index_in_document: usize,
    pub pages: Vec<PageBars>,
}

impl BarDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self, page: u32) -> Option<&PageBars> {
        self.pages.iter().find(|p| p.page == page)
    }

    fn page_index(&mut self, page: u32) -> usize {
        match self.pages.iter().position(|p| p.page == page) {
            Some(k) => k,
            None => {
                self.pages.push(PageBars {
                    page,
                    ..PageBars::default()
                });
                self.pages.len() - 1
            }
        }
    }

    /// Offsets the next system on `page` starts from.
    pub fn next_offsets(&self, page: u32) -> (usize, usize) {
        let in_page = self.page(page).map_or(0, |p| p.next_index_in_page);
        (in_page, self.next_index_in_document)
    }

    /// Partition `frame` at `break_points` and append it as the next system
    /// of `page`.
    pub fn push_system(
        &mut self,
        page: u32,
        frame: &SystemFrame,
        break_points: &[Point2D],
    ) -> &[BarBox] {
        let (in_page, in_document) = self.next_offsets(page);
        let boxes = frame.bar_boxes(break_points, in_page, in_document);
        self.next_index_in_document += break_points.len();
        let k = self.page_index(page);
        let entry = &mut self.pages[k];
        entry.next_index_in_page += break_points.len();
        entry.systems.push(boxes);
        let last = entry.systems.len() - 1;
        &entry.systems[last]
    }

    /// Like `push_system`, from raw (possibly incomplete) calibration.
    /// Nothing is appended on error.
    pub fn add_system(
        &mut self,
        page: u32,
        top_left: Option<Point2D>,
        top_right: Option<Point2D>,
        staff_height: Option<Point2D>,
        break_points: &[Point2D],
    ) -> Result<&[BarBox], GeomError> {
        let frame = SystemFrame::from_options(top_left, top_right, staff_height)?;
        Ok(self.push_system(page, &frame, break_points))
    }

    /// Most recently appended system of `page`.
    pub fn last_system(&self, page: u32) -> Option<&[BarBox]> {
        self.page(page)?.systems.last().map(Vec::as_slice)
    }

    pub fn bars(&self) -> impl Iterator<Item = &BarBox> + '_ {
        self.pages
            .iter()
            .flat_map(|p| p.systems.iter())
            .flat_map(|s| s.iter())
    }

    pub fn bar_count(&self) -> usize {
        self.bars().count()
    }

    pub fn system_count(&self) -> usize {
        self.pages.iter().map(|p| p.systems.len()).sum()
    }
}
