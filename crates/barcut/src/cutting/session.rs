use crate::barbox::BarBox;
use crate::document::BarDocument;

use super::types::{CuttingCfg, Event, Stage, StepError};

/// Cutting session over a document: one page at a time, any number of
/// systems per page.
#[derive(Clone, Debug, Default)]
pub struct Session {
    cfg: CuttingCfg,
    page: u32,
    stage: Stage,
    document: BarDocument,
}

impl Session {
    pub fn new(cfg: CuttingCfg) -> Self {
        Self {
            cfg,
            ..Self::default()
        }
    }

    /// Continue cutting into an existing document.
    pub fn with_document(cfg: CuttingCfg, document: BarDocument) -> Self {
        Self {
            cfg,
            document,
            ..Self::default()
        }
    }

    pub fn cfg(&self) -> &CuttingCfg {
        &self.cfg
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn document(&self) -> &BarDocument {
        &self.document
    }

    pub fn into_document(self) -> BarDocument {
        self.document
    }

    /// Switch to `page` and wait for the first top-left click. Any system in
    /// progress is discarded.
    pub fn load_page(&mut self, page: u32) -> Result<(), StepError> {
        self.page = page;
        self.stage = self.rearmed()?;
        tracing::debug!(page, "page loaded");
        Ok(())
    }

    fn rearmed(&self) -> Result<Stage, StepError> {
        Stage::Empty
            .step(Event::PageLoaded, &self.cfg)?
            .step(Event::Begin, &self.cfg)
    }

    /// Feed one event. When it finishes a system, the system's bar boxes are
    /// appended to the document and returned, and the session waits for the
    /// next system's top-left corner on the same page. A `Reset` discards the
    /// system in progress and likewise waits for a new top-left corner.
    ///
    /// On error the stage is unchanged.
    pub fn handle(&mut self, event: Event) -> Result<Option<&[BarBox]>, StepError> {
        let (frame, break_points) = match self.stage.step(event, &self.cfg)? {
            Stage::Saving {
                frame,
                break_points,
            } => (frame, break_points),
            Stage::Empty => {
                self.stage = self.rearmed()?;
                return Ok(None);
            }
            next => {
                self.stage = next;
                return Ok(None);
            }
        };
        let page = self.page;
        let bars = self.document.push_system(page, &frame, &break_points).len();
        tracing::info!(page, bars, "system cut");
        // Commit, then wait for the next system on the same page.
        self.stage = self.rearmed()?;
        Ok(self.document.last_system(page))
    }

    /// Current preview: bars cut so far in the active system, indexed as
    /// they would be stored.
    pub fn preview(&self) -> Vec<BarBox> {
        let (in_page, in_document) = self.document.next_offsets(self.page);
        self.stage.preview_bar_boxes(in_page, in_document)
    }
}
