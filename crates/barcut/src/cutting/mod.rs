//! Interactive cutting workflow as a pure state machine.
//!
//! Purpose
//! - Model the click sequence top-left → top-right → staff height → break
//!   points as `Stage::step(&self, Event, &CuttingCfg) -> Result<Stage, _>`.
//!   Each stage carries only the data valid for it, plus an optional live
//!   cursor that pointer moves update for previews.
//! - `Session` ties the machine to a `BarDocument`: a finished system is
//!   partitioned, appended with running page/document offsets, and the
//!   machine is re-armed for the next system.
//!
//! Code cross-refs: `barbox::{SystemFrame, BarBox}`, `document::BarDocument`

mod session;
mod step;
mod types;

pub use session::Session;
pub use types::{CuttingCfg, Event, Stage, StepError};

#[cfg(test)]
mod tests;
