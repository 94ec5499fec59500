//! Tolerance defaults for canvas geometry (internal).
//!
//! Policy
//! - Fixed constants in pixel units. Canvas coordinates come from pointer
//!   events, so anything below these is a double click, not a real extent.

/// Shortest base (segment length) accepted before a line counts as undefined.
pub(crate) const MIN_BASE: f64 = 1e-9;
/// Smallest perpendicular extent accepted for a system's staff height.
pub(crate) const MIN_HEIGHT: f64 = 1e-9;
