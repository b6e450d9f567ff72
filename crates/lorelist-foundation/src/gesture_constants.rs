//! Shared gesture constants for consistent pointer handling.
//!
//! Values are in logical pixels.

/// Drag threshold in logical pixels.
///
/// A press on a row turns into a reorder drag only once the pointer has moved
/// further than this from the press position. Shorter press/release pairs are
/// clicks, which keeps the remove affordance inside a draggable row usable.
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Tolerance used to match a scroll event with the programmatic scroll that
/// caused it. Browsers round `scrollTop` to device pixels.
pub const PROGRAMMATIC_SCROLL_TOLERANCE: f32 = 1.0;

/// Band along the top and bottom edges of the list in which a drag scrolls
/// the list towards that edge.
pub const DRAG_AUTOSCROLL_EDGE: f32 = 48.0;

/// Scroll distance per frame when the pointer sits on or beyond an edge.
pub const DRAG_AUTOSCROLL_MAX_STEP: f32 = 18.0;
