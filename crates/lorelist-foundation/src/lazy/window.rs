//! Viewport windowing: which rows must be mounted for a scroll position.

use std::ops::Range;

use super::height_cache::RowOffsets;
use super::viewport::ViewportHandler;

/// Inputs of a windowing pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowRequest {
    pub scroll_offset: f32,
    pub viewport_height: f32,
    pub overscan: usize,
    /// Only used to bound an unbounded viewport.
    pub estimated_row_height: f32,
}

/// The derived window for one layout pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewportWindow {
    /// Rows intersecting the viewport.
    pub visible: Range<usize>,
    /// `visible` widened by the overscan margin, clamped to the list.
    pub mounted: Range<usize>,
    /// Scroll offset clamped to `[0, total_content_height - viewport_height]`.
    pub scroll_offset: f32,
    pub viewport_height: f32,
    pub total_content_height: f32,
}

impl ViewportWindow {
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn first_visible(&self) -> Option<usize> {
        (!self.visible.is_empty()).then_some(self.visible.start)
    }

    pub fn last_visible(&self) -> Option<usize> {
        (!self.visible.is_empty()).then(|| self.visible.end - 1)
    }

    pub fn max_scroll_offset(&self) -> f32 {
        (self.total_content_height - self.viewport_height).max(0.0)
    }
}

/// Computes the minimal contiguous range of rows covering the viewport.
///
/// Pure: identical inputs always produce an identical window, so a measure
/// pass followed by a re-render converges instead of oscillating.
pub fn compute_window(request: &WindowRequest, offsets: &RowOffsets) -> ViewportWindow {
    let viewport_height =
        ViewportHandler::new(request.viewport_height, request.estimated_row_height)
            .effective_height();
    let total = offsets.total_height();
    let max_offset = (total - viewport_height).max(0.0);
    let scroll_offset = if request.scroll_offset.is_nan() {
        0.0
    } else {
        request.scroll_offset.clamp(0.0, max_offset)
    };

    let rows = offsets.row_count();
    if rows == 0 {
        return ViewportWindow {
            visible: 0..0,
            mounted: 0..0,
            scroll_offset: 0.0,
            viewport_height,
            total_content_height: 0.0,
        };
    }

    let first = offsets.index_at(scroll_offset).unwrap_or(0);
    let viewport_end = scroll_offset + viewport_height;
    let mut last = first;
    while last + 1 < rows && offsets.start(last + 1) < viewport_end {
        last += 1;
    }

    let visible = first..last + 1;
    let mounted =
        first.saturating_sub(request.overscan)..(last + 1).saturating_add(request.overscan).min(rows);

    ViewportWindow {
        visible,
        mounted,
        scroll_offset,
        viewport_height,
        total_content_height: total,
    }
}
