//! Headless output of a list layout pass.

use lorelist_foundation::ViewportWindow;
use lorelist_ui_graphics::{Point, Rect, Size};

/// What a pointer position lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    ScrollToBottom,
    RemoveButton(usize),
    Row(usize),
}

/// One mounted row.
#[derive(Clone, Debug, PartialEq)]
pub struct RowNode {
    pub index: usize,
    /// Visible index label.
    pub label: String,
    pub text: String,
    /// Position within the scrolled content.
    pub content_bounds: Rect,
    /// Position within the viewport.
    pub bounds: Rect,
    /// Remove affordance, viewport space.
    pub remove_button: Rect,
    /// Whether `bounds.height` is a measurement rather than the estimate.
    pub measured: bool,
    /// The row is the source of an active drag and is drawn as a placeholder.
    pub is_drag_source: bool,
}

/// Clone of the dragged row following the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct DragPreviewNode {
    pub source: usize,
    pub destination: usize,
    pub label: String,
    pub text: String,
    pub bounds: Rect,
}

/// Everything the platform needs to draw one frame of the list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListScene {
    pub viewport: Size,
    pub scroll_offset: f32,
    pub total_content_height: f32,
    pub window: ViewportWindow,
    pub rows: Vec<RowNode>,
    pub drag_preview: Option<DragPreviewNode>,
    /// Viewport-space y of the line where the dragged row would land.
    pub drop_indicator: Option<f32>,
    /// Present while the scroll-to-bottom affordance is shown.
    pub scroll_to_bottom_button: Option<Rect>,
    /// Scroll offset the platform must apply to its scroll surface.
    pub scroll_request: Option<f32>,
}

impl ListScene {
    pub fn row(&self, index: usize) -> Option<&RowNode> {
        self.rows.iter().find(|row| row.index == index)
    }

    pub fn mounted_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().map(|row| row.index)
    }

    pub fn shows_scroll_to_bottom(&self) -> bool {
        self.scroll_to_bottom_button.is_some()
    }

    /// Topmost element under `point`, viewport space.
    pub fn hit_test(&self, point: Point) -> Option<HitTarget> {
        if let Some(button) = self.scroll_to_bottom_button {
            if button.contains_point(point) {
                return Some(HitTarget::ScrollToBottom);
            }
        }
        if !Rect::from_size(self.viewport).contains_point(point) {
            return None;
        }
        let row = self.rows.iter().find(|row| row.bounds.contains_point(point))?;
        if row.remove_button.contains_point(point) {
            Some(HitTarget::RemoveButton(row.index))
        } else {
            Some(HitTarget::Row(row.index))
        }
    }
}
