//! Row renderer.
//!
//! Rows are rebuilt on every pass and remounted as the window scrolls, so a
//! row carries no state of its own. Its remove affordance only names an
//! index; the container decides what happens.

use lorelist_foundation::RowOffsets;
use lorelist_ui_graphics::Rect;

use crate::scene::RowNode;

/// Side length of the square remove affordance.
pub const REMOVE_BUTTON_SIZE: f32 = 28.0;

/// Inset of the remove affordance from the row's top-right corner.
pub const REMOVE_BUTTON_INSET: f32 = 8.0;

pub struct ListRow<'a> {
    index: usize,
    text: &'a str,
}

impl<'a> ListRow<'a> {
    pub fn new(index: usize, text: &'a str) -> Self {
        Self { index, text }
    }

    pub fn label(&self) -> String {
        self.index.to_string()
    }

    /// Lays the row out against the current offsets.
    pub fn layout(
        &self,
        offsets: &RowOffsets,
        scroll_offset: f32,
        width: f32,
        measured: bool,
        is_drag_source: bool,
    ) -> RowNode {
        let content_bounds = Rect::new(
            0.0,
            offsets.start(self.index),
            width,
            offsets.height(self.index),
        );
        let bounds = content_bounds.translate(0.0, -scroll_offset);
        RowNode {
            index: self.index,
            label: self.label(),
            text: self.text.to_owned(),
            content_bounds,
            bounds,
            remove_button: remove_button_bounds(bounds),
            measured,
            is_drag_source,
        }
    }
}

/// Remove affordance for a row occupying `row`.
pub fn remove_button_bounds(row: Rect) -> Rect {
    let size = REMOVE_BUTTON_SIZE.min(row.height).min(row.width);
    Rect::new(
        (row.right() - REMOVE_BUTTON_INSET - size).max(row.x),
        row.y + REMOVE_BUTTON_INSET.min((row.height - size).max(0.0)),
        size,
        size,
    )
}
