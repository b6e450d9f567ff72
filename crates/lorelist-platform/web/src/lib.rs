//! Browser adapter: pointer translation and `localStorage` persistence.

mod storage;

pub use storage::LocalStorage;

use lorelist_foundation::{PointerButton, PointerEvent, PointerEventKind, PointerId};
use lorelist_ui_graphics::Point;

/// Stateless translator from DOM pointer events to list pointer events.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebPlatform;

impl WebPlatform {
    /// Maps a DOM event type to a pointer event kind.
    pub fn pointer_kind(event_type: &str) -> Option<PointerEventKind> {
        match event_type {
            "pointerdown" => Some(PointerEventKind::Down),
            "pointermove" => Some(PointerEventKind::Move),
            "pointerup" => Some(PointerEventKind::Up),
            "pointercancel" | "lostpointercapture" => Some(PointerEventKind::Cancel),
            _ => None,
        }
    }

    /// Maps `MouseEvent.button`. Events without a changed button report
    /// `-1` and are treated as primary.
    pub fn pointer_button(button: i16) -> PointerButton {
        match button {
            1 => PointerButton::Middle,
            2 => PointerButton::Secondary,
            _ => PointerButton::Primary,
        }
    }

    /// `x`/`y` are CSS pixels relative to the list viewport, which are
    /// already logical coordinates.
    pub fn pointer_position(&self, x: f64, y: f64) -> Point {
        Point {
            x: x as f32,
            y: y as f32,
        }
    }

    pub fn pointer_event(&self, kind: PointerEventKind, x: f64, y: f64) -> PointerEvent {
        PointerEvent::new(kind, self.pointer_position(x, y))
    }

    /// Converts a DOM pointer event whose client coordinates are offset by
    /// the viewport's top-left corner `origin`.
    pub fn translate(&self, event: &web_sys::PointerEvent, origin: Point) -> Option<PointerEvent> {
        let kind = Self::pointer_kind(&event.type_())?;
        let x = f64::from(event.client_x()) - f64::from(origin.x);
        let y = f64::from(event.client_y()) - f64::from(origin.y);
        let id: PointerId = u64::from(event.pointer_id().unsigned_abs());
        Some(
            self.pointer_event(kind, x, y)
                .with_id(id)
                .with_button(Self::pointer_button(event.button())),
        )
    }
}
