//! UI layer for lorelist
//!
//! The list container, its row renderer, the toolbar and the application
//! root. Everything renders into a headless [`ListScene`] that a platform
//! layer turns into real elements, measures, and feeds back.

mod app;
mod scene;
pub mod widgets;

pub use app::{AppOptions, ListApp};
pub use scene::*;
pub use widgets::*;

pub use lorelist_foundation::{PointerEvent, PointerEventKind, VirtualListConfig};
pub use lorelist_ui_graphics::{Point, Rect, Size};

pub mod prelude {
    pub use crate::app::{AppOptions, ListApp};
    pub use crate::scene::{HitTarget, ListScene, RowNode};
    pub use crate::widgets::{Toolbar, ToolbarAction, ToolbarState, VirtualizedList};
}
