//! Foundation pieces of the virtualized, reorderable list
//!
//! Layout math (height cache, prefix offsets, viewport windowing, scroll
//! tracking) and input handling (pointer events, drag reordering). Nothing in
//! this crate knows about list contents; rows are identified by index only.

pub mod gesture_constants;
pub mod lazy;
pub mod nodes;

pub use gesture_constants::{DRAG_AUTOSCROLL_EDGE, DRAG_AUTOSCROLL_MAX_STEP, DRAG_THRESHOLD};
pub use lazy::{
    compute_window, HeightCache, RowOffsets, ScrollPosition, ScrollSource, ViewportHandler,
    ViewportWindow, VirtualListConfig, WindowRequest,
};
pub use nodes::input::gestures::{
    DragContext, DragOutcome, DragPreview, DragReorderController, DragState,
};
pub use nodes::input::{PointerButton, PointerEvent, PointerEventKind, PointerId};

pub mod prelude {
    pub use crate::lazy::{HeightCache, RowOffsets, ViewportWindow, VirtualListConfig};
    pub use crate::nodes::input::gestures::{DragOutcome, DragReorderController};
    pub use crate::nodes::input::{PointerEvent, PointerEventKind};
}
