pub mod drag;

pub use drag::{DragContext, DragOutcome, DragPreview, DragReorderController, DragState};
