//! Pure geometry for lorelist
//!
//! Points, sizes and rectangles in logical pixels. Every other crate in the
//! workspace speaks these types at its boundaries.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{Point, Rect, Size};
}
