//! Pointer input for the list surface.

pub mod gestures;
mod types;

pub use types::*;
