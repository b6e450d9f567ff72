//! Core state for lorelist
//!
//! The ordered list of text entries owned by the application root, the
//! index-scoped edits the list view is allowed to request against it, and the
//! two external capabilities the application consumes: placeholder text
//! generation and key-value persistence.

mod list_state;
pub mod persistence;
pub mod text_gen;

pub use list_state::*;
pub use persistence::{KeyValueStore, ListSnapshotStore, MemoryStore, StorageError};
pub use text_gen::{LoremGenerator, TextGenerator};

pub mod prelude {
    pub use crate::list_state::{ListEdit, ListEditError, ListState};
    pub use crate::persistence::{KeyValueStore, ListSnapshotStore, StorageError};
    pub use crate::text_gen::TextGenerator;
}
