//! List widgets

pub mod list_row;
pub mod toolbar;
pub mod virtualized_list;

pub use list_row::*;
pub use toolbar::*;
pub use virtualized_list::*;
