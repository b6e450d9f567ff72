//! Launching lorelist applications.
//!
//! [`AppLauncher`] assembles a [`ListApp`](lorelist_ui::ListApp) from
//! settings; with the `web` feature it also mounts it into a page.

mod launcher;
pub use launcher::{AppLauncher, AppSettings};

#[cfg(feature = "web")]
mod web;
