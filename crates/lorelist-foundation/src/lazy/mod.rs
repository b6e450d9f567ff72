//! Virtualized list layout.
//!
//! The pieces here form a two-phase protocol: a layout pass windows the list
//! using measured-or-estimated heights, the host measures the rows it mounted
//! and feeds the heights back into the [`HeightCache`], and the next pass
//! windows again with the real values.

mod height_cache;
mod scroll_position;
mod viewport;
mod window;

pub use height_cache::{HeightCache, RowOffsets};
pub use scroll_position::{ScrollPosition, ScrollSource};
pub use viewport::ViewportHandler;
pub use window::{compute_window, ViewportWindow, WindowRequest};

/// Height assumed for rows that have not been measured yet.
pub const DEFAULT_ROW_HEIGHT_ESTIMATE: f32 = 320.0;

/// Rows mounted above and below the visible range.
pub const DEFAULT_OVERSCAN_ROWS: usize = 2;

/// Configuration for the virtualized list.
#[derive(Clone, Debug, PartialEq)]
pub struct VirtualListConfig {
    /// Height used for layout math until a row has been measured.
    pub estimated_row_height: f32,
    /// Extra rows mounted on each side of the visible range.
    pub overscan_rows: usize,
    /// Slack when deciding whether the view sits at the bottom.
    pub bottom_epsilon: f32,
    /// Upper bound on render/measure passes before a frame is considered settled.
    pub max_layout_passes: usize,
}

impl Default for VirtualListConfig {
    fn default() -> Self {
        Self {
            estimated_row_height: DEFAULT_ROW_HEIGHT_ESTIMATE,
            overscan_rows: DEFAULT_OVERSCAN_ROWS,
            bottom_epsilon: 1.0,
            max_layout_passes: 8,
        }
    }
}

impl VirtualListConfig {
    pub fn with_estimated_row_height(mut self, height: f32) -> Self {
        self.estimated_row_height = height;
        self
    }

    pub fn with_overscan_rows(mut self, rows: usize) -> Self {
        self.overscan_rows = rows;
        self
    }

    pub fn with_bottom_epsilon(mut self, epsilon: f32) -> Self {
        self.bottom_epsilon = epsilon.max(0.0);
        self
    }

    pub fn with_max_layout_passes(mut self, passes: usize) -> Self {
        self.max_layout_passes = passes.max(1);
        self
    }
}
