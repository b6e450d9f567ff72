//! Toolbar: item-count input and the generate / reset / save / load actions.

use std::num::NonZeroUsize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolbarAction {
    Generate,
    Reset,
    Save,
    Load,
}

/// Which toolbar buttons are enabled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToolbarState {
    pub generate_enabled: bool,
    pub reset_enabled: bool,
    pub save_enabled: bool,
    pub load_enabled: bool,
}

impl ToolbarState {
    pub fn is_enabled(&self, action: ToolbarAction) -> bool {
        match action {
            ToolbarAction::Generate => self.generate_enabled,
            ToolbarAction::Reset => self.reset_enabled,
            ToolbarAction::Save => self.save_enabled,
            ToolbarAction::Load => self.load_enabled,
        }
    }
}

/// Parses the item-count field: surrounding whitespace is ignored, anything
/// but a positive decimal integer is rejected.
pub fn parse_item_count(text: &str) -> Option<NonZeroUsize> {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<NonZeroUsize>().ok()
}

#[derive(Clone, Debug, Default)]
pub struct Toolbar {
    count_input: String,
}

impl Toolbar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_input(&self) -> &str {
        &self.count_input
    }

    pub fn set_count_input(&mut self, text: impl Into<String>) {
        self.count_input = text.into();
    }

    pub fn requested_count(&self) -> Option<NonZeroUsize> {
        parse_item_count(&self.count_input)
    }

    /// Generate and reset stay enabled; an unusable count makes generate a no-op.
    pub fn state(&self, list_len: usize, storage_available: bool, has_snapshot: bool) -> ToolbarState {
        ToolbarState {
            generate_enabled: true,
            reset_enabled: true,
            save_enabled: storage_available && list_len > 0,
            load_enabled: storage_available && has_snapshot,
        }
    }
}
