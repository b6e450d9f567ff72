//! Application root: owns the list and wires the toolbar, the list container
//! and the two external capabilities together.

use std::num::NonZeroUsize;

use lorelist_core::persistence::DEFAULT_STORAGE_KEY;
use lorelist_core::{KeyValueStore, ListEdit, ListSnapshotStore, ListState, TextGenerator};
use lorelist_foundation::{PointerEvent, ScrollSource, VirtualListConfig};
use lorelist_ui_graphics::Size;

use crate::scene::ListScene;
use crate::widgets::{Toolbar, ToolbarAction, ToolbarState, VirtualizedList};

/// Upper bound on rows added by one generate action.
pub const DEFAULT_MAX_GENERATE_COUNT: usize = 10_000;

#[derive(Clone, Debug, PartialEq)]
pub struct AppOptions {
    pub storage_key: String,
    pub max_generate_count: usize,
    pub list: VirtualListConfig,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            max_generate_count: DEFAULT_MAX_GENERATE_COUNT,
            list: VirtualListConfig::default(),
        }
    }
}

impl AppOptions {
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_max_generate_count(mut self, count: usize) -> Self {
        self.max_generate_count = count.max(1);
        self
    }

    pub fn with_list_config(mut self, config: VirtualListConfig) -> Self {
        self.list = config;
        self
    }
}

pub struct ListApp<G, S> {
    items: ListState,
    list: VirtualizedList,
    toolbar: Toolbar,
    generator: G,
    snapshots: ListSnapshotStore<S>,
    /// Cached answer of `snapshots.has_snapshot()`, refreshed on save.
    has_snapshot: bool,
    options: AppOptions,
}

impl<G: TextGenerator, S: KeyValueStore> ListApp<G, S> {
    pub fn new(generator: G, store: Option<S>) -> Self {
        Self::with_options(generator, store, AppOptions::default())
    }

    pub fn with_options(generator: G, store: Option<S>, options: AppOptions) -> Self {
        if store.is_none() {
            log::info!("no storage available; save and load are disabled");
        }
        let snapshots = ListSnapshotStore::with_key(store, options.storage_key.clone());
        Self {
            items: ListState::new(),
            list: VirtualizedList::new(options.list.clone()),
            toolbar: Toolbar::new(),
            generator,
            has_snapshot: snapshots.has_snapshot(),
            snapshots,
            options,
        }
    }

    pub fn items(&self) -> &ListState {
        &self.items
    }

    pub fn list(&self) -> &VirtualizedList {
        &self.list
    }

    pub fn toolbar(&self) -> &Toolbar {
        &self.toolbar
    }

    pub fn snapshots(&self) -> &ListSnapshotStore<S> {
        &self.snapshots
    }

    pub fn options(&self) -> &AppOptions {
        &self.options
    }

    pub fn set_count_input(&mut self, text: impl Into<String>) {
        self.toolbar.set_count_input(text);
    }

    pub fn toolbar_state(&self) -> ToolbarState {
        self.toolbar.state(
            self.items.len(),
            self.snapshots.is_available(),
            self.has_snapshot,
        )
    }

    /// Runs a toolbar action. Returns whether the list changed.
    pub fn dispatch(&mut self, action: ToolbarAction) -> bool {
        if !self.toolbar_state().is_enabled(action) {
            log::debug!("{:?} ignored while disabled", action);
            return false;
        }
        match action {
            ToolbarAction::Generate => match self.toolbar.requested_count() {
                Some(count) => self.generate(count),
                None => {
                    log::debug!("generate ignored: {:?} is not a count", self.toolbar.count_input());
                    false
                }
            },
            ToolbarAction::Reset => self.reset(),
            ToolbarAction::Save => {
                self.save();
                false
            }
            ToolbarAction::Load => self.load(),
        }
    }

    /// Appends `count` generated rows, capped at the configured maximum.
    pub fn generate(&mut self, count: NonZeroUsize) -> bool {
        let max = self.options.max_generate_count.max(1);
        let count = if count.get() > max {
            log::warn!("generate count {} capped at {}", count, max);
            NonZeroUsize::new(max).unwrap_or(count)
        } else {
            count
        };
        let generated = self.generator.generate(count);
        log::debug!("generated {} rows", generated.len());
        let before = self.items.revision();
        self.items.append(generated);
        self.items.revision() != before
    }

    pub fn reset(&mut self) -> bool {
        self.items.clear();
        true
    }

    /// Writes the current list to storage. Returns whether it was written.
    pub fn save(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        match self.snapshots.save(self.items.items()) {
            Ok(()) => {
                self.has_snapshot = true;
                true
            }
            Err(err) => {
                log::warn!("save failed: {}", err);
                false
            }
        }
    }

    /// Replaces the list with the stored snapshot, if there is one.
    pub fn load(&mut self) -> bool {
        match self.snapshots.load() {
            Ok(Some(items)) => {
                log::debug!("loaded {} rows", items.len());
                self.items.replace(items);
                true
            }
            Ok(None) => {
                log::debug!("load ignored: nothing saved");
                self.has_snapshot = false;
                false
            }
            Err(err) => {
                log::warn!("load failed: {}", err);
                self.has_snapshot = false;
                false
            }
        }
    }

    pub fn set_viewport(&mut self, size: Size) {
        self.list.set_viewport(size);
    }

    pub fn layout(&mut self) -> ListScene {
        self.list.layout(&self.items)
    }

    pub fn needs_layout(&self) -> bool {
        self.list.needs_layout() || self.list.is_out_of_date(&self.items)
    }

    pub fn record_row_height(&mut self, index: usize, height: f32) -> bool {
        self.list.record_row_height(index, height)
    }

    pub fn on_scroll(&mut self, offset: f32) -> ScrollSource {
        self.list.on_scroll(offset)
    }

    pub fn scroll_to_bottom(&mut self) {
        self.list.scroll_to_bottom();
    }

    /// Edge auto-scroll for a drag in progress; call once per frame.
    pub fn drag_autoscroll(&mut self) -> bool {
        self.list.drag_autoscroll()
    }

    /// Routes a pointer event to the list. Returns whether the list changed.
    pub fn pointer_event(&mut self, event: &PointerEvent) -> bool {
        match self.list.pointer_event(event, &self.items) {
            Some(edit) => self.apply_edit(edit),
            None => false,
        }
    }

    /// Removes row `index` as its remove affordance would.
    pub fn remove_row(&mut self, index: usize) -> bool {
        match self.list.remove_request(index, &self.items) {
            Some(edit) => self.apply_edit(edit),
            None => false,
        }
    }

    fn apply_edit(&mut self, edit: ListEdit) -> bool {
        match self.items.apply(&edit) {
            Ok(()) => {
                self.list.edit_applied(&edit, &self.items);
                !edit.is_noop()
            }
            Err(err) => {
                log::warn!("dropping edit {:?}: {}", edit, err);
                false
            }
        }
    }
}
