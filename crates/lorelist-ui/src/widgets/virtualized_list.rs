//! List container: windowing, measurement feedback, scroll following and
//! drag reordering over a [`ListState`] it does not own.
//!
//! The container never mutates the list. Removals and reorders leave it as
//! [`ListEdit`]s stamped with the revision they were computed against; the
//! owner applies them and reports back through [`VirtualizedList::edit_applied`].

use lorelist_core::{ListEdit, ListState};
use lorelist_foundation::{
    compute_window, DragContext, DragOutcome, DragReorderController, HeightCache, PointerEvent,
    PointerEventKind, RowOffsets, ScrollPosition, ScrollSource, VirtualListConfig, WindowRequest,
};
use lorelist_ui_graphics::{Point, Rect, Size};

use crate::scene::{DragPreviewNode, HitTarget, ListScene};
use crate::widgets::list_row::{remove_button_bounds, ListRow};

/// Size of the scroll-to-bottom affordance.
pub const SCROLL_TO_BOTTOM_BUTTON_SIZE: Size = Size {
    width: 140.0,
    height: 32.0,
};

/// Gap between the scroll-to-bottom affordance and the viewport's bottom edge.
pub const SCROLL_TO_BOTTOM_BUTTON_MARGIN: f32 = 16.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SeenList {
    generation: u64,
    revision: u64,
    len: usize,
}

impl SeenList {
    fn of(list: &ListState) -> Self {
        Self {
            generation: list.generation(),
            revision: list.revision(),
            len: list.len(),
        }
    }
}

pub struct VirtualizedList {
    config: VirtualListConfig,
    heights: HeightCache,
    scroll: ScrollPosition,
    drag: DragReorderController,
    viewport: Size,
    offsets: RowOffsets,
    seen: Option<SeenList>,
    follow_bottom: bool,
    show_scroll_to_bottom: bool,
    /// Press on a button that becomes a click if released over the same target.
    pressed_button: Option<HitTarget>,
    needs_layout: bool,
}

impl Default for VirtualizedList {
    fn default() -> Self {
        Self::new(VirtualListConfig::default())
    }
}

impl VirtualizedList {
    pub fn new(config: VirtualListConfig) -> Self {
        let heights = HeightCache::new(config.estimated_row_height);
        Self {
            config,
            heights,
            scroll: ScrollPosition::new(),
            drag: DragReorderController::new(),
            viewport: Size::default(),
            offsets: RowOffsets::default(),
            seen: None,
            follow_bottom: true,
            show_scroll_to_bottom: false,
            pressed_button: None,
            needs_layout: true,
        }
    }

    pub fn config(&self) -> &VirtualListConfig {
        &self.config
    }

    pub fn heights(&self) -> &HeightCache {
        &self.heights
    }

    pub fn drag(&self) -> &DragReorderController {
        &self.drag
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll.offset()
    }

    pub fn is_following_bottom(&self) -> bool {
        self.follow_bottom
    }

    pub fn shows_scroll_to_bottom(&self) -> bool {
        self.show_scroll_to_bottom
    }

    /// Whether state changed since the last [`layout`](Self::layout).
    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    /// Whether `list` changed since the container last looked at it.
    pub fn is_out_of_date(&self, list: &ListState) -> bool {
        self.seen != Some(SeenList::of(list))
    }

    pub fn set_viewport(&mut self, size: Size) {
        if size == self.viewport {
            return;
        }
        self.viewport = size;
        self.scroll.set_viewport_height(size.height);
        self.needs_layout = true;
    }

    /// Reconciles with the list after mutations the container did not request.
    pub fn sync(&mut self, list: &ListState) {
        let current = SeenList::of(list);
        let Some(previous) = self.seen else {
            self.seen = Some(current);
            self.needs_layout = true;
            return;
        };
        if previous == current {
            return;
        }
        self.seen = Some(current);
        self.needs_layout = true;

        if let Some(outcome) = self.drag.force_cancel() {
            log::debug!("list changed under an active drag: {:?}", outcome);
        }
        self.pressed_button = None;

        if previous.generation != current.generation {
            log::debug!(
                "list replaced (generation {} -> {}), {} rows",
                previous.generation,
                current.generation,
                current.len
            );
            self.heights.clear_all();
            self.follow_bottom = true;
            self.show_scroll_to_bottom = false;
            return;
        }

        if current.len > previous.len {
            if !self.follow_bottom {
                self.show_scroll_to_bottom = true;
            }
        } else {
            // Some other edit reshuffled the rows; no index is known to be safe.
            self.heights.clear_all();
        }
    }

    /// Runs one layout pass.
    ///
    /// While following the bottom, every pass re-targets the bottom so that
    /// freshly measured rows cannot leave the view short of it.
    pub fn layout(&mut self, list: &ListState) -> ListScene {
        self.prepare(list);

        if self.follow_bottom {
            let max = self.scroll.max_offset();
            if (max - self.scroll.offset()).abs() > self.config.bottom_epsilon {
                self.scroll.request_scroll_to_bottom();
            }
        } else if self.scroll.is_at_bottom(self.config.bottom_epsilon) {
            self.follow_bottom = true;
            self.show_scroll_to_bottom = false;
        }
        self.retarget_drag();

        let window = compute_window(
            &WindowRequest {
                scroll_offset: self.scroll.offset(),
                viewport_height: self.viewport.height,
                overscan: self.config.overscan_rows,
                estimated_row_height: self.config.estimated_row_height,
            },
            &self.offsets,
        );
        let scroll_offset = window.scroll_offset;
        let drag_source = self.drag.is_dragging().then(|| self.drag.source()).flatten();

        let rows = window
            .mounted
            .clone()
            .filter_map(|index| {
                let text = list.get(index)?;
                Some(ListRow::new(index, text).layout(
                    &self.offsets,
                    scroll_offset,
                    self.viewport.width,
                    self.heights.is_measured(index),
                    drag_source == Some(index),
                ))
            })
            .collect();

        let drag_preview = self.drag.preview(&self.offsets).and_then(|preview| {
            let text = list.get(preview.source)?;
            Some(DragPreviewNode {
                source: preview.source,
                destination: preview.destination,
                label: ListRow::new(preview.source, text).label(),
                text: text.to_owned(),
                bounds: Rect::new(0.0, preview.top, self.viewport.width, preview.height),
            })
        });
        let drop_indicator = drag_preview.as_ref().map(|preview| {
            drop_line(&self.offsets, preview.source, preview.destination) - scroll_offset
        });

        let scroll_to_bottom_button = (self.show_scroll_to_bottom && !list.is_empty())
            .then(|| scroll_to_bottom_bounds(self.viewport));

        self.needs_layout = false;
        ListScene {
            viewport: self.viewport,
            scroll_offset,
            total_content_height: self.offsets.total_height(),
            window,
            rows,
            drag_preview,
            drop_indicator,
            scroll_to_bottom_button,
            scroll_request: self.scroll.take_unapplied_request(),
        }
    }

    /// Feeds back the rendered height of a mounted row.
    pub fn record_row_height(&mut self, index: usize, height: f32) -> bool {
        let len = self.seen.map_or(0, |seen| seen.len);
        if index >= len {
            log::trace!("ignoring height for row {} of {}", index, len);
            return false;
        }
        let changed = self.heights.record_height(index, height);
        if changed {
            self.needs_layout = true;
        }
        changed
    }

    /// Scroll event reported by the scroll surface.
    pub fn on_scroll(&mut self, offset: f32) -> ScrollSource {
        let source = self.scroll.on_scroll_event(offset);
        if source == ScrollSource::User {
            let at_bottom = self.scroll.is_at_bottom(self.config.bottom_epsilon);
            self.follow_bottom = at_bottom;
            self.show_scroll_to_bottom = !at_bottom && self.seen.is_some_and(|seen| seen.len > 0);
        }
        self.retarget_drag();
        self.needs_layout = true;
        source
    }

    /// Scrolls towards the edge a dragged row is held against. The host calls
    /// this once per frame; returns whether a scroll was requested.
    pub fn drag_autoscroll(&mut self) -> bool {
        let step = self.drag.autoscroll_step(self.viewport.height);
        if step == 0.0 {
            return false;
        }
        let before = self.scroll.offset();
        let target = (before + step).clamp(0.0, self.scroll.max_offset());
        if target == before {
            return false;
        }
        self.scroll.request_scroll_to(target);
        let at_bottom = self.scroll.is_at_bottom(self.config.bottom_epsilon);
        self.follow_bottom = at_bottom;
        self.show_scroll_to_bottom = !at_bottom;
        self.retarget_drag();
        self.needs_layout = true;
        true
    }

    /// Jumps to the bottom and resumes following it.
    pub fn scroll_to_bottom(&mut self) {
        self.follow_bottom = true;
        self.show_scroll_to_bottom = false;
        self.scroll.request_scroll_to_bottom();
        self.needs_layout = true;
    }

    /// Removal requested from a row's remove affordance.
    pub fn remove_request(&mut self, index: usize, list: &ListState) -> Option<ListEdit> {
        self.sync(list);
        if index >= list.len() {
            log::warn!("remove requested for row {} of {}", index, list.len());
            return None;
        }
        Some(list.remove_edit(index))
    }

    /// Routes a pointer event. Returns the edit a completed gesture produced.
    pub fn pointer_event(&mut self, event: &PointerEvent, list: &ListState) -> Option<ListEdit> {
        self.prepare(list);

        if let Some(target) = self.pressed_button {
            return match event.kind {
                PointerEventKind::Up => {
                    self.pressed_button = None;
                    if self.hit_test(event.position) == Some(target) {
                        self.activate(target, list)
                    } else {
                        None
                    }
                }
                PointerEventKind::Cancel => {
                    self.pressed_button = None;
                    None
                }
                _ => None,
            };
        }

        let revision = list.revision();
        let ctx = DragContext {
            offsets: &self.offsets,
            scroll_offset: self.scroll.offset(),
            bounds: Rect::from_size(self.viewport),
            revision,
        };

        if event.kind == PointerEventKind::Down && !self.drag.is_active() {
            if !event.is_primary() {
                return None;
            }
            match self.hit_test(event.position) {
                Some(HitTarget::Row(index)) => {
                    self.drag.press(index, event, &ctx);
                }
                Some(target) => self.pressed_button = Some(target),
                None => {}
            }
            return None;
        }

        match self.drag.pointer_event(event, &ctx) {
            DragOutcome::None | DragOutcome::Released { .. } => None,
            DragOutcome::Started { .. }
            | DragOutcome::Moved { .. }
            | DragOutcome::Cancelled { .. } => {
                self.needs_layout = true;
                None
            }
            DragOutcome::Dropped { from, to, revision } => {
                self.needs_layout = true;
                if from == to {
                    log::debug!("row {} dropped onto itself", from);
                    return None;
                }
                Some(ListEdit::Move { from, to, revision })
            }
        }
    }

    /// Acknowledges that the owner applied `edit`, leaving `list` as it is now.
    pub fn edit_applied(&mut self, edit: &ListEdit, list: &ListState) {
        self.heights.invalidate_from(edit.first_affected_index());
        self.seen = Some(SeenList::of(list));
        self.needs_layout = true;
    }

    /// Element under `point`, from current state rather than the last scene.
    pub fn hit_test(&self, point: Point) -> Option<HitTarget> {
        if self.show_scroll_to_bottom
            && !self.offsets.is_empty()
            && scroll_to_bottom_bounds(self.viewport).contains_point(point)
        {
            return Some(HitTarget::ScrollToBottom);
        }
        if !Rect::from_size(self.viewport).contains_point(point) {
            return None;
        }
        let content_y = self.scroll.offset() + point.y;
        if content_y >= self.offsets.total_height() {
            return None;
        }
        let index = self.offsets.index_at(content_y)?;
        let row = Rect::new(
            0.0,
            self.offsets.start(index) - self.scroll.offset(),
            self.viewport.width,
            self.offsets.height(index),
        );
        if remove_button_bounds(row).contains_point(point) {
            Some(HitTarget::RemoveButton(index))
        } else {
            Some(HitTarget::Row(index))
        }
    }

    fn activate(&mut self, target: HitTarget, list: &ListState) -> Option<ListEdit> {
        match target {
            HitTarget::ScrollToBottom => {
                self.scroll_to_bottom();
                None
            }
            HitTarget::RemoveButton(index) => self.remove_request(index, list),
            HitTarget::Row(_) => None,
        }
    }

    /// Keeps the live destination in step with the current scroll offset.
    fn retarget_drag(&mut self) {
        if !self.drag.is_dragging() {
            return;
        }
        let ctx = DragContext {
            offsets: &self.offsets,
            scroll_offset: self.scroll.offset(),
            bounds: Rect::from_size(self.viewport),
            revision: self.seen.map_or(0, |seen| seen.revision),
        };
        if let DragOutcome::Moved {
            source,
            destination,
        } = self.drag.retarget(&ctx)
        {
            log::trace!("row {} now targets {} after scrolling", source, destination);
            self.needs_layout = true;
        }
    }

    fn prepare(&mut self, list: &ListState) {
        self.sync(list);
        self.offsets = self.heights.offsets(list.len());
        self.scroll.set_content_height(self.offsets.total_height());
    }
}

/// Content-space y of the gap the dragged row would be inserted into.
fn drop_line(offsets: &RowOffsets, source: usize, destination: usize) -> f32 {
    if destination > source {
        offsets.end(destination)
    } else {
        offsets.start(destination)
    }
}

fn scroll_to_bottom_bounds(viewport: Size) -> Rect {
    let size = SCROLL_TO_BOTTOM_BUTTON_SIZE;
    Rect::new(
        (viewport.width - size.width) / 2.0,
        viewport.height - SCROLL_TO_BOTTOM_BUTTON_MARGIN - size.height,
        size.width,
        size.height,
    )
}

#[cfg(test)]
#[path = "tests/virtualized_list_tests.rs"]
mod tests;
