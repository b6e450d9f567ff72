//! Drag-to-reorder gesture over a virtualized list.
//!
//! The controller never looks at mounted rows. Source and destination indices
//! are resolved against [`RowOffsets`] built from the height cache, so a row
//! can be dragged past rows that are not mounted at all.
//!
//! State machine: `Idle → Pressed → Dragging → (Dropped | Cancelled) → Idle`.
//! `Pressed` covers the first [`DRAG_THRESHOLD`] pixels of travel; releasing
//! there is a click, not a drag.

use lorelist_ui_graphics::{Point, Rect};

use crate::gesture_constants::{
    DRAG_AUTOSCROLL_EDGE, DRAG_AUTOSCROLL_MAX_STEP, DRAG_THRESHOLD,
};
use crate::lazy::RowOffsets;
use crate::nodes::input::{PointerEvent, PointerEventKind, PointerId};

/// Layout facts the controller needs for one event.
#[derive(Clone, Copy, Debug)]
pub struct DragContext<'a> {
    pub offsets: &'a RowOffsets,
    pub scroll_offset: f32,
    /// The visible list surface, in pointer coordinates. Drops outside it cancel.
    pub bounds: Rect,
    /// List revision the gesture is computed against.
    pub revision: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Pressed {
        source: usize,
        pointer_id: PointerId,
        origin: Point,
        /// Distance from the row's top edge to the grab point.
        grab_offset: f32,
        revision: u64,
        row_count: usize,
    },
    Dragging {
        source: usize,
        destination: usize,
        pointer_id: PointerId,
        pointer: Point,
        grab_offset: f32,
        revision: u64,
        row_count: usize,
    },
}

/// What an event did to the gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragOutcome {
    None,
    /// Travel crossed the threshold; the row is now being dragged.
    Started { source: usize },
    /// The live destination changed.
    Moved { source: usize, destination: usize },
    /// Press and release without crossing the threshold.
    Released { source: usize },
    /// The gesture ended over the list. `to` uses splice semantics.
    Dropped { from: usize, to: usize, revision: u64 },
    Cancelled { source: usize },
}

/// Clone of the dragged row, drawn under the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragPreview {
    pub source: usize,
    pub destination: usize,
    /// Top edge in pointer coordinates.
    pub top: f32,
    pub height: f32,
}

#[derive(Clone, Debug, Default)]
pub struct DragReorderController {
    state: DragState,
}

impl DragReorderController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn source(&self) -> Option<usize> {
        match self.state {
            DragState::Idle => None,
            DragState::Pressed { source, .. } | DragState::Dragging { source, .. } => Some(source),
        }
    }

    pub fn destination(&self) -> Option<usize> {
        match self.state {
            DragState::Dragging { destination, .. } => Some(destination),
            _ => None,
        }
    }

    /// Arms a gesture on row `source` from a pointer-down on its handle.
    ///
    /// Ignored while another gesture is active or when `source` is not a row.
    pub fn press(&mut self, source: usize, event: &PointerEvent, ctx: &DragContext<'_>) -> bool {
        if self.is_active() || source >= ctx.offsets.row_count() {
            return false;
        }
        let content_y = ctx.scroll_offset + event.position.y;
        self.state = DragState::Pressed {
            source,
            pointer_id: event.id,
            origin: event.position,
            grab_offset: content_y - ctx.offsets.start(source),
            revision: ctx.revision,
            row_count: ctx.offsets.row_count(),
        };
        true
    }

    pub fn pointer_event(&mut self, event: &PointerEvent, ctx: &DragContext<'_>) -> DragOutcome {
        match self.state {
            DragState::Idle => DragOutcome::None,
            DragState::Pressed {
                source,
                pointer_id,
                origin,
                grab_offset,
                revision,
                row_count,
            } => {
                if event.id != pointer_id {
                    return DragOutcome::None;
                }
                match event.kind {
                    PointerEventKind::Down => DragOutcome::None,
                    PointerEventKind::Move => {
                        if origin.distance_to(event.position) <= DRAG_THRESHOLD {
                            return DragOutcome::None;
                        }
                        let destination = destination_for(
                            source,
                            event.position.y,
                            grab_offset,
                            row_count,
                            ctx,
                        );
                        self.state = DragState::Dragging {
                            source,
                            destination,
                            pointer_id,
                            pointer: event.position,
                            grab_offset,
                            revision,
                            row_count,
                        };
                        log::debug!("drag started on row {}", source);
                        DragOutcome::Started { source }
                    }
                    PointerEventKind::Up => {
                        self.state = DragState::Idle;
                        DragOutcome::Released { source }
                    }
                    PointerEventKind::Cancel => {
                        self.state = DragState::Idle;
                        DragOutcome::Cancelled { source }
                    }
                }
            }
            DragState::Dragging {
                source,
                destination,
                pointer_id,
                grab_offset,
                revision,
                row_count,
                ..
            } => {
                if event.id != pointer_id {
                    return DragOutcome::None;
                }
                match event.kind {
                    PointerEventKind::Down => DragOutcome::None,
                    PointerEventKind::Move => {
                        let next = destination_for(
                            source,
                            event.position.y,
                            grab_offset,
                            row_count,
                            ctx,
                        );
                        self.state = DragState::Dragging {
                            source,
                            destination: next,
                            pointer_id,
                            pointer: event.position,
                            grab_offset,
                            revision,
                            row_count,
                        };
                        if next == destination {
                            DragOutcome::None
                        } else {
                            DragOutcome::Moved {
                                source,
                                destination: next,
                            }
                        }
                    }
                    PointerEventKind::Up => {
                        self.state = DragState::Idle;
                        if revision != ctx.revision || row_count != ctx.offsets.row_count() {
                            log::debug!("drag on row {} cancelled: list changed", source);
                            return DragOutcome::Cancelled { source };
                        }
                        if !ctx.bounds.contains_point(event.position) {
                            log::debug!("drag on row {} cancelled: dropped outside", source);
                            return DragOutcome::Cancelled { source };
                        }
                        let to = destination_for(
                            source,
                            event.position.y,
                            grab_offset,
                            row_count,
                            ctx,
                        );
                        DragOutcome::Dropped {
                            from: source,
                            to,
                            revision,
                        }
                    }
                    PointerEventKind::Cancel => {
                        self.state = DragState::Idle;
                        DragOutcome::Cancelled { source }
                    }
                }
            }
        }
    }

    /// Abandons the active gesture, e.g. because the list was replaced.
    pub fn force_cancel(&mut self) -> Option<DragOutcome> {
        let source = self.source()?;
        self.state = DragState::Idle;
        log::debug!("drag on row {} force-cancelled", source);
        Some(DragOutcome::Cancelled { source })
    }

    /// Pointer position of a drag in progress.
    pub fn pointer(&self) -> Option<Point> {
        match self.state {
            DragState::Dragging { pointer, .. } => Some(pointer),
            _ => None,
        }
    }

    /// Re-resolves the destination after the list scrolled under a pointer
    /// that did not move.
    pub fn retarget(&mut self, ctx: &DragContext<'_>) -> DragOutcome {
        let DragState::Dragging {
            source,
            destination,
            pointer,
            grab_offset,
            row_count,
            ..
        } = self.state
        else {
            return DragOutcome::None;
        };
        let next = destination_for(source, pointer.y, grab_offset, row_count, ctx);
        if next == destination {
            return DragOutcome::None;
        }
        if let DragState::Dragging { destination, .. } = &mut self.state {
            *destination = next;
        }
        DragOutcome::Moved {
            source,
            destination: next,
        }
    }

    /// Scroll step for this frame while the pointer is held near an edge of
    /// a list `viewport_height` tall. Negative scrolls up.
    ///
    /// The step grows linearly across [`DRAG_AUTOSCROLL_EDGE`] and is capped
    /// at [`DRAG_AUTOSCROLL_MAX_STEP`] once the pointer reaches the edge.
    pub fn autoscroll_step(&self, viewport_height: f32) -> f32 {
        let Some(pointer) = self.pointer() else {
            return 0.0;
        };
        let edge = DRAG_AUTOSCROLL_EDGE.min(viewport_height / 2.0);
        if edge <= 0.0 {
            return 0.0;
        }
        let ramp = |depth: f32| DRAG_AUTOSCROLL_MAX_STEP * (depth / edge).min(1.0);
        if pointer.y < edge {
            -ramp(edge - pointer.y)
        } else if pointer.y > viewport_height - edge {
            ramp(pointer.y - (viewport_height - edge))
        } else {
            0.0
        }
    }

    pub fn preview(&self, offsets: &RowOffsets) -> Option<DragPreview> {
        match self.state {
            DragState::Dragging {
                source,
                destination,
                pointer,
                grab_offset,
                ..
            } if source < offsets.row_count() => Some(DragPreview {
                source,
                destination,
                top: pointer.y - grab_offset,
                height: offsets.height(source),
            }),
            _ => None,
        }
    }
}

/// Splice destination for the dragged row given the pointer position.
///
/// Counts the rows other than `source` whose midpoint lies above the dragged
/// row's centre. That count is the insertion index in the list with the
/// source removed, always within `[0, row_count - 1]`.
fn destination_for(
    source: usize,
    pointer_y: f32,
    grab_offset: f32,
    row_count: usize,
    ctx: &DragContext<'_>,
) -> usize {
    let offsets = ctx.offsets;
    if row_count == 0 || source >= offsets.row_count() {
        return source;
    }
    let top = ctx.scroll_offset + pointer_y - grab_offset;
    let centre = top + offsets.height(source) / 2.0;
    let above = offsets.rows_with_midpoint_above(centre);
    let destination = if source < above { above - 1 } else { above };
    destination.min(row_count - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(offsets: &RowOffsets) -> DragContext<'_> {
        DragContext {
            offsets,
            scroll_offset: 0.0,
            bounds: Rect::new(0.0, 0.0, 400.0, 600.0),
            revision: 0,
        }
    }

    fn drag(
        controller: &mut DragReorderController,
        ctx: &DragContext<'_>,
        from: (f32, f32),
        to: (f32, f32),
    ) -> DragOutcome {
        let source = ctx
            .offsets
            .index_at(ctx.scroll_offset + from.1)
            .expect("row under pointer");
        assert!(controller.press(source, &PointerEvent::down(from.0, from.1), ctx));
        controller.pointer_event(&PointerEvent::moved(from.0, from.1 + 20.0), ctx);
        controller.pointer_event(&PointerEvent::moved(to.0, to.1), ctx);
        controller.pointer_event(&PointerEvent::up(to.0, to.1), ctx)
    }

    #[test]
    fn first_row_dropped_at_end() {
        let offsets = RowOffsets::from_heights(&[100.0, 100.0, 100.0]);
        let ctx = ctx(&offsets);
        let mut controller = DragReorderController::new();
        let outcome = drag(&mut controller, &ctx, (50.0, 50.0), (50.0, 280.0));
        assert_eq!(
            outcome,
            DragOutcome::Dropped {
                from: 0,
                to: 2,
                revision: 0
            }
        );
        assert!(!controller.is_active());
    }

    #[test]
    fn last_row_dropped_at_start() {
        let offsets = RowOffsets::from_heights(&[100.0, 100.0, 100.0]);
        let ctx = ctx(&offsets);
        let mut controller = DragReorderController::new();
        let outcome = drag(&mut controller, &ctx, (50.0, 250.0), (50.0, 10.0));
        assert_eq!(
            outcome,
            DragOutcome::Dropped {
                from: 2,
                to: 0,
                revision: 0
            }
        );
    }

    #[test]
    fn dropping_in_place_keeps_index() {
        let offsets = RowOffsets::from_heights(&[100.0, 100.0, 100.0]);
        let ctx = ctx(&offsets);
        let mut controller = DragReorderController::new();
        let outcome = drag(&mut controller, &ctx, (50.0, 150.0), (50.0, 160.0));
        assert_eq!(
            outcome,
            DragOutcome::Dropped {
                from: 1,
                to: 1,
                revision: 0
            }
        );
    }

    #[test]
    fn only_row_maps_to_itself() {
        let offsets = RowOffsets::from_heights(&[100.0]);
        let ctx = ctx(&offsets);
        let mut controller = DragReorderController::new();
        let outcome = drag(&mut controller, &ctx, (50.0, 50.0), (50.0, 500.0));
        assert_eq!(
            outcome,
            DragOutcome::Dropped {
                from: 0,
                to: 0,
                revision: 0
            }
        );
    }

    #[test]
    fn destination_reaches_unmounted_rows() {
        // 1000 rows of 50px scrolled deep: the destination is resolved from
        // offsets alone.
        let offsets = RowOffsets::from_heights(&[50.0; 1000]);
        let ctx = DragContext {
            scroll_offset: 20_000.0,
            ..ctx(&offsets)
        };
        let mut controller = DragReorderController::new();
        // Row 400 starts at 20_000; drag it just past ten rows down.
        let outcome = drag(&mut controller, &ctx, (50.0, 25.0), (50.0, 530.0));
        assert_eq!(
            outcome,
            DragOutcome::Dropped {
                from: 400,
                to: 410,
                revision: 0
            }
        );
    }

    #[test]
    fn small_travel_is_a_click() {
        let offsets = RowOffsets::from_heights(&[100.0, 100.0]);
        let ctx = ctx(&offsets);
        let mut controller = DragReorderController::new();
        controller.press(0, &PointerEvent::down(10.0, 10.0), &ctx);
        assert_eq!(
            controller.pointer_event(&PointerEvent::moved(12.0, 13.0), &ctx),
            DragOutcome::None
        );
        assert!(!controller.is_dragging());
        assert_eq!(
            controller.pointer_event(&PointerEvent::up(12.0, 13.0), &ctx),
            DragOutcome::Released { source: 0 }
        );
        assert!(!controller.is_active());
    }

    #[test]
    fn moves_report_destination_changes_only() {
        let offsets = RowOffsets::from_heights(&[100.0, 100.0, 100.0]);
        let ctx = ctx(&offsets);
        let mut controller = DragReorderController::new();
        controller.press(0, &PointerEvent::down(50.0, 50.0), &ctx);
        assert_eq!(
            controller.pointer_event(&PointerEvent::moved(50.0, 70.0), &ctx),
            DragOutcome::Started { source: 0 }
        );
        assert_eq!(controller.destination(), Some(0));
        assert_eq!(
            controller.pointer_event(&PointerEvent::moved(50.0, 75.0), &ctx),
            DragOutcome::None
        );
        assert_eq!(
            controller.pointer_event(&PointerEvent::moved(50.0, 160.0), &ctx),
            DragOutcome::Moved {
                source: 0,
                destination: 1
            }
        );
    }

    #[test]
    fn drop_outside_cancels() {
        let offsets = RowOffsets::from_heights(&[100.0, 100.0, 100.0]);
        let ctx = ctx(&offsets);
        let mut controller = DragReorderController::new();
        let outcome = drag(&mut controller, &ctx, (50.0, 50.0), (900.0, 250.0));
        assert_eq!(outcome, DragOutcome::Cancelled { source: 0 });
        assert!(!controller.is_active());
    }

    #[test]
    fn cancel_event_cancels() {
        let offsets = RowOffsets::from_heights(&[100.0, 100.0]);
        let ctx = ctx(&offsets);
        let mut controller = DragReorderController::new();
        controller.press(1, &PointerEvent::down(50.0, 150.0), &ctx);
        controller.pointer_event(&PointerEvent::moved(50.0, 100.0), &ctx);
        assert_eq!(
            controller.pointer_event(&PointerEvent::cancel(), &ctx),
            DragOutcome::Cancelled { source: 1 }
        );
    }

    #[test]
    fn list_change_mid_drag_cancels_on_drop() {
        let offsets = RowOffsets::from_heights(&[100.0, 100.0, 100.0]);
        let mut controller = DragReorderController::new();
        let before = ctx(&offsets);
        controller.press(0, &PointerEvent::down(50.0, 50.0), &before);
        controller.pointer_event(&PointerEvent::moved(50.0, 250.0), &before);

        let after = DragContext {
            revision: 1,
            ..before
        };
        assert_eq!(
            controller.pointer_event(&PointerEvent::up(50.0, 250.0), &after),
            DragOutcome::Cancelled { source: 0 }
        );
    }

    #[test]
    fn force_cancel_returns_to_idle() {
        let offsets = RowOffsets::from_heights(&[100.0, 100.0]);
        let ctx = ctx(&offsets);
        let mut controller = DragReorderController::new();
        assert_eq!(controller.force_cancel(), None);
        controller.press(0, &PointerEvent::down(50.0, 50.0), &ctx);
        controller.pointer_event(&PointerEvent::moved(50.0, 90.0), &ctx);
        assert_eq!(
            controller.force_cancel(),
            Some(DragOutcome::Cancelled { source: 0 })
        );
        assert_eq!(controller.state(), &DragState::Idle);
    }

    #[test]
    fn second_press_is_ignored_while_active() {
        let offsets = RowOffsets::from_heights(&[100.0, 100.0]);
        let ctx = ctx(&offsets);
        let mut controller = DragReorderController::new();
        assert!(controller.press(0, &PointerEvent::down(50.0, 50.0), &ctx));
        assert!(!controller.press(1, &PointerEvent::down(50.0, 150.0), &ctx));
        assert_eq!(controller.source(), Some(0));
    }

    #[test]
    fn other_pointers_are_ignored() {
        let offsets = RowOffsets::from_heights(&[100.0, 100.0]);
        let ctx = ctx(&offsets);
        let mut controller = DragReorderController::new();
        controller.press(0, &PointerEvent::down(50.0, 50.0).with_id(1), &ctx);
        assert_eq!(
            controller.pointer_event(&PointerEvent::up(50.0, 50.0).with_id(2), &ctx),
            DragOutcome::None
        );
        assert!(controller.is_active());
    }

    #[test]
    fn preview_follows_pointer() {
        let offsets = RowOffsets::from_heights(&[100.0, 60.0]);
        let ctx = ctx(&offsets);
        let mut controller = DragReorderController::new();
        controller.press(1, &PointerEvent::down(50.0, 130.0), &ctx);
        assert_eq!(controller.preview(&offsets), None);
        controller.pointer_event(&PointerEvent::moved(50.0, 30.0), &ctx);
        let preview = controller.preview(&offsets).unwrap();
        assert_eq!(preview.source, 1);
        assert_eq!(preview.top, 0.0);
        assert_eq!(preview.height, 60.0);
        assert_eq!(preview.destination, 0);
    }

    #[test]
    fn scrolling_under_a_still_pointer_moves_the_destination() {
        let offsets = RowOffsets::from_heights(&[100.0; 50]);
        let mut controller = DragReorderController::new();
        let top = ctx(&offsets);
        assert!(controller.press(0, &PointerEvent::down(50.0, 50.0), &top));
        controller.pointer_event(&PointerEvent::moved(50.0, 70.0), &top);
        assert_eq!(controller.destination(), Some(0));

        let scrolled = DragContext {
            scroll_offset: 2000.0,
            ..top
        };
        assert_eq!(
            controller.retarget(&scrolled),
            DragOutcome::Moved {
                source: 0,
                destination: 20
            }
        );
        assert_eq!(controller.destination(), Some(20));
        assert_eq!(controller.retarget(&scrolled), DragOutcome::None);

        let outcome = controller.pointer_event(&PointerEvent::up(50.0, 70.0), &scrolled);
        assert_eq!(
            outcome,
            DragOutcome::Dropped {
                from: 0,
                to: 20,
                revision: 0
            }
        );
    }

    #[test]
    fn retarget_ignores_presses() {
        let offsets = RowOffsets::from_heights(&[100.0; 5]);
        let mut controller = DragReorderController::new();
        let ctx = ctx(&offsets);
        controller.press(0, &PointerEvent::down(50.0, 50.0), &ctx);
        let scrolled = DragContext {
            scroll_offset: 200.0,
            ..ctx
        };
        assert_eq!(controller.retarget(&scrolled), DragOutcome::None);
        assert!(!controller.is_dragging());
    }

    #[test]
    fn autoscroll_ramps_near_edges() {
        let offsets = RowOffsets::from_heights(&[100.0; 50]);
        let ctx = ctx(&offsets);
        let mut controller = DragReorderController::new();
        assert_eq!(controller.autoscroll_step(600.0), 0.0);

        controller.press(2, &PointerEvent::down(50.0, 250.0), &ctx);
        controller.pointer_event(&PointerEvent::moved(50.0, 300.0), &ctx);
        assert_eq!(controller.autoscroll_step(600.0), 0.0);

        let inside_band = 600.0 - DRAG_AUTOSCROLL_EDGE / 2.0;
        controller.pointer_event(&PointerEvent::moved(50.0, inside_band), &ctx);
        assert_eq!(controller.autoscroll_step(600.0), DRAG_AUTOSCROLL_MAX_STEP / 2.0);

        controller.pointer_event(&PointerEvent::moved(50.0, 650.0), &ctx);
        assert_eq!(controller.autoscroll_step(600.0), DRAG_AUTOSCROLL_MAX_STEP);

        controller.pointer_event(&PointerEvent::moved(50.0, -30.0), &ctx);
        assert_eq!(controller.autoscroll_step(600.0), -DRAG_AUTOSCROLL_MAX_STEP);
    }
}
