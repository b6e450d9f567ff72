//! Robot testing for the list application
//!
//! [`ListRobot`] plays the host: it runs layout passes, applies programmatic
//! scroll requests the way a browser would, measures mounted rows with a
//! [`RowMeasurer`], and feeds pointer gestures through the same entry points
//! the web run loop uses.
//!
//! # Example
//!
//! ```
//! use lorelist_core::MemoryStore;
//! use lorelist_testing::{FixedHeight, ListRobot, ScriptedGenerator};
//!
//! let mut robot = ListRobot::new(
//!     ScriptedGenerator::new(["A", "B", "C"]),
//!     Some(MemoryStore::new()),
//!     FixedHeight(80.0),
//!     400.0,
//!     600.0,
//! );
//! robot.generate(3);
//! assert_eq!(robot.texts(), ["A", "B", "C"]);
//! ```

use lorelist_core::{KeyValueStore, TextGenerator};
use lorelist_foundation::PointerEvent;
use lorelist_ui::{AppOptions, HitTarget, ListApp, ListScene, ToolbarAction};
use lorelist_ui_graphics::{Point, Size};

use crate::testing::RowMeasurer;

/// Passes [`ListRobot::wait_for_idle`] runs before giving up.
pub const MAX_IDLE_PASSES: usize = 16;

/// Steps a drag is split into.
pub const DRAG_STEPS: usize = 10;

pub struct ListRobot<G, S, M> {
    app: ListApp<G, S>,
    measurer: M,
    scene: ListScene,
    viewport: Size,
    layout_passes: usize,
}

impl<G, S, M> ListRobot<G, S, M>
where
    G: TextGenerator,
    S: KeyValueStore,
    M: RowMeasurer,
{
    pub fn new(generator: G, store: Option<S>, measurer: M, width: f32, height: f32) -> Self {
        Self::with_options(generator, store, measurer, width, height, AppOptions::default())
    }

    pub fn with_options(
        generator: G,
        store: Option<S>,
        measurer: M,
        width: f32,
        height: f32,
        options: AppOptions,
    ) -> Self {
        Self::from_app(ListApp::with_options(generator, store, options), measurer, width, height)
    }

    /// Wraps an already configured application.
    pub fn from_app(app: ListApp<G, S>, measurer: M, width: f32, height: f32) -> Self {
        let mut robot = Self {
            app,
            measurer,
            scene: ListScene::default(),
            viewport: Size::new(width, height),
            layout_passes: 0,
        };
        robot.app.set_viewport(robot.viewport);
        robot.wait_for_idle();
        robot
    }

    pub fn app(&self) -> &ListApp<G, S> {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut ListApp<G, S> {
        &mut self.app
    }

    /// Scene from the last settled layout pass.
    pub fn scene(&self) -> &ListScene {
        &self.scene
    }

    pub fn texts(&self) -> Vec<&str> {
        self.app.items().items().iter().map(String::as_str).collect()
    }

    pub fn visible_texts(&self) -> Vec<&str> {
        let visible = &self.scene.window.visible;
        self.scene
            .rows
            .iter()
            .filter(|row| visible.contains(&row.index))
            .map(|row| row.text.as_str())
            .collect()
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scene.scroll_offset
    }

    pub fn max_scroll_offset(&self) -> f32 {
        (self.scene.total_content_height - self.viewport.height).max(0.0)
    }

    /// Layout passes the last [`wait_for_idle`](Self::wait_for_idle) needed.
    pub fn layout_passes(&self) -> usize {
        self.layout_passes
    }

    /// Resize the viewport (simulates a window resize).
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Size::new(width, height);
        self.app.set_viewport(self.viewport);
        self.wait_for_idle();
    }

    /// Pump layout and measurement until nothing changes.
    ///
    /// Returns false if the passes did not converge.
    pub fn wait_for_idle(&mut self) -> bool {
        for pass in 1..=MAX_IDLE_PASSES {
            let scene = self.app.layout();
            if let Some(target) = scene.scroll_request {
                self.app.on_scroll(target);
            }
            for row in &scene.rows {
                let height = self.measurer.measure(row.index, &row.text, row.bounds.width);
                self.app.record_row_height(row.index, height);
            }
            self.scene = scene;
            if !self.app.needs_layout() {
                self.layout_passes = pass;
                return true;
            }
        }
        log::warn!("layout did not settle after {} passes", MAX_IDLE_PASSES);
        self.layout_passes = MAX_IDLE_PASSES;
        false
    }

    /// Types `text` into the count field.
    pub fn type_count(&mut self, text: &str) {
        self.app.set_count_input(text);
    }

    /// Clicks a toolbar button. Returns whether the list changed.
    pub fn click_toolbar(&mut self, action: ToolbarAction) -> bool {
        let changed = self.app.dispatch(action);
        self.wait_for_idle();
        changed
    }

    /// Types `count` and clicks generate.
    pub fn generate(&mut self, count: usize) -> bool {
        self.type_count(&count.to_string());
        self.click_toolbar(ToolbarAction::Generate)
    }

    /// Scroll as the user would, clamped the way a scroll surface clamps.
    pub fn scroll_to(&mut self, offset: f32) {
        let offset = offset.clamp(0.0, self.max_scroll_offset());
        self.app.on_scroll(offset);
        self.wait_for_idle();
    }

    pub fn scroll_by(&mut self, delta: f32) {
        self.scroll_to(self.scroll_offset() + delta);
    }

    /// Press and release at a viewport position. Returns whether the list changed.
    pub fn click_at(&mut self, x: f32, y: f32) -> bool {
        let pressed = self.app.pointer_event(&PointerEvent::down(x, y));
        let released = self.app.pointer_event(&PointerEvent::up(x, y));
        self.wait_for_idle();
        pressed || released
    }

    /// Perform a drag from one viewport point to another.
    ///
    /// This simulates a pointer down, a series of moves, and an up.
    pub fn drag(&mut self, from: Point, to: Point) -> bool {
        let mut changed = self.app.pointer_event(&PointerEvent::down(from.x, from.y));
        for step in 1..=DRAG_STEPS {
            let t = step as f32 / DRAG_STEPS as f32;
            let x = from.x + (to.x - from.x) * t;
            let y = from.y + (to.y - from.y) * t;
            changed |= self.app.pointer_event(&PointerEvent::moved(x, y));
            let scene = self.app.layout();
            if let Some(target) = scene.scroll_request {
                self.app.on_scroll(target);
            }
        }
        changed |= self.app.pointer_event(&PointerEvent::up(to.x, to.y));
        self.wait_for_idle();
        changed
    }

    /// Drags mounted row `source` so that it lands at index `destination`.
    ///
    /// Returns `None` when either row is not mounted.
    pub fn drag_row(&mut self, source: usize, destination: usize) -> Option<bool> {
        let from_row = self.scene.row(source)?;
        let to_row = self.scene.row(destination)?;
        let x = from_row.bounds.x + from_row.bounds.width / 4.0;
        let from = Point::new(x, from_row.bounds.center().y);
        // Cross the target's midpoint by a pixel in the direction of travel.
        let nudge = if destination > source { 1.0 } else { -1.0 };
        let to = Point::new(x, to_row.bounds.center().y + nudge);
        Some(self.drag(from, to))
    }

    /// Clicks the remove affordance of mounted row `index`.
    pub fn click_remove(&mut self, index: usize) -> Option<bool> {
        let button = self.scene.row(index)?.remove_button.center();
        debug_assert_eq!(
            self.scene.hit_test(button),
            Some(HitTarget::RemoveButton(index))
        );
        Some(self.click_at(button.x, button.y))
    }

    /// Clicks the scroll-to-bottom affordance if it is shown.
    pub fn click_scroll_to_bottom(&mut self) -> bool {
        let Some(button) = self.scene.scroll_to_bottom_button else {
            return false;
        };
        let center = button.center();
        self.click_at(center.x, center.y);
        true
    }
}
