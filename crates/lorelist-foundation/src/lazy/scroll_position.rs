//! Scroll offset tracking with programmatic-scroll disambiguation.
//!
//! Setting the scroll offset of a real scroll surface makes the platform emit
//! a scroll event later. That event must not be read as the user scrolling
//! away, so every programmatic scroll arms a one-shot flag that the matching
//! event consumes.

use crate::gesture_constants::PROGRAMMATIC_SCROLL_TOLERANCE;

/// Who caused a scroll event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollSource {
    Programmatic,
    User,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollPosition {
    offset: f32,
    viewport_height: f32,
    content_height: f32,
    /// Target of the programmatic scroll whose event has not arrived yet.
    pending_programmatic: Option<f32>,
    /// Target the host still has to apply to its scroll surface.
    unapplied_request: Option<f32>,
}

impl ScrollPosition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn max_offset(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height.max(0.0);
        self.clamp();
    }

    /// Updates the content height, clamping the offset if content shrank.
    pub fn set_content_height(&mut self, height: f32) {
        self.content_height = height.max(0.0);
        self.clamp();
    }

    fn clamp(&mut self) {
        let max = self.max_offset();
        if self.offset > max {
            self.offset = max;
        }
    }

    /// True iff `offset + viewport >= content`, within `epsilon`.
    pub fn is_at_bottom(&self, epsilon: f32) -> bool {
        self.offset + self.viewport_height + epsilon >= self.content_height
    }

    /// Moves to `offset` on behalf of the application and arms the one-shot
    /// flag for the scroll event it will cause. Returns the clamped target.
    pub fn request_scroll_to(&mut self, offset: f32) -> f32 {
        let target = offset.clamp(0.0, self.max_offset());
        self.offset = target;
        self.pending_programmatic = Some(target);
        self.unapplied_request = Some(target);
        target
    }

    pub fn request_scroll_to_bottom(&mut self) -> f32 {
        self.request_scroll_to(self.max_offset())
    }

    /// Whether a programmatic scroll is still waiting for its event.
    pub fn has_pending_programmatic(&self) -> bool {
        self.pending_programmatic.is_some()
    }

    /// Hands the latest programmatic target to the host, once.
    pub fn take_unapplied_request(&mut self) -> Option<f32> {
        self.unapplied_request.take()
    }

    pub fn peek_unapplied_request(&self) -> Option<f32> {
        self.unapplied_request
    }

    /// Records a scroll event reported by the scroll surface.
    ///
    /// An event landing on the pending programmatic target consumes the flag
    /// and is reported as [`ScrollSource::Programmatic`]; anything else is the
    /// user and disarms the flag.
    pub fn on_scroll_event(&mut self, offset: f32) -> ScrollSource {
        let offset = if offset.is_nan() { 0.0 } else { offset.max(0.0) };
        let source = match self.pending_programmatic.take() {
            Some(target) if (target - offset).abs() <= PROGRAMMATIC_SCROLL_TOLERANCE => {
                ScrollSource::Programmatic
            }
            _ => {
                self.unapplied_request = None;
                ScrollSource::User
            }
        };
        self.offset = offset;
        self.clamp();
        source
    }
}
