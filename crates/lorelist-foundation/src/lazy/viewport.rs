//! Viewport size validation with an infinite-viewport fallback.

/// Maximum reasonable viewport height before treating it as unbounded.
const MAX_REASONABLE_VIEWPORT: f32 = 100_000.0;

/// Rows assumed visible when the viewport is unbounded.
const INFINITE_VIEWPORT_ROW_COUNT: f32 = 20.0;

/// Provides the effective viewport height used for windowing.
///
/// A list mounted in an unconstrained parent reports an infinite (or absurdly
/// large) height; windowing against it would mount every row. Such viewports
/// are replaced by a bounded estimate.
#[derive(Clone, Copy, Debug)]
pub struct ViewportHandler {
    effective_height: f32,
    is_infinite: bool,
}

impl ViewportHandler {
    pub fn new(viewport_height: f32, estimated_row_height: f32) -> Self {
        let is_infinite =
            viewport_height.is_infinite() || viewport_height > MAX_REASONABLE_VIEWPORT;

        let effective_height = if is_infinite {
            let estimated = estimated_row_height.max(1.0) * INFINITE_VIEWPORT_ROW_COUNT;
            log::warn!(
                "VirtualizedList: unbounded viewport ({}), using fallback height {}. \
                 Give the list a constrained parent.",
                viewport_height,
                estimated
            );
            estimated
        } else if viewport_height.is_nan() || viewport_height < 0.0 {
            0.0
        } else {
            viewport_height
        };

        Self {
            effective_height,
            is_infinite,
        }
    }

    #[inline]
    pub fn effective_height(&self) -> f32 {
        self.effective_height
    }

    #[inline]
    pub fn is_infinite(&self) -> bool {
        self.is_infinite
    }
}
