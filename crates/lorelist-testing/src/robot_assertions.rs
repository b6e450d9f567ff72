//! Assertion utilities for robot testing
//!
//! Helpers for validating a settled [`ListScene`].

use lorelist_ui::ListScene;
use lorelist_ui_graphics::Rect;

/// Assert that a value is within `tolerance` of the expected one.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that a rectangle contains a point.
pub fn assert_rect_contains_point(rect: Rect, x: f32, y: f32, msg: &str) {
    assert!(
        rect.contains(x, y),
        "{}: point ({}, {}) not in rect {:?}",
        msg,
        x,
        y,
        rect
    );
}

/// Assert that the view rests at the end of the content.
pub fn assert_at_bottom(scene: &ListScene, msg: &str) {
    let max = (scene.total_content_height - scene.viewport.height).max(0.0);
    assert_approx_eq(scene.scroll_offset, max, 1.0, msg);
}

/// Assert that mounted rows form one contiguous run that covers the viewport.
pub fn assert_rows_cover_viewport(scene: &ListScene, msg: &str) {
    if scene.rows.is_empty() {
        assert_eq!(scene.total_content_height, 0.0, "{}: no rows mounted", msg);
        return;
    }
    for pair in scene.rows.windows(2) {
        assert_eq!(
            pair[0].index + 1,
            pair[1].index,
            "{}: mounted rows are not contiguous",
            msg
        );
        assert_approx_eq(
            pair[0].content_bounds.bottom(),
            pair[1].content_bounds.y,
            0.01,
            &format!("{} - gap after row {}", msg, pair[0].index),
        );
    }
    let covered_to = scene.scroll_offset + scene.viewport.height.min(scene.total_content_height);
    let first = &scene.rows[0];
    let last = &scene.rows[scene.rows.len() - 1];
    assert!(
        first.content_bounds.y <= scene.scroll_offset,
        "{}: first mounted row {} starts below the viewport top",
        msg,
        first.index
    );
    assert!(
        last.content_bounds.bottom() + 0.01 >= covered_to,
        "{}: last mounted row {} ends above the viewport bottom",
        msg,
        last.index
    );
}

/// Assert that `texts` contains `fragment`.
pub fn assert_contains_text(texts: &[&str], fragment: &str, msg: &str) {
    assert!(
        texts.iter().any(|t| t.contains(fragment)),
        "{}: text '{}' not found in {:?}",
        msg,
        fragment,
        texts
    );
}
