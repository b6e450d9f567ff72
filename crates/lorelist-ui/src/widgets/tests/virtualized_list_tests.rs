use super::*;

fn config() -> VirtualListConfig {
    VirtualListConfig::default()
        .with_estimated_row_height(100.0)
        .with_overscan_rows(1)
}

fn list_of(count: usize) -> ListState {
    ListState::from_items((0..count).map(|i| format!("row {i}")).collect())
}

fn view(width: f32, height: f32) -> VirtualizedList {
    let mut view = VirtualizedList::new(config());
    view.set_viewport(Size::new(width, height));
    view
}

/// Plays the host side of the protocol: applies scroll requests and measures
/// mounted rows until nothing changes.
fn settle(
    view: &mut VirtualizedList,
    list: &ListState,
    height_of: impl Fn(usize) -> f32,
) -> ListScene {
    for _ in 0..16 {
        let scene = view.layout(list);
        if let Some(target) = scene.scroll_request {
            view.on_scroll(target);
        }
        for row in &scene.rows {
            view.record_row_height(row.index, height_of(row.index));
        }
        if !view.needs_layout() {
            return scene;
        }
    }
    view.layout(list)
}

#[test]
fn following_view_lands_on_bottom() {
    let list = list_of(10);
    let mut view = view(300.0, 250.0);

    let scene = settle(&mut view, &list, |_| 100.0);

    assert_eq!(scene.scroll_offset, 750.0);
    assert_eq!(scene.window.visible, 7..10);
    assert_eq!(scene.window.mounted, 6..10);
    assert!(view.is_following_bottom());
    assert!(!scene.shows_scroll_to_bottom());
}

#[test]
fn user_scroll_up_keeps_position_across_appends() {
    let mut list = list_of(10);
    let mut view = view(300.0, 250.0);
    settle(&mut view, &list, |_| 100.0);

    assert_eq!(view.on_scroll(200.0), ScrollSource::User);
    assert!(!view.is_following_bottom());
    assert!(view.shows_scroll_to_bottom());

    list.append((10..15).map(|i| format!("row {i}")));
    let scene = settle(&mut view, &list, |_| 100.0);

    assert_eq!(scene.scroll_offset, 200.0);
    assert!(scene.shows_scroll_to_bottom());
    assert_eq!(scene.total_content_height, 1500.0);
}

#[test]
fn scroll_to_bottom_click_resumes_following() {
    let mut list = list_of(10);
    let mut view = view(300.0, 250.0);
    settle(&mut view, &list, |_| 100.0);
    view.on_scroll(200.0);
    list.append((10..15).map(|i| format!("row {i}")));
    let scene = settle(&mut view, &list, |_| 100.0);

    let button = scene.scroll_to_bottom_button.expect("affordance shown");
    let click = button.center();
    assert_eq!(scene.hit_test(click), Some(HitTarget::ScrollToBottom));
    assert_eq!(view.pointer_event(&PointerEvent::down(click.x, click.y), &list), None);
    assert_eq!(view.pointer_event(&PointerEvent::up(click.x, click.y), &list), None);

    let scene = settle(&mut view, &list, |_| 100.0);
    assert_eq!(scene.scroll_offset, 1250.0);
    assert!(view.is_following_bottom());
    assert!(!scene.shows_scroll_to_bottom());
}

#[test]
fn remove_click_emits_edit_stamped_with_revision() {
    let list = list_of(3);
    let mut view = view(300.0, 250.0);
    let scene = settle(&mut view, &list, |_| 100.0);
    assert_eq!(scene.scroll_offset, 50.0);

    let button = scene.row(1).expect("row 1 mounted").remove_button;
    let click = button.center();
    assert_eq!(view.hit_test(click), Some(HitTarget::RemoveButton(1)));

    assert_eq!(view.pointer_event(&PointerEvent::down(click.x, click.y), &list), None);
    let edit = view.pointer_event(&PointerEvent::up(click.x, click.y), &list);
    assert_eq!(
        edit,
        Some(ListEdit::Remove {
            index: 1,
            revision: list.revision()
        })
    );
}

#[test]
fn release_away_from_remove_button_does_nothing() {
    let list = list_of(3);
    let mut view = view(300.0, 250.0);
    let scene = settle(&mut view, &list, |_| 100.0);
    let click = scene.row(1).expect("row 1 mounted").remove_button.center();

    view.pointer_event(&PointerEvent::down(click.x, click.y), &list);
    assert_eq!(view.pointer_event(&PointerEvent::up(20.0, 20.0), &list), None);
}

#[test]
fn drag_emits_move_and_draws_preview() {
    let mut list = ListState::from_items(["a", "b", "c", "d", "e"].map(String::from).to_vec());
    let mut view = view(300.0, 600.0);
    settle(&mut view, &list, |_| 100.0);

    view.pointer_event(&PointerEvent::down(100.0, 50.0), &list);
    view.pointer_event(&PointerEvent::moved(100.0, 60.0), &list);
    assert!(view.drag().is_dragging());
    view.pointer_event(&PointerEvent::moved(100.0, 270.0), &list);

    let scene = view.layout(&list);
    let preview = scene.drag_preview.as_ref().expect("preview while dragging");
    assert_eq!(preview.source, 0);
    assert_eq!(preview.destination, 2);
    assert_eq!(preview.bounds.y, 220.0);
    assert_eq!(preview.text, "a");
    assert_eq!(scene.drop_indicator, Some(300.0));
    assert!(scene.row(0).is_some_and(|row| row.is_drag_source));

    let edit = view
        .pointer_event(&PointerEvent::up(100.0, 270.0), &list)
        .expect("drop produces a move");
    assert_eq!(edit, list.move_edit(0, 2));

    list.apply(&edit).expect("fresh edit applies");
    view.edit_applied(&edit, &list);
    assert_eq!(list.items(), ["b", "c", "a", "d", "e"]);
    assert!(view.layout(&list).drag_preview.is_none());
}

#[test]
fn drop_onto_origin_emits_nothing() {
    let list = list_of(5);
    let mut view = view(300.0, 600.0);
    settle(&mut view, &list, |_| 100.0);

    view.pointer_event(&PointerEvent::down(100.0, 250.0), &list);
    view.pointer_event(&PointerEvent::moved(100.0, 262.0), &list);
    assert_eq!(view.drag().destination(), Some(2));
    assert_eq!(view.pointer_event(&PointerEvent::up(100.0, 262.0), &list), None);
    assert!(!view.drag().is_active());
}

#[test]
fn short_press_on_row_is_not_a_drag() {
    let list = list_of(5);
    let mut view = view(300.0, 600.0);
    settle(&mut view, &list, |_| 100.0);

    view.pointer_event(&PointerEvent::down(100.0, 150.0), &list);
    view.pointer_event(&PointerEvent::moved(104.0, 153.0), &list);
    assert!(!view.drag().is_dragging());
    assert_eq!(view.pointer_event(&PointerEvent::up(104.0, 153.0), &list), None);
}

#[test]
fn replacement_clears_heights_and_cancels_drag() {
    let mut list = list_of(5);
    let mut view = view(300.0, 600.0);
    settle(&mut view, &list, |_| 80.0);
    assert_eq!(view.heights().measured_count(), 5);

    view.pointer_event(&PointerEvent::down(100.0, 40.0), &list);
    view.pointer_event(&PointerEvent::moved(100.0, 120.0), &list);
    assert!(view.drag().is_dragging());

    list.replace(vec!["x".to_owned(), "y".to_owned()]);
    let scene = view.layout(&list);

    assert!(!view.drag().is_active());
    assert!(scene.drag_preview.is_none());
    assert_eq!(view.heights().measured_count(), 0);
    assert_eq!(view.pointer_event(&PointerEvent::up(100.0, 120.0), &list), None);
}

#[test]
fn append_mid_drag_cancels_gesture() {
    let mut list = list_of(5);
    let mut view = view(300.0, 600.0);
    settle(&mut view, &list, |_| 100.0);

    view.pointer_event(&PointerEvent::down(100.0, 50.0), &list);
    view.pointer_event(&PointerEvent::moved(100.0, 200.0), &list);
    list.append(["late".to_owned()]);

    assert_eq!(view.pointer_event(&PointerEvent::up(100.0, 200.0), &list), None);
    assert!(!view.drag().is_active());
    assert_eq!(list.len(), 6);
}

#[test]
fn applied_edit_invalidates_from_first_affected_row() {
    let mut list = list_of(5);
    let mut view = view(300.0, 600.0);
    settle(&mut view, &list, |_| 80.0);

    let edit = list.move_edit(3, 1);
    list.apply(&edit).expect("fresh edit applies");
    view.edit_applied(&edit, &list);

    assert!(view.heights().is_measured(0));
    assert!(!view.heights().is_measured(1));
    assert!(!view.heights().is_measured(4));
    assert!(view.needs_layout());
}

#[test]
fn heights_outside_the_list_are_ignored() {
    let list = list_of(2);
    let mut view = view(300.0, 600.0);
    view.layout(&list);

    assert!(!view.record_row_height(5, 40.0));
    assert!(view.record_row_height(1, 40.0));
    assert!(!view.record_row_height(1, 40.0));
}

#[test]
fn empty_list_mounts_nothing() {
    let list = ListState::new();
    let mut view = view(300.0, 600.0);
    let scene = view.layout(&list);

    assert!(scene.rows.is_empty());
    assert_eq!(scene.total_content_height, 0.0);
    assert_eq!(scene.scroll_request, None);
    assert_eq!(view.hit_test(Point::new(10.0, 10.0)), None);
}

/// Settles `list` with 100px rows, then scrolls back to the top.
fn settled_at_top(list: &ListState, width: f32, height: f32) -> VirtualizedList {
    let mut view = view(width, height);
    settle(&mut view, list, |_| 100.0);
    view.on_scroll(0.0);
    settle(&mut view, list, |_| 100.0);
    view
}

#[test]
fn scrolling_mid_drag_moves_preview_and_drop_together() {
    let list = list_of(50);
    let mut view = settled_at_top(&list, 300.0, 500.0);

    view.pointer_event(&PointerEvent::down(100.0, 50.0), &list);
    view.pointer_event(&PointerEvent::moved(100.0, 70.0), &list);
    assert_eq!(view.drag().destination(), Some(0));

    assert_eq!(view.on_scroll(2000.0), ScrollSource::User);
    let scene = view.layout(&list);
    let preview = scene.drag_preview.as_ref().expect("preview while dragging");
    assert_eq!(preview.destination, 20);
    assert_eq!(scene.drop_indicator, Some(100.0));

    let edit = view.pointer_event(&PointerEvent::up(100.0, 70.0), &list);
    assert_eq!(edit, Some(list.move_edit(0, 20)));
}

#[test]
fn holding_a_drag_at_the_bottom_edge_scrolls_down() {
    let list = list_of(50);
    let mut view = settled_at_top(&list, 300.0, 500.0);
    assert!(!view.drag_autoscroll());

    view.pointer_event(&PointerEvent::down(100.0, 50.0), &list);
    view.pointer_event(&PointerEvent::moved(100.0, 476.0), &list);
    for _ in 0..20 {
        assert!(view.drag_autoscroll());
        let scene = view.layout(&list);
        let target = scene.scroll_request.expect("autoscroll requests a scroll");
        assert_eq!(view.on_scroll(target), ScrollSource::Programmatic);
    }

    assert_eq!(view.scroll_offset(), 180.0);
    assert!(!view.is_following_bottom());
    let scene = view.layout(&list);
    let preview = scene.drag_preview.as_ref().expect("preview while dragging");
    assert_eq!(preview.destination, 6);
    assert_eq!(
        view.pointer_event(&PointerEvent::up(100.0, 476.0), &list),
        Some(list.move_edit(0, 6))
    );
}

#[test]
fn autoscroll_stops_at_the_top() {
    let list = list_of(50);
    let mut view = settled_at_top(&list, 300.0, 500.0);

    view.pointer_event(&PointerEvent::down(100.0, 150.0), &list);
    view.pointer_event(&PointerEvent::moved(100.0, 10.0), &list);
    assert!(view.drag().is_dragging());
    assert!(!view.drag_autoscroll());
    assert_eq!(view.scroll_offset(), 0.0);
}
