mod common;

use common::{CONTAINER, Harness};
use pagescroll_components::{EventSource, Gesture, Phase};
use pagescroll_ui::{PointerAction, Px, ViewId};

const CHILD: ViewId = ViewId(42);

fn listener(heights: &[i32]) -> Harness {
    Harness::with_source(heights, EventSource::Listener(CONTAINER))
}

#[test]
fn drags_behave_as_in_dispatch_mode() {
    let mut h = listener(&[800, 1600, 800]);

    assert!(h.drag(0, -50.0));
    assert_eq!(h.engine.last_gesture(), Gesture::DragDown { dy: -50.0 });
    assert_eq!(h.engine.surface().smooth_targets(), vec![Px(0)]);

    assert!(h.drag(100, -200.0));
    assert_eq!(h.engine.current_page(), 1);
    assert_eq!(h.log.pages(), vec![1]);
}

#[test]
fn small_drag_is_not_consumed() {
    let mut h = listener(&[800, 800]);
    assert!(!h.drag(0, 10.0));
}

#[test]
fn flings_are_detected_on_the_listened_view() {
    let mut h = listener(&[800, 1600, 800]);
    h.engine.move_to_page(1);
    h.reset_records();

    assert!(h.fling(1600, -4000.0));
    assert_eq!(h.engine.current_page(), 2);
    assert!(matches!(h.engine.last_gesture(), Gesture::Fling { .. }));
}

#[test]
fn events_from_other_views_skip_fling_detection() {
    let mut h = listener(&[800, 1600, 800]);
    h.engine.move_to_page(1);
    h.reset_records();

    // Same swipe as above, but reported for a child view: only the drag
    // logic sees it. boundary 800 * 20% + 2400 = 2560; 1600 + 800 + 40 = 2440
    assert!(h.fling_from(CHILD, 1600, -4000.0));
    assert_eq!(h.engine.last_gesture(), Gesture::DragDown { dy: -40.0 });
    assert_eq!(h.engine.current_page(), 1);
    assert!(h.log.pages().is_empty());
    assert!(h.engine.scroller().flings().is_empty());
}

#[test]
fn drag_is_ignored_while_a_fling_runs() {
    let mut h = listener(&[800, 1600, 800]);
    h.engine.move_to_page(1);
    h.engine.scroller_mut().script([1100, 1200, 1300]);
    assert!(h.fling(1000, -2000.0));
    assert_eq!(h.engine.phase(), Phase::Flinging);
    h.reset_records();

    // A child view's down does not stop the fling, so the drag is left alone.
    assert!(!h.drag_from(CHILD, 1000, -400.0));
    assert_eq!(h.engine.current_page(), 1);
    assert!(h.engine.surface().smooth_targets().is_empty());
    assert_eq!(h.engine.scroller().forced_stops(), 0);
}

#[test]
fn down_on_the_listened_view_stops_the_fling() {
    let mut h = listener(&[800, 1600, 800]);
    h.engine.move_to_page(1);
    h.engine.scroller_mut().script([1100, 1200, 1300]);
    h.fling(1000, -2000.0);
    assert!(h.frame());

    h.touch(PointerAction::Down, 200.0);
    assert_eq!(h.engine.scroller().forced_stops(), 1);
    assert_eq!(h.scroll_y(), Px(1100));
    assert_eq!(h.engine.phase(), Phase::Idle);
}
