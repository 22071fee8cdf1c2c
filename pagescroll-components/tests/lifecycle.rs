mod common;

use std::sync::Arc;

use common::{Engine, Harness, PAGE_LIST, PageLog, VIEWPORT};
use pagescroll_components::{
    ChildView, Dispatch, EventSource, PagingConfig, PagingEngine, PagingError, SavedState,
};
use pagescroll_ui::{
    GeometryProvider, PageStack, PointerAction, PointerEvent, Px, ViewId,
    testing::{ManualScroller, RecordingSurface},
};
use rstest::rstest;

fn detached() -> Engine {
    PagingEngine::with_scroller(
        RecordingSurface::new(VIEWPORT),
        ManualScroller::new(),
        PagingConfig::default(),
        EventSource::Dispatch,
    )
}

fn page_list(heights: &[i32]) -> ChildView<PageStack> {
    ChildView::PageList {
        id: PAGE_LIST,
        pages: PageStack::from_heights(heights.iter().copied()),
    }
}

#[test]
fn other_child_is_a_setup_error() {
    let mut engine = detached();
    let err = engine
        .on_child_added(ChildView::Other {
            id: ViewId(2),
            kind: "FrameLayout".to_string(),
        })
        .expect_err("not a page list");
    assert_eq!(
        err,
        PagingError::NotAPageList {
            kind: "FrameLayout".to_string()
        }
    );
    assert!(err.to_string().contains("FrameLayout"));
    assert!(!engine.is_attached());
}

#[test]
fn finish_inflate_attaches_the_first_child() {
    let mut engine = detached();
    assert_eq!(engine.on_finish_inflate(None), Ok(()));
    assert!(!engine.is_attached());

    engine
        .on_finish_inflate(Some(page_list(&[800, 800])))
        .expect("page list");
    assert!(engine.is_attached());
    assert_eq!(engine.pages().map(|pages| pages.count()), Some(2));

    let err = detached().on_finish_inflate(Some(ChildView::Other {
        id: ViewId(3),
        kind: "TextView".to_string(),
    }));
    assert!(matches!(err, Err(PagingError::NotAPageList { .. })));
}

#[test]
fn later_children_are_ignored() {
    let mut engine = detached();
    engine.on_child_added(page_list(&[800, 800])).expect("page list");
    engine
        .on_child_added(ChildView::Other {
            id: ViewId(4),
            kind: "View".to_string(),
        })
        .expect("ignored");
    assert_eq!(engine.pages().map(|pages| pages.count()), Some(2));
}

#[derive(Debug, Clone, Copy)]
enum Removal {
    View(ViewId),
    At(usize),
    Range(usize, usize),
    All,
}

#[rstest]
#[case::page_list_view(Removal::View(PAGE_LIST), true)]
#[case::other_view(Removal::View(ViewId(99)), false)]
#[case::first_index(Removal::At(0), true)]
#[case::second_index(Removal::At(1), false)]
#[case::range_from_start(Removal::Range(0, 1), true)]
#[case::empty_range(Removal::Range(0, 0), false)]
#[case::range_after_start(Removal::Range(1, 2), false)]
#[case::everything(Removal::All, true)]
fn removals_detach_only_the_page_list(#[case] removal: Removal, #[case] detaches: bool) {
    let mut h = Harness::new(&[800, 800, 800]);
    h.engine.move_to_page(2);

    match removal {
        Removal::View(id) => h.engine.on_child_removed(id),
        Removal::At(index) => h.engine.on_child_removed_at(index),
        Removal::Range(start, count) => h.engine.on_children_removed(start, count),
        Removal::All => h.engine.on_all_children_removed(),
    }

    assert_eq!(h.engine.is_attached(), !detaches);
    let expected_page = if detaches { 0 } else { 2 };
    assert_eq!(h.engine.current_page(), expected_page);
}

#[test]
fn reattaching_starts_on_the_first_page() {
    let mut h = Harness::new(&[800, 800, 800]);
    h.engine.move_to_page(2);
    h.engine.on_all_children_removed();
    h.engine.on_child_added(page_list(&[800, 800, 800])).expect("page list");
    assert_eq!(h.engine.current_page(), 0);
}

#[test]
fn detaching_stops_a_fling() {
    let mut h = Harness::new(&[800, 1600, 800]);
    h.engine.move_to_page(1);
    h.engine.scroller_mut().script([1100, 1200]);
    h.fling(1000, -2000.0);
    assert!(h.frame());

    h.engine.on_child_removed(PAGE_LIST);
    assert!(!h.frame());
    assert_eq!(h.engine.scroller().forced_stops(), 1);
}

#[test]
fn snapshot_restored_before_layout_survives_attach() {
    let mut first = Harness::new(&[800, 1600, 800]);
    first.engine.move_to_page(2);
    let bytes = first.engine.save_state().to_bytes();
    assert_eq!(bytes, [2, 0, 0, 0, 1]);

    let mut engine = detached();
    engine.restore_state(SavedState::from_bytes(&bytes).expect("snapshot"));
    assert_eq!(engine.current_page(), 2);
    assert!(engine.is_fling_disabled());

    engine.on_child_added(page_list(&[800, 1600, 800])).expect("page list");
    assert_eq!(engine.current_page(), 2);
    assert!(engine.is_fling_disabled());
    assert_eq!(
        engine.save_state(),
        SavedState {
            active_item: 2,
            fling_disabled: true
        }
    );
}

#[rstest]
#[case(5, 2)]
#[case(-3, 0)]
#[case(1, 1)]
fn restored_index_is_clamped_to_the_pages(#[case] saved: i32, #[case] expected: usize) {
    let mut engine = detached();
    engine.restore_state(SavedState {
        active_item: saved,
        fling_disabled: false,
    });
    engine.on_child_added(page_list(&[800, 800, 800])).expect("page list");
    assert_eq!(engine.current_page(), expected);

    let mut attached = Harness::new(&[800, 800, 800]);
    attached.engine.restore_state(SavedState {
        active_item: saved,
        fling_disabled: false,
    });
    assert_eq!(attached.engine.current_page(), expected);
}

#[test]
fn truncated_snapshot_is_rejected() {
    assert_eq!(
        SavedState::from_bytes(&[2, 0]),
        Err(PagingError::TruncatedState { len: 2 })
    );
}

#[test]
fn listeners_are_identity_based_and_weak() {
    let mut h = Harness::new(&[800, 800, 800]);
    let extra = Arc::new(PageLog::default());

    assert!(h.engine.add_page_change_listener(&extra));
    assert!(!h.engine.add_page_change_listener(&extra));
    h.engine.go_to_next_page();
    assert_eq!(extra.pages(), vec![1]);
    assert_eq!(h.log.pages(), vec![1]);

    assert!(h.engine.remove_page_change_listener(&extra));
    assert!(!h.engine.remove_page_change_listener(&extra));
    h.engine.go_to_next_page();
    assert_eq!(extra.pages(), vec![1]);

    let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let closure = {
        let seen = Arc::clone(&seen);
        Arc::new(move |page: usize| seen.lock().push(page))
    };
    h.engine.add_page_change_listener(&closure);
    drop(closure);
    h.engine.go_to_last_page();
    assert!(seen.lock().is_empty());
    assert_eq!(h.log.pages(), vec![1, 2, 1]);
}

/// Reports a page count but loses the geometry of one page.
struct Flaky {
    pages: PageStack,
    missing: usize,
}

impl GeometryProvider for Flaky {
    fn count(&self) -> usize {
        self.pages.count()
    }

    fn height_of(&self, index: usize) -> Option<Px> {
        (index != self.missing)
            .then(|| self.pages.height_of(index))
            .flatten()
    }

    fn top_of(&self, index: usize) -> Option<Px> {
        (index != self.missing).then(|| self.pages.top_of(index)).flatten()
    }

    fn bottom_of(&self, index: usize) -> Option<Px> {
        (index != self.missing)
            .then(|| self.pages.bottom_of(index))
            .flatten()
    }
}

#[test]
fn missing_geometry_is_consumed_without_changing_state() {
    let flaky = Flaky {
        pages: PageStack::from_heights([800, 800, 800]),
        missing: 1,
    };
    let mut h = Harness::with_pages(flaky, EventSource::Dispatch);

    // Drag far enough to flip; the next page cannot be measured.
    assert!(h.drag(0, -400.0));

    assert_eq!(h.engine.current_page(), 0);
    assert!(h.engine.is_fling_disabled());
    assert!(h.engine.surface().commands().is_empty());
    assert!(h.log.pages().is_empty());

    assert!(!h.engine.move_to_page(1));
    assert!(h.engine.surface().commands().is_empty());
}

#[test]
fn wrong_entry_point_for_the_source_is_ignored() {
    let mut dispatch = detached();
    let event = PointerEvent::new(std::time::Instant::now(), PointerAction::Down, 0.0, 10.0);
    assert!(!dispatch.on_touch(ViewId(1), &event));

    let mut listener: Engine = PagingEngine::with_scroller(
        RecordingSurface::new(VIEWPORT),
        ManualScroller::new(),
        PagingConfig::default(),
        EventSource::Listener(ViewId(1)),
    );
    assert_eq!(listener.on_touch_event(&event), Dispatch::Host);
}

#[test]
fn configuration_from_attributes_drives_the_threshold() {
    let config = PagingConfig::from_attributes([("page_change_threshold", "50")]);
    let mut engine: Engine = PagingEngine::with_scroller(
        RecordingSurface::new(VIEWPORT),
        ManualScroller::new(),
        config,
        EventSource::Dispatch,
    );
    engine.on_child_added(page_list(&[800, 800])).expect("page list");
    assert_eq!(engine.page_change_threshold(), 50);
    assert_eq!(engine.config().page_change_threshold, 50);
}
