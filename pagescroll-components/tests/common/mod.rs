#![allow(dead_code)]

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use pagescroll_components::{
    ChildView, Dispatch, EventSource, PageChangeListener, PagingConfig, PagingEngine,
};
use pagescroll_ui::{
    GeometryProvider, PageStack, PointerAction, PointerEvent, Px, ScrollableSurface, ViewId,
    testing::{ManualScroller, RecordingSurface},
};
use parking_lot::Mutex;

pub const VIEWPORT: Px = Px(800);
pub const PAGE_LIST: ViewId = ViewId(1);
pub const CONTAINER: ViewId = ViewId(10);

/// Records every page change it is told about.
#[derive(Default)]
pub struct PageLog(Mutex<Vec<usize>>);

impl PageLog {
    pub fn pages(&self) -> Vec<usize> {
        self.0.lock().clone()
    }

    pub fn clear(&self) {
        self.0.lock().clear();
    }
}

impl PageChangeListener for PageLog {
    fn on_page_change(&self, page: usize) {
        self.0.lock().push(page);
    }
}

pub type Engine<G = PageStack> = PagingEngine<RecordingSurface, G, ManualScroller>;

/// Drives an engine the way a host would, with a synthetic clock.
pub struct Harness<G: GeometryProvider = PageStack> {
    pub engine: Engine<G>,
    pub log: Arc<PageLog>,
    start: Instant,
    elapsed: Duration,
}

impl Harness<PageStack> {
    pub fn new(heights: &[i32]) -> Self {
        Self::with_source(heights, EventSource::Dispatch)
    }

    pub fn with_source(heights: &[i32], source: EventSource) -> Self {
        Self::with_pages(PageStack::from_heights(heights.iter().copied()), source)
    }
}

impl<G: GeometryProvider> Harness<G> {
    pub fn with_pages(pages: G, source: EventSource) -> Self {
        let mut engine = PagingEngine::with_scroller(
            RecordingSurface::new(VIEWPORT),
            ManualScroller::new(),
            PagingConfig::default(),
            source,
        );
        engine
            .on_child_added(ChildView::PageList {
                id: PAGE_LIST,
                pages,
            })
            .expect("page list attaches");
        let log = Arc::new(PageLog::default());
        engine.add_page_change_listener(&log);
        Self {
            engine,
            log,
            start: Instant::now(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn now(&self) -> Instant {
        self.start + self.elapsed
    }

    pub fn advance(&mut self, ms: u64) {
        self.elapsed += Duration::from_millis(ms);
    }

    pub fn event(&self, action: PointerAction, y: f32) -> PointerEvent {
        PointerEvent::new(self.now(), action, 0.0, y)
    }

    /// Delivers one event through whichever entry point the source uses.
    pub fn touch(&mut self, action: PointerAction, y: f32) -> bool {
        self.touch_from(CONTAINER, action, y)
    }

    pub fn touch_from(&mut self, view: ViewId, action: PointerAction, y: f32) -> bool {
        let event = self.event(action, y);
        match self.engine.event_source() {
            EventSource::Dispatch => self.engine.on_touch_event(&event) == Dispatch::Consumed,
            EventSource::Listener(_) => self.engine.on_touch(view, &event),
        }
    }

    pub fn intercept(&mut self, action: PointerAction, y: f32) -> Dispatch {
        let event = self.event(action, y);
        self.engine.on_intercept_touch_event(&event)
    }

    pub fn set_scroll_y(&mut self, y: i32) {
        self.engine.surface_mut().set_scroll_y(Px(y));
    }

    pub fn scroll_y(&self) -> Px {
        self.engine.surface().scroll_y()
    }

    /// A slow drag of `dy` pixels released with the container at
    /// `scroll_y`. The finger rests before lifting, so no fling is detected.
    pub fn drag(&mut self, scroll_y: i32, dy: f32) -> bool {
        self.drag_from(CONTAINER, scroll_y, dy)
    }

    pub fn drag_from(&mut self, view: ViewId, scroll_y: i32, dy: f32) -> bool {
        let y0 = 500.0;
        self.touch_from(view, PointerAction::Down, y0);
        self.touch_from(view, PointerAction::Move, y0);
        self.advance(10);
        self.touch_from(view, PointerAction::Move, y0 + dy);
        self.advance(500);
        self.set_scroll_y(scroll_y);
        let consumed = self.touch_from(view, PointerAction::Up, y0 + dy);
        self.advance(100);
        consumed
    }

    /// A quick swipe released at `velocity_y` pixels per second with the
    /// container at `scroll_y`.
    pub fn fling(&mut self, scroll_y: i32, velocity_y: f32) -> bool {
        self.fling_from(CONTAINER, scroll_y, velocity_y)
    }

    pub fn fling_from(&mut self, view: ViewId, scroll_y: i32, velocity_y: f32) -> bool {
        let y0 = 500.0;
        let travel = velocity_y / 100.0;
        self.touch_from(view, PointerAction::Down, y0);
        self.touch_from(view, PointerAction::Move, y0);
        self.advance(10);
        self.touch_from(view, PointerAction::Move, y0 + travel);
        self.advance(5);
        self.set_scroll_y(scroll_y);
        let consumed = self.touch_from(view, PointerAction::Up, y0 + travel);
        self.advance(100);
        consumed
    }

    /// Polls one frame.
    pub fn frame(&mut self) -> bool {
        self.advance(16);
        let now = self.now();
        self.engine.on_frame(now)
    }

    /// Forgets commands and notifications recorded so far.
    pub fn reset_records(&mut self) {
        self.engine.surface_mut().take_commands();
        self.log.clear();
    }
}
