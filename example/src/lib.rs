mod host;

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::Context as _;
use clap::Parser;
use pagescroll_components::{
    ChildView, Dispatch, EventSource, PagingConfig, PagingEngine, SavedState,
};
use pagescroll_ui::{
    GeometryProvider, PageStack, PointerAction, PointerEvent, Px, ScrollableSurface, ViewId,
    logging::init_tracing,
};
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::host::ConsoleSurface;

const PAGE_LIST: ViewId = ViewId(1);
const FRAME: Duration = Duration::from_millis(16);
/// Safety stop for the frame loop.
const MAX_FRAMES: usize = 10_000;

type SharedPages = Arc<RwLock<PageStack>>;

#[derive(Debug, Parser)]
#[command(
    name = "pagescroll-demo",
    about = "Drives the paging engine through a scripted touch session"
)]
struct Args {
    /// Percentage of the neighbouring page a gesture must reveal to flip.
    #[arg(long, default_value_t = 20, allow_negative_numbers = true)]
    threshold: i32,
    /// Page heights in pixels, comma separated.
    #[arg(long, value_delimiter = ',', default_values_t = [800, 1600, 800, 1200])]
    heights: Vec<i32>,
    /// Viewport height in pixels.
    #[arg(long, default_value_t = 800)]
    viewport: i32,
    /// Release speed of the scripted flings, in pixels per second.
    #[arg(long, default_value_t = 2500.0)]
    fling_velocity: f32,
}

struct Session {
    engine: PagingEngine<ConsoleSurface, SharedPages>,
    extent: Px,
    start: Instant,
    elapsed: Duration,
}

impl Session {
    fn new(engine: PagingEngine<ConsoleSurface, SharedPages>, extent: Px) -> Self {
        Self {
            engine,
            extent,
            start: Instant::now(),
            elapsed: Duration::ZERO,
        }
    }

    fn now(&self) -> Instant {
        self.start + self.elapsed
    }

    fn send(&mut self, action: PointerAction, y: f32) -> Dispatch {
        let event = PointerEvent::new(self.now(), action, 0.0, y);
        if event.is_down() && self.engine.on_intercept_touch_event(&event).is_consumed() {
            debug!("down intercepted");
        }
        self.engine.on_touch_event(&event)
    }

    // The host scrolls the content by the finger's travel while it is down.
    fn move_content(&mut self, finger_travel: f32) {
        let viewport = self.engine.surface().viewport_height();
        let max = (self.extent - viewport).max(Px::ZERO);
        let y = (self.engine.surface().scroll_y() - Px::saturating_from_f32(finger_travel))
            .clamp(Px::ZERO, max);
        self.engine.surface_mut().drag_content(y);
    }

    /// A slow drag: the finger rests before lifting, so it never flings.
    fn drag(&mut self, finger_travel: f32) -> Dispatch {
        let y0 = 400.0;
        self.send(PointerAction::Down, y0);
        self.send(PointerAction::Move, y0);
        self.elapsed += Duration::from_millis(120);
        self.send(PointerAction::Move, y0 + finger_travel);
        self.move_content(finger_travel);
        self.elapsed += Duration::from_millis(300);
        let dispatch = self.send(PointerAction::Up, y0 + finger_travel);
        info!(
            finger_travel,
            ?dispatch,
            gesture = ?self.engine.last_gesture(),
            page = self.engine.current_page(),
            "drag released"
        );
        dispatch
    }

    /// A quick swipe released at `velocity_y`.
    fn fling(&mut self, velocity_y: f32) -> Dispatch {
        let y0 = 400.0;
        let travel = velocity_y / 100.0;
        self.send(PointerAction::Down, y0);
        self.send(PointerAction::Move, y0);
        self.elapsed += Duration::from_millis(10);
        self.send(PointerAction::Move, y0 + travel);
        self.move_content(travel);
        self.elapsed += Duration::from_millis(5);
        let dispatch = self.send(PointerAction::Up, y0 + travel);
        info!(
            velocity_y,
            ?dispatch,
            phase = ?self.engine.phase(),
            page = self.engine.current_page(),
            "fling released"
        );
        dispatch
    }

    /// Renders frames while the engine asks for them, up to `limit`.
    fn run_frames(&mut self, limit: usize) -> usize {
        let mut frames = 0;
        while frames < limit && self.engine.surface_mut().take_frame_request() {
            self.elapsed += FRAME;
            let now = self.now();
            if !self.engine.on_frame(now) {
                break;
            }
            frames += 1;
        }
        info!(
            frames,
            scroll_y = self.engine.surface().scroll_y().raw(),
            phase = ?self.engine.phase(),
            "frames rendered"
        );
        frames
    }
}

/// Runs the scripted session described by the command line.
pub fn desktop_main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();
    anyhow::ensure!(!args.heights.is_empty(), "at least one page height is required");
    anyhow::ensure!(args.viewport > 0, "the viewport must be taller than zero");

    let threshold = args.threshold.to_string();
    let config = PagingConfig::from_attributes([("page_change_threshold", threshold.as_str())]);
    info!(
        threshold = config.page_change_threshold,
        heights = ?args.heights,
        viewport = args.viewport,
        "starting session"
    );

    let pages: SharedPages = Arc::new(RwLock::new(PageStack::from_heights(
        args.heights.iter().copied(),
    )));
    let extent = pages.read().total_height();
    let mut engine = PagingEngine::new(
        ConsoleSurface::new(Px(args.viewport)),
        config.clone(),
        EventSource::Dispatch,
    );
    engine
        .on_finish_inflate(Some(ChildView::PageList {
            id: PAGE_LIST,
            pages: Arc::clone(&pages),
        }))
        .context("attaching the page list")?;

    let listener = Arc::new(|page: usize| info!(page, "page changed"));
    engine.add_page_change_listener(&listener);

    let mut session = Session::new(engine, extent);

    session.drag(-60.0);
    session.drag(-400.0);

    session.fling(-args.fling_velocity);
    session.run_frames(MAX_FRAMES);

    session.fling(-args.fling_velocity);
    session.run_frames(3);
    session.send(PointerAction::Down, 300.0);
    session.send(PointerAction::Cancel, 300.0);
    info!(
        scroll_y = session.engine.surface().scroll_y().raw(),
        "fling stopped by touch"
    );

    session.drag(300.0);

    session.engine.go_to_next_page();
    session.engine.go_to_next_page();
    session.engine.go_to_last_page();

    // The host grows the first page after a relayout.
    pages.write().set_height(0, Px(args.viewport.saturating_mul(2)));
    info!(count = pages.count(), total = pages.read().total_height().raw(), "relayout");

    let snapshot = session.engine.save_state().to_bytes();
    let mut restored: PagingEngine<ConsoleSurface, SharedPages> = PagingEngine::new(
        ConsoleSurface::new(Px(args.viewport)),
        config,
        EventSource::Dispatch,
    );
    restored.restore_state(SavedState::from_bytes(&snapshot)?);
    restored
        .on_child_added(ChildView::PageList {
            id: PAGE_LIST,
            pages,
        })
        .context("re-attaching the page list")?;
    info!(
        page = restored.current_page(),
        fling_disabled = restored.is_fling_disabled(),
        "state restored"
    );
    Ok(())
}
