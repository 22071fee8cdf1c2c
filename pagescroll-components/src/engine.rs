//! The paging engine.
//!
//! ## Usage
//!
//! Compose a [`PagingEngine`] with the host's scroll container and route the
//! container's touch callbacks, frame callback and child-list notifications
//! through it. Pick the [`EventSource`] that matches how the host delivers
//! touches:
//!
//! - [`EventSource::Dispatch`]: the container forwards its own
//!   intercept/touch dispatch to [`PagingEngine::on_intercept_touch_event`]
//!   and [`PagingEngine::on_touch_event`].
//! - [`EventSource::Listener`]: the engine is installed as a touch listener on
//!   a view and receives [`PagingEngine::on_touch`]; only events from that
//!   view feed fling detection.

use std::{sync::Arc, time::Instant};

use pagescroll_ui::{
    DecelerateScroller, FlingDetector, FlingScroller, GeometryProvider, PointerAction,
    PointerEvent, Px, PxPosition, ScrollableSurface, ViewId,
};
use tracing::{debug, error, trace, warn};

use crate::{
    config::PagingConfig,
    error::PagingError,
    gesture::{Gesture, GestureClassifier},
    listeners::{ListenerRegistry, PageChangeListener},
    rebound::{self, FrameStep},
    resolver::{self, FlingResolution, Resolution, ScrollContext},
    saved_state::SavedState,
};

/// How touch events reach the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSource {
    /// The container's own touch dispatch.
    Dispatch,
    /// A touch listener installed on the given view.
    Listener(ViewId),
}

/// What the engine is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing in flight.
    #[default]
    Idle,
    /// A drag is in progress.
    Dragging,
    /// A smooth scroll back to an edge of the active page was issued.
    Rebounding,
    /// A smooth scroll onto another page was issued.
    Flipping,
    /// A fling is being simulated inside the active page.
    Flinging,
}

/// Whether the engine consumed an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The engine handled the event; the host must not.
    Consumed,
    /// The host should run its default handling.
    Host,
}

impl Dispatch {
    /// Returns `true` for [`Dispatch::Consumed`].
    pub fn is_consumed(self) -> bool {
        self == Dispatch::Consumed
    }
}

/// A child the host added to the container.
#[derive(Debug, Clone)]
pub enum ChildView<G> {
    /// The vertical page list, with read access to its geometry.
    PageList {
        /// Host id of the page list.
        id: ViewId,
        /// Geometry of its pages.
        pages: G,
    },
    /// Anything else.
    Other {
        /// Host id of the child.
        id: ViewId,
        /// Host-reported kind, for diagnostics.
        kind: String,
    },
}

impl<G> ChildView<G> {
    /// Host id of the child.
    pub fn id(&self) -> ViewId {
        match self {
            ChildView::PageList { id, .. } | ChildView::Other { id, .. } => *id,
        }
    }
}

#[derive(Debug)]
struct PageList<G> {
    id: ViewId,
    pages: G,
}

/// Snaps a host scroll container to discrete vertical pages.
///
/// The engine never owns the view tree. It reads geometry through `G`,
/// moves content through the surface `S` and simulates free flings with `F`.
pub struct PagingEngine<S, G, F = DecelerateScroller> {
    surface: S,
    scroller: F,
    page_list: Option<PageList<G>>,
    config: PagingConfig,
    source: EventSource,
    detector: FlingDetector,
    classifier: GestureClassifier,
    listeners: ListenerRegistry,
    current_page: usize,
    fling_disabled: bool,
    phase: Phase,
    last_gesture: Gesture,
    /// A snapshot was restored while no page list was attached.
    restored: bool,
}

impl<S, G> PagingEngine<S, G, DecelerateScroller>
where
    S: ScrollableSurface,
    G: GeometryProvider,
{
    /// Creates an engine with the default fling simulator.
    pub fn new(surface: S, config: PagingConfig, source: EventSource) -> Self {
        Self::with_scroller(surface, DecelerateScroller::new(), config, source)
    }
}

impl<S, G, F> PagingEngine<S, G, F>
where
    S: ScrollableSurface,
    G: GeometryProvider,
    F: FlingScroller,
{
    /// Creates an engine with an explicit fling simulator.
    ///
    /// The configuration is validated first, so an out-of-range threshold is
    /// clamped here.
    pub fn with_scroller(surface: S, scroller: F, config: PagingConfig, source: EventSource) -> Self {
        let config = config.validated();
        Self {
            surface,
            scroller,
            page_list: None,
            detector: FlingDetector::new(config.fling_detector.clone()),
            classifier: GestureClassifier::new(config.min_scroll_trigger),
            config,
            source,
            listeners: ListenerRegistry::new(),
            current_page: 0,
            fling_disabled: true,
            phase: Phase::Idle,
            last_gesture: Gesture::None,
            restored: false,
        }
    }

    /// Index of the active page.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Whether flings are disabled on the active page (it fits the viewport).
    pub fn is_fling_disabled(&self) -> bool {
        self.fling_disabled
    }

    /// What the engine is doing.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// How the last completed interaction was classified.
    pub fn last_gesture(&self) -> Gesture {
        self.last_gesture
    }

    /// The validated configuration.
    pub fn config(&self) -> &PagingConfig {
        &self.config
    }

    /// How touch events reach this engine.
    pub fn event_source(&self) -> EventSource {
        self.source
    }

    /// Page change threshold in percent.
    pub fn page_change_threshold(&self) -> i32 {
        self.config.page_change_threshold
    }

    /// Sets the page change threshold, clamped to 0..=100.
    pub fn set_page_change_threshold(&mut self, threshold: i32) {
        self.config.page_change_threshold = threshold.clamp(0, 100);
    }

    /// The host surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the host surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The fling simulator.
    pub fn scroller(&self) -> &F {
        &self.scroller
    }

    /// Mutable access to the fling simulator.
    pub fn scroller_mut(&mut self) -> &mut F {
        &mut self.scroller
    }

    /// Returns `true` while a page list is attached.
    pub fn is_attached(&self) -> bool {
        self.page_list.is_some()
    }

    /// Geometry of the attached page list.
    pub fn pages(&self) -> Option<&G> {
        self.page_list.as_ref().map(|list| &list.pages)
    }

    /// Mutable access to the attached page list, for hosts that own it
    /// through the engine.
    pub fn pages_mut(&mut self) -> Option<&mut G> {
        self.page_list.as_mut().map(|list| &mut list.pages)
    }

    /// Registers a page change observer. Returns `false` if it was already
    /// registered.
    pub fn add_page_change_listener<L: PageChangeListener + 'static>(
        &mut self,
        listener: &Arc<L>,
    ) -> bool {
        self.listeners.add(listener)
    }

    /// Unregisters a page change observer. Returns `false` if it was not
    /// registered.
    pub fn remove_page_change_listener<L: PageChangeListener + 'static>(
        &mut self,
        listener: &Arc<L>,
    ) -> bool {
        self.listeners.remove(listener)
    }

    /// Smooth scrolls to the top of page `page` and notifies observers.
    ///
    /// Ignored for the active page or an index outside the page list. Stops
    /// an in-flight fling first. Returns `true` if the page changed.
    #[tracing::instrument(level = "trace", skip(self), fields(current = self.current_page))]
    pub fn move_to_page(&mut self, page: usize) -> bool {
        let Some((pages, ctx)) = self.pages_and_context() else {
            return false;
        };
        match resolver::resolve_jump(pages, &ctx, page) {
            Ok(Some(resolution)) => {
                self.stop_fling();
                self.commit(resolution);
                true
            }
            Ok(None) => false,
            Err(err) => {
                error!(%err, page, "jump aborted");
                false
            }
        }
    }

    /// Moves to the page after the active one.
    pub fn go_to_next_page(&mut self) -> bool {
        self.move_to_page(self.current_page.saturating_add(1))
    }

    /// Moves to the page *before* the active one.
    ///
    /// "Last" reads as "previous": this decrements the index. The name is
    /// kept for hosts that already call it.
    pub fn go_to_last_page(&mut self) -> bool {
        match self.current_page.checked_sub(1) {
            Some(previous) => self.move_to_page(previous),
            None => false,
        }
    }

    /// Snapshot of the paging state.
    pub fn save_state(&self) -> SavedState {
        SavedState {
            active_item: i32::try_from(self.current_page).unwrap_or(i32::MAX),
            fling_disabled: self.fling_disabled,
        }
    }

    /// Restores a snapshot.
    ///
    /// Before the page list is attached, the index is kept as is and survives
    /// the first attach (clamped to the page count then). A negative index
    /// restores as page 0.
    pub fn restore_state(&mut self, state: SavedState) {
        let page = usize::try_from(state.active_item).unwrap_or(0);
        self.fling_disabled = state.fling_disabled;
        match self.page_list.as_ref() {
            Some(list) => {
                self.current_page = page.min(list.pages.count().saturating_sub(1));
            }
            None => {
                self.current_page = page;
                self.restored = true;
            }
        }
        debug!(page = self.current_page, fling_disabled = self.fling_disabled, "state restored");
    }

    /// Intercept hook of the container's touch dispatch.
    ///
    /// A running fling is stopped where it is. The `Down` that stopped it is
    /// consumed so it cannot turn into a click on a page.
    #[tracing::instrument(level = "trace", skip(self), fields(page = self.current_page))]
    pub fn on_intercept_touch_event(&mut self, event: &PointerEvent) -> Dispatch {
        if self.stop_fling() && event.is_down() {
            return Dispatch::Consumed;
        }
        Dispatch::Host
    }

    /// Touch hook of the container's own dispatch ([`EventSource::Dispatch`]).
    ///
    /// Returns [`Dispatch::Host`] when the host should run its default
    /// scrolling for the event.
    #[tracing::instrument(level = "trace", skip(self), fields(page = self.current_page))]
    pub fn on_touch_event(&mut self, event: &PointerEvent) -> Dispatch {
        if let EventSource::Listener(view) = self.source {
            warn!(?view, "touch dispatched to a listener-driven engine");
            return Dispatch::Host;
        }
        match self.handle_pointer(event, true) {
            Ok(true) => Dispatch::Consumed,
            Ok(false) => Dispatch::Host,
            Err(err) => {
                error!(%err, "touch handling failed");
                Dispatch::Consumed
            }
        }
    }

    /// Touch listener callback ([`EventSource::Listener`]).
    ///
    /// Returns `true` if the event was consumed.
    #[tracing::instrument(level = "trace", skip(self), fields(page = self.current_page))]
    pub fn on_touch(&mut self, view: ViewId, event: &PointerEvent) -> bool {
        let EventSource::Listener(listened) = self.source else {
            warn!(?view, "listener callback on a dispatch-driven engine");
            return false;
        };
        match self.handle_pointer(event, view == listened) {
            Ok(consumed) => consumed,
            Err(err) => {
                error!(%err, "touch handling failed");
                true
            }
        }
    }

    /// Per-frame poll.
    ///
    /// While a fling is simulated, copies the simulated offset onto the
    /// surface, clamped to the active page, and returns `true`. Returns
    /// `false` when the host should run its own frame logic.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn on_frame(&mut self, now: Instant) -> bool {
        if !self.scroller.compute_scroll_offset(now) {
            if self.phase != Phase::Dragging {
                self.phase = Phase::Idle;
            }
            return false;
        }

        let viewport = self.surface.viewport_height();
        let active = match self.pages_and_context() {
            Some((pages, ctx)) => pages
                .bounds_of(ctx.current)
                .ok_or(PagingError::MissingGeometry { index: ctx.current }),
            None => {
                warn!("fling running without pages, stopping it");
                self.scroller.force_finished();
                self.phase = Phase::Idle;
                return false;
            }
        };
        let active = match active {
            Ok(active) => active,
            Err(err) => {
                error!(%err, "stopping fling");
                self.scroller.force_finished();
                self.phase = Phase::Idle;
                return false;
            }
        };

        match rebound::clamp_frame(self.scroller.current(), active, viewport) {
            FrameStep::StopAt(y) => {
                trace!(y = y.raw(), "fling reached the page edge");
                self.scroller.force_finished();
                self.surface.scroll_to(Px::ZERO, y);
                self.phase = Phase::Idle;
            }
            FrameStep::Follow(position) => {
                self.surface.scroll_to(position.x, position.y);
                self.surface.request_frame();
            }
        }
        true
    }

    /// The container finished inflating with `first_child` as its first
    /// child, if any.
    pub fn on_finish_inflate(&mut self, first_child: Option<ChildView<G>>) -> Result<(), PagingError> {
        match first_child {
            Some(child) => self.on_child_added(child),
            None => {
                debug!("inflated without a page list");
                Ok(())
            }
        }
    }

    /// A child was added to the container.
    ///
    /// The first child must be the page list; anything else is a setup
    /// error. Later children are ignored.
    pub fn on_child_added(&mut self, child: ChildView<G>) -> Result<(), PagingError> {
        if self.page_list.is_some() {
            debug!(id = ?child.id(), "page list already attached, ignoring child");
            return Ok(());
        }
        match child {
            ChildView::PageList { id, pages } => {
                self.attach(id, pages);
                Ok(())
            }
            ChildView::Other { kind, .. } => Err(PagingError::NotAPageList { kind }),
        }
    }

    /// The child `id` was removed.
    pub fn on_child_removed(&mut self, id: ViewId) {
        if self.page_list.as_ref().is_some_and(|list| list.id == id) {
            self.detach();
        }
    }

    /// The child at `index` was removed.
    pub fn on_child_removed_at(&mut self, index: usize) {
        if index == 0 {
            self.detach();
        }
    }

    /// `count` children starting at `start` were removed.
    pub fn on_children_removed(&mut self, start: usize, count: usize) {
        if start == 0 && count > 0 {
            self.detach();
        }
    }

    /// Every child was removed.
    pub fn on_all_children_removed(&mut self) {
        self.detach();
    }

    fn attach(&mut self, id: ViewId, pages: G) {
        let count = pages.count();
        if self.restored {
            self.current_page = self.current_page.min(count.saturating_sub(1));
            self.restored = false;
        } else {
            self.current_page = 0;
        }
        self.page_list = Some(PageList { id, pages });
        debug!(?id, count, page = self.current_page, "page list attached");
    }

    fn detach(&mut self) {
        let Some(list) = self.page_list.take() else {
            return;
        };
        self.scroller.force_finished();
        self.classifier.on_cancel();
        self.current_page = 0;
        self.phase = Phase::Idle;
        debug!(id = ?list.id, "page list detached");
    }

    // Clamps the active index to the page count and captures the scroll state.
    // `None` when there is nothing to page.
    fn pages_and_context(&mut self) -> Option<(&G, ScrollContext)> {
        let count = self.page_list.as_ref()?.pages.count();
        if count == 0 {
            trace!("page list is empty");
            return None;
        }
        if self.current_page >= count {
            self.clamp_to_last_page(count - 1);
        }
        let ctx = ScrollContext {
            current: self.current_page,
            scroll_y: self.surface.scroll_y(),
            viewport: self.surface.viewport_height(),
            page_change_threshold: self.config.page_change_threshold,
        };
        self.page_list.as_ref().map(|list| (&list.pages, ctx))
    }

    // The page list shrank under the active index. The clamp is a page change
    // like any other: fling permission follows the new page and observers hear
    // about it.
    fn clamp_to_last_page(&mut self, last: usize) {
        let previous = self.current_page;
        self.current_page = last;
        let viewport = self.surface.viewport_height();
        match self
            .page_list
            .as_ref()
            .and_then(|list| list.pages.bounds_of(last))
        {
            Some(bounds) => self.fling_disabled = bounds.fits_in(viewport),
            None => warn!(page = last, "no geometry for the clamped page, fling permission kept"),
        }
        debug!(from = previous, to = last, "page list shrank, page changed");
        self.listeners.notify_page_changed(last);
    }

    fn commit(&mut self, resolution: Resolution) {
        self.fling_disabled = resolution.fling_disabled;
        self.current_page = resolution.page;
        match resolution.target {
            Some(target) => {
                rebound::rebound_to(&mut self.surface, target);
                self.phase = if resolution.page_changed() {
                    Phase::Flipping
                } else {
                    Phase::Rebounding
                };
            }
            None => self.phase = Phase::Idle,
        }
        if resolution.page_changed() {
            debug!(from = resolution.previous, to = resolution.page, "page changed");
            self.listeners.notify_page_changed(resolution.page);
        }
    }

    // Force-finishes a running fling and leaves the surface at the last
    // computed offset. Returns `true` if a fling was running.
    fn stop_fling(&mut self) -> bool {
        if self.scroller.is_finished() {
            return false;
        }
        self.scroller.force_finished();
        let position = self.scroller.current();
        self.surface.scroll_to(position.x, position.y);
        if self.phase == Phase::Flinging {
            self.phase = Phase::Idle;
        }
        debug!(y = position.y.raw(), "fling stopped");
        true
    }

    fn handle_pointer(&mut self, event: &PointerEvent, detect_flings: bool) -> Result<bool, PagingError> {
        let fling = if detect_flings {
            self.detector.on_pointer_event(event)
        } else {
            None
        };

        match event.action {
            PointerAction::Down => {
                if detect_flings {
                    self.stop_fling();
                }
                if matches!(self.phase, Phase::Rebounding | Phase::Flipping) {
                    self.phase = Phase::Idle;
                }
                self.classifier.on_down();
                Ok(false)
            }
            PointerAction::Move => {
                if self.classifier.on_move(event.y) && self.phase != Phase::Flinging {
                    self.phase = Phase::Dragging;
                }
                Ok(false)
            }
            PointerAction::Up => {
                let drag = self.classifier.on_up(event.y);
                if self.phase == Phase::Dragging {
                    self.phase = Phase::Idle;
                }

                if let Some(fling) = fling {
                    if self.on_fling(fling.velocity_y, event.timestamp)? {
                        self.last_gesture = Gesture::from(fling);
                        return Ok(true);
                    }
                }
                if !self.scroller.is_finished() {
                    trace!("fling in flight, drag left to the simulator");
                    self.last_gesture = Gesture::None;
                    return Ok(false);
                }

                self.last_gesture = drag;
                match drag {
                    Gesture::DragUp { .. } | Gesture::DragDown { .. } => {
                        self.rebound_after_drag(drag)?;
                        Ok(true)
                    }
                    Gesture::Fling { .. } | Gesture::None => Ok(false),
                }
            }
            PointerAction::Cancel => {
                self.classifier.on_cancel();
                if self.phase == Phase::Dragging {
                    self.phase = Phase::Idle;
                }
                Ok(false)
            }
        }
    }

    fn rebound_after_drag(&mut self, drag: Gesture) -> Result<(), PagingError> {
        let Some((pages, ctx)) = self.pages_and_context() else {
            trace!("no pages to rebound on");
            return Ok(());
        };
        let resolution = match drag {
            Gesture::DragUp { dy } => resolver::resolve_drag_up(pages, &ctx, dy)?,
            Gesture::DragDown { dy } => resolver::resolve_drag_down(pages, &ctx, dy)?,
            Gesture::Fling { .. } | Gesture::None => None,
        };
        if let Some(resolution) = resolution {
            self.commit(resolution);
        }
        Ok(())
    }

    fn on_fling(&mut self, velocity_y: f32, now: Instant) -> Result<bool, PagingError> {
        let fling_disabled = self.fling_disabled;
        let fling_duration = self.config.fling_duration;
        let Some((pages, ctx)) = self.pages_and_context() else {
            return Ok(false);
        };
        match resolver::resolve_fling(pages, &ctx, velocity_y, fling_disabled, fling_duration)? {
            FlingResolution::Ignored => Ok(false),
            FlingResolution::Flip(resolution) => {
                self.commit(resolution);
                Ok(true)
            }
            FlingResolution::Simulate {
                start,
                velocity_y,
                max,
            } => {
                let x = self.surface.scroll_offset().x;
                trace!(start = start.raw(), velocity_y, max = max.raw(), "simulating fling");
                self.scroller.fling(
                    PxPosition::new(x, start),
                    0.0,
                    velocity_y,
                    PxPosition::ZERO,
                    PxPosition::new(Px::ZERO, max),
                    now,
                );
                self.phase = Phase::Flinging;
                self.surface.request_frame();
                Ok(true)
            }
        }
    }
}

impl<S, G, F> std::fmt::Debug for PagingEngine<S, G, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagingEngine")
            .field("source", &self.source)
            .field("attached", &self.page_list.is_some())
            .field("current_page", &self.current_page)
            .field("fling_disabled", &self.fling_disabled)
            .field("phase", &self.phase)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}
