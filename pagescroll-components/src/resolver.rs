//! Page decisions for drags, flings and jumps.
//!
//! These functions only read geometry and return what should happen; the
//! engine commits the result. A lookup that fails therefore leaves the engine
//! untouched.
//!
//! All offsets are in the container's scroll extent. `dy` and `velocity_y`
//! follow the finger: positive means it moved down the screen, which reveals
//! the previous page.

use std::time::Duration;

use pagescroll_ui::{GeometryProvider, PageBounds, Px};
use tracing::trace;

use crate::{error::PagingError, rebound};

/// The scroll state a decision is made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollContext {
    /// Index of the active page.
    pub current: usize,
    /// Current vertical scroll offset.
    pub scroll_y: Px,
    /// Height of the visible area.
    pub viewport: Px,
    /// Page change threshold in percent, already clamped to 0..=100.
    pub page_change_threshold: i32,
}

impl ScrollContext {
    fn fraction(&self) -> f32 {
        self.page_change_threshold as f32 / 100.0
    }
}

/// The outcome of a drag or jump decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// The page that was active before the gesture.
    pub previous: usize,
    /// The page that is active after it.
    pub page: usize,
    /// Whether flings are disabled on `page`.
    pub fling_disabled: bool,
    /// Where to smooth scroll, if anywhere.
    pub target: Option<Px>,
}

impl Resolution {
    /// Returns `true` if the gesture flipped to another page.
    pub fn page_changed(&self) -> bool {
        self.previous != self.page
    }
}

/// The outcome of a fling decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlingResolution {
    /// The engine does not handle this fling; drag logic applies.
    Ignored,
    /// The fling flips to a neighbouring page.
    Flip(Resolution),
    /// The fling stays on the page and is handed to the simulator.
    Simulate {
        /// Vertical start offset.
        start: Px,
        /// Simulator velocity, in scroll direction.
        velocity_y: f32,
        /// Upper bound of the simulation: the bottom of the last page.
        max: Px,
    },
}

fn bounds<G: GeometryProvider + ?Sized>(pages: &G, index: usize) -> Result<PageBounds, PagingError> {
    pages
        .bounds_of(index)
        .ok_or(PagingError::MissingGeometry { index })
}

fn clamped_current<G: GeometryProvider + ?Sized>(pages: &G, ctx: &ScrollContext) -> Option<usize> {
    let count = pages.count();
    if count == 0 {
        trace!("no pages");
        return None;
    }
    Some(ctx.current.min(count - 1))
}

/// Decides a drag towards the previous page.
///
/// Flips back when the content was pulled more than `threshold` percent of
/// the previous page (capped at one viewport) above the active page's top.
/// Returns `None` when there are no pages.
pub fn resolve_drag_up<G: GeometryProvider + ?Sized>(
    pages: &G,
    ctx: &ScrollContext,
    dy: f32,
) -> Result<Option<Resolution>, PagingError> {
    let Some(current) = clamped_current(pages, ctx) else {
        return Ok(None);
    };

    let mut page = current;
    if current > 0 {
        let here = bounds(pages, current)?;
        let above = bounds(pages, current - 1)?;
        let boundary =
            here.top.to_f32() - above.height.min(ctx.viewport).to_f32() * ctx.fraction();
        trace!(boundary, scroll_y = ctx.scroll_y.raw(), dy, "drag up");
        if ctx.scroll_y.to_f32() - dy < boundary {
            page = current - 1;
        }
    }

    let active = bounds(pages, page)?;
    let fling_disabled = active.fits_in(ctx.viewport);
    Ok(Some(Resolution {
        previous: current,
        page,
        fling_disabled,
        target: rebound::after_drag_up(
            active,
            ctx.viewport,
            page != current,
            fling_disabled,
            ctx.scroll_y,
        ),
    }))
}

/// Decides a drag towards the next page.
///
/// Flips forward when the content was pushed more than `threshold` percent of
/// the next page (capped at one viewport) past the active page's bottom.
/// Returns `None` when there are no pages.
pub fn resolve_drag_down<G: GeometryProvider + ?Sized>(
    pages: &G,
    ctx: &ScrollContext,
    dy: f32,
) -> Result<Option<Resolution>, PagingError> {
    let Some(current) = clamped_current(pages, ctx) else {
        return Ok(None);
    };
    let count = pages.count();

    let mut page = current;
    if current + 1 < count {
        let here = bounds(pages, current)?;
        let below = bounds(pages, current + 1)?;
        let boundary =
            below.height.min(ctx.viewport).to_f32() * ctx.fraction() + here.bottom.to_f32();
        trace!(boundary, scroll_y = ctx.scroll_y.raw(), dy, "drag down");
        if ctx.scroll_y.to_f32() + ctx.viewport.to_f32() - dy > boundary {
            page = current + 1;
        }
    }

    let active = bounds(pages, page)?;
    let fling_disabled = active.fits_in(ctx.viewport);
    Ok(Some(Resolution {
        previous: current,
        page,
        fling_disabled,
        target: rebound::after_drag_down(
            active,
            ctx.viewport,
            page != current,
            fling_disabled,
            ctx.scroll_y,
        ),
    }))
}

/// Decides a fling.
///
/// The velocity is projected over `fling_duration`. A fling that starts at
/// the active page's top edge and would reveal enough of the previous page
/// flips back; one that starts at the bottom edge and would reveal enough of
/// the next page flips forward. Anything else is simulated.
pub fn resolve_fling<G: GeometryProvider + ?Sized>(
    pages: &G,
    ctx: &ScrollContext,
    velocity_y: f32,
    fling_disabled: bool,
    fling_duration: Duration,
) -> Result<FlingResolution, PagingError> {
    if fling_disabled {
        trace!("fling disabled on this page");
        return Ok(FlingResolution::Ignored);
    }
    let Some(current) = clamped_current(pages, ctx) else {
        return Ok(FlingResolution::Ignored);
    };
    let count = pages.count();

    let distance = velocity_y * fling_duration.as_secs_f32();
    let projected = ctx.scroll_y.to_f32() - distance;
    let here = bounds(pages, current)?;
    trace!(distance, projected, "fling");

    if current >= 1 && ctx.scroll_y <= here.top {
        let above = bounds(pages, current - 1)?;
        let boundary = above.height.to_f32() * (1.0 - ctx.fraction()) + above.top.to_f32();
        if projected < boundary {
            return Ok(FlingResolution::Flip(Resolution {
                previous: current,
                page: current - 1,
                fling_disabled: above.fits_in(ctx.viewport),
                target: Some(rebound::after_fling_retreat(above, ctx.viewport)),
            }));
        }
    }

    let lowest = here.bottom_aligned(ctx.viewport);
    if current + 1 < count && ctx.scroll_y >= lowest {
        let below = bounds(pages, current + 1)?;
        let boundary = below.height.to_f32() * ctx.fraction() + lowest.to_f32();
        if projected > boundary {
            return Ok(FlingResolution::Flip(Resolution {
                previous: current,
                page: current + 1,
                fling_disabled: below.fits_in(ctx.viewport),
                target: Some(rebound::after_fling_advance(below)),
            }));
        }
    }

    let last = bounds(pages, count - 1)?;
    Ok(FlingResolution::Simulate {
        start: ctx.scroll_y,
        velocity_y: -velocity_y,
        max: last.bottom,
    })
}

/// Decides a programmatic jump to `target`.
///
/// Returns `None` for the active page or an index outside the page list.
pub fn resolve_jump<G: GeometryProvider + ?Sized>(
    pages: &G,
    ctx: &ScrollContext,
    target: usize,
) -> Result<Option<Resolution>, PagingError> {
    if target >= pages.count() || target == ctx.current {
        trace!(target, "jump ignored");
        return Ok(None);
    }
    let active = bounds(pages, target)?;
    Ok(Some(Resolution {
        previous: ctx.current,
        page: target,
        fling_disabled: active.fits_in(ctx.viewport),
        target: Some(rebound::after_jump(active)),
    }))
}
