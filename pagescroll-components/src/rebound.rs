//! Snap targets and the per-frame fling clamp.
//!
//! Every page change or rebound ends in a single smooth scroll to one of the
//! targets below. Free flings inside a page are simulated by the host's
//! [`FlingScroller`](pagescroll_ui::FlingScroller) and clamped to the active
//! page on every frame by [`clamp_frame`].

use pagescroll_ui::{PageBounds, Px, PxPosition, ScrollableSurface};
use tracing::trace;

/// Target after a drag towards the previous page.
///
/// On a flip, the new page is shown bottom-aligned (or top-aligned if it fits
/// the viewport). Without a flip the page snaps back to its top when it fits
/// the viewport or its top edge is showing.
pub fn after_drag_up(
    active: PageBounds,
    viewport: Px,
    page_changed: bool,
    fling_disabled: bool,
    scroll_y: Px,
) -> Option<Px> {
    if page_changed {
        Some(active.bottom_aligned(viewport).max(active.top))
    } else if fling_disabled || scroll_y < active.top {
        Some(active.top)
    } else {
        None
    }
}

/// Target after a drag towards the next page.
pub fn after_drag_down(
    active: PageBounds,
    viewport: Px,
    page_changed: bool,
    fling_disabled: bool,
    scroll_y: Px,
) -> Option<Px> {
    if page_changed {
        Some(active.bottom_aligned(viewport).min(active.top))
    } else if fling_disabled || scroll_y + viewport > active.bottom {
        Some(active.bottom_aligned(viewport).max(active.top))
    } else {
        None
    }
}

/// Target after a fling onto the previous page.
pub fn after_fling_retreat(active: PageBounds, viewport: Px) -> Px {
    active.top.max(active.bottom_aligned(viewport))
}

/// Target after a fling onto the next page.
pub fn after_fling_advance(active: PageBounds) -> Px {
    active.top
}

/// Target of a programmatic jump.
pub fn after_jump(active: PageBounds) -> Px {
    active.top
}

/// What to do with one simulated fling frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStep {
    /// Follow the simulator and ask for another frame.
    Follow(PxPosition),
    /// The fling would leave the page: stop it and jump to this offset.
    StopAt(Px),
}

/// Keeps a simulated position inside `[top, bottom - viewport]` of the
/// active page.
pub fn clamp_frame(position: PxPosition, active: PageBounds, viewport: Px) -> FrameStep {
    let lowest = active.bottom_aligned(viewport);
    if position.y < active.top {
        FrameStep::StopAt(active.top)
    } else if position.y > lowest {
        FrameStep::StopAt(lowest)
    } else {
        FrameStep::Follow(position)
    }
}

/// Starts the host's smooth scroll to `target`.
pub(crate) fn rebound_to<S: ScrollableSurface + ?Sized>(surface: &mut S, target: Px) {
    trace!(target = target.raw(), "smooth scroll");
    surface.smooth_scroll_to(Px::ZERO, target);
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const VIEWPORT: Px = Px(800);

    fn tall() -> PageBounds {
        PageBounds {
            top: Px(800),
            bottom: Px(2400),
            height: Px(1600),
        }
    }

    fn short() -> PageBounds {
        PageBounds {
            top: Px(2400),
            bottom: Px(3000),
            height: Px(600),
        }
    }

    #[rstest]
    #[case(tall(), true, false, Px(900), Some(Px(1600)))]
    #[case(tall(), false, false, Px(700), Some(Px(800)))]
    #[case(tall(), false, false, Px(900), None)]
    #[case(tall(), false, true, Px(900), Some(Px(800)))]
    #[case(short(), true, true, Px(2000), Some(Px(2400)))]
    fn drag_up_targets(
        #[case] active: PageBounds,
        #[case] changed: bool,
        #[case] fling_disabled: bool,
        #[case] scroll_y: Px,
        #[case] expected: Option<Px>,
    ) {
        assert_eq!(
            after_drag_up(active, VIEWPORT, changed, fling_disabled, scroll_y),
            expected
        );
    }

    #[rstest]
    #[case(tall(), true, false, Px(500), Some(Px(800)))]
    #[case(tall(), false, false, Px(1700), Some(Px(1600)))]
    #[case(tall(), false, false, Px(1000), None)]
    #[case(short(), true, true, Px(2200), Some(Px(2200)))]
    #[case(short(), false, true, Px(2400), Some(Px(2400)))]
    fn drag_down_targets(
        #[case] active: PageBounds,
        #[case] changed: bool,
        #[case] fling_disabled: bool,
        #[case] scroll_y: Px,
        #[case] expected: Option<Px>,
    ) {
        assert_eq!(
            after_drag_down(active, VIEWPORT, changed, fling_disabled, scroll_y),
            expected
        );
    }

    #[test]
    fn fling_targets() {
        assert_eq!(after_fling_retreat(tall(), VIEWPORT), Px(1600));
        assert_eq!(after_fling_retreat(short(), VIEWPORT), Px(2400));
        assert_eq!(after_fling_advance(tall()), Px(800));
        assert_eq!(after_jump(short()), Px(2400));
    }

    #[rstest]
    #[case(700, FrameStep::StopAt(Px(800)))]
    #[case(800, FrameStep::Follow(PxPosition::new(Px(0), Px(800))))]
    #[case(1200, FrameStep::Follow(PxPosition::new(Px(0), Px(1200))))]
    #[case(1600, FrameStep::Follow(PxPosition::new(Px(0), Px(1600))))]
    #[case(1601, FrameStep::StopAt(Px(1600)))]
    fn frames_stay_inside_the_page(#[case] y: i32, #[case] expected: FrameStep) {
        let position = PxPosition::new(Px(0), Px(y));
        assert_eq!(clamp_frame(position, tall(), VIEWPORT), expected);
    }
}
