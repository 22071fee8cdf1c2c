//! The host scroll container, seen from the paging engine.
//!
//! The engine composes with the host's scrollable view instead of extending
//! it. Everything it needs from that view goes through [`ScrollableSurface`]:
//! reading the current offset and viewport, jumping, starting the host's own
//! smooth scroll animation and asking for another frame.

use crate::px::{Px, PxPosition};

/// Scroll capabilities the host container exposes to the engine.
///
/// Calls are made on the UI thread, from inside the host's own touch and
/// frame callbacks.
pub trait ScrollableSurface {
    /// Current scroll offset of the container.
    fn scroll_offset(&self) -> PxPosition;

    /// Measured height of the visible area.
    fn viewport_height(&self) -> Px;

    /// Moves the content to `(x, y)` immediately.
    fn scroll_to(&mut self, x: Px, y: Px);

    /// Starts the host's interpolated scroll animation toward `(x, y)`.
    ///
    /// Fire-and-forget: the engine never waits for it to complete.
    fn smooth_scroll_to(&mut self, x: Px, y: Px);

    /// Asks the host to render another frame, which will poll the engine.
    fn request_frame(&mut self);

    /// Shorthand for the vertical component of [`scroll_offset`](Self::scroll_offset).
    fn scroll_y(&self) -> Px {
        self.scroll_offset().y
    }
}

impl<S: ScrollableSurface + ?Sized> ScrollableSurface for &mut S {
    fn scroll_offset(&self) -> PxPosition {
        (**self).scroll_offset()
    }

    fn viewport_height(&self) -> Px {
        (**self).viewport_height()
    }

    fn scroll_to(&mut self, x: Px, y: Px) {
        (**self).scroll_to(x, y)
    }

    fn smooth_scroll_to(&mut self, x: Px, y: Px) {
        (**self).smooth_scroll_to(x, y)
    }

    fn request_frame(&mut self) {
        (**self).request_frame()
    }
}

impl<S: ScrollableSurface + ?Sized> ScrollableSurface for Box<S> {
    fn scroll_offset(&self) -> PxPosition {
        (**self).scroll_offset()
    }

    fn viewport_height(&self) -> Px {
        (**self).viewport_height()
    }

    fn scroll_to(&mut self, x: Px, y: Px) {
        (**self).scroll_to(x, y)
    }

    fn smooth_scroll_to(&mut self, x: Px, y: Px) {
        (**self).smooth_scroll_to(x, y)
    }

    fn request_frame(&mut self) {
        (**self).request_frame()
    }
}
