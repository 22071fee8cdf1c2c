//! A scroll container without a screen.

use pagescroll_ui::{Px, PxPosition, ScrollableSurface};
use tracing::info;

/// Host surface that settles smooth scrolls at once and logs every move.
#[derive(Debug)]
pub struct ConsoleSurface {
    offset: PxPosition,
    viewport: Px,
    frame_requested: bool,
}

impl ConsoleSurface {
    pub fn new(viewport: Px) -> Self {
        Self {
            offset: PxPosition::ZERO,
            viewport,
            frame_requested: false,
        }
    }

    /// What the host's own drag handling would do while the finger moves.
    pub fn drag_content(&mut self, y: Px) {
        self.offset.y = y;
    }

    /// Consumes a pending frame request.
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }
}

impl ScrollableSurface for ConsoleSurface {
    fn scroll_offset(&self) -> PxPosition {
        self.offset
    }

    fn viewport_height(&self) -> Px {
        self.viewport
    }

    fn scroll_to(&mut self, x: Px, y: Px) {
        self.offset = PxPosition::new(x, y);
    }

    fn smooth_scroll_to(&mut self, x: Px, y: Px) {
        info!(from = self.offset.y.raw(), to = y.raw(), "smooth scroll");
        self.offset = PxPosition::new(x, y);
    }

    fn request_frame(&mut self) {
        self.frame_requested = true;
    }
}
