//! Drag classification for one touch interaction.
//!
//! The classifier sees `Down`, `Move`s, then `Up`. The first `Move` anchors
//! the drag; on `Up` the vertical travel since the anchor decides the
//! [`Gesture`]. Flings are recognized separately by the fling detector and
//! turned into [`Gesture::Fling`] by the engine.

use pagescroll_ui::Fling;
use tracing::trace;

/// What a finished touch interaction asked for.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    /// The finger travelled down the screen by `dy` (> 0) pixels; the content
    /// moved down, towards the previous page.
    DragUp {
        /// Vertical travel since the anchor.
        dy: f32,
    },
    /// The finger travelled up the screen by `dy` (< 0) pixels; the content
    /// moved up, towards the next page.
    DragDown {
        /// Vertical travel since the anchor.
        dy: f32,
    },
    /// A fast release the engine handled.
    Fling {
        /// Release velocity in pixels per second, positive down the screen.
        velocity_y: f32,
    },
    /// Too short to act on.
    #[default]
    None,
}

impl From<Fling> for Gesture {
    fn from(fling: Fling) -> Self {
        Gesture::Fling {
            velocity_y: fling.velocity_y,
        }
    }
}

/// Tracks the drag anchor across one interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureClassifier {
    min_scroll_trigger: f32,
    anchor_y: Option<f32>,
}

impl GestureClassifier {
    /// Creates a classifier that ignores drags of `min_scroll_trigger` pixels
    /// or less.
    pub fn new(min_scroll_trigger: f32) -> Self {
        Self {
            min_scroll_trigger,
            anchor_y: None,
        }
    }

    /// Returns `true` between the first `Move` and the end of the interaction.
    pub fn is_dragging(&self) -> bool {
        self.anchor_y.is_some()
    }

    /// Where the current drag started, if one is in progress.
    pub fn anchor_y(&self) -> Option<f32> {
        self.anchor_y
    }

    /// A new interaction begins.
    pub fn on_down(&mut self) {
        self.anchor_y = None;
    }

    /// Returns `true` if this move started the drag.
    pub fn on_move(&mut self, y: f32) -> bool {
        if self.anchor_y.is_some() {
            return false;
        }
        trace!(y, "drag anchored");
        self.anchor_y = Some(y);
        true
    }

    /// Ends the interaction and classifies it.
    pub fn on_up(&mut self, y: f32) -> Gesture {
        let Some(anchor) = self.anchor_y.take() else {
            return Gesture::None;
        };
        let dy = y - anchor;
        if dy > self.min_scroll_trigger {
            Gesture::DragUp { dy }
        } else if dy < -self.min_scroll_trigger {
            Gesture::DragDown { dy }
        } else {
            Gesture::None
        }
    }

    /// The host aborted the interaction.
    pub fn on_cancel(&mut self) {
        self.anchor_y = None;
    }
}
