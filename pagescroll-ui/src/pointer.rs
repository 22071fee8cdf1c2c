//! Pointer events delivered by the host's touch dispatch.
//!
//! The host translates its native touch stream into [`PointerEvent`]s and
//! forwards them to the paging engine. A single interaction is always
//! `Down`, zero or more `Move`s, then `Up` (or `Cancel`).
//!
//! ```
//! use std::time::Instant;
//! use pagescroll_ui::pointer::{PointerAction, PointerEvent};
//!
//! let now = Instant::now();
//! let down = PointerEvent::new(now, PointerAction::Down, 120.0, 400.0);
//! assert!(down.is_down());
//! ```

use std::time::Instant;

/// Identifies a view in the host's view tree.
///
/// Used to tell which view a touch callback was dispatched for, and which
/// child of the container holds the page list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u64);

impl ViewId {
    /// Creates a view id from a raw host handle.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// The phase of a pointer within one touch interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    /// The pointer touched the surface, starting an interaction.
    Down,
    /// The pointer moved while in contact.
    Move,
    /// The pointer left the surface, ending the interaction.
    Up,
    /// The host aborted the interaction (for example a parent took over the
    /// gesture).
    Cancel,
}

/// A single pointer event with timing information.
///
/// Coordinates are in view-local pixels and stay in `f32`, since the host
/// reports sub-pixel positions.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    /// Timestamp indicating when this event occurred.
    pub timestamp: Instant,
    /// The phase of the interaction.
    pub action: PointerAction,
    /// Horizontal position of the pointer.
    pub x: f32,
    /// Vertical position of the pointer.
    pub y: f32,
}

impl PointerEvent {
    /// Creates a pointer event.
    pub fn new(timestamp: Instant, action: PointerAction, x: f32, y: f32) -> Self {
        Self {
            timestamp,
            action,
            x,
            y,
        }
    }

    /// Returns `true` for the event that starts an interaction.
    pub fn is_down(&self) -> bool {
        self.action == PointerAction::Down
    }

    /// Returns `true` for events that end an interaction.
    pub fn is_terminal(&self) -> bool {
        matches!(self.action, PointerAction::Up | PointerAction::Cancel)
    }
}
