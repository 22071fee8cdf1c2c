//! Test doubles for the host capabilities.
//!
//! Enabled with the `testing` feature. [`RecordingSurface`] stands in for the
//! host scroll container and records every command the engine issues;
//! [`ManualScroller`] is a fling simulator whose frames are scripted by the
//! test.

use std::{collections::VecDeque, time::Instant};

use crate::{
    px::{Px, PxPosition},
    scroller::FlingScroller,
    surface::ScrollableSurface,
};

/// A command the engine issued to the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceCommand {
    /// An immediate jump.
    ScrollTo(PxPosition),
    /// An animated scroll.
    SmoothScrollTo(PxPosition),
    /// A request for another frame.
    RequestFrame,
}

/// Host surface that records commands.
///
/// By default a smooth scroll lands on its target immediately, as if the host
/// animation had already played out; see [`RecordingSurface::settle_smooth_scrolls`].
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    offset: PxPosition,
    viewport_height: Px,
    settle_smooth_scrolls: bool,
    commands: Vec<SurfaceCommand>,
}

impl RecordingSurface {
    /// Creates a surface scrolled to the top.
    pub fn new(viewport_height: Px) -> Self {
        Self {
            offset: PxPosition::ZERO,
            viewport_height,
            settle_smooth_scrolls: true,
            commands: Vec::new(),
        }
    }

    /// Whether smooth scrolls move the offset to their target right away.
    pub fn settle_smooth_scrolls(mut self, settle: bool) -> Self {
        self.settle_smooth_scrolls = settle;
        self
    }

    /// Moves the content without recording a command, the way the host's own
    /// drag handling would.
    pub fn set_scroll_y(&mut self, y: Px) {
        self.offset.y = y;
    }

    /// Changes the viewport height, as after a host relayout.
    pub fn set_viewport_height(&mut self, height: Px) {
        self.viewport_height = height;
    }

    /// Every command issued so far, oldest first.
    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    /// Drains the recorded commands.
    pub fn take_commands(&mut self) -> Vec<SurfaceCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Targets of every smooth scroll issued so far.
    pub fn smooth_targets(&self) -> Vec<Px> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                SurfaceCommand::SmoothScrollTo(position) => Some(position.y),
                _ => None,
            })
            .collect()
    }

    /// Target of the most recent smooth scroll.
    pub fn last_smooth_target(&self) -> Option<Px> {
        self.smooth_targets().last().copied()
    }

    /// Number of frame requests issued so far.
    pub fn frame_requests(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, SurfaceCommand::RequestFrame))
            .count()
    }
}

impl ScrollableSurface for RecordingSurface {
    fn scroll_offset(&self) -> PxPosition {
        self.offset
    }

    fn viewport_height(&self) -> Px {
        self.viewport_height
    }

    fn scroll_to(&mut self, x: Px, y: Px) {
        self.offset = PxPosition::new(x, y);
        self.commands
            .push(SurfaceCommand::ScrollTo(PxPosition::new(x, y)));
    }

    fn smooth_scroll_to(&mut self, x: Px, y: Px) {
        if self.settle_smooth_scrolls {
            self.offset = PxPosition::new(x, y);
        }
        self.commands
            .push(SurfaceCommand::SmoothScrollTo(PxPosition::new(x, y)));
    }

    fn request_frame(&mut self) {
        self.commands.push(SurfaceCommand::RequestFrame);
    }
}

/// Arguments of one [`FlingScroller::fling`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingCall {
    /// Where the fling started.
    pub start: PxPosition,
    /// Horizontal velocity passed to the simulator.
    pub velocity_x: f32,
    /// Vertical velocity passed to the simulator.
    pub velocity_y: f32,
    /// Lower bound of the simulation.
    pub min: PxPosition,
    /// Upper bound of the simulation.
    pub max: PxPosition,
}

/// Fling simulator driven by a script of positions.
///
/// Each [`compute_scroll_offset`](FlingScroller::compute_scroll_offset) call
/// consumes one queued position; the simulation finishes when the queue runs
/// dry.
#[derive(Debug, Clone)]
pub struct ManualScroller {
    frames: VecDeque<PxPosition>,
    current: PxPosition,
    finished: bool,
    flings: Vec<FlingCall>,
    forced: usize,
}

impl ManualScroller {
    /// Creates an idle simulator.
    pub fn new() -> Self {
        Self {
            frames: VecDeque::new(),
            current: PxPosition::ZERO,
            finished: true,
            flings: Vec::new(),
            forced: 0,
        }
    }

    /// Queues the positions the next flings will produce, frame by frame.
    pub fn script(&mut self, ys: impl IntoIterator<Item = i32>) {
        self.frames
            .extend(ys.into_iter().map(|y| PxPosition::new(Px::ZERO, Px(y))));
    }

    /// Every fling started so far.
    pub fn flings(&self) -> &[FlingCall] {
        &self.flings
    }

    /// How many times the simulation was force-finished while running.
    pub fn forced_stops(&self) -> usize {
        self.forced
    }

    /// Remaining scripted frames.
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }
}

impl Default for ManualScroller {
    fn default() -> Self {
        Self::new()
    }
}

impl FlingScroller for ManualScroller {
    fn fling(
        &mut self,
        start: PxPosition,
        velocity_x: f32,
        velocity_y: f32,
        min: PxPosition,
        max: PxPosition,
        _now: Instant,
    ) {
        self.flings.push(FlingCall {
            start,
            velocity_x,
            velocity_y,
            min,
            max,
        });
        self.current = start;
        self.finished = false;
    }

    fn compute_scroll_offset(&mut self, _now: Instant) -> bool {
        if self.finished {
            return false;
        }
        match self.frames.pop_front() {
            Some(position) => {
                self.current = position;
                true
            }
            None => {
                self.finished = true;
                false
            }
        }
    }

    fn current(&self) -> PxPosition {
        self.current
    }

    fn force_finished(&mut self) {
        if !self.finished {
            self.forced += 1;
        }
        self.finished = true;
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
