//! Physics-based fling simulation.
//!
//! The paging engine does not move content itself during a free fling. It
//! starts a simulation on a [`FlingScroller`], polls it once per frame and
//! copies the simulated position onto the host surface, clamping it to the
//! current page. [`DecelerateScroller`] is the default simulator: a constant
//! deceleration profile derived from a friction coefficient and the screen
//! density.

use std::time::{Duration, Instant};

use crate::px::{Px, PxPosition};

/// Standard gravity, used to turn a friction coefficient into a deceleration.
const GRAVITY_EARTH: f32 = 9.80665;

const INCHES_PER_METER: f32 = 39.37;

/// Baseline density (pixels per inch) the defaults are tuned for.
const DEFAULT_PPI: f32 = 160.0;

const DEFAULT_SCROLL_FRICTION: f32 = 0.015;

/// A fling simulator the engine can start, poll and abort.
///
/// Implementations are driven from the UI thread; `now` is the frame time the
/// host is rendering.
pub trait FlingScroller {
    /// Starts a fling from `start` with the given velocity (pixels per second).
    ///
    /// The simulated position never leaves `[min, max]` on either axis.
    fn fling(
        &mut self,
        start: PxPosition,
        velocity_x: f32,
        velocity_y: f32,
        min: PxPosition,
        max: PxPosition,
        now: Instant,
    );

    /// Advances the simulation to `now`.
    ///
    /// Returns `false` once the simulation is finished. The call that reaches
    /// the end of the simulation still returns `true` so the final position
    /// gets applied.
    fn compute_scroll_offset(&mut self, now: Instant) -> bool;

    /// The last computed position.
    fn current(&self) -> PxPosition;

    /// Stops the simulation where it is. [`current`](Self::current) keeps the
    /// last computed position.
    fn force_finished(&mut self);

    /// Returns `true` when no simulation is running.
    fn is_finished(&self) -> bool;
}

/// Constant-deceleration fling simulator.
#[derive(Debug, Clone)]
pub struct DecelerateScroller {
    deceleration: f32,
    start: PxPosition,
    current: PxPosition,
    final_position: PxPosition,
    min: PxPosition,
    max: PxPosition,
    velocity: f32,
    coeff_x: f32,
    coeff_y: f32,
    duration: Duration,
    start_time: Option<Instant>,
    finished: bool,
}

impl DecelerateScroller {
    /// Creates a simulator tuned for the baseline density.
    pub fn new() -> Self {
        Self::with_density(DEFAULT_PPI)
    }

    /// Creates a simulator for a screen with `ppi` pixels per inch.
    pub fn with_density(ppi: f32) -> Self {
        Self::with_friction(ppi, DEFAULT_SCROLL_FRICTION)
    }

    /// Creates a simulator with an explicit friction coefficient.
    pub fn with_friction(ppi: f32, friction: f32) -> Self {
        Self {
            deceleration: GRAVITY_EARTH * INCHES_PER_METER * ppi * friction,
            start: PxPosition::ZERO,
            current: PxPosition::ZERO,
            final_position: PxPosition::ZERO,
            min: PxPosition::ZERO,
            max: PxPosition::ZERO,
            velocity: 0.0,
            coeff_x: 0.0,
            coeff_y: 0.0,
            duration: Duration::ZERO,
            start_time: None,
            finished: true,
        }
    }

    /// Deceleration in pixels per second squared.
    pub fn deceleration(&self) -> f32 {
        self.deceleration
    }

    /// Total length of the running (or last) simulation.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Where the running (or last) simulation comes to rest.
    pub fn final_position(&self) -> PxPosition {
        self.final_position
    }

    fn clamp(&self, position: PxPosition) -> PxPosition {
        PxPosition::new(
            position.x.clamp(self.min.x, self.max.x),
            position.y.clamp(self.min.y, self.max.y),
        )
    }

    fn position_after(&self, distance: f32) -> PxPosition {
        let dx = Px::saturating_from_f32((distance * self.coeff_x).round());
        let dy = Px::saturating_from_f32((distance * self.coeff_y).round());
        self.clamp(self.start.saturating_offset(dx, dy))
    }
}

impl Default for DecelerateScroller {
    fn default() -> Self {
        Self::new()
    }
}

impl FlingScroller for DecelerateScroller {
    fn fling(
        &mut self,
        start: PxPosition,
        velocity_x: f32,
        velocity_y: f32,
        min: PxPosition,
        max: PxPosition,
        now: Instant,
    ) {
        self.start = start;
        self.current = start;
        self.min = min;
        // An inverted range collapses onto its lower bound.
        self.max = PxPosition::new(max.x.max(min.x), max.y.max(min.y));

        let velocity = (velocity_x * velocity_x + velocity_y * velocity_y).sqrt();
        let runnable = velocity.is_finite()
            && velocity > 0.0
            && self.deceleration.is_finite()
            && self.deceleration > 0.0;
        let duration = if runnable {
            Duration::try_from_secs_f32(velocity / self.deceleration).ok()
        } else {
            None
        };
        let Some(duration) = duration else {
            self.velocity = 0.0;
            self.duration = Duration::ZERO;
            self.final_position = start;
            self.start_time = None;
            self.finished = true;
            return;
        };

        self.velocity = velocity;
        self.coeff_x = velocity_x / velocity;
        self.coeff_y = velocity_y / velocity;
        self.duration = duration;
        let total_distance = velocity * velocity / (2.0 * self.deceleration);
        self.final_position = self.position_after(total_distance);
        self.start_time = Some(now);
        self.finished = false;
    }

    fn compute_scroll_offset(&mut self, now: Instant) -> bool {
        if self.finished {
            return false;
        }
        let Some(start_time) = self.start_time else {
            self.finished = true;
            return false;
        };

        let elapsed = now.saturating_duration_since(start_time);
        if elapsed < self.duration {
            let t = elapsed.as_secs_f32();
            let distance = self.velocity * t - self.deceleration * t * t / 2.0;
            self.current = self.position_after(distance);
            if self.current == self.final_position {
                self.finished = true;
            }
        } else {
            self.current = self.final_position;
            self.finished = true;
        }
        true
    }

    fn current(&self) -> PxPosition {
        self.current
    }

    fn force_finished(&mut self) {
        self.finished = true;
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
