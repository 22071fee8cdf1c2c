//! Velocity-based fling recognition.
//!
//! [`FlingDetector`] watches one touch interaction at a time. It records a
//! rolling window of velocity samples while the pointer moves and, when the
//! pointer is released fast enough, reports a single [`Fling`] carrying the
//! release velocity. Velocities are in pixels per second; a positive
//! `velocity_y` means the finger was travelling down the screen.
//!
//! ```
//! use std::time::{Duration, Instant};
//! use pagescroll_ui::{
//!     fling_detector::FlingDetector,
//!     pointer::{PointerAction, PointerEvent},
//! };
//!
//! let mut detector = FlingDetector::default();
//! let t0 = Instant::now();
//! let ms = Duration::from_millis;
//!
//! detector.on_pointer_event(&PointerEvent::new(t0, PointerAction::Down, 0.0, 500.0));
//! detector.on_pointer_event(&PointerEvent::new(t0 + ms(10), PointerAction::Move, 0.0, 480.0));
//! detector.on_pointer_event(&PointerEvent::new(t0 + ms(20), PointerAction::Move, 0.0, 460.0));
//! let fling = detector
//!     .on_pointer_event(&PointerEvent::new(t0 + ms(25), PointerAction::Up, 0.0, 455.0))
//!     .expect("fast upward swipe");
//! assert!(fling.velocity_y < 0.0);
//! ```

use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use derive_setters::Setters;
use tracing::trace;

use crate::pointer::{PointerAction, PointerEvent};

/// Minimum release velocity that counts as a fling (pixels per second).
const DEFAULT_MIN_FLING_VELOCITY: f32 = 50.0;

/// Release velocities are clamped to this magnitude (pixels per second).
const DEFAULT_MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Samples older than this, measured from the release, are ignored.
const DEFAULT_SAMPLE_WINDOW: Duration = Duration::from_millis(100);

/// Tuning for [`FlingDetector`].
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct FlingDetectorConfig {
    /// Minimum release velocity, on either axis, that counts as a fling.
    pub min_fling_velocity: f32,
    /// Each velocity component is clamped to `±max_fling_velocity`.
    pub max_fling_velocity: f32,
    /// Width of the rolling window of velocity samples.
    pub sample_window: Duration,
}

impl Default for FlingDetectorConfig {
    fn default() -> Self {
        Self {
            min_fling_velocity: DEFAULT_MIN_FLING_VELOCITY,
            max_fling_velocity: DEFAULT_MAX_FLING_VELOCITY,
            sample_window: DEFAULT_SAMPLE_WINDOW,
        }
    }
}

/// A recognized fling gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fling {
    /// Horizontal release velocity in pixels per second.
    pub velocity_x: f32,
    /// Vertical release velocity in pixels per second.
    pub velocity_y: f32,
}

#[derive(Debug, Clone)]
struct PointerTrack {
    last_x: f32,
    last_y: f32,
    last_update_time: Instant,
    /// (timestamp, velocity_x, velocity_y) samples inside the window.
    velocity_history: VecDeque<(Instant, f32, f32)>,
}

/// Recognizes flings from a stream of pointer events.
///
/// Not thread-safe; feed it from the thread that owns the touch dispatch.
#[derive(Debug, Clone, Default)]
pub struct FlingDetector {
    config: FlingDetectorConfig,
    track: Option<PointerTrack>,
}

impl FlingDetector {
    /// Creates a detector with the given tuning.
    pub fn new(config: FlingDetectorConfig) -> Self {
        Self {
            config,
            track: None,
        }
    }

    /// Returns the detector's tuning.
    pub fn config(&self) -> &FlingDetectorConfig {
        &self.config
    }

    /// Returns `true` while an interaction is being tracked.
    pub fn is_tracking(&self) -> bool {
        self.track.is_some()
    }

    /// Feeds one pointer event.
    ///
    /// Returns a [`Fling`] only for the `Up` event that ends a fast enough
    /// interaction. Moves without a preceding `Down` are ignored.
    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> Option<Fling> {
        match event.action {
            PointerAction::Down => {
                self.track = Some(PointerTrack {
                    last_x: event.x,
                    last_y: event.y,
                    last_update_time: event.timestamp,
                    velocity_history: VecDeque::new(),
                });
                None
            }
            PointerAction::Move => {
                let window = self.config.sample_window;
                if let Some(track) = self.track.as_mut() {
                    let time_delta = event
                        .timestamp
                        .saturating_duration_since(track.last_update_time)
                        .as_secs_f32();
                    if time_delta > 0.0 {
                        let velocity_x = (event.x - track.last_x) / time_delta;
                        let velocity_y = (event.y - track.last_y) / time_delta;
                        Self::record_velocity_sample(
                            track,
                            event.timestamp,
                            velocity_x,
                            velocity_y,
                            window,
                        );
                    }
                    track.last_x = event.x;
                    track.last_y = event.y;
                    track.last_update_time = event.timestamp;
                }
                None
            }
            PointerAction::Up => {
                let track = self.track.take()?;
                let (vx, vy) = self.release_velocity(&track, event.timestamp)?;
                if vx.abs() < self.config.min_fling_velocity
                    && vy.abs() < self.config.min_fling_velocity
                {
                    trace!(vx, vy, "release below fling velocity");
                    return None;
                }
                let max = self.config.max_fling_velocity;
                Some(Fling {
                    velocity_x: vx.clamp(-max, max),
                    velocity_y: vy.clamp(-max, max),
                })
            }
            PointerAction::Cancel => {
                self.track = None;
                None
            }
        }
    }

    // Helper: record a velocity sample and prune samples outside the window.
    fn record_velocity_sample(
        track: &mut PointerTrack,
        now: Instant,
        vx: f32,
        vy: f32,
        window: Duration,
    ) {
        track.velocity_history.push_back((now, vx, vy));
        while let Some(&(sample_time, _, _)) = track.velocity_history.front() {
            if now.saturating_duration_since(sample_time) > window {
                track.velocity_history.pop_front();
            } else {
                break;
            }
        }
    }

    // Helper: average the samples that are still inside the window at release.
    fn release_velocity(&self, track: &PointerTrack, released_at: Instant) -> Option<(f32, f32)> {
        let window = self.config.sample_window;
        let mut sum_x = 0.0f32;
        let mut sum_y = 0.0f32;
        let mut count = 0usize;
        for &(sample_time, vx, vy) in &track.velocity_history {
            if released_at.saturating_duration_since(sample_time) <= window {
                sum_x += vx;
                sum_y += vy;
                count += 1;
            }
        }
        if count == 0 {
            return None;
        }
        let (vx, vy) = (sum_x / count as f32, sum_y / count as f32);
        if !vx.is_finite() || !vy.is_finite() {
            return None;
        }
        Some((vx, vy))
    }
}
