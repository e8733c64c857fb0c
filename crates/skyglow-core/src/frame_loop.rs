//! Frame clock for the animation loop.

use std::time::{Duration, Instant};

/// Time information handed to every component for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTime {
    /// Scaled animation time since the loop started.
    pub elapsed: Duration,
    /// Zero-based frame counter.
    pub index: u64,
}

impl FrameTime {
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }

    pub fn seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}

/// Per-frame driver clock.
///
/// Turns wall-clock readings into monotonic, optionally time-scaled frame
/// times, decides how long to wait before the next frame, and stops for good
/// once cancelled.
#[derive(Debug)]
pub struct AnimationLoop {
    /// Target spacing between frames.
    interval: Duration,
    /// Wall-clock reading of the previous frame.
    last_tick: Option<Instant>,
    /// Scaled time accumulated so far.
    elapsed: Duration,
    /// Multiplier applied to wall-clock deltas.
    time_scale: f32,
    next_index: u64,
    cancelled: bool,
}

impl AnimationLoop {
    /// Create a loop targeting `fps` frames per second (minimum 1).
    pub fn new(fps: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / fps.max(1),
            last_tick: None,
            elapsed: Duration::ZERO,
            time_scale: 1.0,
            next_index: 0,
            cancelled: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change how fast animation time advances relative to the wall clock.
    /// Non-finite or negative scales are ignored.
    pub fn set_time_scale(&mut self, scale: f32) {
        if scale.is_finite() && scale >= 0.0 {
            self.time_scale = scale;
        }
    }

    /// Start a frame at wall-clock `now`.
    ///
    /// Returns `None` once the loop has been cancelled. A reading earlier than
    /// the previous one adds no time.
    pub fn tick(&mut self, now: Instant) -> Option<FrameTime> {
        if self.cancelled {
            return None;
        }
        if let Some(last) = self.last_tick {
            let delta = now.saturating_duration_since(last);
            self.elapsed += delta.mul_f32(self.time_scale);
        }
        if self.last_tick.is_none_or(|last| now > last) {
            self.last_tick = Some(now);
        }

        let frame = FrameTime {
            elapsed: self.elapsed,
            index: self.next_index,
        };
        self.next_index += 1;
        Some(frame)
    }

    /// How long to wait from `now` until the next frame is due.
    pub fn time_until_next(&self, now: Instant) -> Duration {
        match self.last_tick {
            Some(last) => (last + self.interval).saturating_duration_since(now),
            None => Duration::ZERO,
        }
    }

    /// Stop producing frames. Calling it again has no further effect.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}
