//! Periodic bursts, pulsing lights and the developer's idle motion.

use glam::Vec3;

/// Seconds between automatic focus bursts.
pub const FOCUS_BURST_PERIOD: f32 = 14.0;

/// How long a focus burst lasts.
pub const FOCUS_BURST_DURATION: f32 = 2.5;

/// Seconds between data pulses from the laptop.
pub const DATA_PULSE_PERIOD: f32 = 10.0;

/// How long the data-pulse beam stays visible.
pub const DATA_PULSE_DURATION: f32 = 0.8;

/// A window that opens every `period` seconds and stays open for `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodicWindow {
    period: f32,
    duration: f32,
    last_fire: f32,
    opened_at: Option<f32>,
}

impl PeriodicWindow {
    pub fn new(period: f32, duration: f32) -> Self {
        Self {
            period,
            duration,
            last_fire: 0.0,
            opened_at: None,
        }
    }

    /// The focus burst cycle: 2.5 seconds of speed every 14 seconds.
    pub fn focus_burst() -> Self {
        Self::new(FOCUS_BURST_PERIOD, FOCUS_BURST_DURATION)
    }

    /// The laptop's data pulse: a 0.8-second beam every 10 seconds.
    pub fn data_pulse() -> Self {
        Self::new(DATA_PULSE_PERIOD, DATA_PULSE_DURATION)
    }

    /// Check the cadence at `t` seconds. Returns `true` if the window opened
    /// on this call.
    pub fn update(&mut self, t: f32) -> bool {
        if t - self.last_fire > self.period {
            self.open(t);
            return true;
        }
        false
    }

    /// Open the window now and restart the cadence from `t`.
    pub fn open(&mut self, t: f32) {
        self.last_fire = t;
        self.opened_at = Some(t);
    }

    /// Whether the window is open at `t`.
    pub fn is_active(&self, t: f32) -> bool {
        self.opened_at
            .is_some_and(|start| t >= start && t < start + self.duration)
    }
}

/// Intensity of the laptop's screen glow light.
pub fn laptop_glow(t: f32) -> f32 {
    0.8 + (t * 2.0).sin() * 0.2
}

/// Emissive strength of the laptop screen.
pub fn screen_emissive(t: f32) -> f32 {
    0.5 + (t * 2.0).sin() * 0.1
}

/// Length scale of the data-pulse beam while it is visible.
pub fn pulse_beam_scale(t: f32) -> f32 {
    (t * 10.0).sin() * 0.5 + 0.5
}

/// Breathing scale of the developer figure.
pub fn breathing(t: f32) -> f32 {
    1.0 + (t * 0.8).sin() * 0.02
}

/// Idle head tilt of the developer figure, as Euler angles.
pub fn head_tilt(t: f32) -> Vec3 {
    Vec3::new((t * 0.3).sin() * 0.03 - 0.1, (t * 0.2).sin() * 0.02, 0.0)
}
