//! Circular orbits, hover easing and per-module spin.

use std::f32::consts::PI;

use glam::Vec3;

/// Orbital speed factor while a focus burst is running.
pub const FOCUS_SPEED_MULTIPLIER: f32 = 1.5;

/// Amplitude of the vertical bob at twice the orbital frequency.
pub const BOB_AMPLITUDE: f32 = 0.1;

/// Scale a hovered module grows to.
pub const HOVER_SCALE: f32 = 1.3;

/// Fraction of the remaining scale gap closed each frame.
pub const HOVER_EASE: f32 = 0.1;

/// Speed multiplier shared by every module for this frame.
pub fn speed_multiplier(focus_burst: bool) -> f32 {
    if focus_burst { FOCUS_SPEED_MULTIPLIER } else { 1.0 }
}

/// Static description of one circular orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitConfig {
    pub radius: f32,
    /// Angular speed in radians per second.
    pub speed: f32,
    /// Phase offset in radians.
    pub offset: f32,
    /// Height of the orbit plane.
    pub y_offset: f32,
}

impl OrbitConfig {
    pub const fn new(radius: f32, speed: f32, offset: f32, y_offset: f32) -> Self {
        Self {
            radius,
            speed,
            offset,
            y_offset,
        }
    }
}

/// Position on the orbit at `t` seconds.
pub fn position_at(t: f32, config: &OrbitConfig, speed_multiplier: f32) -> Vec3 {
    let angle = t * config.speed * speed_multiplier + config.offset;
    Vec3::new(
        angle.cos() * config.radius,
        config.y_offset + (angle * 2.0).sin() * BOB_AMPLITUDE,
        angle.sin() * config.radius,
    )
}

/// Eased scale that grows while hovered and settles back when released.
///
/// Approaches its target monotonically; it never overshoots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverScale {
    current: f32,
    hovered: bool,
}

impl Default for HoverScale {
    fn default() -> Self {
        Self {
            current: 1.0,
            hovered: false,
        }
    }
}

impl HoverScale {
    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn target(&self) -> f32 {
        if self.hovered { HOVER_SCALE } else { 1.0 }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    /// Advance one frame and return the new scale.
    pub fn step(&mut self) -> f32 {
        self.current += (self.target() - self.current) * HOVER_EASE;
        self.current
    }
}

/// The decorative modules of the thought engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    Frontend,
    Backend,
    Database,
    AuthSecurity,
    CloudStorage,
    DataRecovery,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 6] = [
        ModuleKind::Frontend,
        ModuleKind::Backend,
        ModuleKind::Database,
        ModuleKind::AuthSecurity,
        ModuleKind::CloudStorage,
        ModuleKind::DataRecovery,
    ];

    /// Scene node name.
    pub fn name(self) -> &'static str {
        match self {
            ModuleKind::Frontend => "frontend",
            ModuleKind::Backend => "backend",
            ModuleKind::Database => "database",
            ModuleKind::AuthSecurity => "auth-security",
            ModuleKind::CloudStorage => "cloud-storage",
            ModuleKind::DataRecovery => "data-recovery",
        }
    }

    /// Name of the point light a hovered module emits.
    pub fn glow_name(self) -> &'static str {
        match self {
            ModuleKind::Frontend => "frontend/glow",
            ModuleKind::Backend => "backend/glow",
            ModuleKind::Database => "database/glow",
            ModuleKind::AuthSecurity => "auth-security/glow",
            ModuleKind::CloudStorage => "cloud-storage/glow",
            ModuleKind::DataRecovery => "data-recovery/glow",
        }
    }

    /// Local spin of the module's own geometry at `t` seconds.
    pub fn spin(self, t: f32) -> Vec3 {
        match self {
            ModuleKind::Frontend => Vec3::new(0.0, t * 0.3, 0.0),
            ModuleKind::Backend => Vec3::new(0.0, 0.0, t * 0.2),
            ModuleKind::Database => Vec3::new(0.0, t * 0.15, 0.0),
            // Outer token ring
            ModuleKind::AuthSecurity => Vec3::new(t * 0.5, 0.0, t * 0.3),
            ModuleKind::CloudStorage => Vec3::new(0.0, t * 0.2, 0.0),
            ModuleKind::DataRecovery => Vec3::new(0.0, t * 0.3, 0.0),
        }
    }

    /// Secondary animation amount at `t` seconds.
    ///
    /// Backend: pulse indicator scale. Database: read head offset. Cloud
    /// storage: upload arrow height. Data recovery: fragment spread during
    /// the self-heal window. Others: constant.
    pub fn accent(self, t: f32) -> f32 {
        match self {
            ModuleKind::Backend => 0.5 + (t * 3.0).sin() * 0.2,
            ModuleKind::Database => (t * 2.0).sin() * 0.05,
            ModuleKind::CloudStorage => 0.1 + (t * 2.0).sin() * 0.08,
            ModuleKind::DataRecovery => heal_spread(t),
            ModuleKind::Frontend | ModuleKind::AuthSecurity => 0.0,
        }
    }
}

/// Fragment spread of the self-healing disk: fragments drift apart during
/// the first 30% of every 8-second cycle and sit flush the rest of the time.
pub fn heal_spread(t: f32) -> f32 {
    let cycle = t.rem_euclid(8.0) / 8.0;
    if cycle < 0.3 {
        (cycle * PI / 0.3).sin() * 0.03
    } else {
        0.0
    }
}

/// A module riding its orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitModule {
    pub kind: ModuleKind,
    pub orbit: OrbitConfig,
    pub hover: HoverScale,
}

impl OrbitModule {
    pub fn new(kind: ModuleKind, orbit: OrbitConfig) -> Self {
        Self {
            kind,
            orbit,
            hover: HoverScale::default(),
        }
    }
}

/// The default engine: three modules on a slow outer orbit and three on a
/// faster inner one, spaced a third of a turn apart.
pub fn default_engine() -> Vec<OrbitModule> {
    let third = PI * 0.67;
    let two_thirds = PI * 1.33;
    vec![
        OrbitModule::new(ModuleKind::Frontend, OrbitConfig::new(2.5, 0.15, 0.0, 0.5)),
        OrbitModule::new(ModuleKind::Backend, OrbitConfig::new(2.5, 0.15, third, 0.3)),
        OrbitModule::new(
            ModuleKind::Database,
            OrbitConfig::new(2.5, 0.15, two_thirds, 0.7),
        ),
        OrbitModule::new(
            ModuleKind::AuthSecurity,
            OrbitConfig::new(1.8, 0.25, 0.0, 1.2),
        ),
        OrbitModule::new(
            ModuleKind::CloudStorage,
            OrbitConfig::new(1.8, 0.25, third, 0.9),
        ),
        OrbitModule::new(
            ModuleKind::DataRecovery,
            OrbitConfig::new(1.8, 0.25, two_thirds, 1.4),
        ),
    ]
}
