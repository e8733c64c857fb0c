//! Shooting stars (stateful).

use glam::Vec2;
use rand::Rng;
use skyglow_core::{ColorStop, DrawCommand, DrawList, Hsla, Viewport, random::uniform};

/// Most meteors allowed on screen at once.
pub const MAX_ACTIVE_METEORS: usize = 2;

/// Minimum quiet time between spawns.
pub const SPAWN_MIN_DELAY_MS: f32 = 4000.0;

/// Random extra quiet time added on top of the minimum, drawn every frame.
pub const SPAWN_JITTER_MS: f32 = 4000.0;

/// Opacity lost per frame once a meteor starts fading.
pub const FADE_PER_FRAME: f32 = 0.02;

/// A transient shooting star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Meteor {
    /// Head position in pixels.
    pub x: f32,
    pub y: f32,
    /// Trail length in pixels.
    pub length: f32,
    /// Pixels travelled per frame.
    pub speed: f32,
    /// Travel direction in radians (downward-right).
    pub angle: f32,
    pub opacity: f32,
    /// Distance travelled so far.
    pub trail: f32,
    pub active: bool,
}

impl Meteor {
    /// Launch a meteor from the upper band of the viewport.
    pub fn launch<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Self {
        Meteor {
            x: uniform(rng, viewport.width * 0.1, viewport.width * 0.9),
            y: uniform(rng, 0.0, viewport.height * 0.3),
            length: uniform(rng, 60.0, 140.0),
            speed: uniform(rng, 6.0, 14.0),
            angle: uniform(rng, 0.5, 0.9),
            opacity: 1.0,
            trail: 0.0,
            active: true,
        }
    }

    /// Unit vector along the direction of travel.
    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.angle.cos(), self.angle.sin())
    }

    pub fn head(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// End of the visible trail, `length` pixels behind the head.
    pub fn tail(&self) -> Vec2 {
        self.head() - self.direction() * self.length
    }

    /// Whether the meteor has travelled far enough to start fading.
    pub fn is_fading(&self) -> bool {
        self.trail > self.length * 2.0
    }

    fn step(&mut self, viewport: Viewport) {
        if !self.active {
            return;
        }
        let dir = self.direction();
        self.x += dir.x * self.speed;
        self.y += dir.y * self.speed;
        self.trail += self.speed;

        if self.is_fading() {
            self.opacity = (self.opacity - FADE_PER_FRAME).max(0.0);
        }

        if self.opacity <= 0.0 || self.x > viewport.width || self.y > viewport.height {
            self.active = false;
        }
    }
}

/// Decides when a new meteor appears.
///
/// Before the first spawn there is no cooldown, so the first frame with room
/// launches a meteor.
#[derive(Debug, Clone, Default)]
pub struct ShootingStarSpawner {
    last_spawn_ms: Option<u64>,
}

impl ShootingStarSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_spawn_ms(&self) -> Option<u64> {
        self.last_spawn_ms
    }

    /// Spawn a meteor if the randomized cooldown has passed and there is room.
    ///
    /// The cooldown threshold is redrawn on every call, so the gap between
    /// meteors varies from spawn to spawn.
    pub fn maybe_spawn<R: Rng + ?Sized>(
        &mut self,
        now_ms: u64,
        active_count: usize,
        viewport: Viewport,
        rng: &mut R,
    ) -> Option<Meteor> {
        if active_count >= MAX_ACTIVE_METEORS {
            return None;
        }
        if let Some(last) = self.last_spawn_ms {
            let since = now_ms.saturating_sub(last) as f32;
            let threshold = SPAWN_MIN_DELAY_MS + uniform(rng, 0.0, SPAWN_JITTER_MS);
            if since <= threshold {
                return None;
            }
        }

        self.last_spawn_ms = Some(now_ms);
        Some(Meteor::launch(viewport, rng))
    }
}

/// Advance every meteor by one frame and drop the ones that retired.
pub fn advance(meteors: Vec<Meteor>, viewport: Viewport) -> Vec<Meteor> {
    meteors
        .into_iter()
        .map(|mut m| {
            m.step(viewport);
            m
        })
        .filter(|m| m.active)
        .collect()
}

/// Append meteor trails and heads.
pub fn draw(meteors: &[Meteor], list: &mut DrawList) {
    for meteor in meteors.iter().filter(|m| m.active) {
        let o = meteor.opacity;
        list.push(DrawCommand::GradientLine {
            from: meteor.head(),
            to: meteor.tail(),
            width: 2.0,
            stops: vec![
                ColorStop::new(0.0, Hsla::new(175.0, 0.8, 0.7, o * 0.9)),
                ColorStop::new(0.3, Hsla::new(200.0, 0.6, 0.8, o * 0.5)),
                ColorStop::new(1.0, Hsla::TRANSPARENT),
            ],
        });
        list.push(DrawCommand::Circle {
            center: meteor.head(),
            radius: 2.0,
            color: Hsla::new(180.0, 0.9, 0.95, o),
        });
    }
}
