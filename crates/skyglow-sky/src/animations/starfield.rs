//! Twinkling star field (regenerated per viewport, stateless per frame).

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use skyglow_core::{
    ColorStop, DrawCommand, DrawList, Hsla, Viewport,
    random::{uniform, unit},
};

/// Square pixels of viewport per star.
pub const PIXELS_PER_STAR: f64 = 2000.0;

/// Depth layer a star is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarLayer {
    /// Small and dim (70%).
    Distant,
    /// Medium (22%).
    Mid,
    /// Large and bright (8%).
    Near,
}

impl StarLayer {
    /// Classify a uniform draw in `[0, 1)`.
    pub fn from_draw(p: f32) -> Self {
        if p < 0.70 {
            StarLayer::Distant
        } else if p < 0.92 {
            StarLayer::Mid
        } else {
            StarLayer::Near
        }
    }

    /// Radius range `[lo, hi)`.
    pub fn size_range(self) -> (f32, f32) {
        match self {
            StarLayer::Distant => (0.3, 1.1),
            StarLayer::Mid => (0.6, 1.8),
            StarLayer::Near => (1.0, 2.8),
        }
    }

    /// Base brightness range `[lo, hi)`.
    pub fn brightness_range(self) -> (f32, f32) {
        match self {
            StarLayer::Distant => (0.1, 0.5),
            StarLayer::Mid => (0.3, 0.8),
            StarLayer::Near => (0.6, 1.0),
        }
    }
}

/// A background star. Never mutated after generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    /// Radius in pixels.
    pub size: f32,
    /// Base brightness (0..1).
    pub brightness: f32,
    /// Twinkle angular speed in radians per millisecond.
    pub twinkle_speed: f32,
    /// Twinkle phase offset in radians.
    pub twinkle_phase: f32,
}

impl Star {
    fn random<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Self {
        let layer = StarLayer::from_draw(unit(rng));
        let (size_lo, size_hi) = layer.size_range();
        let (bright_lo, bright_hi) = layer.brightness_range();

        Star {
            x: uniform(rng, 0.0, viewport.width),
            y: uniform(rng, 0.0, viewport.height),
            size: uniform(rng, size_lo, size_hi),
            brightness: uniform(rng, bright_lo, bright_hi),
            twinkle_speed: uniform(rng, 0.005, 0.025),
            twinkle_phase: uniform(rng, 0.0, TAU),
        }
    }

    /// Brightness at `elapsed_ms`, between 40% and 100% of the base.
    pub fn brightness_at(&self, elapsed_ms: u64) -> f32 {
        let angle = elapsed_ms as f64 * self.twinkle_speed as f64 + self.twinkle_phase as f64;
        let twinkle = (angle.sin() as f32 * 0.3 + 0.7).clamp(0.4, 1.0);
        self.brightness * twinkle
    }
}

/// Number of stars for a viewport: one per [`PIXELS_PER_STAR`] square pixels.
pub fn star_count(viewport: Viewport) -> usize {
    if viewport.is_empty() {
        return 0;
    }
    (viewport.width as f64 * viewport.height as f64 / PIXELS_PER_STAR).floor() as usize
}

/// Generate a fresh star field covering the viewport.
pub fn generate<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Vec<Star> {
    (0..star_count(viewport))
        .map(|_| Star::random(viewport, rng))
        .collect()
}

/// Append the star field as it looks at `elapsed_ms`.
///
/// Stars larger than one pixel get a soft glow. The core hue is jittered
/// every frame for a faint colour shimmer.
pub fn draw<R: Rng + ?Sized>(stars: &[Star], elapsed_ms: u64, rng: &mut R, list: &mut DrawList) {
    for star in stars {
        let brightness = star.brightness_at(elapsed_ms);
        let center = Vec2::new(star.x, star.y);

        if star.size > 1.0 {
            list.push(DrawCommand::RadialGradient {
                center,
                radius: star.size * 3.0,
                stops: vec![
                    ColorStop::new(0.0, Hsla::new(200.0, 0.6, 0.9, brightness * 0.3)),
                    ColorStop::new(1.0, Hsla::TRANSPARENT),
                ],
            });
        }

        let hue = uniform(rng, 180.0, 220.0);
        list.push(DrawCommand::Circle {
            center,
            radius: star.size,
            color: Hsla::new(hue, 0.2, 0.95, brightness),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_star_count_full_hd() {
        assert_eq!(star_count(Viewport::new(1920.0, 1080.0)), 1036);
    }

    #[test]
    fn test_star_count_empty_viewport() {
        assert_eq!(star_count(Viewport::new(0.0, 1080.0)), 0);
        let mut rng = StdRng::seed_from_u64(3);
        assert!(generate(Viewport::default(), &mut rng).is_empty());
    }

    #[test]
    fn test_generate_twice_same_count() {
        let mut rng = StdRng::seed_from_u64(42);
        let vp = Viewport::new(800.0, 600.0);
        let a = generate(vp, &mut rng);
        let b = generate(vp, &mut rng);
        assert_eq!(a.len(), 240);
        assert_eq!(a.len(), b.len());
        assert_ne!(a, b);
    }

    #[test]
    fn test_layer_thresholds() {
        assert_eq!(StarLayer::from_draw(0.0), StarLayer::Distant);
        assert_eq!(StarLayer::from_draw(0.699), StarLayer::Distant);
        assert_eq!(StarLayer::from_draw(0.70), StarLayer::Mid);
        assert_eq!(StarLayer::from_draw(0.919), StarLayer::Mid);
        assert_eq!(StarLayer::from_draw(0.92), StarLayer::Near);
        assert_eq!(StarLayer::from_draw(0.999), StarLayer::Near);
    }

    #[test]
    fn test_generated_attributes_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let vp = Viewport::new(1280.0, 720.0);
        for star in generate(vp, &mut rng) {
            assert!((0.0..vp.width).contains(&star.x));
            assert!((0.0..vp.height).contains(&star.y));
            assert!((0.3..2.8).contains(&star.size));
            assert!((0.1..1.0).contains(&star.brightness));
            assert!((0.005..0.025).contains(&star.twinkle_speed));
            assert!((0.0..TAU).contains(&star.twinkle_phase));
        }
    }

    #[test]
    fn test_brightness_bounded_by_base() {
        let mut rng = StdRng::seed_from_u64(5);
        let stars = generate(Viewport::new(400.0, 300.0), &mut rng);
        for star in &stars {
            for t in (0..200_000u64).step_by(37) {
                let b = star.brightness_at(t);
                assert!(b >= 0.0);
                assert!(b <= star.brightness);
                assert!(b >= star.brightness * 0.4 - 1e-6);
            }
        }
    }

    #[test]
    fn test_brightness_is_pure() {
        let star = Star {
            x: 1.0,
            y: 1.0,
            size: 1.0,
            brightness: 0.5,
            twinkle_speed: 0.01,
            twinkle_phase: 0.0,
        };
        assert_eq!(star.brightness_at(1234), star.brightness_at(1234));
        // sin(0) = 0 → 70% of base
        assert!((star.brightness_at(0) - 0.35).abs() < 1e-6);
    }

    #[test]
    fn test_draw_adds_glow_for_large_stars() {
        let mut rng = StdRng::seed_from_u64(8);
        let small = Star {
            x: 10.0,
            y: 10.0,
            size: 0.5,
            brightness: 0.3,
            twinkle_speed: 0.01,
            twinkle_phase: 0.0,
        };
        let large = Star { size: 2.0, ..small };

        let mut list = DrawList::new();
        draw(&[small], 0, &mut rng, &mut list);
        assert_eq!(list.len(), 1);

        let mut list = DrawList::new();
        draw(&[large], 0, &mut rng, &mut list);
        assert_eq!(list.len(), 2);
        assert!(matches!(
            list.iter().next(),
            Some(DrawCommand::RadialGradient { .. })
        ));
    }
}
