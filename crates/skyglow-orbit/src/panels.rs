//! Floating workspace panels that periodically reshuffle.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use skyglow_core::random::uniform;

/// Seconds between reshuffles in normal operation.
pub const REORGANIZE_INTERVAL: f32 = 12.0;

/// Seconds between reshuffles during a focus burst.
pub const FOCUS_REORGANIZE_INTERVAL: f32 = 5.0;

/// Fraction of the remaining distance covered per frame.
pub const POSITION_BLEND: f32 = 0.008;

/// Position blend during a focus burst.
pub const FOCUS_POSITION_BLEND: f32 = 0.02;

/// Fraction of the remaining opacity gap closed per frame.
pub const OPACITY_BLEND: f32 = 0.01;

/// Decorative content shown on a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Analytics,
    CodeReview,
    Wireframe,
    Content,
    Design,
}

impl PanelKind {
    pub const ALL: [PanelKind; 5] = [
        PanelKind::Analytics,
        PanelKind::CodeReview,
        PanelKind::Wireframe,
        PanelKind::Content,
        PanelKind::Design,
    ];

    /// Scene node name.
    pub fn name(self) -> &'static str {
        match self {
            PanelKind::Analytics => "analytics",
            PanelKind::CodeReview => "code-review",
            PanelKind::Wireframe => "wireframe",
            PanelKind::Content => "content",
            PanelKind::Design => "design",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panel {
    pub kind: PanelKind,
    pub position: Vec3,
    pub target_position: Vec3,
    pub opacity: f32,
    pub target_opacity: f32,
}

impl Panel {
    /// Blend current state toward the targets by one frame.
    fn approach(&mut self, position_blend: f32) {
        self.position = self.position.lerp(self.target_position, position_blend);
        self.opacity += (self.target_opacity - self.opacity) * OPACITY_BLEND;
    }

    /// Small vertical float applied when rendering.
    pub fn float_offset(&self, t: f32) -> f32 {
        (t * 2.0 + self.position.x).sin() * 0.0005
    }
}

/// Panels evenly spread on a ring of radius 3.5, at rest on their targets.
pub fn initial_layout() -> Vec<Panel> {
    let n = PanelKind::ALL.len() as f32;
    PanelKind::ALL
        .iter()
        .enumerate()
        .map(|(i, &kind)| {
            let angle = i as f32 / n * TAU;
            let position = Vec3::new(
                angle.cos() * 3.5,
                1.0 + (i as f32).sin() * 0.5,
                angle.sin() * 3.5,
            );
            Panel {
                kind,
                position,
                target_position: position,
                opacity: 0.7,
                target_opacity: 0.7,
            }
        })
        .collect()
}

/// Assigns fresh targets on a cadence and eases panels toward them.
#[derive(Debug, Clone, Default)]
pub struct PanelReorganizer {
    last_reorganize: f32,
}

impl PanelReorganizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_reorganize(&self) -> f32 {
        self.last_reorganize
    }

    pub fn interval(focus_burst: bool) -> f32 {
        if focus_burst {
            FOCUS_REORGANIZE_INTERVAL
        } else {
            REORGANIZE_INTERVAL
        }
    }

    /// Run one frame at `t` seconds. Returns `true` when new targets were
    /// assigned.
    ///
    /// Each panel's new slot sits in its own angular sector of the ring so
    /// panels never pile onto each other.
    pub fn reorganize<R: Rng + ?Sized>(
        &mut self,
        panels: &mut [Panel],
        t: f32,
        focus_burst: bool,
        rng: &mut R,
    ) -> bool {
        let retarget = t - self.last_reorganize > Self::interval(focus_burst);
        if retarget {
            self.last_reorganize = t;
            let n = panels.len() as f32;
            for (i, panel) in panels.iter_mut().enumerate() {
                let angle = (i as f32 + uniform(rng, 0.0, 0.5)) / n * TAU;
                let radius = 3.2 + uniform(rng, 0.0, 0.6);
                panel.target_position = Vec3::new(
                    angle.cos() * radius,
                    0.8 + uniform(rng, 0.0, 1.2),
                    angle.sin() * radius,
                );
                panel.target_opacity = 0.5 + uniform(rng, 0.0, 0.4);
            }
        }

        let blend = if focus_burst {
            FOCUS_POSITION_BLEND
        } else {
            POSITION_BLEND
        };
        for panel in panels.iter_mut() {
            panel.approach(blend);
        }

        retarget
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    /// Run the given frames at 60 fps and count retargets.
    fn count_retargets(
        reorganizer: &mut PanelReorganizer,
        panels: &mut [Panel],
        frames: std::ops::RangeInclusive<u32>,
        focus: bool,
        rng: &mut StdRng,
    ) -> usize {
        frames
            .filter(|&i| reorganizer.reorganize(panels, i as f32 / 60.0, focus, rng))
            .count()
    }

    #[test]
    fn test_no_retarget_before_interval() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut panels = initial_layout();
        let mut reorganizer = PanelReorganizer::new();
        // up to 11.9s
        let n = count_retargets(&mut reorganizer, &mut panels, 0..=714, false, &mut rng);
        assert_eq!(n, 0);
    }

    #[test]
    fn test_exactly_one_retarget_in_twelve_seconds() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut panels = initial_layout();
        let mut reorganizer = PanelReorganizer::new();
        let n = count_retargets(&mut reorganizer, &mut panels, 0..=720, false, &mut rng);
        assert_eq!(n, 0);
        let n = count_retargets(&mut reorganizer, &mut panels, 721..=1440, false, &mut rng);
        assert_eq!(n, 1);
        assert!(reorganizer.last_reorganize() > 12.0);
    }

    #[test]
    fn test_focus_burst_shortens_interval() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut panels = initial_layout();
        let mut reorganizer = PanelReorganizer::new();
        let n = count_retargets(&mut reorganizer, &mut panels, 0..=1440, true, &mut rng);
        // Roughly every five seconds
        assert_eq!(n, 4);
    }

    #[test]
    fn test_targets_within_bands() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut panels = initial_layout();
        let mut reorganizer = PanelReorganizer::new();
        for round in 1..50 {
            assert!(reorganizer.reorganize(&mut panels, round as f32 * 13.0, false, &mut rng));
            let n = panels.len() as f32;
            for (i, p) in panels.iter().enumerate() {
                let target = p.target_position;
                let radius = (target.x * target.x + target.z * target.z).sqrt();
                assert!((3.2 - 1e-4..3.8 + 1e-4).contains(&radius));
                assert!((0.8..=2.0).contains(&target.y));
                assert!((0.5..=0.9).contains(&p.target_opacity));

                let angle = target.z.atan2(target.x).rem_euclid(TAU);
                let lo = i as f32 / n * TAU;
                let hi = (i as f32 + 0.5) / n * TAU;
                assert!(angle >= lo - 1e-3 && angle <= hi + 1e-3, "panel {i} at {angle}");
            }
        }
    }

    #[test]
    fn test_interpolation_never_jumps() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut panels = initial_layout();
        let mut reorganizer = PanelReorganizer::new();
        let before = panels.clone();
        assert!(reorganizer.reorganize(&mut panels, 12.5, false, &mut rng));

        for (old, new) in before.iter().zip(&panels) {
            let full = old.position.distance(new.target_position);
            let moved = old.position.distance(new.position);
            assert!((moved - full * POSITION_BLEND).abs() < 1e-4);
            let expected = 0.7 + (new.target_opacity - 0.7) * OPACITY_BLEND;
            assert!((new.opacity - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_initial_layout() {
        let panels = initial_layout();
        assert_eq!(panels.len(), 5);
        for p in &panels {
            assert_eq!(p.position, p.target_position);
            assert_eq!(p.opacity, 0.7);
        }
        assert!((panels[0].position - Vec3::new(3.5, 1.0, 0.0)).length() < 1e-5);
    }
}
