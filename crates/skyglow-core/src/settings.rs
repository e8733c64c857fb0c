//! User-selectable animation settings.

use serde::{Deserialize, Serialize};

/// Global playback speed for all animations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl AnimationSpeed {
    /// Factor applied to wall-clock time before it reaches the scenes.
    pub fn time_scale(self) -> f32 {
        match self {
            AnimationSpeed::Slow => 0.5,
            AnimationSpeed::Normal => 1.0,
            AnimationSpeed::Fast => 1.75,
        }
    }

    /// Cycle to the next speed.
    pub fn next(self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Normal,
            AnimationSpeed::Normal => AnimationSpeed::Fast,
            AnimationSpeed::Fast => AnimationSpeed::Slow,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Normal => "normal",
            AnimationSpeed::Fast => "fast",
        }
    }
}

/// Which decorative scenes are on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SceneKind {
    /// Star field and meteors only.
    #[default]
    NightSky,
    /// Orbiting modules and panels on a plain backdrop.
    Workspace,
    /// The workspace drawn over the night sky.
    Layered,
}

impl SceneKind {
    /// Cycle to the next scene.
    pub fn next(self) -> Self {
        match self {
            SceneKind::NightSky => SceneKind::Workspace,
            SceneKind::Workspace => SceneKind::Layered,
            SceneKind::Layered => SceneKind::NightSky,
        }
    }

    pub fn shows_sky(self) -> bool {
        matches!(self, SceneKind::NightSky | SceneKind::Layered)
    }

    pub fn shows_workspace(self) -> bool {
        matches!(self, SceneKind::Workspace | SceneKind::Layered)
    }

    pub fn label(self) -> &'static str {
        match self {
            SceneKind::NightSky => "night sky",
            SceneKind::Workspace => "workspace",
            SceneKind::Layered => "layered",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_cycle_returns_to_start() {
        let start = SceneKind::default();
        assert_eq!(start.next().next().next(), start);
    }

    #[test]
    fn test_scene_visibility() {
        assert!(SceneKind::NightSky.shows_sky());
        assert!(!SceneKind::NightSky.shows_workspace());
        assert!(!SceneKind::Workspace.shows_sky());
        assert!(SceneKind::Layered.shows_sky() && SceneKind::Layered.shows_workspace());
    }

    #[test]
    fn test_speed_cycle() {
        assert_eq!(AnimationSpeed::Normal.time_scale(), 1.0);
        assert_eq!(AnimationSpeed::Fast.next(), AnimationSpeed::Slow);
    }
}
