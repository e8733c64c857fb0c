//! Workspace scene state management.

use glam::Vec3;
use rand::{Rng, rngs::ThreadRng};
use skyglow_core::{LightUpdate, NodeRole, NodeUpdate, SceneFrame};
use tracing::debug;

use crate::{
    camera::camera_pose,
    orbit::{self, OrbitModule},
    panels::{self, Panel, PanelReorganizer},
    rhythm::{self, PeriodicWindow},
};

/// Name of the central anchor node.
pub const ANCHOR: &str = "developer";

/// Name of the data-pulse beam node.
pub const DATA_PULSE: &str = "data-pulse";

/// Name of the laptop's screen glow light.
pub const LAPTOP_GLOW: &str = "laptop-glow";

/// Name of the laptop screen's emissive light.
pub const SCREEN: &str = "screen";

/// Intensity of the light a hovered module emits.
pub const HOVER_GLOW_INTENSITY: f32 = 2.0;

const LAPTOP_POSITION: Vec3 = Vec3::new(0.0, 0.8, 0.3);

/// Workspace scene state.
#[derive(Debug)]
pub struct WorkspaceState<R = ThreadRng> {
    /// Orbiting modules with their hover easing.
    modules: Vec<OrbitModule>,
    /// Floating panels.
    panels: Vec<Panel>,
    /// Panel retarget cadence.
    reorganizer: PanelReorganizer,
    /// Focus burst cycle.
    burst: PeriodicWindow,
    /// Laptop data pulse cycle.
    pulse: PeriodicWindow,
    rng: R,
}

impl Default for WorkspaceState {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkspaceState {
    /// Create a workspace seeded from the thread-local generator.
    pub fn new() -> Self {
        Self::with_rng(rand::rng())
    }
}

impl<R: Rng> WorkspaceState<R> {
    /// Create a workspace drawing randomness from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self {
            modules: orbit::default_engine(),
            panels: panels::initial_layout(),
            reorganizer: PanelReorganizer::new(),
            burst: PeriodicWindow::focus_burst(),
            pulse: PeriodicWindow::data_pulse(),
            rng,
        }
    }

    pub fn modules(&self) -> &[OrbitModule] {
        &self.modules
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn is_focus_burst(&self, t: f32) -> bool {
        self.burst.is_active(t)
    }

    /// Start a focus burst at `t` regardless of the cadence.
    pub fn trigger_focus_burst(&mut self, t: f32) {
        debug!(t, "focus burst triggered manually");
        self.burst.open(t);
    }

    /// Mark the named module as hovered and every other module as not.
    /// `None` clears all hover state.
    pub fn hover(&mut self, name: Option<&str>) {
        for module in &mut self.modules {
            module.hover.set_hovered(Some(module.kind.name()) == name);
        }
    }

    /// Produce the scene frame at `t` seconds.
    pub fn frame(&mut self, t: f32) -> SceneFrame {
        if !t.is_finite() {
            return SceneFrame::new(camera_pose(0.0));
        }

        if self.burst.update(t) {
            debug!(t, "focus burst started");
        }
        if self.pulse.update(t) {
            debug!(t, "data pulse fired");
        }
        let focus = self.burst.is_active(t);

        let mut frame = SceneFrame::new(camera_pose(t));
        frame.nodes.push(
            NodeUpdate::new(ANCHOR, NodeRole::Anchor, Vec3::ZERO)
                .with_rotation(rhythm::head_tilt(t))
                .with_scale(rhythm::breathing(t)),
        );
        frame.lights.push(LightUpdate {
            name: LAPTOP_GLOW,
            position: LAPTOP_POSITION,
            intensity: rhythm::laptop_glow(t),
        });
        frame.lights.push(LightUpdate {
            name: SCREEN,
            position: LAPTOP_POSITION,
            intensity: rhythm::screen_emissive(t),
        });

        let multiplier = orbit::speed_multiplier(focus);
        for module in &mut self.modules {
            let position = orbit::position_at(t, &module.orbit, multiplier);
            let scale = module.hover.step();
            frame.nodes.push(
                NodeUpdate::new(module.kind.name(), NodeRole::Module, position)
                    .with_rotation(module.kind.spin(t))
                    .with_scale(scale),
            );
            if module.hover.is_hovered() {
                frame.lights.push(LightUpdate {
                    name: module.kind.glow_name(),
                    position,
                    intensity: HOVER_GLOW_INTENSITY,
                });
            }
        }

        if self
            .reorganizer
            .reorganize(&mut self.panels, t, focus, &mut self.rng)
        {
            debug!(t, focus, "panels retargeted");
        }
        for panel in &self.panels {
            let position = panel.position + Vec3::Y * panel.float_offset(t);
            frame.nodes.push(
                NodeUpdate::new(panel.kind.name(), NodeRole::Panel, position)
                    .with_opacity(panel.opacity),
            );
        }

        if self.pulse.is_active(t) {
            frame.nodes.push(
                NodeUpdate::new(DATA_PULSE, NodeRole::Pulse, Vec3::new(0.0, 0.5, 0.0))
                    .with_rotation(Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2))
                    .with_scale(rhythm::pulse_beam_scale(t))
                    .with_opacity(0.6),
            );
        }

        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn test_workspace() -> WorkspaceState<StdRng> {
        WorkspaceState::with_rng(StdRng::seed_from_u64(77))
    }

    #[test]
    fn test_frame_contains_all_nodes() {
        let mut ws = test_workspace();
        let frame = ws.frame(0.0);
        // anchor + 6 modules + 5 panels
        assert_eq!(frame.nodes.len(), 12);
        assert!(frame.node(ANCHOR).is_some());
        assert!(frame.node("frontend").is_some());
        assert!(frame.node("design").is_some());
        assert!(frame.node(DATA_PULSE).is_none());
        assert!(frame.light(LAPTOP_GLOW).is_some());
    }

    #[test]
    fn test_anchor_breathes_and_tilts() {
        let mut ws = test_workspace();
        let t = 2.0;
        let anchor = *ws.frame(t).node(ANCHOR).unwrap();
        assert_eq!(anchor.role, NodeRole::Anchor);
        assert_eq!(anchor.scale, rhythm::breathing(t));
        assert_eq!(anchor.rotation, rhythm::head_tilt(t));
        assert_ne!(anchor.scale, 1.0);
    }

    #[test]
    fn test_frontend_follows_orbit() {
        let mut ws = test_workspace();
        let node = *ws.frame(0.0).node("frontend").unwrap();
        assert!((node.position - Vec3::new(2.5, 0.5, 0.0)).length() < 1e-4);
        assert_eq!(node.role, NodeRole::Module);
    }

    #[test]
    fn test_focus_burst_speeds_up_modules() {
        let mut calm = test_workspace();
        let mut burst = test_workspace();
        burst.trigger_focus_burst(1.0);
        assert!(burst.is_focus_burst(2.0));

        let slow = calm.frame(2.0).node("frontend").unwrap().position;
        let fast = burst.frame(2.0).node("frontend").unwrap().position;
        let expected = orbit::position_at(2.0, &orbit::default_engine()[0].orbit, 1.5);
        assert!((fast - expected).length() < 1e-5);
        assert!((fast - slow).length() > 1e-3);
    }

    #[test]
    fn test_automatic_burst_cycle() {
        let mut ws = test_workspace();
        for i in 0..=(60 * 15) {
            ws.frame(i as f32 / 60.0);
        }
        assert!(ws.is_focus_burst(15.0));
        assert!(!ws.is_focus_burst(17.0));
    }

    #[test]
    fn test_hover_grows_module_and_adds_glow() {
        let mut ws = test_workspace();
        ws.hover(Some("backend"));
        let mut frame = ws.frame(0.0);
        for i in 1..120 {
            frame = ws.frame(i as f32 / 60.0);
        }
        let backend = frame.node("backend").unwrap();
        assert!(backend.scale > 1.29);
        assert!(frame.light("backend/glow").is_some());
        assert_eq!(frame.node("frontend").unwrap().scale, 1.0);

        ws.hover(None);
        let frame = ws.frame(2.0);
        assert!(frame.light("backend/glow").is_none());
        assert!(frame.node("backend").unwrap().scale < 1.3);
    }

    #[test]
    fn test_data_pulse_visible_briefly() {
        let mut ws = test_workspace();
        ws.frame(10.1);
        assert!(ws.frame(10.5).node(DATA_PULSE).is_some());
        assert!(ws.frame(11.0).node(DATA_PULSE).is_none());
    }

    #[test]
    fn test_non_finite_time_is_skipped() {
        let mut ws = test_workspace();
        let frame = ws.frame(f32::NAN);
        assert!(frame.nodes.is_empty());
        assert!(ws.frame(0.0).node("frontend").is_some());
    }
}
