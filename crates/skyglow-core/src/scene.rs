//! Per-frame updates for a 3D scene graph.

use glam::Vec3;

/// Where the camera sits and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
}

/// What a node stands for, so a backend can pick a visual for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// The fixed centrepiece the camera orbits.
    Anchor,
    /// An orbiting module.
    Module,
    /// A floating workspace panel.
    Panel,
    /// The transient data-pulse beam.
    Pulse,
}

/// Transform and opacity of a named node for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeUpdate {
    pub name: &'static str,
    pub role: NodeRole,
    pub position: Vec3,
    /// Euler angles in radians.
    pub rotation: Vec3,
    pub scale: f32,
    pub opacity: f32,
}

impl NodeUpdate {
    pub fn new(name: &'static str, role: NodeRole, position: Vec3) -> Self {
        Self {
            name,
            role,
            position,
            rotation: Vec3::ZERO,
            scale: 1.0,
            opacity: 1.0,
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

/// A point light's position and intensity for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightUpdate {
    pub name: &'static str,
    pub position: Vec3,
    pub intensity: f32,
}

/// Everything a scene graph needs to present one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFrame {
    pub camera: CameraPose,
    pub nodes: Vec<NodeUpdate>,
    pub lights: Vec<LightUpdate>,
}

impl SceneFrame {
    pub fn new(camera: CameraPose) -> Self {
        Self {
            camera,
            nodes: Vec::new(),
            lights: Vec::new(),
        }
    }

    /// Look up a node by name.
    pub fn node(&self, name: &str) -> Option<&NodeUpdate> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Look up a light by name.
    pub fn light(&self, name: &str) -> Option<&LightUpdate> {
        self.lights.iter().find(|l| l.name == name)
    }
}
