//! Core types shared by the skyglow animation crates.
//!
//! The animation crates never talk to a terminal or a GPU. They produce a
//! [`DrawList`] of 2D raster primitives (for the night sky) or a
//! [`SceneFrame`] of named node updates (for the 3D workspace scene), and a
//! render backend turns those into pixels.

mod draw;
mod frame_loop;
mod geometry;
pub mod random;
mod scene;
mod settings;

pub use draw::{ColorStop, DrawCommand, DrawList, Hsla};
pub use frame_loop::{AnimationLoop, FrameTime};
pub use geometry::Viewport;
pub use scene::{CameraPose, LightUpdate, NodeRole, NodeUpdate, SceneFrame};
pub use settings::{AnimationSpeed, SceneKind};
