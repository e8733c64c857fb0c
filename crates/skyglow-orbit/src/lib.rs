//! 3D workspace scene for the skyglow backdrop.
//!
//! Six decorative modules circle a central anchor on two orbits, five
//! panels drift between randomized target slots, and a periodic focus burst
//! speeds everything up for a moment. Every position is a function of an
//! injected elapsed time; [`WorkspaceState`] owns the few pieces of state
//! (hover easing, panel targets, burst timers) and emits a
//! [`skyglow_core::SceneFrame`] per frame.

pub mod camera;
pub mod orbit;
pub mod panels;
pub mod rhythm;
mod state;

pub use state::{ANCHOR, DATA_PULSE, HOVER_GLOW_INTENSITY, LAPTOP_GLOW, SCREEN, WorkspaceState};
