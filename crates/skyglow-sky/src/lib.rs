//! Night-sky animation for the skyglow backdrop.
//!
//! This crate owns the 2D canvas layer: a cosmic gradient with nebula wisps,
//! a twinkling star field regenerated whenever the viewport changes, and
//! shooting stars spawned on an irregular cadence. [`SkyState`] drives all of
//! it once per frame and emits a [`skyglow_core::DrawList`].

mod animations;
mod state;

pub use animations::{backdrop, meteor, starfield};
pub use state::SkyState;
