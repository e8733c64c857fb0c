//! Terminal rendering: a cell rasterizer for the 2D sky and a projector for
//! the 3D workspace.

mod canvas;
mod color;
mod scene;

pub use canvas::CellCanvas;
pub use scene::{HitTarget, draw_scene, hit_test};
