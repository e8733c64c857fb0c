//! Slow orbital camera around the workspace.

use glam::Vec3;
use skyglow_core::CameraPose;

pub const CAMERA_ORBIT_RADIUS: f32 = 7.0;
pub const CAMERA_ORBIT_SPEED: f32 = 0.03;
pub const CAMERA_HEIGHT: f32 = 2.5;

/// Point the camera always looks at.
pub const LOOK_AT: Vec3 = Vec3::new(0.0, 0.5, 0.0);

/// Camera pose at `t` seconds: a slow circle around the Y axis with a small
/// vertical drift.
pub fn camera_pose(t: f32) -> CameraPose {
    let angle = t * CAMERA_ORBIT_SPEED;
    CameraPose {
        eye: Vec3::new(
            angle.sin() * CAMERA_ORBIT_RADIUS,
            CAMERA_HEIGHT + (t * 0.1).sin() * 0.3,
            angle.cos() * CAMERA_ORBIT_RADIUS,
        ),
        target: LOOK_AT,
    }
}
