// Chase-camera geometry.

use super::state::{Rotation, Vec3};

/// Placement parameters for the chase camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaseRig {
    /// Horizontal distance behind the target.
    pub distance: f64,
    /// Height above the target's feet.
    pub height: f64,
    /// Easing window applied on every update, in seconds.
    pub ease_seconds: f64,
}

/// Camera placement applied to an operator.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraPose {
    pub location: Vec3,
    /// Actor the camera keeps framed.
    pub facing_actor_id: String,
    pub ease_seconds: f64,
}

/// Unit view vector for a yaw/pitch pair in degrees.
pub fn view_direction(rotation: Rotation) -> Vec3 {
    let yaw = (rotation.yaw + 90.0).to_radians();
    let pitch = (-rotation.pitch).to_radians();
    let horizontal = pitch.cos();
    Vec3 {
        x: yaw.cos() * horizontal,
        y: pitch.sin(),
        z: yaw.sin() * horizontal,
    }
}

/// Camera location behind `target` along its view, raised by the rig height.
pub fn chase_location(target: Vec3, rotation: Rotation, rig: &ChaseRig) -> Vec3 {
    let view = view_direction(rotation);
    Vec3 {
        x: target.x - view.x * rig.distance,
        y: target.y + rig.height,
        z: target.z - view.z * rig.distance,
    }
}
