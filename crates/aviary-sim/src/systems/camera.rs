//! Free-fly camera system.
//!
//! Mouse motion turns the camera node (yaw/pitch, roll fixed at zero, pitch
//! clamped) and held movement keys translate it in its local space.

use glam::{EulerRot, Quat, Vec2, Vec3};
use hecs::Entity;

use aviary_core::commands::MoveInput;
use aviary_core::components::CameraRig;
use aviary_core::config::CameraConfig;

use crate::scene::Scene;

/// Input gathered for one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraInput {
    /// Accumulated mouse motion in pixels.
    pub look: Vec2,
    pub movement: MoveInput,
    /// Translation is ignored while false; looking still works.
    pub controls_active: bool,
}

/// Apply one tick of camera input to `camera`.
pub fn run(scene: &mut Scene, camera: Entity, input: &CameraInput, config: &CameraConfig, dt: f32) {
    let rig = {
        let Ok(mut rig) = scene.world_mut().get::<&mut CameraRig>(camera) else {
            return;
        };
        rig.yaw += config.mouse_sensitivity * input.look.x;
        rig.pitch += config.mouse_sensitivity * input.look.y;
        rig.pitch = rig.pitch.clamp(-config.pitch_limit_deg, config.pitch_limit_deg);
        *rig
    };
    scene.set_rotation(camera, rig_rotation(&rig));

    if !input.controls_active {
        return;
    }

    let step = config.move_speed * dt;
    let movement = input.movement;
    if movement.forward {
        scene.translate_local(camera, Vec3::Z * step);
    }
    if movement.back {
        scene.translate_local(camera, Vec3::NEG_Z * step);
    }
    if movement.left {
        scene.translate_local(camera, Vec3::NEG_X * step);
    }
    if movement.right {
        scene.translate_local(camera, Vec3::X * step);
    }
}

/// Orientation for a rig: yaw about world Y, then pitch about local X.
pub fn rig_rotation(rig: &CameraRig) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        rig.yaw.to_radians(),
        rig.pitch.to_radians(),
        0.0,
    )
}
