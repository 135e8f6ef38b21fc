//! Entity spawn factories for setting up the scene.
//!
//! Creates the camera node and the boid/missile nodes with the component
//! bundles the managers expect.

use glam::{Quat, Vec3};
use hecs::Entity;

use aviary_core::components::*;
use aviary_core::config::CameraConfig;
use aviary_core::constants::*;
use aviary_core::types::{MaterialHandle, ModelHandle};

use crate::scene::Scene;

/// Spawn the free-fly camera node.
pub fn spawn_camera(scene: &mut Scene, config: &CameraConfig) -> Entity {
    let camera = scene.create_child("Camera", Transform::from_position(config.start_position));
    scene.attach(camera, CameraRig::default());
    camera
}

/// Rigid body shared by boids and missiles: layer 2, unit mass, no gravity.
fn agent_body() -> RigidBody {
    RigidBody {
        mass: AGENT_MASS,
        use_gravity: false,
        collision_layer: AGENT_COLLISION_LAYER,
        ..Default::default()
    }
}

/// Spawn a boid node with a visible cone, a gravity-free body and a
/// triangle-mesh collision shape built from the model.
pub fn spawn_boid(
    scene: &mut Scene,
    model: ModelHandle,
    material: MaterialHandle,
    position: Vec3,
    yaw_deg: f32,
    scale: f32,
) -> Entity {
    let transform = Transform {
        position,
        rotation: Quat::from_rotation_y(yaw_deg.to_radians()),
        scale: Vec3::splat(scale),
    };
    let entity = scene.create_child("Boid", transform);
    scene.attach_model(
        entity,
        Renderable {
            model,
            material,
            cast_shadows: true,
            enabled: true,
        },
    );
    scene.attach_rigid_body(entity, agent_body());
    scene.attach_collision_shape(entity, CollisionShape::TriangleMesh { model, lod: 0 });
    scene.attach(entity, BoidTag);
    entity
}

/// Spawn a hidden missile node at the origin. Missiles carry no collision
/// shape.
pub fn spawn_missile(scene: &mut Scene, model: ModelHandle, material: MaterialHandle) -> Entity {
    let entity = scene.create_child("Missile", Transform::default());
    scene.attach_model(
        entity,
        Renderable {
            model,
            material,
            cast_shadows: true,
            enabled: false,
        },
    );
    scene.attach_rigid_body(entity, agent_body());
    scene.attach(entity, MissileTag);
    entity
}
