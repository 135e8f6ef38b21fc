//! ECS components for hecs entities.
//!
//! These model the host engine's scene nodes: a transform, an optional
//! renderable, a rigid body and a collision shape. Components are plain data;
//! the scene wrapper and systems operate on them.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::types::{MaterialHandle, ModelHandle};

/// Scene node name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeName(pub String);

/// World-space placement of a scene node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Local +Z axis in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}

/// Static model attached to a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Renderable {
    pub model: ModelHandle,
    pub material: MaterialHandle,
    pub cast_shadows: bool,
    /// Whether the model is drawn. Disabled models stay in the scene.
    pub enabled: bool,
}

/// Rigid body state owned by the host physics world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidBody {
    /// Zero mass makes the body static.
    pub mass: f32,
    pub use_gravity: bool,
    pub collision_layer: u32,
    pub friction: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    /// Forces applied since the last physics step.
    pub pending_force: Vec3,
    /// Torques applied since the last physics step.
    pub pending_torque: Vec3,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self {
            mass: 0.0,
            use_gravity: true,
            collision_layer: 1,
            friction: 0.5,
            linear_damping: 0.0,
            angular_damping: 0.0,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            pending_force: Vec3::ZERO,
            pending_torque: Vec3::ZERO,
        }
    }
}

/// Collision geometry. Only stored; the headless physics step does not
/// resolve contacts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CollisionShape {
    Box { size: Vec3 },
    Sphere { diameter: f32 },
    TriangleMesh { model: ModelHandle, lod: u32 },
}

/// Free-fly camera orientation state, in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraRig {
    pub yaw: f32,
    pub pitch: f32,
}

/// Marks an entity as a flock member.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoidTag;

/// Marks an entity as a missile slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MissileTag;
