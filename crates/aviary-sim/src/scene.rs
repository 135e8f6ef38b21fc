//! Scene substrate: resource lookup and scene-node/rigid-body access.
//!
//! Agents hold `hecs::Entity` handles into the scene and never own the
//! entities. Accessors on missing entities or components are no-ops (setters)
//! or `None` (getters), mirroring how the host treats stale handles.

use std::collections::HashMap;

use glam::{Quat, Vec3};
use hecs::{Component, Entity, World};
use tracing::trace;

use aviary_core::components::*;
use aviary_core::types::{MaterialHandle, ModelHandle};

/// Resolves named assets to reusable handles.
pub trait ResourceProvider {
    fn model(&mut self, name: &str) -> ModelHandle;
    fn material(&mut self, name: &str) -> MaterialHandle;
}

/// Resource provider that interns names: the same name always resolves to the
/// same handle.
#[derive(Debug, Default)]
pub struct ResourceCache {
    models: HashMap<String, ModelHandle>,
    materials: HashMap<String, MaterialHandle>,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct resources resolved so far.
    pub fn len(&self) -> usize {
        self.models.len() + self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResourceProvider for ResourceCache {
    fn model(&mut self, name: &str) -> ModelHandle {
        let next = ModelHandle(self.models.len() as u32);
        *self.models.entry(name.to_owned()).or_insert(next)
    }

    fn material(&mut self, name: &str) -> MaterialHandle {
        let next = MaterialHandle(self.materials.len() as u32);
        *self.materials.entry(name.to_owned()).or_insert(next)
    }
}

/// The scene graph. Each node is an entity with a `NodeName` and a
/// `Transform`; renderables, bodies and shapes are attached as components.
#[derive(Default)]
pub struct Scene {
    world: World,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Create a named child node of the scene root.
    pub fn create_child(&mut self, name: &str, transform: Transform) -> Entity {
        self.world.spawn((NodeName(name.to_owned()), transform))
    }

    /// Attach (or replace) a component on a node. Stale handles are ignored.
    pub fn attach<T: Component>(&mut self, entity: Entity, component: T) {
        if self.world.insert_one(entity, component).is_err() {
            trace!(?entity, component = std::any::type_name::<T>(), "attach to missing node ignored");
        }
    }

    pub fn attach_model(&mut self, entity: Entity, renderable: Renderable) {
        self.attach(entity, renderable);
    }

    pub fn attach_rigid_body(&mut self, entity: Entity, body: RigidBody) {
        self.attach(entity, body);
    }

    pub fn attach_collision_shape(&mut self, entity: Entity, shape: CollisionShape) {
        self.attach(entity, shape);
    }

    pub fn name(&self, entity: Entity) -> Option<String> {
        self.world
            .get::<&NodeName>(entity)
            .ok()
            .map(|name| name.0.clone())
    }

    /// Enable or disable the node's model.
    pub fn set_visible(&mut self, entity: Entity, visible: bool) {
        if let Ok(mut renderable) = self.world.get::<&mut Renderable>(entity) {
            renderable.enabled = visible;
        }
    }

    pub fn is_visible(&self, entity: Entity) -> bool {
        self.world
            .get::<&Renderable>(entity)
            .map(|renderable| renderable.enabled)
            .unwrap_or(false)
    }

    pub fn transform(&self, entity: Entity) -> Option<Transform> {
        self.world.get::<&Transform>(entity).ok().map(|t| *t)
    }

    pub fn position(&self, entity: Entity) -> Option<Vec3> {
        self.transform(entity).map(|t| t.position)
    }

    pub fn set_position(&mut self, entity: Entity, position: Vec3) {
        if let Ok(mut transform) = self.world.get::<&mut Transform>(entity) {
            transform.position = position;
        }
    }

    pub fn rotation(&self, entity: Entity) -> Option<Quat> {
        self.transform(entity).map(|t| t.rotation)
    }

    pub fn set_rotation(&mut self, entity: Entity, rotation: Quat) {
        if let Ok(mut transform) = self.world.get::<&mut Transform>(entity) {
            transform.rotation = rotation;
        }
    }

    /// The node's local +Z axis in world space.
    pub fn forward(&self, entity: Entity) -> Option<Vec3> {
        self.transform(entity).map(|t| t.forward())
    }

    /// Move a node by `delta` expressed in its local space.
    pub fn translate_local(&mut self, entity: Entity, delta: Vec3) {
        if let Ok(mut transform) = self.world.get::<&mut Transform>(entity) {
            let world_delta = transform.rotation * delta;
            transform.position += world_delta;
        }
    }

    pub fn body(&self, entity: Entity) -> Option<RigidBody> {
        self.world.get::<&RigidBody>(entity).ok().map(|b| *b)
    }

    pub fn linear_velocity(&self, entity: Entity) -> Option<Vec3> {
        self.body(entity).map(|b| b.linear_velocity)
    }

    pub fn set_linear_velocity(&mut self, entity: Entity, velocity: Vec3) {
        if let Ok(mut body) = self.world.get::<&mut RigidBody>(entity) {
            body.linear_velocity = velocity;
        }
    }

    /// Queue a force for the next physics step.
    pub fn apply_force(&mut self, entity: Entity, force: Vec3) {
        if let Ok(mut body) = self.world.get::<&mut RigidBody>(entity) {
            body.pending_force += force;
        }
    }

    /// Queue a torque for the next physics step.
    pub fn apply_torque(&mut self, entity: Entity, torque: Vec3) {
        if let Ok(mut body) = self.world.get::<&mut RigidBody>(entity) {
            body.pending_torque += torque;
        }
    }

    pub fn set_use_gravity(&mut self, entity: Entity, use_gravity: bool) {
        if let Ok(mut body) = self.world.get::<&mut RigidBody>(entity) {
            body.use_gravity = use_gravity;
        }
    }

    pub fn set_mass(&mut self, entity: Entity, mass: f32) {
        if let Ok(mut body) = self.world.get::<&mut RigidBody>(entity) {
            body.mass = mass;
        }
    }

    pub fn set_friction(&mut self, entity: Entity, friction: f32) {
        if let Ok(mut body) = self.world.get::<&mut RigidBody>(entity) {
            body.friction = friction;
        }
    }

    pub fn set_damping(&mut self, entity: Entity, linear: f32, angular: f32) {
        if let Ok(mut body) = self.world.get::<&mut RigidBody>(entity) {
            body.linear_damping = linear;
            body.angular_damping = angular;
        }
    }
}
