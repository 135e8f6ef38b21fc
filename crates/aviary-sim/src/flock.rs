//! Flock manager: a fixed population of boids steered by cohesion, alignment
//! and separation.
//!
//! Each `update` processes one half of the flock and toggles to the other
//! half, so a full refresh takes two ticks. Forces are pushed to the rigid
//! bodies and integrated by the host physics step; speed and altitude are
//! clamped here.

use std::ops::Range;

use glam::{Quat, Vec3};
use hecs::Entity;
use rand::Rng;
use tracing::{debug, trace, warn};

use aviary_core::config::FlockConfig;
use aviary_core::constants::{AGENT_MATERIAL, AGENT_MODEL};
use aviary_core::enums::{Neighborhood, UpdatePhase};

use crate::scene::{ResourceProvider, Scene};
use crate::world_setup;

/// One flock member: a handle to its scene node plus the force computed on
/// its last update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boid {
    pub entity: Entity,
    pub force: Vec3,
}

impl Boid {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            force: Vec3::ZERO,
        }
    }
}

/// Kinematic state of a boid as read from the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Steering toward the centroid of neighbors within `range_attract`.
pub fn cohesion(subject: &Kinematics, neighbors: &[Kinematics], config: &FlockConfig) -> Vec3 {
    let mut center = Vec3::ZERO;
    let mut n = 0u32;
    for other in neighbors {
        if subject.position.distance(other.position) < config.range_attract {
            center += other.position;
            n += 1;
        }
    }
    if n == 0 {
        return Vec3::ZERO;
    }
    center /= n as f32;
    let desired = (center - subject.position).normalize_or_zero() * config.attract_vmax;
    (desired - subject.velocity) * config.attract_factor
}

/// Steering toward the mean heading of neighbors within `range_attract`.
///
/// The heading is a unit vector; `align_factor` scales it only when
/// `apply_align_factor` is set.
pub fn alignment(subject: &Kinematics, neighbors: &[Kinematics], config: &FlockConfig) -> Vec3 {
    let mut heading = Vec3::ZERO;
    let mut n = 0u32;
    for other in neighbors {
        if subject.position.distance(other.position) < config.range_attract {
            heading += other.velocity;
            n += 1;
        }
    }
    if n == 0 {
        return Vec3::ZERO;
    }
    heading = (heading / n as f32).normalize_or_zero();
    if config.apply_align_factor {
        heading *= config.align_factor;
    }
    heading - subject.velocity
}

/// Repulsion from neighbors closer than `range_repel`. Coincident neighbors
/// (zero distance) and anything beyond `repel_cutoff` contribute nothing.
pub fn separation(subject: &Kinematics, neighbors: &[Kinematics], config: &FlockConfig) -> Vec3 {
    let mut force = Vec3::ZERO;
    for other in neighbors {
        let sep = subject.position - other.position;
        let d = sep.length();
        if d < config.range_repel && d > 0.0 && d < config.repel_cutoff {
            force += sep / d * config.repel_factor;
        }
    }
    force
}

/// Rescale `velocity` into `[min_speed, max_speed]`, keeping its direction.
/// A zero velocity has no direction and stays zero.
pub fn clamp_speed(velocity: Vec3, min_speed: f32, max_speed: f32) -> Vec3 {
    let speed = velocity.length();
    if speed < min_speed {
        velocity.normalize_or_zero() * min_speed
    } else if speed > max_speed {
        velocity.normalize_or_zero() * max_speed
    } else {
        velocity
    }
}

/// Hard-set `y` to the nearest bound when outside `[min, max]`.
pub fn clamp_altitude(position: Vec3, min_altitude: f32, max_altitude: f32) -> Vec3 {
    if position.y < min_altitude {
        Vec3::new(position.x, min_altitude, position.z)
    } else if position.y > max_altitude {
        Vec3::new(position.x, max_altitude, position.z)
    } else {
        position
    }
}

/// Orientation for a boid flying along `velocity`: a rotation about the side
/// axis `-v̂ × up` by the angle between that axis and `v̂`.
///
/// Returns `None` when the velocity is zero or vertical.
pub fn heading_rotation(velocity: Vec3) -> Option<Quat> {
    let vn = velocity.normalize_or_zero();
    let side = -vn.cross(Vec3::Y);
    let len = side.length();
    if len <= f32::EPSILON {
        return None;
    }
    let angle = side.dot(vn).clamp(-1.0, 1.0).acos();
    Some(Quat::from_axis_angle(side / len, angle))
}

/// The flock manager.
pub struct BoidSet {
    config: FlockConfig,
    boids: Box<[Boid]>,
    phase: UpdatePhase,
}

impl BoidSet {
    /// Create an empty flock. `initialise` spawns the population.
    pub fn new(config: FlockConfig) -> Self {
        Self {
            config,
            boids: Box::new([]),
            phase: UpdatePhase::default(),
        }
    }

    /// Adopt nodes that already exist in the scene as the flock, in order.
    pub fn from_entities(config: FlockConfig, entities: impl IntoIterator<Item = Entity>) -> Self {
        Self {
            config,
            boids: entities.into_iter().map(Boid::new).collect(),
            phase: UpdatePhase::default(),
        }
    }

    /// Spawn `population` boids at random positions in the spawn square with a
    /// random yaw and scale.
    pub fn initialise(
        &mut self,
        resources: &mut impl ResourceProvider,
        scene: &mut Scene,
        rng: &mut impl Rng,
    ) {
        if !self.boids.is_empty() {
            warn!(population = self.boids.len(), "flock already initialised");
            return;
        }

        let model = resources.model(AGENT_MODEL);
        let material = resources.material(AGENT_MATERIAL);
        let extent = self.config.spawn_half_extent;
        let scale_span = self.config.scale_max - self.config.scale_min;

        self.boids = (0..self.config.population)
            .map(|_| {
                let position = Vec3::new(
                    rng.gen::<f32>() * 2.0 * extent - extent,
                    0.0,
                    rng.gen::<f32>() * 2.0 * extent - extent,
                );
                let yaw = rng.gen::<f32>() * 360.0;
                let scale = self.config.scale_min + rng.gen::<f32>() * scale_span;
                let entity =
                    world_setup::spawn_boid(scene, model, material, position, yaw, scale);
                Boid::new(entity)
            })
            .collect();

        debug!(population = self.boids.len(), "flock spawned");
    }

    /// Advance the half of the flock selected by the current phase, then
    /// toggle the phase. Returns the processed index range.
    pub fn update(&mut self, scene: &mut Scene, dt: f32) -> Range<usize> {
        let range = self.phase.partition(self.boids.len());
        for index in range.clone() {
            let force = self.compute_force(scene, index);
            self.boids[index].force = force;
            self.integrate(scene, index);
        }
        trace!(phase = ?self.phase, start = range.start, end = range.end, dt, "flock partition updated");
        self.phase = self.phase.toggle();
        range
    }

    /// Net steering force on boid `index` against its neighbor scope.
    ///
    /// Zero when the boid has no neighbors in range or is missing from the
    /// scene.
    pub fn compute_force(&self, scene: &Scene, index: usize) -> Vec3 {
        let Some(subject) = self.boids.get(index).and_then(|b| kinematics(scene, b.entity)) else {
            return Vec3::ZERO;
        };

        let neighbors: Vec<Kinematics> = self
            .neighbor_scope(index)
            .filter(|&other| other != index)
            .filter_map(|other| kinematics(scene, self.boids[other].entity))
            .collect();

        let mut force = cohesion(&subject, &neighbors, &self.config);
        force += alignment(&subject, &neighbors, &self.config);
        force += separation(&subject, &neighbors, &self.config);
        force
    }

    /// Push boid `index`'s force to its body, clamp its speed, orient it along
    /// its velocity and clamp its altitude.
    pub fn integrate(&self, scene: &mut Scene, index: usize) {
        let Some(boid) = self.boids.get(index) else {
            return;
        };
        let entity = boid.entity;

        scene.apply_force(entity, boid.force);

        if let Some(velocity) = scene.linear_velocity(entity) {
            let clamped = clamp_speed(velocity, self.config.min_speed, self.config.max_speed);
            if clamped != velocity {
                scene.set_linear_velocity(entity, clamped);
            }
            if let Some(rotation) = heading_rotation(velocity) {
                scene.set_rotation(entity, rotation);
            }
        }

        if let Some(position) = scene.position(entity) {
            let clamped =
                clamp_altitude(position, self.config.min_altitude, self.config.max_altitude);
            if clamped != position {
                scene.set_position(entity, clamped);
            }
        }
    }

    /// Indices boid `index` may react to.
    fn neighbor_scope(&self, index: usize) -> Range<usize> {
        let len = self.boids.len();
        match self.config.neighborhood {
            Neighborhood::Flock => 0..len,
            Neighborhood::Partition => {
                let first = UpdatePhase::ProcessFirstHalf.partition(len);
                if first.contains(&index) {
                    first
                } else {
                    UpdatePhase::ProcessSecondHalf.partition(len)
                }
            }
        }
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    /// Partition the next `update` will process.
    pub fn phase(&self) -> UpdatePhase {
        self.phase
    }

    pub fn config(&self) -> &FlockConfig {
        &self.config
    }
}

fn kinematics(scene: &Scene, entity: Entity) -> Option<Kinematics> {
    Some(Kinematics {
        position: scene.position(entity)?,
        velocity: scene.linear_velocity(entity)?,
    })
}
