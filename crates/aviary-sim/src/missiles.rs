//! Missile pool: a fixed number of reusable projectile slots with a
//! time-to-live.
//!
//! Slots are never spawned or despawned after `initialise`; they toggle
//! between Inactive and Active. Every slot keeps its own clock, which advances
//! on every tick whether or not the slot is active.

use glam::Vec3;
use hecs::Entity;
use tracing::debug;

use aviary_core::config::MissileConfig;
use aviary_core::constants::{AGENT_MATERIAL, AGENT_MODEL};

use crate::scene::{ResourceProvider, Scene};
use crate::world_setup;

/// One pool slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Missile {
    pub entity: Entity,
    pub is_active: bool,
    /// Local clock, advanced every tick.
    pub current_time: f32,
    /// Absolute expiry time on `current_time`'s clock.
    pub timer: f32,
    /// Time-to-live applied on activation.
    pub delay: f32,
}

impl Missile {
    pub fn new(entity: Entity, delay: f32) -> Self {
        Self {
            entity,
            is_active: false,
            current_time: 0.0,
            timer: 0.0,
            delay,
        }
    }

    /// Arm the slot and launch it from `origin` along the origin's forward
    /// axis at `launch_speed`. Re-arms an already active slot.
    pub fn activate(&mut self, scene: &mut Scene, origin: Entity, launch_speed: f32) {
        self.timer = self.current_time + self.delay;
        self.is_active = true;
        scene.set_visible(self.entity, true);
        if let Some(position) = scene.position(origin) {
            scene.set_position(self.entity, position);
        }
        if let Some(forward) = scene.forward(origin) {
            scene.set_linear_velocity(self.entity, forward.normalize_or_zero() * launch_speed);
        }
    }

    /// Advance the slot's clock by `dt`, deactivating it once the clock passes
    /// the timer, and thrust it while active.
    ///
    /// Returns true when the slot went from Active to Inactive on this call.
    pub fn update(&mut self, scene: &mut Scene, dt: f32, thrust: Vec3) -> bool {
        self.current_time += dt;
        let mut expired = false;
        if self.current_time > self.timer {
            expired = self.is_active;
            scene.set_visible(self.entity, false);
            self.is_active = false;
        }
        if self.is_active {
            scene.apply_force(self.entity, thrust);
        }
        expired
    }
}

/// The projectile manager.
pub struct MissileSet {
    config: MissileConfig,
    slots: Box<[Missile]>,
}

impl MissileSet {
    /// Create an empty pool. `initialise` spawns the slots.
    pub fn new(config: MissileConfig) -> Self {
        Self {
            config,
            slots: Box::new([]),
        }
    }

    /// Adopt existing scene nodes as slots, in order.
    pub fn from_entities(config: MissileConfig, entities: impl IntoIterator<Item = Entity>) -> Self {
        let delay = config.delay;
        Self {
            config,
            slots: entities
                .into_iter()
                .map(|entity| Missile::new(entity, delay))
                .collect(),
        }
    }

    /// Spawn `capacity` hidden, inactive missiles at the origin.
    pub fn initialise(&mut self, resources: &mut impl ResourceProvider, scene: &mut Scene) {
        if !self.slots.is_empty() {
            debug!(capacity = self.slots.len(), "missile pool already initialised");
            return;
        }

        let model = resources.model(AGENT_MODEL);
        let material = resources.material(AGENT_MATERIAL);
        let delay = self.config.delay;
        self.slots = (0..self.config.capacity)
            .map(|_| Missile::new(world_setup::spawn_missile(scene, model, material), delay))
            .collect();

        debug!(capacity = self.slots.len(), "missile pool spawned");
    }

    /// Activate the first inactive slot, launching it from `origin`.
    ///
    /// Returns the activated slot index, or `None` when every slot is active,
    /// in which case nothing changes.
    pub fn activate_missile(&mut self, scene: &mut Scene, dt: f32, origin: Entity) -> Option<usize> {
        let slot = self.slots.iter().position(|missile| !missile.is_active)?;
        self.slots[slot].activate(scene, origin, self.config.launch_speed);
        debug!(slot, dt, timer = self.slots[slot].timer, "missile activated");
        Some(slot)
    }

    /// Tick every slot. Returns the slots that expired on this tick.
    pub fn update(&mut self, scene: &mut Scene, dt: f32) -> Vec<usize> {
        let thrust = self.config.thrust;
        let mut expired = Vec::new();
        for (slot, missile) in self.slots.iter_mut().enumerate() {
            if missile.update(scene, dt, thrust) {
                debug!(slot, current_time = missile.current_time, "missile expired");
                expired.push(slot);
            }
        }
        expired
    }

    pub fn slots(&self) -> &[Missile] {
        &self.slots
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|missile| missile.is_active).count()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn config(&self) -> &MissileConfig {
        &self.config
    }
}
