//! Simulation engine: one host frame per `tick`.
//!
//! `SimulationEngine` owns the scene, the flock and the missile pool,
//! processes host commands, runs the systems in order and produces
//! `SimSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use glam::Vec2;
use hecs::Entity;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use aviary_core::commands::{HostCommand, MoveInput};
use aviary_core::config::{CameraConfig, ConfigError, FlockConfig, MissileConfig};
use aviary_core::enums::SimPhase;
use aviary_core::events::SimEvent;
use aviary_core::state::SimSnapshot;
use aviary_core::types::SimTime;

use crate::flock::BoidSet;
use crate::missiles::MissileSet;
use crate::scene::{ResourceCache, Scene};
use crate::systems;
use crate::systems::camera::CameraInput;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub flock: FlockConfig,
    pub missiles: MissileConfig,
    pub camera: CameraConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            flock: FlockConfig::default(),
            missiles: MissileConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.flock.validate()?;
        self.missiles.validate()?;
        self.camera.validate()
    }
}

/// The simulation engine. Owns the scene and all sim state.
pub struct SimulationEngine {
    scene: Scene,
    resources: ResourceCache,
    time: SimTime,
    phase: SimPhase,
    flock: BoidSet,
    missiles: MissileSet,
    camera: Entity,
    camera_config: CameraConfig,
    camera_input: CameraInput,
    pending_launches: u32,
    command_queue: VecDeque<HostCommand>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Create the scene and populate it: camera, flock and missile pool.
    pub fn new(config: SimConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut scene = Scene::new();
        let mut resources = ResourceCache::new();

        let camera = world_setup::spawn_camera(&mut scene, &config.camera);

        let mut flock = BoidSet::new(config.flock);
        flock.initialise(&mut resources, &mut scene, &mut rng);

        let mut missiles = MissileSet::new(config.missiles);
        missiles.initialise(&mut resources, &mut scene);

        info!(
            seed = config.seed,
            boids = flock.len(),
            missile_slots = missiles.capacity(),
            neighborhood = ?config.flock.neighborhood,
            "simulation created"
        );

        Self {
            scene,
            resources,
            time: SimTime::default(),
            phase: SimPhase::default(),
            flock,
            missiles,
            camera,
            camera_config: config.camera,
            camera_input: CameraInput {
                controls_active: true,
                ..Default::default()
            },
            pending_launches: 0,
            command_queue: VecDeque::new(),
            events: Vec::new(),
        }
    }

    /// Validate `config` before creating the engine.
    pub fn try_new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Queue a host command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: HostCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = HostCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one frame of `dt` seconds and return the
    /// resulting snapshot.
    pub fn tick(&mut self, dt: f32) -> SimSnapshot {
        self.process_commands();

        if self.phase == SimPhase::Running {
            self.run_systems(dt);
            self.time.advance(dt);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.scene,
            &self.time,
            self.phase,
            &self.flock,
            &self.missiles,
            self.camera,
            events,
        )
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn flock(&self) -> &BoidSet {
        &self.flock
    }

    pub fn missiles(&self) -> &MissileSet {
        &self.missiles
    }

    /// The camera node, which is also the missile launch origin.
    pub fn camera(&self) -> Entity {
        self.camera
    }

    /// Number of distinct resources the scene has resolved.
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single host command.
    fn handle_command(&mut self, command: HostCommand) {
        match command {
            HostCommand::Look { dx, dy } => {
                if self.phase == SimPhase::Running {
                    self.camera_input.look += Vec2::new(dx, dy);
                }
            }
            HostCommand::SetMoveInput { input } => {
                self.camera_input.movement = input;
            }
            HostCommand::SetControlsActive { active } => {
                self.camera_input.controls_active = active;
            }
            HostCommand::FireMissile => {
                if self.phase != SimPhase::Running {
                    debug!("fire request ignored while paused");
                } else if !self.camera_input.controls_active {
                    debug!("fire request ignored while controls are inactive");
                } else {
                    self.pending_launches += 1;
                }
            }
            HostCommand::Pause => {
                if self.phase == SimPhase::Running {
                    self.phase = SimPhase::Paused;
                    self.camera_input.movement = MoveInput::default();
                    info!(tick = self.time.tick, "simulation paused");
                }
            }
            HostCommand::Resume => {
                if self.phase == SimPhase::Paused {
                    self.phase = SimPhase::Running;
                    info!(tick = self.time.tick, "simulation resumed");
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) {
        // 1. Camera input
        systems::camera::run(
            &mut self.scene,
            self.camera,
            &self.camera_input,
            &self.camera_config,
            dt,
        );
        self.camera_input.look = Vec2::ZERO;

        // 2. Missile launches from the camera node
        for _ in 0..std::mem::take(&mut self.pending_launches) {
            match self
                .missiles
                .activate_missile(&mut self.scene, dt, self.camera)
            {
                Some(slot) => {
                    let position = self.scene.position(self.camera).unwrap_or_default();
                    self.events.push(SimEvent::MissileLaunched { slot, position });
                }
                None => {
                    debug!(capacity = self.missiles.capacity(), "missile pool exhausted");
                    self.events.push(SimEvent::LaunchDropped);
                }
            }
        }

        // 3. Flock (one partition)
        self.flock.update(&mut self.scene, dt);

        // 4. Missile timers and thrust
        for slot in self.missiles.update(&mut self.scene, dt) {
            self.events.push(SimEvent::MissileExpired { slot });
        }

        // 5. Physics integration
        systems::physics::run(self.scene.world_mut(), dt);
    }
}
