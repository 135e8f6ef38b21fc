//! Simulation snapshot: the visible state handed to the host after each tick.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::enums::{SimPhase, UpdatePhase};
use crate::events::SimEvent;
use crate::types::SimTime;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub phase: SimPhase,
    /// Partition the flock will process on the next tick.
    pub next_partition: UpdatePhase,
    pub boids: Vec<BoidView>,
    pub flock: FlockSummary,
    pub missiles: Vec<MissileView>,
    pub camera: CameraView,
    pub events: Vec<SimEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoidView {
    pub index: usize,
    pub position: Vec3,
    pub velocity: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

/// Aggregate flock statistics.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FlockSummary {
    pub centroid: Vec3,
    pub mean_speed: f32,
    pub min_altitude: f32,
    pub max_altitude: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissileView {
    pub slot: usize,
    pub active: bool,
    pub visible: bool,
    pub position: Vec3,
    pub velocity: Vec3,
    pub current_time: f32,
    pub timer: f32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CameraView {
    pub position: Vec3,
    pub forward: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}
