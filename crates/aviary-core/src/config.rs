//! Tuning configuration for the flock, the missile pool and the camera.
//!
//! Configs are immutable once handed to their manager. Every field has a
//! default, so partial JSON documents are accepted.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::Neighborhood;

/// Invalid tuning value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A value that must be non-negative was negative or not finite.
    Negative { field: &'static str, value: f32 },
    /// A `min`/`max` pair is inverted.
    InvertedRange {
        min_field: &'static str,
        max_field: &'static str,
    },
    /// A pool or population was configured empty.
    EmptyPool { field: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Negative { field, value } => {
                write!(f, "{field} must be a non-negative number, got {value}")
            }
            ConfigError::InvertedRange {
                min_field,
                max_field,
            } => write!(f, "{min_field} must not exceed {max_field}"),
            ConfigError::EmptyPool { field } => write!(f, "{field} must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn require_ordered(
    min_field: &'static str,
    min: f32,
    max_field: &'static str,
    max: f32,
) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange {
            min_field,
            max_field,
        })
    }
}

/// Flocking rule tunables, shared by every boid in a `BoidSet`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockConfig {
    pub population: usize,
    pub range_attract: f32,
    pub range_repel: f32,
    /// Kept only for config compatibility. Never read: alignment uses the
    /// `range_attract` neighborhood.
    pub range_align: f32,
    pub attract_vmax: f32,
    pub attract_factor: f32,
    pub repel_factor: f32,
    pub align_factor: f32,
    pub repel_cutoff: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_altitude: f32,
    pub max_altitude: f32,
    pub spawn_half_extent: f32,
    pub scale_min: f32,
    pub scale_max: f32,
    pub neighborhood: Neighborhood,
    /// When false the alignment heading is added unscaled and
    /// `align_factor` has no effect.
    pub apply_align_factor: bool,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            population: NUM_BOIDS,
            range_attract: BOID_RANGE_ATTRACT,
            range_repel: BOID_RANGE_REPEL,
            range_align: BOID_RANGE_ALIGN,
            attract_vmax: BOID_ATTRACT_VMAX,
            attract_factor: BOID_ATTRACT_FACTOR,
            repel_factor: BOID_REPEL_FACTOR,
            align_factor: BOID_ALIGN_FACTOR,
            repel_cutoff: BOID_REPEL_CUTOFF,
            min_speed: BOID_MIN_SPEED,
            max_speed: BOID_MAX_SPEED,
            min_altitude: BOID_MIN_ALTITUDE,
            max_altitude: BOID_MAX_ALTITUDE,
            spawn_half_extent: BOID_SPAWN_HALF_EXTENT,
            scale_min: BOID_SCALE_MIN,
            scale_max: BOID_SCALE_MAX,
            neighborhood: Neighborhood::default(),
            apply_align_factor: false,
        }
    }
}

impl FlockConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_negative("range_attract", self.range_attract)?;
        require_non_negative("range_repel", self.range_repel)?;
        require_non_negative("range_align", self.range_align)?;
        require_non_negative("attract_vmax", self.attract_vmax)?;
        require_non_negative("repel_cutoff", self.repel_cutoff)?;
        require_non_negative("min_speed", self.min_speed)?;
        require_non_negative("spawn_half_extent", self.spawn_half_extent)?;
        require_non_negative("scale_min", self.scale_min)?;
        require_ordered("min_speed", self.min_speed, "max_speed", self.max_speed)?;
        require_ordered(
            "min_altitude",
            self.min_altitude,
            "max_altitude",
            self.max_altitude,
        )?;
        require_ordered("scale_min", self.scale_min, "scale_max", self.scale_max)?;
        Ok(())
    }

    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

/// Missile pool tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissileConfig {
    pub capacity: usize,
    /// Seconds between activation and expiry.
    pub delay: f32,
    pub launch_speed: f32,
    /// World-space force applied to active missiles every tick.
    pub thrust: Vec3,
}

impl Default for MissileConfig {
    fn default() -> Self {
        Self {
            capacity: MAX_MISSILES,
            delay: MISSILE_DELAY_SECS,
            launch_speed: MISSILE_LAUNCH_SPEED,
            thrust: Vec3::from_array(MISSILE_THRUST),
        }
    }
}

impl MissileConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::EmptyPool { field: "capacity" });
        }
        require_non_negative("delay", self.delay)?;
        require_non_negative("launch_speed", self.launch_speed)?;
        Ok(())
    }

    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

/// Free-fly camera tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub start_position: Vec3,
    pub move_speed: f32,
    /// Degrees per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    pub pitch_limit_deg: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: Vec3::from_array(CAMERA_START_POSITION),
            move_speed: CAMERA_MOVE_SPEED,
            mouse_sensitivity: CAMERA_MOUSE_SENSITIVITY,
            pitch_limit_deg: CAMERA_PITCH_LIMIT_DEG,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_negative("move_speed", self.move_speed)?;
        require_non_negative("pitch_limit_deg", self.pitch_limit_deg)?;
        Ok(())
    }
}
