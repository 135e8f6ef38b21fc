//! Host commands sent from input handling to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// Held movement keys for the free-fly camera.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInput {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

/// All possible host actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostCommand {
    // --- Camera ---
    /// Mouse motion since the previous tick, in pixels.
    Look { dx: f32, dy: f32 },
    /// Replace the set of held movement keys.
    SetMoveInput { input: MoveInput },
    /// Enable or disable camera translation (the menu being open disables it).
    SetControlsActive { active: bool },

    // --- Weapons ---
    /// Launch a missile from the camera node, if a slot is free.
    FireMissile,

    // --- Simulation control ---
    Pause,
    Resume,
}
