//! Events emitted by the simulation for host feedback.

use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A missile slot was activated.
    MissileLaunched { slot: usize, position: Vec3 },
    /// A missile slot timed out and was deactivated.
    MissileExpired { slot: usize },
    /// A fire request found every slot active and was dropped.
    LaunchDropped,
}
