//! Enumeration types used throughout the simulation.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Which half of the flock `BoidSet::update` processes next.
///
/// A two-phase round-robin: every call processes one half and toggles, so two
/// consecutive calls refresh the whole population exactly once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdatePhase {
    /// Indices `0..n/2`.
    #[default]
    ProcessFirstHalf,
    /// Indices `n/2..n`.
    ProcessSecondHalf,
}

impl UpdatePhase {
    /// The phase processed on the following call.
    pub fn toggle(self) -> Self {
        match self {
            UpdatePhase::ProcessFirstHalf => UpdatePhase::ProcessSecondHalf,
            UpdatePhase::ProcessSecondHalf => UpdatePhase::ProcessFirstHalf,
        }
    }

    /// Index range of the partition for a population of `len`.
    pub fn partition(self, len: usize) -> Range<usize> {
        let mid = len / 2;
        match self {
            UpdatePhase::ProcessFirstHalf => 0..mid,
            UpdatePhase::ProcessSecondHalf => mid..len,
        }
    }
}

/// Which boids a boid considers when computing its steering force.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Neighborhood {
    /// Only members of the partition currently being processed.
    #[default]
    Partition,
    /// The whole flock.
    Flock,
}

/// Simulation run state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    #[default]
    Running,
    Paused,
}
