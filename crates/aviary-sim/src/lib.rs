//! Simulation engine for aviary.
//!
//! Owns the scene (a hecs world standing in for the host engine's scene graph
//! and physics world), the flock and the missile pool, and produces
//! `SimSnapshot`s for the host.

pub mod engine;
pub mod flock;
pub mod missiles;
pub mod scene;
pub mod systems;
pub mod world_setup;

pub use aviary_core as core;
pub use engine::{SimConfig, SimulationEngine};
