//! Headless host for the aviary simulation.
//!
//! Loads an `AppConfig`, drives the engine either in a tight batch loop or
//! on a fixed-rate game loop thread, and reports what happened.

pub mod config;
pub mod game_loop;
pub mod runner;
pub mod state;

pub use aviary_core as core;
pub use aviary_sim as sim;
