//! Core types and definitions for the aviary simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! scene components, tuning configs, commands, events, snapshots and
//! constants. It has no dependency on the ECS or any runtime.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
