//! Systems that operate on the scene each tick.
//!
//! Systems are plain functions over the scene or its world. They do not own
//! state; all state lives in components or in the managers.

pub mod camera;
pub mod physics;
pub mod snapshot;
