//! Snapshot system: reads the scene and the managers and builds a
//! `SimSnapshot`.
//!
//! This system is read-only. It never modifies the scene.

use glam::Vec3;
use hecs::Entity;

use aviary_core::components::CameraRig;
use aviary_core::enums::SimPhase;
use aviary_core::events::SimEvent;
use aviary_core::state::*;
use aviary_core::types::SimTime;

use crate::flock::BoidSet;
use crate::missiles::MissileSet;
use crate::scene::Scene;

/// Build a complete snapshot from the current scene state.
pub fn build_snapshot(
    scene: &Scene,
    time: &SimTime,
    phase: SimPhase,
    flock: &BoidSet,
    missiles: &MissileSet,
    camera: Entity,
    events: Vec<SimEvent>,
) -> SimSnapshot {
    let boids = build_boids(scene, flock);
    SimSnapshot {
        time: *time,
        phase,
        next_partition: flock.phase(),
        flock: summarize(&boids),
        boids,
        missiles: build_missiles(scene, missiles),
        camera: build_camera(scene, camera),
        events,
    }
}

fn build_boids(scene: &Scene, flock: &BoidSet) -> Vec<BoidView> {
    flock
        .boids()
        .iter()
        .enumerate()
        .filter_map(|(index, boid)| {
            let transform = scene.transform(boid.entity)?;
            Some(BoidView {
                index,
                position: transform.position,
                velocity: scene.linear_velocity(boid.entity).unwrap_or_default(),
                rotation: transform.rotation,
                scale: transform.scale.x,
            })
        })
        .collect()
}

/// Centroid, mean speed and altitude extent of the flock.
pub fn summarize(boids: &[BoidView]) -> FlockSummary {
    if boids.is_empty() {
        return FlockSummary::default();
    }

    let n = boids.len() as f32;
    let centroid = boids.iter().map(|b| b.position).sum::<Vec3>() / n;
    let mean_speed = boids.iter().map(|b| b.velocity.length()).sum::<f32>() / n;
    let (min_altitude, max_altitude) = boids.iter().fold(
        (f32::INFINITY, f32::NEG_INFINITY),
        |(lo, hi), b| (lo.min(b.position.y), hi.max(b.position.y)),
    );

    FlockSummary {
        centroid,
        mean_speed,
        min_altitude,
        max_altitude,
    }
}

fn build_missiles(scene: &Scene, missiles: &MissileSet) -> Vec<MissileView> {
    missiles
        .slots()
        .iter()
        .enumerate()
        .map(|(slot, missile)| MissileView {
            slot,
            active: missile.is_active,
            visible: scene.is_visible(missile.entity),
            position: scene.position(missile.entity).unwrap_or_default(),
            velocity: scene.linear_velocity(missile.entity).unwrap_or_default(),
            current_time: missile.current_time,
            timer: missile.timer,
        })
        .collect()
}

fn build_camera(scene: &Scene, camera: Entity) -> CameraView {
    let rig = scene
        .world()
        .get::<&CameraRig>(camera)
        .map(|rig| *rig)
        .unwrap_or_default();
    CameraView {
        position: scene.position(camera).unwrap_or_default(),
        forward: scene.forward(camera).unwrap_or(Vec3::Z),
        yaw: rig.yaw,
        pitch: rig.pitch,
    }
}
