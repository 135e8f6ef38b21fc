//! Host physics step.
//!
//! Explicit Euler integration of every dynamic rigid body: pending forces and
//! torques become velocity, velocity becomes position. Contacts are not
//! resolved.

use glam::{Quat, Vec3};
use hecs::World;

use aviary_core::components::{RigidBody, Transform};
use aviary_core::constants::GRAVITY;

/// Integrate all bodies by `dt` seconds and clear their pending forces.
/// Bodies with zero mass are static and only have their forces cleared.
pub fn run(world: &mut World, dt: f32) {
    let gravity = Vec3::from_array(GRAVITY);

    for (_entity, (transform, body)) in world.query_mut::<(&mut Transform, &mut RigidBody)>() {
        if body.mass > 0.0 {
            let mut acceleration = body.pending_force / body.mass;
            if body.use_gravity {
                acceleration += gravity;
            }
            body.linear_velocity += acceleration * dt;
            body.linear_velocity *= damping_factor(body.linear_damping, dt);

            body.angular_velocity += body.pending_torque / body.mass * dt;
            body.angular_velocity *= damping_factor(body.angular_damping, dt);

            transform.position += body.linear_velocity * dt;
            if body.angular_velocity != Vec3::ZERO {
                let spin = Quat::from_scaled_axis(body.angular_velocity * dt);
                transform.rotation = (spin * transform.rotation).normalize();
            }
        }

        body.pending_force = Vec3::ZERO;
        body.pending_torque = Vec3::ZERO;
    }
}

fn damping_factor(damping: f32, dt: f32) -> f32 {
    (1.0 - damping * dt).max(0.0)
}
