//! Simulation constants and default tuning parameters.

/// Default host tick rate (Hz) for the headless loop.
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the default tick rate.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Flock ---

/// Number of boids in the flock.
pub const NUM_BOIDS: usize = 100;

/// Neighbor radius for cohesion and alignment.
pub const BOID_RANGE_ATTRACT: f32 = 30.0;

/// Neighbor radius for separation.
pub const BOID_RANGE_REPEL: f32 = 20.0;

/// Alignment radius. Alignment shares the cohesion neighborhood, so this is
/// informational only.
pub const BOID_RANGE_ALIGN: f32 = 5.0;

/// Desired speed toward the local center of mass.
pub const BOID_ATTRACT_VMAX: f32 = 5.0;

/// Cohesion gain.
pub const BOID_ATTRACT_FACTOR: f32 = 4.0;

/// Separation gain.
pub const BOID_REPEL_FACTOR: f32 = 2.0;

/// Alignment gain.
pub const BOID_ALIGN_FACTOR: f32 = 2.0;

/// Separation only considers neighbors closer than this.
pub const BOID_REPEL_CUTOFF: f32 = 100.0;

/// Speed band (units/s).
pub const BOID_MIN_SPEED: f32 = 10.0;
pub const BOID_MAX_SPEED: f32 = 50.0;

/// Altitude band (world Y).
pub const BOID_MIN_ALTITUDE: f32 = 10.0;
pub const BOID_MAX_ALTITUDE: f32 = 50.0;

/// Boids spawn in `[-E, E)` on X and Z.
pub const BOID_SPAWN_HALF_EXTENT: f32 = 20.0;

/// Uniform scale range for spawned boids.
pub const BOID_SCALE_MIN: f32 = 2.0;
pub const BOID_SCALE_MAX: f32 = 7.0;

// --- Missiles ---

/// Number of reusable missile slots.
pub const MAX_MISSILES: usize = 3;

/// Time-to-live of an activated missile (seconds).
pub const MISSILE_DELAY_SECS: f32 = 5.0;

/// Launch speed along the origin node's forward axis.
pub const MISSILE_LAUNCH_SPEED: f32 = 20.0;

/// Constant world-space thrust applied to active missiles every tick.
pub const MISSILE_THRUST: [f32; 3] = [1.0, 0.0, 0.0];

// --- Shared body setup ---

/// Collision layer used for every simulated agent.
pub const AGENT_COLLISION_LAYER: u32 = 2;

/// Mass of boid and missile bodies.
pub const AGENT_MASS: f32 = 1.0;

/// Model used by boids and missiles.
pub const AGENT_MODEL: &str = "Models/Cone.mdl";

/// Material used by boids and missiles.
pub const AGENT_MATERIAL: &str = "Materials/Stone.xml";

// --- Camera ---

/// Camera translation speed (units/s).
pub const CAMERA_MOVE_SPEED: f32 = 20.0;

/// Mouse sensitivity (degrees per pixel).
pub const CAMERA_MOUSE_SENSITIVITY: f32 = 0.1;

/// Pitch limit (degrees, symmetric).
pub const CAMERA_PITCH_LIMIT_DEG: f32 = 90.0;

/// Initial camera node position.
pub const CAMERA_START_POSITION: [f32; 3] = [0.0, 5.0, 0.0];

// --- Physics ---

/// Gravity acceleration for bodies with gravity enabled.
pub const GRAVITY: [f32; 3] = [0.0, -9.81, 0.0];
