//! Vector Arena - simulation core of a top-down octagonal arena shooter
//!
//! Core modules:
//! - `sim`: Simulation (entities, arena walls, collisions, run state, tick)
//! - `audio`: Audio sink seam (fire-and-forget sound triggers)
//! - `settings`: Run configuration

pub mod audio;
pub mod settings;
pub mod sim;

pub use audio::{AudioSink, LogAudio, SilentAudio};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Upper bound on a single frame's delta time (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Arena dimensions
    pub const DEFAULT_ARENA_WIDTH: f32 = 800.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 600.0;
    pub const ARENA_BORDER_THICKNESS: f32 = 40.0;
    /// Gap between the viewport edge and the outer wall
    pub const ARENA_WALL_INSET: f32 = 20.0;
    /// Position nudge along the wall normal after a bounce
    pub const WALL_PUSH_OUT: f32 = 2.0;

    /// Player ship
    pub const SHIP_SIZE: f32 = 15.0;
    pub const SHIP_THRUST_POWER: f32 = 300.0;
    pub const SHIP_MAX_SPEED: f32 = 400.0;
    pub const SHIP_ROTATION_RATE: f32 = 5.0; // radians per second
    pub const SHIP_FRICTION: f32 = 0.98; // per tick
    pub const SHIP_FIRE_COOLDOWN: f32 = 0.2;
    pub const SHIP_INVULNERABILITY: f32 = 2.0;
    /// Extra distance in front of the hull where bullets appear
    pub const SHIP_MUZZLE_OFFSET: f32 = 5.0;

    /// Bullets
    pub const BULLET_SPEED: f32 = 600.0;
    pub const BULLET_LIFETIME: f32 = 1.5;
    pub const BULLET_SIZE: f32 = 3.0;

    /// Enemies
    pub const DROID_SIZE: f32 = 12.0;
    pub const DROID_BASE_SPEED: f32 = 80.0;
    pub const FAST_DROID_SPEED_FACTOR: f32 = 1.5;
    pub const HUNTER_SPEED_FACTOR: f32 = 1.2;
    /// Nominal re-heading interval for hunters (they never wander)
    pub const HUNTER_DIRECTION_INTERVAL: f32 = 0.5;

    /// Explosions
    pub const EXPLOSION_LIFETIME: f32 = 0.8;
    pub const EXPLOSION_PARTICLES: usize = 12;
    pub const EXPLOSION_SPEED: f32 = 150.0;
    pub const SHIP_EXPLOSION_PARTICLES: usize = 16;
    pub const SHIP_EXPLOSION_SPEED: f32 = 200.0;

    /// Run rules
    pub const STARTING_LIVES: u32 = 3;
    pub const RESPAWN_DELAY: f32 = 2.0;
    /// Enemies keep at least this far from the player when a wave spawns
    pub const SPAWN_SAFE_DISTANCE: f32 = 150.0;
    pub const SPAWN_ATTEMPTS: u32 = 20;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit vector pointing along `angle` (radians)
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::from_angle(angle)
}

/// Angle of a vector, or `None` for the zero vector
#[inline]
pub fn angle_of(v: Vec2) -> Option<f32> {
    if v == Vec2::ZERO {
        None
    } else {
        Some(v.y.atan2(v.x))
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
