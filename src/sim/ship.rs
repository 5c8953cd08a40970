//! Player ship and its bullets

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Body;
use crate::consts::*;
use crate::heading;

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerShip {
    pub body: Body,
    /// Seconds until the next shot is allowed (floored at 0)
    fire_cooldown: f32,
    /// Seconds of invulnerability left (floored at 0)
    invulnerable: f32,
}

impl PlayerShip {
    /// Arrowhead hull, nose along +X
    pub const VERTICES: [Vec2; 4] = [
        Vec2::new(SHIP_SIZE, 0.0),
        Vec2::new(-SHIP_SIZE * 0.7, -SHIP_SIZE * 0.6),
        Vec2::new(-SHIP_SIZE * 0.4, 0.0),
        Vec2::new(-SHIP_SIZE * 0.7, SHIP_SIZE * 0.6),
    ];

    /// Spawn a ship facing "up" (-Y), invulnerable for the spawn window
    pub fn new(pos: Vec2) -> Self {
        let mut body = Body::new(pos, SHIP_SIZE);
        body.rotation = -std::f32::consts::FRAC_PI_2;
        let mut ship = Self {
            body,
            fire_cooldown: 0.0,
            invulnerable: 0.0,
        };
        ship.make_invulnerable();
        ship
    }

    /// Unit vector the nose points along
    #[inline]
    pub fn heading(&self) -> Vec2 {
        heading(self.body.rotation)
    }

    pub fn rotate_left(&mut self, dt: f32) {
        self.body.rotation -= SHIP_ROTATION_RATE * dt;
    }

    pub fn rotate_right(&mut self, dt: f32) {
        self.body.rotation += SHIP_ROTATION_RATE * dt;
    }

    /// Accelerate along the heading, clamped to max speed
    pub fn thrust(&mut self, dt: f32) {
        self.body.vel += self.heading() * SHIP_THRUST_POWER * dt;
        if self.body.vel.length() > SHIP_MAX_SPEED {
            self.body.vel = self.body.vel.normalize_or_zero() * SHIP_MAX_SPEED;
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.body.integrate(dt);
        self.body.vel *= SHIP_FRICTION;
        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
        self.invulnerable = (self.invulnerable - dt).max(0.0);
    }

    #[inline]
    pub fn can_fire(&self) -> bool {
        self.fire_cooldown <= 0.0
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0.0
    }

    /// Remaining fraction of the invulnerability window (1 = just spawned)
    pub fn invulnerability_progress(&self) -> f32 {
        self.invulnerable / SHIP_INVULNERABILITY
    }

    pub fn make_invulnerable(&mut self) {
        self.invulnerable = SHIP_INVULNERABILITY;
    }

    /// Fire a bullet from the nose. Returns `None` while the cooldown runs.
    pub fn fire(&mut self) -> Option<Bullet> {
        if !self.can_fire() {
            return None;
        }
        self.fire_cooldown = SHIP_FIRE_COOLDOWN;
        let dir = self.heading();
        let muzzle = self.body.pos + dir * (self.body.radius + SHIP_MUZZLE_OFFSET);
        Some(Bullet::new(muzzle, dir))
    }
}

/// A bullet travelling in a straight line until its lifetime runs out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub body: Body,
    /// Seconds left before the bullet expires
    pub lifetime: f32,
}

impl Bullet {
    pub const VERTICES: [Vec2; 3] = [
        Vec2::new(BULLET_SIZE, 0.0),
        Vec2::new(-BULLET_SIZE, BULLET_SIZE * 0.5),
        Vec2::new(-BULLET_SIZE, -BULLET_SIZE * 0.5),
    ];

    pub fn new(pos: Vec2, direction: Vec2) -> Self {
        let dir = direction.normalize_or_zero();
        let mut body = Body::new(pos, BULLET_SIZE);
        body.vel = dir * BULLET_SPEED;
        body.rotation = dir.y.atan2(dir.x);
        Self {
            body,
            lifetime: BULLET_LIFETIME,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.body.integrate(dt);
        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            self.body.alive = false;
        }
    }
}
