//! Particle explosions (visual only, never collide)

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::Body;
use crate::consts::EXPLOSION_LIFETIME;
use crate::polar_to_cartesian;

/// A single streak of an explosion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Emission angle (radians), also the streak direction
    pub angle: f32,
    /// Streak length, for rendering only
    pub length: f32,
}

impl Particle {
    #[inline]
    pub fn start_point(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn end_point(&self) -> Vec2 {
        self.pos + polar_to_cartesian(self.length, self.angle)
    }
}

/// A burst of particles that fades out after its max lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub body: Body,
    /// Seconds since the explosion started
    pub lifetime: f32,
    pub max_lifetime: f32,
    pub particles: Vec<Particle>,
}

impl Explosion {
    pub fn new<R: Rng + ?Sized>(pos: Vec2, particle_count: usize, speed: f32, rng: &mut R) -> Self {
        let particles = (0..particle_count)
            .map(|i| {
                let base = std::f32::consts::TAU * i as f32 / particle_count as f32;
                let angle = base + (rng.random::<f32>() - 0.5) * 0.5;
                // Each axis gets its own speed jitter
                let (sin, cos) = angle.sin_cos();
                let vel = Vec2::new(
                    cos * speed * (0.5 + rng.random::<f32>()),
                    sin * speed * (0.5 + rng.random::<f32>()),
                );
                Particle {
                    pos,
                    vel,
                    angle,
                    length: 5.0 + rng.random::<f32>() * 10.0,
                }
            })
            .collect();

        Self {
            body: Body::new(pos, 0.0),
            lifetime: 0.0,
            max_lifetime: EXPLOSION_LIFETIME,
            particles,
        }
    }

    /// Fraction of the lifetime elapsed (0 = fresh, 1 = done)
    pub fn progress(&self) -> f32 {
        self.lifetime / self.max_lifetime
    }

    pub fn update(&mut self, dt: f32) {
        self.lifetime += dt;
        if self.lifetime >= self.max_lifetime {
            self.body.alive = false;
            return;
        }
        for particle in &mut self.particles {
            particle.pos += particle.vel * dt;
        }
    }
}
