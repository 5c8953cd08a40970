//! Enemy droids
//!
//! Droids and fast droids wander: they fly straight and re-roll their heading
//! by up to ±45° on a fixed per-enemy interval. Hunters never wander; they
//! steer straight at the last target position the engine hands them.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::Body;
use crate::consts::*;
use crate::{angle_of, heading};

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Droid,
    FastDroid,
    Hunter,
}

const DROID_VERTICES: [Vec2; 4] = [
    Vec2::new(DROID_SIZE, 0.0),
    Vec2::new(0.0, DROID_SIZE),
    Vec2::new(-DROID_SIZE, 0.0),
    Vec2::new(0.0, -DROID_SIZE),
];

const FAST_SIZE: f32 = DROID_SIZE * 0.8;
const FAST_DROID_VERTICES: [Vec2; 4] = [
    Vec2::new(FAST_SIZE, 0.0),
    Vec2::new(FAST_SIZE * 0.3, FAST_SIZE * 0.5),
    Vec2::new(-FAST_SIZE, 0.0),
    Vec2::new(FAST_SIZE * 0.3, -FAST_SIZE * 0.5),
];

const HUNTER_VERTICES: [Vec2; 6] = [
    Vec2::new(DROID_SIZE, 0.0),
    Vec2::new(DROID_SIZE * 0.5, DROID_SIZE * 0.7),
    Vec2::new(-DROID_SIZE * 0.5, DROID_SIZE * 0.7),
    Vec2::new(-DROID_SIZE, 0.0),
    Vec2::new(-DROID_SIZE * 0.5, -DROID_SIZE * 0.7),
    Vec2::new(DROID_SIZE * 0.5, -DROID_SIZE * 0.7),
];

impl EnemyKind {
    /// Cruising speed (units/s)
    pub fn speed(&self) -> f32 {
        match self {
            EnemyKind::Droid => DROID_BASE_SPEED,
            EnemyKind::FastDroid => DROID_BASE_SPEED * FAST_DROID_SPEED_FACTOR,
            EnemyKind::Hunter => DROID_BASE_SPEED * HUNTER_SPEED_FACTOR,
        }
    }

    /// Score awarded for destroying this enemy
    pub fn point_value(&self) -> u64 {
        match self {
            EnemyKind::Droid => 100,
            EnemyKind::FastDroid => 200,
            EnemyKind::Hunter => 300,
        }
    }

    /// Range the re-heading interval is drawn from (seconds)
    pub fn direction_interval_range(&self) -> (f32, f32) {
        match self {
            EnemyKind::Droid => (2.0, 4.0),
            EnemyKind::FastDroid => (1.0, 2.5),
            EnemyKind::Hunter => (HUNTER_DIRECTION_INTERVAL, HUNTER_DIRECTION_INTERVAL),
        }
    }

    pub fn vertices(&self) -> &'static [Vec2] {
        match self {
            EnemyKind::Droid => &DROID_VERTICES,
            EnemyKind::FastDroid => &FAST_DROID_VERTICES,
            EnemyKind::Hunter => &HUNTER_VERTICES,
        }
    }
}

/// An enemy entity
#[derive(Debug, Clone)]
pub struct Enemy {
    pub body: Body,
    pub kind: EnemyKind,
    /// Seconds since the last re-heading
    direction_timer: f32,
    /// Fixed for the enemy's life
    direction_interval: f32,
    /// Last known target position (hunters only)
    target: Option<Vec2>,
    /// Private stream for wander re-headings, seeded from the spawner's RNG
    rng: Pcg32,
}

impl Enemy {
    pub fn new<R: Rng + ?Sized>(pos: Vec2, kind: EnemyKind, rng: &mut R) -> Self {
        let mut body = Body::new(pos, DROID_SIZE);
        let (lo, hi) = kind.direction_interval_range();
        let direction_interval = lo + rng.random::<f32>() * (hi - lo);

        if kind != EnemyKind::Hunter {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            body.vel = heading(angle) * kind.speed();
            body.rotation = angle;
        }

        Self {
            body,
            kind,
            direction_timer: 0.0,
            direction_interval,
            target: None,
            rng: Pcg32::seed_from_u64(rng.random()),
        }
    }

    #[inline]
    pub fn point_value(&self) -> u64 {
        self.kind.point_value()
    }

    #[inline]
    pub fn direction_interval(&self) -> f32 {
        self.direction_interval
    }

    #[inline]
    pub fn target(&self) -> Option<Vec2> {
        self.target
    }

    pub fn set_target(&mut self, pos: Vec2) {
        self.target = Some(pos);
    }

    pub fn clear_target(&mut self) {
        self.target = None;
    }

    pub fn update(&mut self, dt: f32) {
        self.direction_timer += dt;

        match (self.kind, self.target) {
            (EnemyKind::Hunter, Some(target)) => {
                let dir = (target - self.body.pos).normalize_or_zero();
                self.body.vel = dir * self.kind.speed();
                if let Some(angle) = angle_of(dir) {
                    self.body.rotation = angle;
                }
            }
            // A hunter without a target keeps coasting on its last velocity
            (EnemyKind::Hunter, None) => {
                if let Some(angle) = angle_of(self.body.vel) {
                    self.body.rotation = angle;
                }
            }
            _ => {
                if self.direction_timer >= self.direction_interval {
                    self.direction_timer = 0.0;
                    self.wander();
                }
                if let Some(angle) = angle_of(self.body.vel) {
                    self.body.rotation = angle;
                }
            }
        }

        self.body.integrate(dt);
    }

    /// Re-roll the heading by up to ±45°, keeping the current speed
    fn wander(&mut self) {
        let speed = self.body.vel.length();
        if speed <= 0.0 {
            return;
        }
        let Some(current) = angle_of(self.body.vel) else {
            return;
        };
        let change = (self.rng.random::<f32>() - 0.5) * std::f32::consts::FRAC_PI_2;
        self.body.vel = heading(current + change) * speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_droid_spawn_parameters() {
        let mut rng = rng();
        for _ in 0..50 {
            let droid = Enemy::new(Vec2::ZERO, EnemyKind::Droid, &mut rng);
            assert!((droid.body.vel.length() - 80.0).abs() < 1e-3);
            assert!((2.0..=4.0).contains(&droid.direction_interval()));
            assert_eq!(droid.body.radius, DROID_SIZE);
            assert_eq!(droid.point_value(), 100);
        }
    }

    #[test]
    fn test_fast_droid_spawn_parameters() {
        let mut rng = rng();
        for _ in 0..50 {
            let fast = Enemy::new(Vec2::ZERO, EnemyKind::FastDroid, &mut rng);
            assert!((fast.body.vel.length() - 120.0).abs() < 1e-3);
            assert!((1.0..=2.5).contains(&fast.direction_interval()));
            assert_eq!(fast.point_value(), 200);
        }
    }

    #[test]
    fn test_hunter_steers_toward_target() {
        let mut rng = rng();
        let mut hunter = Enemy::new(Vec2::ZERO, EnemyKind::Hunter, &mut rng);
        assert_eq!(hunter.body.vel, Vec2::ZERO);
        assert_eq!(hunter.point_value(), 300);

        hunter.set_target(Vec2::new(0.0, 100.0));
        hunter.update(0.1);
        assert!((hunter.body.vel - Vec2::new(0.0, 96.0)).length() < 1e-3);
        assert!((hunter.body.rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
        assert!((hunter.body.pos.y - 9.6).abs() < 1e-3);
    }

    #[test]
    fn test_hunter_without_target_coasts() {
        let mut rng = rng();
        let mut hunter = Enemy::new(Vec2::ZERO, EnemyKind::Hunter, &mut rng);
        hunter.set_target(Vec2::new(100.0, 0.0));
        hunter.update(0.1);
        let vel = hunter.body.vel;

        hunter.clear_target();
        for _ in 0..100 {
            hunter.update(0.1);
        }
        assert!((hunter.body.vel - vel).length() < 1e-4);
    }

    #[test]
    fn test_droid_rotation_follows_velocity() {
        let mut rng = rng();
        let mut droid = Enemy::new(Vec2::ZERO, EnemyKind::Droid, &mut rng);
        droid.update(0.016);
        let expected = droid.body.vel.y.atan2(droid.body.vel.x);
        assert!((droid.body.rotation - expected).abs() < 1e-5);
    }

    #[test]
    fn test_droid_wander_bounded() {
        let mut rng = rng();
        let mut droid = Enemy::new(Vec2::ZERO, EnemyKind::Droid, &mut rng);
        let before = droid.body.vel;
        // Step exactly one interval
        droid.update(droid.direction_interval());
        let after = droid.body.vel;
        assert!((after.length() - before.length()).abs() < 1e-3);
        let turn = before.angle_to(after).abs();
        assert!(turn <= FRAC_PI_4 + 1e-4);
    }

    #[test]
    fn test_interval_is_fixed_for_life() {
        let mut rng = rng();
        let mut droid = Enemy::new(Vec2::ZERO, EnemyKind::FastDroid, &mut rng);
        let interval = droid.direction_interval();
        for _ in 0..500 {
            droid.update(0.05);
        }
        assert_eq!(droid.direction_interval(), interval);
    }
}
