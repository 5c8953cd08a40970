//! Entity model
//!
//! Every simulated object carries a rigid [`Body`] (position, velocity,
//! rotation, collision radius, alive flag) plus a kind-specific payload.
//! The four kinds form a closed sum type; shared behavior dispatches on the
//! variant instead of going through trait objects.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::explosion::Explosion;
use super::ship::{Bullet, PlayerShip};

/// Stable entity identifier, assigned by the engine on spawn (0 = unassigned)
pub type EntityId = u32;

/// Shared rigid-body state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading in radians
    pub rotation: f32,
    /// Radians per second
    pub rotation_speed: f32,
    /// Collision circle radius (0 = never collides)
    pub radius: f32,
    pub alive: bool,
}

impl Body {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            id: 0,
            pos,
            vel: Vec2::ZERO,
            rotation: 0.0,
            rotation_speed: 0.0,
            radius,
            alive: true,
        }
    }

    /// Base integration step shared by every rigid entity
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.rotation += self.rotation_speed * dt;
    }
}

/// Rotate then translate local-space vertices into world space
pub fn transform_vertices(vertices: &[Vec2], rotation: f32, position: Vec2) -> Vec<Vec2> {
    let (sin, cos) = rotation.sin_cos();
    vertices
        .iter()
        .map(|v| Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos) + position)
        .collect()
}

/// Entity kind tag (for renderers and filtering)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityTag {
    Player,
    Bullet,
    Enemy,
    Explosion,
}

/// A simulated entity
#[derive(Debug, Clone)]
pub enum Entity {
    Player(PlayerShip),
    Bullet(Bullet),
    Enemy(Enemy),
    Explosion(Explosion),
}

impl Entity {
    pub fn body(&self) -> &Body {
        match self {
            Entity::Player(ship) => &ship.body,
            Entity::Bullet(bullet) => &bullet.body,
            Entity::Enemy(enemy) => &enemy.body,
            Entity::Explosion(explosion) => &explosion.body,
        }
    }

    pub fn body_mut(&mut self) -> &mut Body {
        match self {
            Entity::Player(ship) => &mut ship.body,
            Entity::Bullet(bullet) => &mut bullet.body,
            Entity::Enemy(enemy) => &mut enemy.body,
            Entity::Explosion(explosion) => &mut explosion.body,
        }
    }

    #[inline]
    pub fn id(&self) -> EntityId {
        self.body().id
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body().pos
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.body().radius
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.body().alive
    }

    pub fn kill(&mut self) {
        self.body_mut().alive = false;
    }

    pub fn tag(&self) -> EntityTag {
        match self {
            Entity::Player(_) => EntityTag::Player,
            Entity::Bullet(_) => EntityTag::Bullet,
            Entity::Enemy(_) => EntityTag::Enemy,
            Entity::Explosion(_) => EntityTag::Explosion,
        }
    }

    /// Whether this entity takes part in wall and entity collisions
    pub fn is_collidable(&self) -> bool {
        !matches!(self, Entity::Explosion(_)) && self.radius() > 0.0
    }

    /// Advance the entity by `dt` seconds. Dead entities are left untouched.
    pub fn update(&mut self, dt: f32) {
        if !self.is_alive() {
            return;
        }
        match self {
            Entity::Player(ship) => ship.update(dt),
            Entity::Bullet(bullet) => bullet.update(dt),
            Entity::Enemy(enemy) => enemy.update(dt),
            Entity::Explosion(explosion) => explosion.update(dt),
        }
    }

    /// Polygon in entity-local space (not rotated or translated)
    pub fn local_vertices(&self) -> &'static [Vec2] {
        match self {
            Entity::Player(_) => &PlayerShip::VERTICES,
            Entity::Bullet(_) => &Bullet::VERTICES,
            Entity::Enemy(enemy) => enemy.kind.vertices(),
            Entity::Explosion(_) => &[],
        }
    }

    /// Polygon in world space: local vertices rotated by the heading, then
    /// translated to the position
    pub fn transformed_vertices(&self) -> Vec<Vec2> {
        let body = self.body();
        transform_vertices(self.local_vertices(), body.rotation, body.pos)
    }

    pub fn as_player(&self) -> Option<&PlayerShip> {
        match self {
            Entity::Player(ship) => Some(ship),
            _ => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut PlayerShip> {
        match self {
            Entity::Player(ship) => Some(ship),
            _ => None,
        }
    }

    pub fn as_bullet(&self) -> Option<&Bullet> {
        match self {
            Entity::Bullet(bullet) => Some(bullet),
            _ => None,
        }
    }

    pub fn as_enemy(&self) -> Option<&Enemy> {
        match self {
            Entity::Enemy(enemy) => Some(enemy),
            _ => None,
        }
    }

    pub fn as_enemy_mut(&mut self) -> Option<&mut Enemy> {
        match self {
            Entity::Enemy(enemy) => Some(enemy),
            _ => None,
        }
    }

    pub fn as_explosion(&self) -> Option<&Explosion> {
        match self {
            Entity::Explosion(explosion) => Some(explosion),
            _ => None,
        }
    }
}

impl From<PlayerShip> for Entity {
    fn from(ship: PlayerShip) -> Self {
        Entity::Player(ship)
    }
}

impl From<Bullet> for Entity {
    fn from(bullet: Bullet) -> Self {
        Entity::Bullet(bullet)
    }
}

impl From<Enemy> for Entity {
    fn from(enemy: Enemy) -> Self {
        Entity::Enemy(enemy)
    }
}

impl From<Explosion> for Entity {
    fn from(explosion: Explosion) -> Self {
        Entity::Explosion(explosion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity_transform_round_trip() {
        let ship = Entity::from(PlayerShip::new(Vec2::ZERO));
        let mut entity = ship;
        entity.body_mut().rotation = 0.0;
        let transformed = entity.transformed_vertices();
        assert_eq!(transformed.as_slice(), entity.local_vertices());
    }

    #[test]
    fn test_transform_rotates_then_translates() {
        let verts = [Vec2::new(1.0, 0.0)];
        let out = transform_vertices(&verts, FRAC_PI_2, Vec2::new(10.0, 10.0));
        assert!((out[0].x - 10.0).abs() < 1e-5);
        assert!((out[0].y - 11.0).abs() < 1e-5);
    }

    #[test]
    fn test_base_integration() {
        let mut body = Body::new(Vec2::new(1.0, 2.0), 5.0);
        body.vel = Vec2::new(10.0, -20.0);
        body.rotation_speed = 2.0;
        body.integrate(0.5);
        assert_eq!(body.pos, Vec2::new(6.0, -8.0));
        assert!((body.rotation - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_dead_entity_does_not_move() {
        let mut entity = Entity::from(Bullet::new(Vec2::ZERO, Vec2::X));
        entity.kill();
        entity.update(0.1);
        assert_eq!(entity.pos(), Vec2::ZERO);
    }

    #[test]
    fn test_explosion_is_not_collidable() {
        let mut rng = rand_pcg::Pcg32::new(1, 1);
        let entity = Entity::from(Explosion::new(Vec2::ZERO, 12, 150.0, &mut rng));
        assert!(!entity.is_collidable());
        assert!(entity.local_vertices().is_empty());
        assert_eq!(entity.tag(), EntityTag::Explosion);
    }

    proptest! {
        #[test]
        fn prop_zero_rotation_origin_is_identity(
            xs in proptest::collection::vec((-100.0f32..100.0, -100.0f32..100.0), 0..12)
        ) {
            let verts: Vec<Vec2> = xs.iter().map(|&(x, y)| Vec2::new(x, y)).collect();
            let out = transform_vertices(&verts, 0.0, Vec2::ZERO);
            prop_assert_eq!(out, verts);
        }
    }
}
