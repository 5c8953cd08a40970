//! Collision detection and response
//!
//! Entities collide as circles; their polygons are cosmetic. Walls are
//! resolved by reflecting velocity and nudging the entity back inside.

use super::arena::{Arena, WallHit};
use super::entity::Entity;
use crate::consts::WALL_PUSH_OUT;

/// Two entities collide if both are alive and their circles overlap
pub fn check_collision(a: &Entity, b: &Entity) -> bool {
    if !a.is_alive() || !b.is_alive() {
        return false;
    }
    a.pos().distance(b.pos()) < a.radius() + b.radius()
}

/// Bounce an entity off the arena walls.
///
/// Non-collidable entities (explosions) and dead entities are skipped.
/// Returns the wall contact, if any.
pub fn handle_wall_collision(entity: &mut Entity, arena: &Arena) -> Option<WallHit> {
    if !entity.is_alive() || !entity.is_collidable() {
        return None;
    }
    let body = entity.body_mut();
    let hit = arena.check_wall_collision(body.pos, body.radius)?;
    body.vel = arena.reflect_velocity(body.vel, hit.normal);
    body.pos += hit.normal * WALL_PUSH_OUT;
    Some(hit)
}

/// Every colliding pair between two collections.
///
/// Dead entities are skipped, as is an entity paired with itself when the
/// two collections overlap.
pub fn find_collisions<'a, A, B>(group_a: A, group_b: B) -> Vec<(&'a Entity, &'a Entity)>
where
    A: IntoIterator<Item = &'a Entity>,
    B: IntoIterator<Item = &'a Entity> + Clone,
{
    let mut pairs = Vec::new();
    for a in group_a {
        if !a.is_alive() {
            continue;
        }
        for b in group_b.clone() {
            if !b.is_alive() || std::ptr::eq(a, b) {
                continue;
            }
            if check_collision(a, b) {
                pairs.push((a, b));
            }
        }
    }
    pairs
}
