//! Render snapshot
//!
//! A renderer never holds the engine while drawing. It takes a copy of the
//! frame here, then draws from the copy.

use glam::Vec2;
use serde::Serialize;

use super::arena::Arena;
use super::enemy::EnemyKind;
use super::entity::{Entity, EntityId, EntityTag};
use super::state::GameState;

/// Kind-specific display attributes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityDetail {
    Player {
        invulnerable: bool,
        /// Remaining fraction of the invulnerability window (blink rate)
        invulnerability_progress: f32,
        thrusting: bool,
    },
    Bullet,
    Enemy {
        enemy_kind: EnemyKind,
    },
    Explosion {
        progress: f32,
        /// (start, end) of each particle streak
        streaks: Vec<(Vec2, Vec2)>,
    },
}

/// One live entity, in world coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    pub id: EntityId,
    pub tag: EntityTag,
    pub pos: Vec2,
    pub rotation: f32,
    /// Polygon outline (empty for explosions)
    pub vertices: Vec<Vec2>,
    pub detail: EntityDetail,
}

impl EntityView {
    fn new(entity: &Entity, thrusting: bool) -> Self {
        let body = entity.body();
        let detail = match entity {
            Entity::Player(ship) => EntityDetail::Player {
                invulnerable: ship.is_invulnerable(),
                invulnerability_progress: ship.invulnerability_progress(),
                thrusting,
            },
            Entity::Bullet(_) => EntityDetail::Bullet,
            Entity::Enemy(enemy) => EntityDetail::Enemy {
                enemy_kind: enemy.kind,
            },
            Entity::Explosion(explosion) => EntityDetail::Explosion {
                progress: explosion.progress(),
                streaks: explosion
                    .particles
                    .iter()
                    .map(|p| (p.start_point(), p.end_point()))
                    .collect(),
            },
        };

        Self {
            id: body.id,
            tag: entity.tag(),
            pos: body.pos,
            rotation: body.rotation,
            vertices: entity.transformed_vertices(),
            detail,
        }
    }
}

/// Arena outlines for drawing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArenaView {
    pub width: f32,
    pub height: f32,
    pub outer: [Vec2; 8],
    pub inner: [Vec2; 8],
    pub obstacle: [Vec2; 8],
}

impl From<&Arena> for ArenaView {
    fn from(arena: &Arena) -> Self {
        Self {
            width: arena.width,
            height: arena.height,
            outer: arena.outer_boundary(),
            inner: arena.inner_boundary(),
            obstacle: arena.central_obstacle(),
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub arena: ArenaView,
    pub state: GameState,
    /// HUD status line (empty while running)
    pub status: String,
    pub entities: Vec<EntityView>,
}

impl FrameSnapshot {
    /// Copy the live entities plus HUD data
    pub fn capture(arena: &Arena, state: &GameState, entities: &[Entity], thrusting: bool) -> Self {
        let entities = entities
            .iter()
            .filter(|e| e.is_alive())
            .map(|e| EntityView::new(e, thrusting))
            .collect();

        Self {
            arena: ArenaView::from(arena),
            state: state.clone(),
            status: state.status_message(),
            entities,
        }
    }

    pub fn count(&self, tag: EntityTag) -> usize {
        self.entities.iter().filter(|e| e.tag == tag).count()
    }
}
