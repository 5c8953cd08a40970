//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod arena;
pub mod collision;
pub mod enemy;
pub mod entity;
pub mod explosion;
pub mod ship;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use arena::{Arena, WallHit, WallSurface};
pub use collision::{check_collision, find_collisions, handle_wall_collision};
pub use enemy::{Enemy, EnemyKind};
pub use entity::{Body, Entity, EntityId, EntityTag, transform_vertices};
pub use explosion::{Explosion, Particle};
pub use ship::{Bullet, PlayerShip};
pub use snapshot::{ArenaView, EntityDetail, EntityView, FrameSnapshot};
pub use state::{GamePhase, GameState};
pub use tick::{GameEngine, InputSource, TickInput, TickOutcome, wave_composition};
