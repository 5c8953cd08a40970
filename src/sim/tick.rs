//! Per-frame simulation tick
//!
//! The engine owns every entity and the run state. A driver calls
//! [`GameEngine::update`] once per frame; each tick runs to completion:
//! respawn, input, integration + walls, hunter targeting, bullet hits,
//! player hits, sweep, wave completion.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::collision::{check_collision, find_collisions, handle_wall_collision};
use super::enemy::{Enemy, EnemyKind};
use super::entity::{Entity, EntityId, EntityTag};
use super::explosion::Explosion;
use super::ship::{Bullet, PlayerShip};
use super::snapshot::FrameSnapshot;
use super::state::GameState;
use crate::audio::{AudioSink, SilentAudio, SoundEffect};
use crate::consts::*;
use crate::settings::Settings;

/// Held player intents, polled once per tick
pub trait InputSource {
    fn rotating_left(&self) -> bool;
    fn rotating_right(&self) -> bool;
    fn thrusting(&self) -> bool;
    fn firing(&self) -> bool;
    /// Release everything that is held
    fn reset(&mut self);
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub fire: bool,
}

impl InputSource for TickInput {
    fn rotating_left(&self) -> bool {
        self.rotate_left
    }

    fn rotating_right(&self) -> bool {
        self.rotate_right
    }

    fn thrusting(&self) -> bool {
        self.thrust
    }

    fn firing(&self) -> bool {
        self.fire
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// What a call to [`GameEngine::update`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running, paused, or already over; nothing advanced
    Skipped,
    /// The tick completed and the run goes on
    Continued,
    /// The player lost their last life during this tick
    GameOver,
}

/// Enemy kinds for a wave, in spawn order.
///
/// `2 + wave` enemies. From wave 3 the first slot is a hunter; from wave 2
/// the next `count / 2` slots are fast droids; the rest are droids.
pub fn wave_composition(wave: u32) -> Vec<EnemyKind> {
    let count = 2 + wave as usize;
    let hunters = usize::from(wave >= 3);
    let fast = if wave >= 2 { count / 2 } else { 0 };

    (0..count)
        .map(|slot| {
            if slot < hunters {
                EnemyKind::Hunter
            } else if slot < hunters + fast {
                EnemyKind::FastDroid
            } else {
                EnemyKind::Droid
            }
        })
        .collect()
}

fn live_player_mut(entities: &mut [Entity]) -> Option<&mut PlayerShip> {
    entities
        .iter_mut()
        .filter(|e| e.is_alive())
        .find_map(Entity::as_player_mut)
}

/// The simulation core
pub struct GameEngine<I = TickInput, A = SilentAudio> {
    input: I,
    audio: A,
    arena: Arena,
    state: GameState,
    /// Every entity, in spawn order
    entities: Vec<Entity>,
    rng: Pcg32,
    next_id: EntityId,
    respawning: bool,
    respawn_timer: f32,
    was_thrusting: bool,
}

impl GameEngine {
    /// Engine with plain tick input and no audio
    pub fn with_seed(seed: u64) -> Self {
        Self::new(TickInput::default(), SilentAudio, seed)
    }
}

impl<I: InputSource, A: AudioSink> GameEngine<I, A> {
    pub fn new(input: I, audio: A, seed: u64) -> Self {
        Self {
            input,
            audio,
            arena: Arena::default(),
            state: GameState::new(),
            entities: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            respawning: false,
            respawn_timer: 0.0,
            was_thrusting: false,
        }
    }

    pub fn from_settings(settings: &Settings, input: I, audio: A) -> Self {
        let mut engine = Self::new(input, audio, settings.seed);
        engine.set_arena_size(settings.arena_width, settings.arena_height);
        engine
    }

    // === Read-only views for renderers and HUDs ===

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Every entity, in spawn order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn player(&self) -> Option<&PlayerShip> {
        self.entities
            .iter()
            .filter(|e| e.is_alive())
            .find_map(Entity::as_player)
    }

    pub fn bullets(&self) -> impl Iterator<Item = &Bullet> {
        self.entities.iter().filter_map(Entity::as_bullet)
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.entities.iter().filter_map(Entity::as_enemy)
    }

    pub fn explosions(&self) -> impl Iterator<Item = &Explosion> {
        self.entities.iter().filter_map(Entity::as_explosion)
    }

    /// Whether the player is waiting to respawn
    pub fn is_respawning(&self) -> bool {
        self.respawning
    }

    /// Whether the live player is thrusting (thrust flame)
    pub fn is_thrusting(&self) -> bool {
        self.was_thrusting
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    /// Copy the current frame for an external renderer
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.arena, &self.state, &self.entities, self.was_thrusting)
    }

    // === Lifecycle ===

    /// Resize the arena to a new viewport
    pub fn set_arena_size(&mut self, width: f32, height: f32) {
        self.arena = Arena::new(width, height);
    }

    /// Begin a run. A fresh run spawns the player and the first wave; a run
    /// that was stopped picks up where it left off.
    pub fn start(&mut self) {
        if !self.state.start() {
            return;
        }
        if self.entities.is_empty() {
            self.spawn_player();
            self.spawn_wave();
        }
        log::info!("Run started (wave {})", self.state.wave);
    }

    pub fn stop(&mut self) {
        self.state.stop();
    }

    pub fn pause(&mut self) {
        if self.state.pause() {
            log::debug!("Paused");
        }
    }

    pub fn resume(&mut self) {
        if self.state.resume() {
            log::debug!("Resumed");
        }
    }

    /// Pause key: flips between paused and running, ignored once game over
    pub fn toggle_pause(&mut self) {
        if self.state.is_game_over() {
            return;
        }
        if self.state.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Drop every entity and return to an idle, fresh run
    pub fn reset(&mut self) {
        self.entities.clear();
        self.respawning = false;
        self.respawn_timer = 0.0;
        if self.was_thrusting {
            self.audio.play(SoundEffect::ThrusterOff);
            self.was_thrusting = false;
        }
        self.state.reset();
        self.input.reset();
        log::info!("Run reset");
    }

    /// Reset, then start a new run
    pub fn restart(&mut self) {
        self.reset();
        self.start();
    }

    // === Tick ===

    /// Advance the simulation by one frame
    pub fn update(&mut self, dt: f32) -> TickOutcome {
        if !self.state.is_active() {
            return TickOutcome::Skipped;
        }

        self.handle_respawn(dt);
        self.handle_input(dt);
        self.update_entities(dt);
        self.update_hunter_targets();
        self.resolve_bullet_hits();
        let game_over = self.resolve_player_hit();
        self.sweep();
        self.check_wave_complete();

        if game_over {
            TickOutcome::GameOver
        } else {
            TickOutcome::Continued
        }
    }

    fn handle_respawn(&mut self, dt: f32) {
        if !self.respawning {
            return;
        }
        self.respawn_timer -= dt;
        if self.respawn_timer <= 0.0 {
            self.respawning = false;
            self.respawn_timer = 0.0;
            self.spawn_player();
            log::debug!("Player respawned");
        }
    }

    fn handle_input(&mut self, dt: f32) {
        let rotate_left = self.input.rotating_left();
        let rotate_right = self.input.rotating_right();
        let thrusting = self.input.thrusting();
        let firing = self.input.firing();

        let Some(player) = live_player_mut(&mut self.entities) else {
            return;
        };

        if rotate_left {
            player.rotate_left(dt);
        }
        if rotate_right {
            player.rotate_right(dt);
        }
        if thrusting {
            player.thrust(dt);
        }
        let bullet = if firing { player.fire() } else { None };

        if thrusting != self.was_thrusting {
            self.audio.play(if thrusting {
                SoundEffect::ThrusterOn
            } else {
                SoundEffect::ThrusterOff
            });
            self.was_thrusting = thrusting;
        }

        if let Some(bullet) = bullet {
            self.spawn(bullet.into());
            self.audio.play(SoundEffect::Shoot);
        }
    }

    fn update_entities(&mut self, dt: f32) {
        for entity in &mut self.entities {
            if !entity.is_alive() {
                continue;
            }
            entity.update(dt);
            handle_wall_collision(entity, &self.arena);
        }
    }

    /// Hunters chase the live player's current position, or lose their target
    fn update_hunter_targets(&mut self) {
        let target = self.player().map(|p| p.body.pos);
        for enemy in self.entities.iter_mut().filter_map(Entity::as_enemy_mut) {
            if enemy.kind != EnemyKind::Hunter || !enemy.body.alive {
                continue;
            }
            match target {
                Some(pos) => enemy.set_target(pos),
                None => enemy.clear_target(),
            }
        }
    }

    /// Each live bullet destroys at most the first live enemy it overlaps
    fn resolve_bullet_hits(&mut self) {
        for b in 0..self.entities.len() {
            if self.entities[b].tag() != EntityTag::Bullet || !self.entities[b].is_alive() {
                continue;
            }
            for e in 0..self.entities.len() {
                if self.entities[e].tag() != EntityTag::Enemy {
                    continue;
                }
                if !check_collision(&self.entities[b], &self.entities[e]) {
                    continue;
                }

                let enemy_pos = self.entities[e].pos();
                let points = self.entities[e].as_enemy().map_or(0, Enemy::point_value);
                self.entities[b].kill();
                self.entities[e].kill();
                self.state.add_score(points);
                self.audio.play(SoundEffect::Explosion);
                self.spawn_explosion(enemy_pos, EXPLOSION_PARTICLES, EXPLOSION_SPEED);
                log::debug!("Enemy destroyed (+{}), score {}", points, self.state.score);
                break;
            }
        }
    }

    /// A vulnerable player dies on the first enemy it touches.
    /// Returns true if that cost the last life.
    fn resolve_player_hit(&mut self) -> bool {
        let hit = {
            let players = self
                .entities
                .iter()
                .filter(|e| matches!(e, Entity::Player(ship) if !ship.is_invulnerable()));
            let enemies = self.entities.iter().filter(|e| e.tag() == EntityTag::Enemy);
            find_collisions(players, enemies)
                .first()
                .map(|(player, enemy)| (player.id(), enemy.id(), player.pos(), enemy.pos()))
        };
        let Some((player_id, enemy_id, player_pos, enemy_pos)) = hit else {
            return false;
        };

        for entity in &mut self.entities {
            if entity.id() == player_id || entity.id() == enemy_id {
                entity.kill();
            }
        }
        self.audio.play(SoundEffect::Explosion);
        self.audio.play(SoundEffect::ThrusterOff);
        self.was_thrusting = false;
        self.spawn_explosion(player_pos, SHIP_EXPLOSION_PARTICLES, SHIP_EXPLOSION_SPEED);
        self.spawn_explosion(enemy_pos, EXPLOSION_PARTICLES, EXPLOSION_SPEED);

        self.player_died()
    }

    fn player_died(&mut self) -> bool {
        let game_over = self.state.lose_life();
        if game_over {
            log::info!(
                "Game over: score {} on wave {}",
                self.state.score,
                self.state.wave
            );
        } else {
            self.respawning = true;
            self.respawn_timer = RESPAWN_DELAY;
            log::info!("Player destroyed, {} lives left", self.state.lives);
        }
        game_over
    }

    fn sweep(&mut self) {
        self.entities.retain(Entity::is_alive);
    }

    fn check_wave_complete(&mut self) {
        if self.respawning {
            return;
        }
        if self.enemies().next().is_none() {
            self.state.next_wave();
            self.spawn_wave();
        }
    }

    // === Spawning ===

    /// Assign an id and append to the entity list
    fn spawn(&mut self, mut entity: Entity) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        entity.body_mut().id = id;
        self.entities.push(entity);
        id
    }

    fn spawn_player(&mut self) {
        let ship = PlayerShip::new(self.arena.player_start_position());
        self.spawn(ship.into());
    }

    fn spawn_wave(&mut self) {
        let avoid: Option<Vec2> = self.player().map(|p| p.body.pos);
        let kinds = wave_composition(self.state.wave);
        let count = kinds.len();
        for kind in kinds {
            let pos = self
                .arena
                .random_spawn_position(&mut self.rng, avoid, SPAWN_SAFE_DISTANCE);
            let enemy = Enemy::new(pos, kind, &mut self.rng);
            self.spawn(enemy.into());
        }
        log::info!("Wave {}: {} enemies", self.state.wave, count);
    }

    fn spawn_explosion(&mut self, pos: Vec2, particles: usize, speed: f32) {
        let explosion = Explosion::new(pos, particles, speed, &mut self.rng);
        self.spawn(explosion.into());
    }
}
