//! Run state: score, lives, wave and the run phase machine

use serde::{Deserialize, Serialize};

use crate::consts::STARTING_LIVES;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting to start (initial, and after a reset or stop)
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Simulation frozen
    Paused,
    /// Out of lives; only a reset leaves this phase
    GameOver,
}

/// Score/lives/wave counters plus the run phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub score: u64,
    pub lives: u32,
    /// Current wave (1-based)
    pub wave: u32,
    pub phase: GamePhase,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            score: 0,
            lives: STARTING_LIVES,
            wave: 1,
            phase: GamePhase::Idle,
        }
    }

    /// Clear all counters and return to idle
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self.phase, GamePhase::Running | GamePhase::Paused)
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Whether a tick should advance the simulation
    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Idle -> Running. Returns false if the run was not idle.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Idle {
            return false;
        }
        self.phase = GamePhase::Running;
        true
    }

    /// Running/Paused -> Idle, keeping counters
    pub fn stop(&mut self) {
        if self.is_running() {
            self.phase = GamePhase::Idle;
        }
    }

    /// Running -> Paused
    pub fn pause(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        self.phase = GamePhase::Paused;
        true
    }

    /// Paused -> Running
    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::Paused {
            return false;
        }
        self.phase = GamePhase::Running;
        true
    }

    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Lose a life; at zero the run ends. Returns true on game over.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
        }
        self.is_game_over()
    }

    pub fn next_wave(&mut self) {
        self.wave += 1;
    }

    /// HUD status line for the current phase
    pub fn status_message(&self) -> String {
        match self.phase {
            GamePhase::Idle => "Press SPACE to start".to_string(),
            GamePhase::Running => String::new(),
            GamePhase::Paused => "PAUSED - Press P to continue".to_string(),
            GamePhase::GameOver => {
                format!("GAME OVER - Score: {} - Press R to restart", self.score)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = GameState::new();
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.wave, 1);
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(!state.is_running());
    }

    #[test]
    fn test_phase_transitions() {
        let mut state = GameState::new();
        assert!(!state.pause(), "cannot pause before starting");
        assert!(state.start());
        assert!(!state.start());
        assert!(state.pause());
        assert!(state.is_running() && state.is_paused());
        assert!(!state.is_active());
        assert!(state.resume());
        assert!(state.is_active());
        state.stop();
        assert_eq!(state.phase, GamePhase::Idle);
    }

    #[test]
    fn test_lives_run_out() {
        let mut state = GameState::new();
        state.start();
        assert!(!state.lose_life());
        assert!(!state.lose_life());
        assert!(state.lose_life());
        assert_eq!(state.lives, 0);
        assert!(state.is_game_over());
        assert!(!state.is_running());

        // Game over is terminal until reset
        assert!(!state.pause());
        assert!(!state.resume());
        assert!(!state.start());
        state.stop();
        assert!(state.is_game_over());
        assert!(state.lose_life());
        assert_eq!(state.lives, 0);

        state.reset();
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_score_accumulates() {
        let mut state = GameState::new();
        state.add_score(100);
        state.add_score(0);
        state.add_score(300);
        assert_eq!(state.score, 400);
    }

    #[test]
    fn test_status_message() {
        let mut state = GameState::new();
        assert_eq!(state.status_message(), "Press SPACE to start");
        state.start();
        assert!(state.status_message().is_empty());
        state.pause();
        assert_eq!(state.status_message(), "PAUSED - Press P to continue");
        state.phase = GamePhase::GameOver;
        state.score = 1200;
        assert_eq!(state.status_message(), "GAME OVER - Score: 1200 - Press R to restart");
    }
}
