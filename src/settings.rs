//! Run settings
//!
//! Loaded from an optional JSON file. Missing fields take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ARENA_HEIGHT, DEFAULT_ARENA_WIDTH, MAX_FRAME_DT};

/// Smallest arena edge that still leaves a drivable band
const MIN_ARENA_EXTENT: f32 = 400.0;

/// Run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    /// Viewport width the arena is sized to
    pub arena_width: f32,
    /// Viewport height the arena is sized to
    pub arena_height: f32,

    // === Simulation ===
    /// Seed for the engine's RNG
    pub seed: u64,
    /// Upper bound on a frame's delta time (seconds)
    pub max_frame_dt: f32,

    // === Demo driver ===
    /// Frame step (seconds)
    pub frame_dt: f32,
    /// Frames to run before exiting
    pub demo_frames: u32,
    /// Silence the logged sound triggers
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: DEFAULT_ARENA_WIDTH,
            arena_height: DEFAULT_ARENA_HEIGHT,

            seed: 0x5EED_0C7A,
            max_frame_dt: MAX_FRAME_DT,

            frame_dt: 1.0 / 60.0,
            demo_frames: 3600,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults on any error
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Cannot read settings {}: {err}; using defaults", path.display());
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.validated()
            }
            Err(err) => {
                log::warn!("Invalid settings {}: {err}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Replace out-of-range values with usable ones
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        if !(self.arena_width.is_finite() && self.arena_width > 0.0) {
            self.arena_width = defaults.arena_width;
        }
        if !(self.arena_height.is_finite() && self.arena_height > 0.0) {
            self.arena_height = defaults.arena_height;
        }
        self.arena_width = self.arena_width.max(MIN_ARENA_EXTENT);
        self.arena_height = self.arena_height.max(MIN_ARENA_EXTENT);

        if !(self.max_frame_dt.is_finite() && self.max_frame_dt > 0.0) {
            self.max_frame_dt = defaults.max_frame_dt;
        }
        if !(self.frame_dt.is_finite() && self.frame_dt > 0.0) {
            self.frame_dt = defaults.frame_dt;
        }

        self
    }

    /// Frame step after the delta-time cap
    pub fn effective_frame_dt(&self) -> f32 {
        self.frame_dt.min(self.max_frame_dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.arena_width, 800.0);
        assert_eq!(settings.arena_height, 600.0);
        assert_eq!(settings.max_frame_dt, 0.1);
        assert_eq!(settings.demo_frames, 3600);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "demo_frames": 10 }"#).unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.demo_frames, 10);
        assert_eq!(settings.arena_width, 800.0);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Settings::from_json("{ seed: ").is_err());
        assert!(Settings::from_json(r#"{ "seed": "many" }"#).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.seed = 99;
        settings.muted = true;
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_validated_sanitizes() {
        let settings = Settings {
            arena_width: -5.0,
            arena_height: 100.0,
            max_frame_dt: 0.0,
            frame_dt: f32::NAN,
            ..Settings::default()
        }
        .validated();
        assert_eq!(settings.arena_width, 800.0);
        assert_eq!(settings.arena_height, MIN_ARENA_EXTENT);
        assert_eq!(settings.max_frame_dt, MAX_FRAME_DT);
        assert_eq!(settings.frame_dt, 1.0 / 60.0);
    }

    #[test]
    fn test_effective_frame_dt_is_capped() {
        let settings = Settings {
            frame_dt: 0.5,
            ..Settings::default()
        };
        assert_eq!(settings.effective_frame_dt(), MAX_FRAME_DT);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let settings = Settings::load("/nonexistent/vector-arena/settings.json");
        assert_eq!(settings, Settings::default());
    }
}
