//! Audio sink seam
//!
//! The simulation never plays sound itself. It fires these triggers and moves
//! on; playback lives in whatever sink the driver plugs in.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fired a bullet
    Shoot,
    /// Enemy or player destroyed
    Explosion,
    /// Thruster loop started
    ThrusterOn,
    /// Thruster loop stopped
    ThrusterOff,
}

/// Fire-and-forget sound triggers
pub trait AudioSink {
    fn play_shoot(&mut self);
    fn play_explosion(&mut self);
    /// Start or stop the looping thruster sound
    fn play_thruster(&mut self, is_thrusting: bool);

    /// Dispatch a [`SoundEffect`] to the matching trigger
    fn play(&mut self, effect: SoundEffect) {
        match effect {
            SoundEffect::Shoot => self.play_shoot(),
            SoundEffect::Explosion => self.play_explosion(),
            SoundEffect::ThrusterOn => self.play_thruster(true),
            SoundEffect::ThrusterOff => self.play_thruster(false),
        }
    }
}

/// Discards every trigger
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play_shoot(&mut self) {}
    fn play_explosion(&mut self) {}
    fn play_thruster(&mut self, _is_thrusting: bool) {}
}

/// Logs each trigger at debug level (headless runs)
#[derive(Debug, Clone, Default)]
pub struct LogAudio {
    muted: bool,
    thruster_on: bool,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn thruster_on(&self) -> bool {
        self.thruster_on
    }
}

impl AudioSink for LogAudio {
    fn play_shoot(&mut self) {
        if !self.muted {
            log::debug!("sfx: shoot");
        }
    }

    fn play_explosion(&mut self) {
        if !self.muted {
            log::debug!("sfx: explosion");
        }
    }

    fn play_thruster(&mut self, is_thrusting: bool) {
        if self.thruster_on == is_thrusting {
            return;
        }
        self.thruster_on = is_thrusting;
        if !self.muted {
            log::debug!("sfx: thruster {}", if is_thrusting { "on" } else { "off" });
        }
    }
}
