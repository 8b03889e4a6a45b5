//! Sound effect mapping
//!
//! The simulation never plays audio. It emits `GameEvent`s; this module turns
//! them into sound effects and hands them to whatever sink the host provides.

use crate::consts::MAX_POWER;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Two balls knock together
    BallStrike,
    /// Ball drops into a pocket
    Pot,
    /// Cue hits the cue ball
    CueStrike,
}

impl SoundEffect {
    /// Effect for an event, with a 0-1 intensity. Events without a sound
    /// map to `None`.
    pub fn from_event(event: &GameEvent) -> Option<(SoundEffect, f32)> {
        match event {
            GameEvent::BallStrike { .. } => Some((SoundEffect::BallStrike, 1.0)),
            GameEvent::Pot { .. } => Some((SoundEffect::Pot, 1.0)),
            GameEvent::CueStrike { power, .. } => {
                Some((SoundEffect::CueStrike, (power / MAX_POWER).clamp(0.1, 1.0)))
            }
            _ => None,
        }
    }
}

/// Something that can actually make noise
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink {
    pub played: usize,
}

impl SoundSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        self.played += 1;
        log::debug!("sound {:?} at {:.2}", effect, volume);
    }
}

/// Audio manager for the game
pub struct AudioManager<S: SoundSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<S: SoundSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play the sounds for a batch of events
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        for (effect, intensity) in events.iter().filter_map(SoundEffect::from_event) {
            self.sink.play(effect, vol * intensity);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
