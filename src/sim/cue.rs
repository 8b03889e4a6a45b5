//! Cue stick controller
//!
//! Holding the primary button charges power, releasing fires. After a shot
//! the cue stays `Released` until the match repositions it on the settled
//! cue ball.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::angle_between;
use crate::consts::*;

/// Cue state machine: `Idle -> Charging -> Released -> Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CuePhase {
    /// Aiming, no power stored
    Idle,
    /// Button held, power building
    Charging,
    /// Shot fired, waiting for the table to settle
    Released,
}

/// A released stroke
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub power: f32,
    /// Radians, pointing from the cue ball toward the pointer
    pub angle: f32,
}

/// The player's cue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cue {
    /// Tip position (sits on the cue ball)
    pub pos: Vec2,
    /// Aim angle in radians
    pub rotation: f32,
    /// Horizontal sprite anchor; grows as the cue is drawn back
    pub anchor: f32,
    power: f32,
    phase: CuePhase,
    max_power: f32,
    power_step: f32,
}

impl Cue {
    pub fn new(pos: Vec2, max_power: f32, power_step: f32) -> Self {
        Self {
            pos,
            rotation: 0.0,
            anchor: CUE_ANCHOR_REST,
            power: 0.0,
            phase: CuePhase::Idle,
            max_power,
            power_step,
        }
    }

    pub fn power(&self) -> f32 {
        self.power
    }

    pub fn phase(&self) -> CuePhase {
        self.phase
    }

    pub fn max_power(&self) -> f32 {
        self.max_power
    }

    /// Sprite anchor point for rendering
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.anchor, CUE_ANCHOR_Y)
    }

    /// Poll one tick of input. Returns the shot on the tick the button is
    /// released with power stored.
    pub fn update(&mut self, pointer: Vec2, button_down: bool) -> Option<Shot> {
        if self.phase == CuePhase::Released {
            return None;
        }

        self.rotation = angle_between(self.pos, pointer);

        if button_down {
            self.charge();
            return None;
        }

        if self.power > 0.0 {
            return Some(self.release());
        }
        None
    }

    /// Add one step of power, never past the maximum
    fn charge(&mut self) {
        self.phase = CuePhase::Charging;
        if self.power >= self.max_power {
            return;
        }
        self.power = (self.power + self.power_step).min(self.max_power);
        self.anchor += CUE_ANCHOR_PULL;
    }

    fn release(&mut self) -> Shot {
        let shot = Shot {
            power: self.power,
            angle: self.rotation,
        };
        log::info!("Cue released: power {:.0}, angle {:.3}", shot.power, shot.angle);

        self.power = 0.0;
        self.anchor = CUE_ANCHOR_STRUCK;
        self.phase = CuePhase::Released;
        shot
    }

    /// Put the cue back on the cue ball, ready for the next shot
    pub fn reposition(&mut self, pos: Vec2) {
        self.pos = pos;
        self.anchor = CUE_ANCHOR_REST;
        self.power = 0.0;
        self.phase = CuePhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cue() -> Cue {
        Cue::new(CUE_BALL_SPOT, MAX_POWER, POWER_STEP)
    }

    #[test]
    fn test_idle_tracks_pointer() {
        let mut cue = cue();
        let pointer = CUE_BALL_SPOT + Vec2::new(0.0, 100.0);
        assert_eq!(cue.update(pointer, false), None);
        assert_eq!(cue.phase(), CuePhase::Idle);
        assert!((cue.rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_charge_then_release() {
        let mut cue = cue();
        let pointer = CUE_BALL_SPOT + Vec2::new(100.0, 0.0);

        for _ in 0..3 {
            assert_eq!(cue.update(pointer, true), None);
        }
        assert_eq!(cue.phase(), CuePhase::Charging);
        assert_eq!(cue.power(), 3.0 * POWER_STEP);
        assert_eq!(cue.anchor, CUE_ANCHOR_REST + 3.0 * CUE_ANCHOR_PULL);

        let shot = cue.update(pointer, false).unwrap();
        assert_eq!(shot.power, 3.0 * POWER_STEP);
        assert!(shot.angle.abs() < 1e-5);
        assert_eq!(cue.phase(), CuePhase::Released);
        assert_eq!(cue.power(), 0.0);
        assert_eq!(cue.anchor, CUE_ANCHOR_STRUCK);
    }

    #[test]
    fn test_power_clamped_at_max() {
        let mut cue = cue();
        for _ in 0..500 {
            cue.update(Vec2::ZERO, true);
            assert!(cue.power() <= MAX_POWER);
        }
        assert_eq!(cue.power(), MAX_POWER);
    }

    #[test]
    fn test_released_ignores_input_until_reposition() {
        let mut cue = cue();
        cue.update(Vec2::ZERO, true);
        assert!(cue.update(Vec2::ZERO, false).is_some());

        // Held button does nothing while released
        for _ in 0..5 {
            assert_eq!(cue.update(Vec2::ZERO, true), None);
        }
        assert_eq!(cue.power(), 0.0);

        let spot = Vec2::new(600.0, 300.0);
        cue.reposition(spot);
        assert_eq!(cue.phase(), CuePhase::Idle);
        assert_eq!(cue.pos, spot);
        assert_eq!(cue.anchor, CUE_ANCHOR_REST);
    }

    #[test]
    fn test_release_without_power_is_noop() {
        let mut cue = cue();
        assert_eq!(cue.update(Vec2::ZERO, false), None);
        assert_eq!(cue.phase(), CuePhase::Idle);
    }
}
