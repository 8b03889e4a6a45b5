//! Ball bodies
//!
//! Every ball is the same size and mass. A pocketed ball stays in the roster
//! so it can be re-spotted; it is parked off the table and skipped by
//! integration and collision.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;
use crate::polar_to_cartesian;

/// Where pocketed balls are parked. Collision never looks at this; it goes
/// by the `pocketed` flag.
pub const HIDDEN_POS: Vec2 = Vec2::new(-100.0, -100.0);

/// Role of a ball in the rack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallKind {
    /// The only ball the cue may strike
    Cue,
    Object,
}

/// Display identity, ignored by the physics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BallColor {
    White,
    Black,
}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub kind: BallKind,
    pub color: BallColor,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub moving: bool,
    pub pocketed: bool,
    /// Rack position, used when re-spotting
    pub spot: Vec2,
}

impl Ball {
    pub fn new(id: u32, kind: BallKind, color: BallColor, spot: Vec2) -> Self {
        Self {
            id,
            kind,
            color,
            pos: spot,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            moving: false,
            pocketed: false,
            spot,
        }
    }

    pub fn is_cue(&self) -> bool {
        self.kind == BallKind::Cue
    }

    /// On the table and taking part in collisions
    #[inline]
    pub fn in_play(&self) -> bool {
        !self.pocketed
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Advance one step: move, then bleed off speed. Once both velocity
    /// components drop under `STOP_EPS` the ball stops dead; this snap is what
    /// lets a shot ever finish.
    pub fn update(&mut self, dt: f32) -> Result<(), SimError> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SimError::NonPositiveDelta(dt));
        }
        if self.pocketed {
            return Ok(());
        }

        self.pos += self.vel * dt;
        self.vel *= FRICTION_FACTOR;

        if self.vel.x.abs() < STOP_EPS && self.vel.y.abs() < STOP_EPS {
            self.vel = Vec2::ZERO;
            self.moving = false;
        }
        Ok(())
    }

    /// Strike the ball with `power` along `angle` (radians). Only the match
    /// calls this, and only on the cue ball.
    pub(crate) fn shoot(&mut self, power: f32, angle: f32) -> Result<(), SimError> {
        if self.pocketed {
            return Err(SimError::BallPocketed(self.id));
        }
        self.vel = polar_to_cartesian(power, angle);
        self.moving = true;
        Ok(())
    }

    /// Place the ball at rest at `pos` and bring it back into play
    pub fn reposition(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.moving = false;
        self.pocketed = false;
    }

    /// Park the ball off the table
    pub fn hide(&mut self) {
        self.pos = HIDDEN_POS;
    }

    /// Drop the ball into a pocket
    pub fn pocket(&mut self) {
        self.vel = Vec2::ZERO;
        self.moving = false;
        self.pocketed = true;
        self.hide();
    }
}
