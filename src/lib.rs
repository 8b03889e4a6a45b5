//! Speedy Shots - a timed 2D billiards game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, collisions, cue, match state)
//! - `renderer`: Sprite extraction for a presentation layer
//! - `audio`: Sound effect mapping for simulation events
//! - `settings`: Data-driven table geometry and match tuning

pub mod audio;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, SimError};
pub use settings::{Settings, TableSettings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep. Friction is applied per step, so the feel
    /// of the table is tied to this value.
    pub const SIM_DT: f32 = 1.0 / 177.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Ball defaults (all balls share one size)
    pub const BALL_DIAMETER: f32 = 45.0;
    pub const BALL_RADIUS: f32 = BALL_DIAMETER / 2.0;
    /// Sprite origin of a ball image
    pub const BALL_ORIGIN: Vec2 = Vec2::new(25.0, 25.0);
    /// Extra clearance a cushion pushes the ball back by
    pub const PUSH: f32 = 1.0;

    /// Velocity retained after each step
    pub const FRICTION_FACTOR: f32 = 0.985;
    /// Below this speed on both axes a ball stops dead
    pub const STOP_EPS: f32 = 10.0;
    /// Velocity retained after touching a cushion
    pub const CUSHION_DAMPING: f32 = 0.98;

    /// Cue power model
    pub const MAX_POWER: f32 = 6000.0;
    pub const POWER_STEP: f32 = 120.0;
    /// Cue sprite anchor: resting, pull-back per charge step, after the strike
    pub const CUE_ANCHOR_REST: f32 = 970.0;
    pub const CUE_ANCHOR_PULL: f32 = 5.0;
    pub const CUE_ANCHOR_STRUCK: f32 = 950.0;
    pub const CUE_ANCHOR_Y: f32 = 11.0;

    /// Countdown defaults
    pub const ROUND_SECONDS: u32 = 60;
    pub const TIMER_STEP: u32 = 3;

    /// Rack spots
    pub const CUE_BALL_SPOT: Vec2 = Vec2::new(413.0, 413.0);
    pub const BLACK_BALL_SPOT: Vec2 = Vec2::new(1090.0, 413.0);

    /// Default table bounds
    pub const TABLE_TOP_Y: f32 = 57.0;
    pub const TABLE_BOTTOM_Y: f32 = 768.0;
    pub const TABLE_LEFT_X: f32 = 57.0;
    pub const TABLE_RIGHT_X: f32 = 1443.0;
    /// Default pocket zone widths along a rail
    pub const CORNER_POCKET_WIDTH: f32 = 60.0;
    pub const MIDDLE_POCKET_START: f32 = 720.0;
    pub const MIDDLE_POCKET_END: f32 = 780.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Angle of the vector pointing from `from` to `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}
