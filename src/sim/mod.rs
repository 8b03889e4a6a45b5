//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (roster order)
//! - No rendering, audio or platform dependencies

pub mod autoplay;
pub mod ball;
pub mod collision;
pub mod cue;
pub mod state;
pub mod table;
pub mod tick;

pub use autoplay::autoplay_input;
pub use ball::{Ball, BallColor, BallKind, HIDDEN_POS};
pub use collision::{
    CollisionResult, CushionOutcome, ball_ball_contact, resolve_all_pairs, resolve_ball_ball,
    resolve_ball_table,
};
pub use cue::{Cue, CuePhase, Shot};
pub use state::{BLACK_BALL_ID, CUE_BALL_ID, GameEvent, GameState, TurnPhase};
pub use table::{Axis, PocketZone, Rail, Table};
pub use tick::{TickInput, advance, tick};
