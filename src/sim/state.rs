//! Match state
//!
//! Owns the table, the ball roster and the cue, and tracks the turn phase,
//! countdown and score. All mutation goes through the methods here or
//! through `tick`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, BallColor, BallKind};
use super::collision::{CushionOutcome, resolve_all_pairs, resolve_ball_table};
use super::cue::{Cue, Shot};
use super::table::{Rail, Table};
use crate::consts::*;
use crate::error::{ConfigError, SimError};
use crate::settings::Settings;

/// Id of the cue ball in every rack
pub const CUE_BALL_ID: u32 = 0;
/// Id of the black ball in the standard rack
pub const BLACK_BALL_ID: u32 = 1;

/// Turn phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Table settled, the cue accepts input
    AwaitingShot,
    /// A shot is running; input is ignored until every ball stops
    BallsInMotion,
}

/// Discrete things that happened during a tick, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Two balls touched
    BallStrike { a: u32, b: u32 },
    /// A ball dropped into a pocket
    Pot { ball: u32, rail: Rail },
    /// The cue struck the cue ball
    CueStrike { power: f32, angle: f32 },
    /// Every ball stopped after a shot; lists the balls pocketed by it
    TableSettled { pots: Vec<u32> },
    /// A pocketed ball was put back on the table
    Respotted { ball: u32, pos: Vec2 },
    TimerStarted { seconds: u32 },
    /// Countdown reached zero
    TimeUp,
}

impl GameEvent {
    /// Short name for presentation layers
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::BallStrike { .. } => "ball-strike",
            GameEvent::Pot { .. } => "pot",
            GameEvent::CueStrike { .. } => "cue-strike",
            GameEvent::TableSettled { .. } => "table-settled",
            GameEvent::Respotted { .. } => "respotted",
            GameEvent::TimerStarted { .. } => "timer-started",
            GameEvent::TimeUp => "time-up",
        }
    }
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub table: Table,
    /// Roster in rack order
    pub balls: Vec<Ball>,
    pub cue: Cue,
    pub phase: TurnPhase,
    /// Seconds left on the clock
    pub countdown: u32,
    pub score: u32,
    /// Shots taken this rack
    pub shots: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Seed for the autoplay bot
    pub seed: u64,
    clock_expired: bool,
    round_seconds: u32,
    timer_step: u32,
    respot_object_balls: bool,
    /// Balls pocketed since the last shot
    pots_this_shot: Vec<u32>,
    /// Events not yet drained by the host
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::with_table(Table::default(), &Settings::default())
    }
}

impl GameState {
    /// Create a racked match from settings
    pub fn new(settings: &Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let table = Table::from_settings(&settings.table)?;
        Ok(Self::with_table(table, settings))
    }

    fn with_table(table: Table, settings: &Settings) -> Self {
        let mut state = Self {
            table,
            balls: Vec::new(),
            cue: Cue::new(CUE_BALL_SPOT, settings.max_power, settings.power_step),
            phase: TurnPhase::AwaitingShot,
            countdown: 0,
            score: 0,
            shots: 0,
            time_ticks: 0,
            seed: settings.seed,
            clock_expired: false,
            round_seconds: settings.round_seconds,
            timer_step: settings.timer_step,
            respot_object_balls: settings.respot_object_balls,
            pots_this_shot: Vec::new(),
            events: Vec::new(),
        };
        state.rack();
        state
    }

    /// Place the cue ball and the black on their spots
    pub fn rack(&mut self) {
        self.balls = vec![
            Ball::new(CUE_BALL_ID, BallKind::Cue, BallColor::White, CUE_BALL_SPOT),
            Ball::new(BLACK_BALL_ID, BallKind::Object, BallColor::Black, BLACK_BALL_SPOT),
        ];
        self.cue.reposition(CUE_BALL_SPOT);
        self.phase = TurnPhase::AwaitingShot;
        self.pots_this_shot.clear();
        log::info!("Racked {} balls", self.balls.len());
    }

    /// Start a fresh match on the same table
    pub fn reset(&mut self) {
        self.rack();
        self.countdown = 0;
        self.clock_expired = false;
        self.score = 0;
        self.shots = 0;
        self.time_ticks = 0;
        self.events.clear();
    }

    pub fn ball(&self, id: u32) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    pub fn ball_mut(&mut self, id: u32) -> Option<&mut Ball> {
        self.balls.iter_mut().find(|b| b.id == id)
    }

    pub fn cue_ball(&self) -> Option<&Ball> {
        self.balls.iter().find(|b| b.is_cue())
    }

    // === Countdown ===

    pub fn start_timer(&mut self) {
        self.countdown = self.round_seconds;
        self.clock_expired = false;
        self.events.push(GameEvent::TimerStarted {
            seconds: self.countdown,
        });
        log::info!("Timer started: {}s", self.countdown);
    }

    /// Take one step off the clock. Clamps at zero and reports `TimeUp` the
    /// first time zero is reached.
    pub fn subtract_from_timer(&mut self) -> u32 {
        if self.countdown == 0 {
            return 0;
        }
        self.countdown = self.countdown.saturating_sub(self.timer_step);
        if self.countdown == 0 {
            self.clock_expired = true;
            self.events.push(GameEvent::TimeUp);
            log::info!("Time up after {} shots, score {}", self.shots, self.score);
        }
        self.countdown
    }

    /// The clock ran out; no more shots this round
    pub fn time_up(&self) -> bool {
        self.clock_expired
    }

    // === Score ===

    pub fn award_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    // === Motion ===

    /// True if any ball still on the table is moving
    pub fn balls_moving(&self) -> bool {
        self.balls.iter().any(|b| b.in_play() && b.moving)
    }

    /// Strike a ball through the match. Only the cue ball may be struck.
    pub fn shoot_ball(&mut self, id: u32, power: f32, angle: f32) -> Result<(), SimError> {
        let ball = self.ball(id).ok_or(SimError::UnknownBall(id))?;
        if !ball.is_cue() {
            return Err(SimError::NotCueBall(id));
        }
        self.take_shot(Shot { power, angle })
    }

    /// Apply a released stroke to the cue ball
    pub fn take_shot(&mut self, shot: Shot) -> Result<(), SimError> {
        if self.balls_moving() {
            return Err(SimError::BallsInMotion);
        }
        if self.time_up() {
            return Err(SimError::TimeUp);
        }
        let cue_ball = self
            .balls
            .iter_mut()
            .find(|b| b.is_cue())
            .ok_or(SimError::UnknownBall(CUE_BALL_ID))?;
        cue_ball.shoot(shot.power, shot.angle)?;

        self.events.push(GameEvent::CueStrike {
            power: shot.power,
            angle: shot.angle,
        });
        self.pots_this_shot.clear();
        self.shots += 1;
        self.phase = TurnPhase::BallsInMotion;
        Ok(())
    }

    /// One physics step: integrate every ball, then resolve ball pairs, then
    /// cushions and pockets.
    pub fn step_physics(&mut self, dt: f32) -> Result<(), SimError> {
        for ball in &mut self.balls {
            ball.update(dt)?;
        }

        for (a, b) in resolve_all_pairs(&mut self.balls) {
            self.events.push(GameEvent::BallStrike { a, b });
        }

        for ball in &mut self.balls {
            if let CushionOutcome::Pocketed(rail) = resolve_ball_table(ball, &self.table) {
                log::debug!("Ball {} pocketed on {:?} rail", ball.id, rail);
                self.pots_this_shot.push(ball.id);
                self.events.push(GameEvent::Pot { ball: ball.id, rail });
            }
        }
        Ok(())
    }

    /// Once a shot has run out, bring pocketed balls back as the rules say,
    /// put the cue on the cue ball and open the next turn.
    pub fn settle_if_ready(&mut self) -> bool {
        if self.phase != TurnPhase::BallsInMotion || self.balls_moving() {
            return false;
        }

        let pots = std::mem::take(&mut self.pots_this_shot);
        log::debug!("Table settled after shot {}, pots {:?}", self.shots, pots);
        self.events.push(GameEvent::TableSettled { pots });

        self.respot_pocketed();

        let cue_pos = self.cue_ball().map(|b| b.pos).unwrap_or(CUE_BALL_SPOT);
        self.cue.reposition(cue_pos);
        self.phase = TurnPhase::AwaitingShot;
        true
    }

    fn respot_pocketed(&mut self) {
        for i in 0..self.balls.len() {
            let ball = &self.balls[i];
            if !ball.pocketed || !(ball.is_cue() || self.respot_object_balls) {
                continue;
            }
            let pos = self.free_spot(ball.id, ball.spot);
            let ball = &mut self.balls[i];
            ball.reposition(pos);
            log::debug!("Respotted ball {} at {:?}", ball.id, pos);
            self.events.push(GameEvent::Respotted { ball: ball.id, pos });
        }
    }

    /// First position at or left of `spot` that no other ball overlaps.
    /// Falls back to `spot` if the whole line is blocked.
    fn free_spot(&self, id: u32, spot: Vec2) -> Vec2 {
        let min_x = self.table.left_x + BALL_RADIUS + PUSH;
        let mut candidate = spot;
        while candidate.x >= min_x {
            let blocked = self.balls.iter().any(|b| {
                b.id != id && b.in_play() && b.pos.distance(candidate) < b.radius + BALL_RADIUS
            });
            if !blocked {
                return candidate;
            }
            candidate.x -= BALL_DIAMETER;
        }
        spot
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rack_positions() {
        let state = GameState::default();
        let black = state.ball(BLACK_BALL_ID).unwrap();
        let white = state.cue_ball().unwrap();
        assert_eq!(black.pos, Vec2::new(1090.0, 413.0));
        assert_eq!(white.pos, Vec2::new(413.0, 413.0));
        assert_eq!(state.cue.pos, white.pos);
        assert_eq!(state.phase, TurnPhase::AwaitingShot);
    }

    #[test]
    fn test_fresh_match_score_zero() {
        let state = GameState::default();
        assert_eq!(state.score, 0);
        assert_eq!(state.shots, 0);
    }

    #[test]
    fn test_start_timer() {
        let mut state = GameState::default();
        state.start_timer();
        assert_eq!(state.countdown, 60);
        assert!(!state.time_up());
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::TimerStarted { seconds: 60 }]
        );
    }

    #[test]
    fn test_subtract_from_timer() {
        let mut state = GameState::default();
        state.countdown = 10;
        assert_eq!(state.subtract_from_timer(), 7);
        assert_eq!(state.countdown, 7);
    }

    #[test]
    fn test_timer_clamps_at_zero() {
        let mut state = GameState::default();
        state.start_timer();
        state.countdown = 2;
        state.drain_events();

        assert_eq!(state.subtract_from_timer(), 0);
        assert!(state.time_up());
        assert_eq!(state.subtract_from_timer(), 0);
        assert_eq!(state.drain_events(), vec![GameEvent::TimeUp]);
    }

    #[test]
    fn test_balls_moving() {
        let mut state = GameState::default();
        assert!(!state.balls_moving());

        state.balls[0].moving = true;
        assert!(state.balls_moving());

        state.balls[0].moving = false;
        state.balls[1].moving = false;
        assert!(!state.balls_moving());

        // Pocketed balls don't count
        state.balls[1].moving = true;
        state.balls[1].pocketed = true;
        assert!(!state.balls_moving());
    }

    #[test]
    fn test_only_cue_ball_can_be_shot() {
        let mut state = GameState::default();
        assert_eq!(
            state.shoot_ball(BLACK_BALL_ID, 1000.0, 0.0),
            Err(SimError::NotCueBall(BLACK_BALL_ID))
        );
        assert_eq!(state.shoot_ball(42, 1000.0, 0.0), Err(SimError::UnknownBall(42)));
        assert!(state.shoot_ball(CUE_BALL_ID, 1000.0, 0.0).is_ok());
        assert_eq!(state.phase, TurnPhase::BallsInMotion);
        assert_eq!(state.shots, 1);
    }

    #[test]
    fn test_shot_rejected_while_moving_or_time_up() {
        let mut state = GameState::default();
        state.shoot_ball(CUE_BALL_ID, 1000.0, 0.0).unwrap();
        assert_eq!(
            state.shoot_ball(CUE_BALL_ID, 1000.0, 0.0),
            Err(SimError::BallsInMotion)
        );

        let mut state = GameState::default();
        state.start_timer();
        while state.subtract_from_timer() > 0 {}
        assert_eq!(
            state.shoot_ball(CUE_BALL_ID, 1000.0, 0.0),
            Err(SimError::TimeUp)
        );
    }

    #[test]
    fn test_settle_respots_cue_ball() {
        let mut state = GameState::default();
        state.shoot_ball(CUE_BALL_ID, 500.0, 0.0).unwrap();
        state.balls[0].pocket();
        state.drain_events();

        assert!(state.settle_if_ready());
        let cue_ball = state.cue_ball().unwrap();
        assert!(!cue_ball.pocketed);
        assert_eq!(cue_ball.pos, CUE_BALL_SPOT);
        assert_eq!(state.cue.pos, CUE_BALL_SPOT);
        assert_eq!(state.phase, TurnPhase::AwaitingShot);

        let events = state.drain_events();
        assert!(matches!(events[0], GameEvent::TableSettled { .. }));
        assert!(events.contains(&GameEvent::Respotted {
            ball: CUE_BALL_ID,
            pos: CUE_BALL_SPOT
        }));
    }

    #[test]
    fn test_respot_shifts_off_occupied_spot() {
        let mut state = GameState::default();
        state.shoot_ball(CUE_BALL_ID, 500.0, 0.0).unwrap();
        state.balls[0].reposition(BLACK_BALL_SPOT + Vec2::new(10.0, 0.0));
        state.balls[1].pocket();

        assert!(state.settle_if_ready());
        let black = state.ball(BLACK_BALL_ID).unwrap();
        assert_eq!(black.pos, BLACK_BALL_SPOT - Vec2::new(BALL_DIAMETER, 0.0));
    }

    #[test]
    fn test_object_ball_stays_down_without_respot() {
        let settings = Settings {
            respot_object_balls: false,
            ..Default::default()
        };
        let mut state = GameState::new(&settings).unwrap();
        state.shoot_ball(CUE_BALL_ID, 500.0, 0.0).unwrap();
        state.balls[0].vel = Vec2::ZERO;
        state.balls[0].moving = false;
        state.balls[1].pocket();

        assert!(state.settle_if_ready());
        assert!(state.ball(BLACK_BALL_ID).unwrap().pocketed);
    }

    #[test]
    fn test_settle_waits_for_motion() {
        let mut state = GameState::default();
        assert!(!state.settle_if_ready());
        state.shoot_ball(CUE_BALL_ID, 500.0, 0.0).unwrap();
        assert!(!state.settle_if_ready());
    }

    #[test]
    fn test_award_points_and_reset() {
        let mut state = GameState::default();
        state.award_points(3);
        state.start_timer();
        assert_eq!(state.score, 3);

        state.reset();
        assert_eq!(state.score, 0);
        assert_eq!(state.countdown, 0);
        assert!(state.events.is_empty());
        assert_eq!(state.cue_ball().unwrap().pos, CUE_BALL_SPOT);
    }

    #[test]
    fn test_new_rejects_bad_settings() {
        let settings = Settings {
            round_seconds: 0,
            ..Default::default()
        };
        assert!(GameState::new(&settings).is_err());
    }
}
