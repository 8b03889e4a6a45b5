//! Autoplay bot
//!
//! Aims at the nearest object ball with a little jitter and charges to a
//! random power. Each shot draws from its own PCG stream (seed, shot number)
//! so the bot needs no state of its own and replays identically.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{GameState, TurnPhase};
use crate::polar_to_cartesian;

/// Max aim error either side, radians
const AIM_JITTER: f32 = 0.06;
/// Lowest share of max power the bot will use
const MIN_POWER_SHARE: f32 = 0.25;
/// How far in front of the cue ball the virtual pointer sits
const POINTER_REACH: f32 = 120.0;

/// Pointer position and button state the bot wants this tick
pub fn autoplay_input(state: &GameState) -> (Vec2, bool) {
    let Some(cue_ball) = state.cue_ball() else {
        return (Vec2::ZERO, false);
    };
    if state.phase != TurnPhase::AwaitingShot || state.time_up() || cue_ball.pocketed {
        return (cue_ball.pos, false);
    }

    let mut rng = Pcg32::new(state.seed, u64::from(state.shots));

    let target = state
        .balls
        .iter()
        .filter(|b| !b.is_cue() && b.in_play())
        .min_by(|a, b| {
            a.pos
                .distance_squared(cue_ball.pos)
                .total_cmp(&b.pos.distance_squared(cue_ball.pos))
        })
        .map(|b| b.pos)
        .unwrap_or_else(|| state.table.center());

    let to_target = target - cue_ball.pos;
    let angle = to_target.y.atan2(to_target.x) + rng.random_range(-AIM_JITTER..=AIM_JITTER);
    let pointer = cue_ball.pos + polar_to_cartesian(POINTER_REACH, angle);

    let max_power = state.cue.max_power();
    let target_power = max_power * rng.random_range(MIN_POWER_SHARE..=1.0);
    let hold = state.cue.power() < target_power;

    (pointer, hold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::BLACK_BALL_ID;

    #[test]
    fn test_aims_at_black_ball() {
        let state = GameState::default();
        let (pointer, hold) = autoplay_input(&state);
        assert!(hold);

        // Black sits straight right of the cue ball
        let cue_pos = state.cue_ball().unwrap().pos;
        let dir = (pointer - cue_pos).normalize();
        assert!(dir.x > 0.99);
    }

    #[test]
    fn test_deterministic_per_seed() {
        let a = GameState::default();
        let b = GameState::default();
        assert_eq!(autoplay_input(&a), autoplay_input(&b));
    }

    #[test]
    fn test_idle_while_balls_move() {
        let mut state = GameState::default();
        state.shoot_ball(0, 1000.0, 0.0).unwrap();
        let (_, hold) = autoplay_input(&state);
        assert!(!hold);
    }

    #[test]
    fn test_falls_back_to_table_center() {
        let mut state = GameState::default();
        state.ball_mut(BLACK_BALL_ID).unwrap().pocket();
        let (pointer, _) = autoplay_input(&state);
        let cue_pos = state.cue_ball().unwrap().pos;
        let want = (state.table.center() - cue_pos).normalize();
        let got = (pointer - cue_pos).normalize();
        assert!(want.dot(got) > 0.99);
    }
}
