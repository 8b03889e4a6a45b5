//! Fixed timestep simulation tick
//!
//! One tick: clock pulse, cue input, ball integration, ball-ball contacts,
//! cushions and pockets, then the settle check. Runs as a single unit.

use glam::Vec2;

use super::autoplay::autoplay_input;
use super::state::{GameState, TurnPhase};
use crate::consts::MAX_SUBSTEPS;
use crate::error::SimError;

/// Input for a single tick, polled once by the host
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position in table coordinates
    pub pointer: Vec2,
    /// Primary button held
    pub primary_down: bool,
    /// The host's countdown timer fired since the last tick
    pub timer_pulse: bool,
    /// Idle/demo mode - the bot plays the shots
    pub idle_mode: bool,
}

/// Advance the match by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Result<(), SimError> {
    if !(dt.is_finite() && dt > 0.0) {
        return Err(SimError::NonPositiveDelta(dt));
    }

    state.time_ticks += 1;

    if input.timer_pulse {
        state.subtract_from_timer();
    }

    let (pointer, primary_down) = if input.idle_mode {
        autoplay_input(state)
    } else {
        (input.pointer, input.primary_down)
    };

    // Cue only listens while the table is settled and the clock is running
    if state.phase == TurnPhase::AwaitingShot && !state.time_up() {
        if let Some(shot) = state.cue.update(pointer, primary_down) {
            if let Err(e) = state.take_shot(shot) {
                log::warn!("Shot rejected: {e}");
                let cue_pos = state.cue.pos;
                state.cue.reposition(cue_pos);
            }
        }
    }

    // Physics keeps running so the table can settle, whatever the clock says
    state.step_physics(dt)?;
    state.settle_if_ready();

    Ok(())
}

/// Run as many fixed ticks as fit in `frame_time`, capped at `MAX_SUBSTEPS`.
/// Returns the unconsumed remainder for the next frame.
pub fn advance(
    state: &mut GameState,
    input: &TickInput,
    frame_time: f32,
    dt: f32,
) -> Result<f32, SimError> {
    if !(dt.is_finite() && dt > 0.0) {
        return Err(SimError::NonPositiveDelta(dt));
    }

    let mut remaining = frame_time.max(0.0);
    let mut steps = 0;
    let mut input = input.clone();
    while remaining >= dt && steps < MAX_SUBSTEPS {
        tick(state, &input, dt)?;
        // A timer pulse belongs to one tick only
        input.timer_pulse = false;
        remaining -= dt;
        steps += 1;
    }
    if steps == MAX_SUBSTEPS {
        remaining = remaining.min(dt);
    }
    Ok(remaining)
}
