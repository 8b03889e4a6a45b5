//! Speedy Shots headless runner
//!
//! Plays one timed round with the autoplay bot and logs what happens.
//! Usage: `speedy-shots [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use speedy_shots::Settings;
    use speedy_shots::audio::{AudioManager, LogSink};
    use speedy_shots::consts::SIM_DT;
    use speedy_shots::renderer::{RenderSink, SpriteInstance, render};
    use speedy_shots::sim::{CUE_BALL_ID, GameEvent, GameState, TickInput, TurnPhase, tick};

    /// Counts draw calls instead of drawing
    #[derive(Default)]
    struct NullRenderer {
        draws: usize,
    }

    impl RenderSink for NullRenderer {
        fn draw(&mut self, _sprite: &SpriteInstance) {
            self.draws += 1;
        }
    }

    env_logger::init();
    log::info!("Speedy Shots (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(&path).unwrap_or_else(|e| {
            log::warn!("Falling back to default settings: {e}");
            Settings::default()
        }),
        None => {
            log::info!("Using default settings");
            Settings::default()
        }
    };

    let mut state = match GameState::new(&settings) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Invalid settings: {e}");
            std::process::exit(1);
        }
    };

    let mut audio = AudioManager::new(LogSink::default());
    let mut renderer = NullRenderer::default();

    // One timer pulse per simulated second
    let ticks_per_second = (1.0 / SIM_DT).round() as u64;
    let max_ticks = ticks_per_second * u64::from(settings.round_seconds) * 2;

    state.start_timer();
    let mut input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    while state.time_ticks < max_ticks {
        input.timer_pulse = state.time_ticks > 0 && state.time_ticks % ticks_per_second == 0;
        if let Err(e) = tick(&mut state, &input, SIM_DT) {
            eprintln!("Simulation error: {e}");
            std::process::exit(1);
        }

        let events = state.drain_events();
        audio.handle_events(&events);
        for event in &events {
            match event {
                GameEvent::TableSettled { pots } => {
                    let scored = pots.iter().filter(|&&id| id != CUE_BALL_ID).count() as u32;
                    state.award_points(scored);
                    log::info!(
                        "Shot {} settled: pots {:?}, score {}, {}s left",
                        state.shots,
                        pots,
                        state.score,
                        state.countdown
                    );
                }
                GameEvent::TimeUp => log::info!("Time up"),
                _ => {}
            }
        }

        if state.time_ticks % 60 == 0 {
            render(&state, &mut renderer);
        }

        if state.time_up() && state.phase == TurnPhase::AwaitingShot {
            break;
        }
    }

    println!(
        "Round over: {} shots, score {}, {} ticks, {} sounds, {} sprites drawn",
        state.shots,
        state.score,
        state.time_ticks,
        audio.sink().played,
        renderer.draws
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on the web; hosts drive `sim::tick` themselves
}
