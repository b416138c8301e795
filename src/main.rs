//! Gesture Flap entry point
//!
//! Headless driver: runs demo episodes against the core at a nominal 60
//! ticks per second of simulated time, feeding it intents through the same
//! normalization path a keyboard or gesture collaborator would use, and
//! prints the final state snapshot as JSON.
//!
//! Usage: gesture-flap [difficulty] [seed] [episodes]

use std::env;

use gesture_flap::consts::BIRD_START_Y_FRAC;
use gesture_flap::input::{IntentKind, KeySample, classify_discrete};
use gesture_flap::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use gesture_flap::vh;

/// Simulated milliseconds per tick (nominal 60 Hz display)
const TICK_MS: f64 = 1000.0 / 60.0;
/// Safety cap per episode
const MAX_TICKS: u64 = 100_000;

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let difficulty = args.next().unwrap_or_else(|| "medium".to_string());
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let episodes: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(3);

    let mut state = GameState::new(seed);
    state.select_difficulty(&difficulty);
    state.finish_init();

    let mut completed = 0;
    let mut t: u64 = 0;
    while completed < episodes && t < MAX_TICKS * episodes as u64 {
        t += 1;
        let now_ms = t as f64 * TICK_MS;

        let mut input = TickInput::default();
        match state.phase {
            GamePhase::Start => {}
            GamePhase::Ready => {
                let in_flight = false;
                if let Some(intent) = classify_discrete(KeySample::Activate, in_flight, now_ms) {
                    apply_intent(intent.kind, &state, &mut input);
                }
            }
            GamePhase::Play => {
                if wants_flap(&state) {
                    if let Some(intent) = classify_discrete(KeySample::Activate, true, now_ms) {
                        apply_intent(intent.kind, &state, &mut input);
                    }
                }
            }
            GamePhase::End => {
                completed += 1;
                log::info!(
                    "episode {completed} finished: score {} (best {})",
                    state.score,
                    state.best
                );
                if completed < episodes {
                    if let Some(intent) = classify_discrete(KeySample::Restart, false, now_ms) {
                        apply_intent(intent.kind, &state, &mut input);
                    }
                }
            }
        }

        tick(&mut state, &input);

        for event in state.drain_events() {
            match event {
                GameEvent::Score => log::info!("point scored: {}", state.score),
                GameEvent::Collision => log::info!("collision at tick {}", state.time_ticks),
            }
        }
    }

    println!("seed {seed}, difficulty {difficulty}: best score {}", state.best);
    if let Ok(json) = serde_json::to_string_pretty(&state) {
        println!("{json}");
    }
}

/// Route a normalized intent into the frame's tick input
///
/// A flap arriving while the game sits in Ready acts as a start, matching
/// the reference wiring where a hand flick both starts and steers.
fn apply_intent(kind: IntentKind, state: &GameState, input: &mut TickInput) {
    match kind {
        IntentKind::Start => input.start = true,
        IntentKind::Flap if state.phase == GamePhase::Ready => input.start = true,
        IntentKind::Flap => input.flap = true,
        IntentKind::Restart => input.restart = true,
    }
}

/// Demo autopilot: flap whenever the bird sinks below the centre of the
/// next gap (or its start height when the track ahead is clear)
fn wants_flap(state: &GameState) -> bool {
    let bird_left = state.bounds.bird_left();
    let target = state
        .track
        .pairs
        .iter()
        .filter(|p| p.right(&state.bounds) >= bird_left)
        .min_by(|a, b| a.x.total_cmp(&b.x))
        .map(|p| vh(p.gap_top_vh + p.gap_height_vh / 2.0, state.bounds.height))
        .unwrap_or(state.bounds.height * BIRD_START_Y_FRAC);

    state.bird.y > target
}
