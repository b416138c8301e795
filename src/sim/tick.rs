//! Per-frame orchestration
//!
//! One combined step per display frame with an explicit sub-step order:
//! flap → gravity → obstacle advance → bounds/collision check → scoring
//! check → spawn check. Ordering is a contract here, not an accident of
//! scheduling: every read in a frame sees values already updated by that
//! frame's earlier sub-steps.

use super::state::{GameEvent, GamePhase, GameState};

/// Intent flags for a single tick (one-shot; the caller clears them after
/// the frame is processed)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Start intent (accepted only in Ready)
    pub start: bool,
    /// Flap intent (accepted only in Play)
    pub flap: bool,
    /// Restart command (accepted only in End)
    pub restart: bool,
}

/// Advance the game by one frame
///
/// Total over any input in any phase; intents a phase does not accept are
/// dropped without effect. Only `Play` runs the simulation sub-steps.
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        // Waiting on collaborator wiring; nothing ticks, nothing is accepted
        GamePhase::Start => {}

        GamePhase::Ready => {
            if input.start {
                state.enter_play();
            }
        }

        GamePhase::Play => {
            if input.flap {
                state.bird.flap(&state.profile);
            }
            advance_episode(state);
        }

        GamePhase::End => {
            if input.restart {
                state.enter_ready();
            }
        }
    }
}

/// The Play-phase frame body, in contract order
fn advance_episode(state: &mut GameState) {
    state.time_ticks += 1;

    // Gravity before any read of bird position
    state.bird.advance(&state.profile);
    state.track.advance(&state.profile, &state.bounds);

    let bird_rect = state.bird.rect(&state.bounds);
    if state.bird.out_of_bounds(&state.bounds)
        || state.track.collides_with(&bird_rect, &state.bounds)
    {
        state.end_episode();
        return;
    }

    let cleared = state
        .track
        .check_scoring(&bird_rect, &state.profile, &state.bounds);
    for _ in 0..cleared {
        state.score += 1;
        state.push_event(GameEvent::Score);
    }
    if cleared > 0 {
        log::debug!("score {}", state.score);
    }

    state
        .track
        .spawn_tick(&state.profile, &state.bounds, &mut state.rng);
}
