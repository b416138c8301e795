//! Game state and core simulation types
//!
//! Owns the episode lifecycle: phase, score ledger, bird kinematics, the
//! obstacle track, and the tuning profile in force for the current episode.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::track::ObstacleTrack;
use crate::consts::*;
use crate::tuning::{self, DifficultyProfile};

/// Lifecycle phase of the game
///
/// `Play` is the only phase in which the simulation ticks; intents delivered
/// in a phase that does not accept them are silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Process loaded, collaborators not yet wired
    Start,
    /// Idle, waiting for a start intent
    Ready,
    /// Active episode
    Play,
    /// Episode over, score frozen, waiting for restart
    End,
}

/// Discrete event for the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The bird cleared an obstacle pair
    Score,
    /// The bird hit an obstacle or left the vertical bounds
    Collision,
}

/// Visible track extent in track units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackBounds {
    pub width: f64,
    pub height: f64,
}

impl Default for TrackBounds {
    fn default() -> Self {
        Self {
            width: TRACK_WIDTH,
            height: TRACK_HEIGHT,
        }
    }
}

impl TrackBounds {
    /// Fixed left edge of the bird's bounding box
    #[inline]
    pub fn bird_left(&self) -> f64 {
        self.width * BIRD_LEFT_FRAC
    }

    /// Obstacle width resolved against this track
    #[inline]
    pub fn pipe_width(&self) -> f64 {
        self.width * PIPE_WIDTH_FRAC
    }
}

/// Bird vertical kinematics
///
/// The bird only moves vertically; the track scrolls past it. Velocity and
/// position advance by fixed per-tick deltas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Top edge of the bounding box, track units from the track top
    pub y: f64,
    /// Track units per tick; negative is up
    pub vy: f64,
}

impl Bird {
    /// Bird at the fixed starting height, at rest
    pub fn at_start(bounds: &TrackBounds) -> Self {
        Self {
            y: bounds.height * BIRD_START_Y_FRAC,
            vy: 0.0,
        }
    }

    /// Apply one tick of gravity and integrate position; returns the new
    /// top-edge position.
    pub fn advance(&mut self, profile: &DifficultyProfile) -> f64 {
        self.vy += profile.gravity;
        self.y += self.vy;
        self.y
    }

    /// Apply a flap impulse: velocity is set, not accumulated, so a flap
    /// always fully overrides prior motion.
    pub fn flap(&mut self, profile: &DifficultyProfile) {
        self.vy = profile.flap_velocity;
    }

    /// Bounding box in track units
    pub fn rect(&self, bounds: &TrackBounds) -> Rect {
        Rect::new(bounds.bird_left(), self.y, BIRD_WIDTH, BIRD_HEIGHT)
    }

    /// Terminal condition: touched the ceiling or the track floor
    pub fn out_of_bounds(&self, bounds: &TrackBounds) -> bool {
        self.y <= 0.0 || self.y + BIRD_HEIGHT >= bounds.height
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG for obstacle gap placement
    pub rng: Pcg32,
    /// Current lifecycle phase
    pub phase: GamePhase,
    /// Profile selected for the next episode
    pub selected: DifficultyProfile,
    /// Profile in force for the running episode; immutable until End
    pub profile: DifficultyProfile,
    /// Visible track extent
    pub bounds: TrackBounds,
    /// Score for the current episode
    pub score: u32,
    /// Best score this session
    pub best: u32,
    /// Ticks elapsed in the current episode
    pub time_ticks: u64,
    /// The bird
    pub bird: Bird,
    /// Live obstacle pairs
    pub track: ObstacleTrack,
    /// Events emitted since the last drain (audio collaborator)
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game in the `Start` phase with default bounds
    pub fn new(seed: u64) -> Self {
        Self::with_bounds(seed, TrackBounds::default())
    }

    pub fn with_bounds(seed: u64, bounds: TrackBounds) -> Self {
        let profile = DifficultyProfile::default();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            selected: profile,
            profile,
            bounds,
            score: 0,
            best: 0,
            time_ticks: 0,
            bird: Bird::at_start(&bounds),
            track: ObstacleTrack::new(),
            events: Vec::new(),
        }
    }

    /// Collaborators are wired; move from `Start` to `Ready`
    pub fn finish_init(&mut self) {
        if self.phase == GamePhase::Start {
            self.phase = GamePhase::Ready;
            log::info!("game ready");
        }
    }

    /// Select the difficulty for the next episode by key
    ///
    /// Unknown keys resolve to medium. The running episode, if any, keeps
    /// its profile.
    pub fn select_difficulty(&mut self, key: &str) {
        self.selected = tuning::resolve(key);
        log::debug!("difficulty selected: {key}");
    }

    /// Ready → Play: reset the ledger and the field, apply the initial flap
    pub(crate) fn enter_play(&mut self) {
        self.profile = self.selected;
        self.score = 0;
        self.time_ticks = 0;
        self.track.clear();
        self.bird = Bird::at_start(&self.bounds);
        self.bird.flap(&self.profile);
        self.phase = GamePhase::Play;
        log::info!("episode started");
    }

    /// Play → End: freeze the score, stop ticking
    pub(crate) fn end_episode(&mut self) {
        self.phase = GamePhase::End;
        if self.score > self.best {
            self.best = self.score;
        }
        self.push_event(GameEvent::Collision);
        log::info!("episode over, score {}", self.score);
    }

    /// End → Ready: explicit restart command
    pub(crate) fn enter_ready(&mut self) {
        self.score = 0;
        self.track.clear();
        self.bird = Bird::at_start(&self.bounds);
        self.phase = GamePhase::Ready;
        log::info!("reset to ready");
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Bird bounding box against the current track bounds
    pub fn bird_rect(&self) -> Rect {
        self.bird.rect(&self.bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn medium() -> DifficultyProfile {
        DifficultyProfile::default()
    }

    #[test]
    fn test_gravity_accumulates_linearly() {
        let bounds = TrackBounds::default();
        let mut bird = Bird::at_start(&bounds);
        let profile = medium();

        let mut expected_y = bird.y;
        for n in 1..=20u32 {
            bird.advance(&profile);
            assert!((bird.vy - n as f64 * profile.gravity).abs() < 1e-9);
            expected_y += n as f64 * profile.gravity;
        }
        // Position is the prefix sum of velocities
        assert!((bird.y - expected_y).abs() < 1e-9);
    }

    #[test]
    fn test_flap_sets_velocity_absolutely() {
        let bounds = TrackBounds::default();
        let profile = medium();

        let mut falling = Bird::at_start(&bounds);
        falling.vy = 12.5;
        falling.flap(&profile);
        assert_eq!(falling.vy, profile.flap_velocity);

        // Flapping twice in a row is the same as once
        falling.flap(&profile);
        assert_eq!(falling.vy, profile.flap_velocity);
    }

    proptest! {
        #[test]
        fn prop_flap_overrides_any_prior_velocity(vy in -100.0f64..100.0) {
            let bounds = TrackBounds::default();
            let mut bird = Bird::at_start(&bounds);
            bird.vy = vy;
            bird.flap(&medium());
            prop_assert_eq!(bird.vy, medium().flap_velocity);
        }
    }

    #[test]
    fn test_out_of_bounds_ceiling_and_floor() {
        let bounds = TrackBounds::default();
        let mut bird = Bird::at_start(&bounds);
        assert!(!bird.out_of_bounds(&bounds));

        bird.y = 0.0;
        assert!(bird.out_of_bounds(&bounds));

        bird.y = bounds.height - crate::consts::BIRD_HEIGHT;
        assert!(bird.out_of_bounds(&bounds));

        bird.y = bounds.height / 2.0;
        assert!(!bird.out_of_bounds(&bounds));
    }

    #[test]
    fn test_finish_init_only_from_start() {
        let mut state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Start);
        state.finish_init();
        assert_eq!(state.phase, GamePhase::Ready);

        state.enter_play();
        state.finish_init(); // no effect mid-episode
        assert_eq!(state.phase, GamePhase::Play);
    }

    #[test]
    fn test_selected_difficulty_applies_at_episode_start() {
        let mut state = GameState::new(7);
        state.finish_init();
        state.select_difficulty("hard");
        // Still the old profile until Play begins
        assert_eq!(state.profile, medium());
        state.enter_play();
        assert_eq!(state.profile, crate::tuning::resolve("hard"));
    }

    #[test]
    fn test_best_score_survives_reset() {
        let mut state = GameState::new(7);
        state.finish_init();
        state.enter_play();
        state.score = 9;
        state.end_episode();
        assert_eq!(state.best, 9);
        state.enter_ready();
        assert_eq!(state.score, 0);
        assert_eq!(state.best, 9);
    }
}
