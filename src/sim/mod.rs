//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per display frame, fixed per-tick deltas (no wall-clock time)
//! - Seeded RNG only
//! - Single-threaded: every piece of state has exactly one writer per frame
//! - No rendering, audio, or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;
pub mod track;

pub use collision::Rect;
pub use state::{Bird, GameEvent, GamePhase, GameState, TrackBounds};
pub use tick::{TickInput, tick};
pub use track::{ObstaclePair, ObstacleTrack};
