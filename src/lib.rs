//! Gesture Flap - a flap-to-avoid-obstacles game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bird kinematics, obstacle track, game state)
//! - `input`: Raw input normalization (keyboard presses, hand-flick gestures)
//! - `tuning`: Named difficulty presets
//!
//! The core is presentation-agnostic: it consumes normalized intents, ticks
//! once per display frame, and exposes serializable state snapshots plus
//! discrete [`sim::GameEvent`]s for the renderer and audio collaborators.

pub mod input;
pub mod sim;
pub mod tuning;

pub use input::{GestureTracker, Intent, IntentKind};
pub use sim::{GameEvent, GamePhase, GameState, TickInput, tick};
pub use tuning::{Difficulty, DifficultyProfile};

/// Game geometry constants
///
/// Tuning-independent dimensions. Vertical obstacle geometry is expressed in
/// vh (percent of track height) so it scales with [`sim::TrackBounds`];
/// motion per tick is in absolute track units. One tick = one display frame,
/// deliberately not scaled by wall-clock time: converting to delta-time
/// integration would change effective difficulty across refresh rates.
pub mod consts {
    /// Default track dimensions in track units
    pub const TRACK_WIDTH: f64 = 1280.0;
    pub const TRACK_HEIGHT: f64 = 720.0;

    /// Bird leading-edge position as a fraction of track width
    pub const BIRD_LEFT_FRAC: f64 = 0.22;
    /// Bird bounding box in track units
    pub const BIRD_WIDTH: f64 = 60.0;
    pub const BIRD_HEIGHT: f64 = 45.0;
    /// Vertical start position as a fraction of track height (40vh)
    pub const BIRD_START_Y_FRAC: f64 = 0.4;

    /// Obstacle width as a fraction of track width (6vw)
    pub const PIPE_WIDTH_FRAC: f64 = 0.06;
    /// Gap top position is drawn uniformly from
    /// `GAP_TOP_MIN_VH..GAP_TOP_MIN_VH + GAP_TOP_SPAN_VH` in whole vh steps
    pub const GAP_TOP_MIN_VH: u32 = 8;
    pub const GAP_TOP_SPAN_VH: u32 = 43;

    /// Upward-flick sensitivity for the gesture detector (normalized units)
    pub const FLAP_DY_THRESHOLD: f64 = 0.03;
    /// Minimum spacing between gesture-emitted flaps
    pub const FLAP_COOLDOWN_MS: f64 = 250.0;
}

/// Convert a vertical-percent value to track units
#[inline]
pub fn vh(percent: f64, track_height: f64) -> f64 {
    percent / 100.0 * track_height
}
