//! Named difficulty presets
//!
//! The entire externally visible configuration surface: three named presets,
//! each a six-field tuning record applied at the start of a Play episode.

use serde::{Deserialize, Serialize};

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Tuning record for this preset
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                move_speed: 2.0,
                gravity: 0.38,
                flap_velocity: -7.6,
                pipe_gap_vh: 58.0,
                pipe_separation: 135.0,
            },
            Difficulty::Medium => DifficultyProfile {
                move_speed: 3.0,
                gravity: 0.50,
                flap_velocity: -7.6,
                pipe_gap_vh: 50.0,
                pipe_separation: 115.0,
            },
            Difficulty::Hard => DifficultyProfile {
                move_speed: 4.5,
                gravity: 0.62,
                flap_velocity: -7.6,
                pipe_gap_vh: 42.0,
                pipe_separation: 95.0,
            },
        }
    }
}

/// Episode tuning record
///
/// Immutable once resolved for an episode; the state machine copies the
/// selected profile in on Ready → Play and reads it until End.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Horizontal obstacle speed, track units per tick
    pub move_speed: f64,
    /// Downward acceleration, track units per tick²
    pub gravity: f64,
    /// Velocity set (not added) by a flap; negative is up
    pub flap_velocity: f64,
    /// Gap height between an obstacle pair, in vh
    pub pipe_gap_vh: f64,
    /// Ticks between obstacle spawns
    pub pipe_separation: f64,
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Difficulty::Medium.profile()
    }
}

/// Resolve a difficulty key to its tuning record
///
/// Total over any string: unknown keys deterministically fall back to the
/// medium profile.
pub fn resolve(key: &str) -> DifficultyProfile {
    Difficulty::from_str(key).unwrap_or_default().profile()
}
