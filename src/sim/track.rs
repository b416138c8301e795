//! The obstacle track
//!
//! Owns every live obstacle pair: spawns new pairs on a tick-counted cadence,
//! scrolls them left, retires them off the leading edge, and answers the
//! collision and scoring queries for the current bird bounding box.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::TrackBounds;
use crate::consts::{GAP_TOP_MIN_VH, GAP_TOP_SPAN_VH};
use crate::tuning::DifficultyProfile;
use crate::vh;

/// One gap the bird must pass through: two opposing rectangles sharing a
/// horizontal position and a single scored flag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePair {
    pub id: u32,
    /// Left edge, track units; decreases every tick
    pub x: f64,
    /// Top of the gap in vh: the top obstacle spans 0..gap_top_vh
    pub gap_top_vh: f64,
    /// Gap height in vh: the bottom obstacle spans gap_top_vh+gap_height_vh..100
    pub gap_height_vh: f64,
    /// Flips false → true exactly once, when the pair is first cleared
    pub scored: bool,
}

impl ObstaclePair {
    /// Trailing (right) edge in track units
    #[inline]
    pub fn right(&self, bounds: &TrackBounds) -> f64 {
        self.x + bounds.pipe_width()
    }

    /// Rectangle of the upper obstacle
    pub fn top_rect(&self, bounds: &TrackBounds) -> Rect {
        let gap_top = vh(self.gap_top_vh, bounds.height);
        Rect::new(self.x, 0.0, bounds.pipe_width(), gap_top)
    }

    /// Rectangle of the lower obstacle
    pub fn bottom_rect(&self, bounds: &TrackBounds) -> Rect {
        let gap_bottom = vh(self.gap_top_vh + self.gap_height_vh, bounds.height);
        Rect::new(
            self.x,
            gap_bottom,
            bounds.pipe_width(),
            bounds.height - gap_bottom,
        )
    }
}

/// The live obstacle collection, in spawn order
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ObstacleTrack {
    /// Live pairs, oldest first
    pub pairs: Vec<ObstaclePair>,
    /// Ticks since the last spawn
    spawn_counter: f64,
    /// Next pair ID
    next_id: u32,
}

impl ObstacleTrack {
    pub fn new() -> Self {
        Self {
            pairs: Vec::new(),
            spawn_counter: 0.0,
            next_id: 1,
        }
    }

    /// Drop all pairs and restart the spawn cadence (episode reset)
    pub fn clear(&mut self) {
        self.pairs.clear();
        self.spawn_counter = 0.0;
    }

    /// Advance the spawn cadence by one tick; spawns one pair at the right
    /// edge of the track once the counter exceeds the profile's separation.
    ///
    /// The gap top is drawn uniformly from whole-vh steps in [8, 50].
    pub fn spawn_tick(
        &mut self,
        profile: &DifficultyProfile,
        bounds: &TrackBounds,
        rng: &mut Pcg32,
    ) -> Option<u32> {
        self.spawn_counter += 1.0;
        if self.spawn_counter <= profile.pipe_separation {
            return None;
        }
        self.spawn_counter = 0.0;

        let gap_top_vh = (rng.random_range(0..GAP_TOP_SPAN_VH) + GAP_TOP_MIN_VH) as f64;
        let id = self.next_id;
        self.next_id += 1;
        self.pairs.push(ObstaclePair {
            id,
            x: bounds.width,
            gap_top_vh,
            gap_height_vh: profile.pipe_gap_vh,
            scored: false,
        });
        log::debug!("spawned pair {id} with gap top {gap_top_vh}vh");
        Some(id)
    }

    /// Scroll every pair left by the profile's speed and retire pairs whose
    /// trailing edge has left the track.
    pub fn advance(&mut self, profile: &DifficultyProfile, bounds: &TrackBounds) {
        for pair in &mut self.pairs {
            pair.x -= profile.move_speed;
        }
        let pipe_width = bounds.pipe_width();
        self.pairs.retain(|p| p.x + pipe_width > 0.0);
    }

    /// True if the bird overlaps either rectangle of any live pair
    pub fn collides_with(&self, bird: &Rect, bounds: &TrackBounds) -> bool {
        self.pairs.iter().any(|pair| {
            bird.overlaps(&pair.top_rect(bounds)) || bird.overlaps(&pair.bottom_rect(bounds))
        })
    }

    /// Mark pairs the bird has just cleared and count the scoring events
    ///
    /// A pair scores when its trailing edge sits within one tick's movement
    /// behind the bird's leading edge, so the crossing instant cannot fall
    /// between discrete ticks. Known edge case, preserved from the original
    /// tuning: if `move_speed` ever exceeded the bird width per tick a pair
    /// could skip the window entirely; shipped profiles stay far below that.
    pub fn check_scoring(&mut self, bird: &Rect, profile: &DifficultyProfile, bounds: &TrackBounds) -> u32 {
        let mut scored = 0;
        for pair in &mut self.pairs {
            let right = pair.right(bounds);
            if !pair.scored && right < bird.left() && right + profile.move_speed >= bird.left() {
                pair.scored = true;
                scored += 1;
            }
        }
        scored
    }
}
