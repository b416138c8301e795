//! Raw input normalization
//!
//! Converts heterogeneous raw samples (key presses, hand-tracking
//! observations) into abstract intents the state machine consumes. The
//! classifiers are pure; the debounce state for the gesture stream lives in
//! an explicit [`GestureTracker`] owned by the orchestration layer, which may
//! call it at an arbitrary, irregular rate independent of the render tick.

use serde::{Deserialize, Serialize};

use crate::consts::{FLAP_COOLDOWN_MS, FLAP_DY_THRESHOLD};

/// A normalized user-action signal, decoupled from its raw source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentKind {
    /// Begin a Play episode (accepted only in Ready)
    Start,
    /// Apply a flap impulse (accepted only in Play)
    Flap,
    /// Return to Ready (accepted only in End)
    Restart,
}

/// An ephemeral intent event; consumed immediately, never stored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intent {
    pub kind: IntentKind,
    pub timestamp_ms: f64,
}

/// A discrete raw key/button sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySample {
    /// The designated activate key (Space / ArrowUp in the reference wiring)
    Activate,
    /// The dedicated restart key (Enter)
    Restart,
    /// Any other key
    Other,
}

/// Classify a discrete press into an intent
///
/// The activate key means Start when the bird is not yet flying and Flap once
/// it is; the restart key is a distinct command. Returns `None` for samples
/// that carry no intent in the current situation.
pub fn classify_discrete(key: KeySample, in_flight: bool, now_ms: f64) -> Option<Intent> {
    let kind = match key {
        KeySample::Activate if in_flight => IntentKind::Flap,
        KeySample::Activate => IntentKind::Start,
        KeySample::Restart => IntentKind::Restart,
        KeySample::Other => return None,
    };
    Some(Intent {
        kind,
        timestamp_ms: now_ms,
    })
}

/// Debounced rising-edge detector for upward hand flicks
///
/// Holds the cross-call state (previous tracked coordinate, last emission
/// time) that the classification needs. One tracker per tracked subject,
/// owned by the orchestrator; single-writer, no locking required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureTracker {
    /// Normalized vertical coordinate from the previous observation
    /// (range [0, 1], smaller = higher); `None` while the subject is lost
    prev_y: Option<f64>,
    /// Timestamp of the last emitted flap
    last_flap_ms: f64,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureTracker {
    pub fn new() -> Self {
        Self {
            prev_y: None,
            last_flap_ms: f64::NEG_INFINITY,
        }
    }

    /// Feed one tracking observation; returns a flap intent on an upward
    /// flick steeper than the threshold, outside the cooldown window.
    ///
    /// `sample` is `None` when the tracked subject was not detected. The
    /// first observation after a loss only re-arms the detector: motion
    /// across an occlusion gap must never count as a flick.
    pub fn observe(&mut self, sample: Option<f64>, now_ms: f64) -> Option<Intent> {
        let Some(y) = sample else {
            self.prev_y = None;
            return None;
        };

        let intent = match self.prev_y {
            Some(prev) => {
                let dy = prev - y; // positive when the hand moved up
                if dy > FLAP_DY_THRESHOLD && now_ms - self.last_flap_ms > FLAP_COOLDOWN_MS {
                    self.last_flap_ms = now_ms;
                    Some(Intent {
                        kind: IntentKind::Flap,
                        timestamp_ms: now_ms,
                    })
                } else {
                    None
                }
            }
            None => None,
        };

        self.prev_y = Some(y);
        intent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discrete_activate_maps_on_flight_state() {
        let i = classify_discrete(KeySample::Activate, false, 1.0).unwrap();
        assert_eq!(i.kind, IntentKind::Start);
        assert_eq!(i.timestamp_ms, 1.0);

        let i = classify_discrete(KeySample::Activate, true, 2.0).unwrap();
        assert_eq!(i.kind, IntentKind::Flap);
    }

    #[test]
    fn test_discrete_restart() {
        let i = classify_discrete(KeySample::Restart, false, 0.0).unwrap();
        assert_eq!(i.kind, IntentKind::Restart);
    }

    #[test]
    fn test_discrete_other_keys_carry_no_intent() {
        assert!(classify_discrete(KeySample::Other, true, 0.0).is_none());
        assert!(classify_discrete(KeySample::Other, false, 0.0).is_none());
    }

    #[test]
    fn test_gesture_upward_flick_emits_flap() {
        // Spec scenario: 0.50 -> 0.40 over 50ms is a flick; the follow-up
        // 0.40 -> 0.38 is below threshold.
        let mut tracker = GestureTracker::new();
        assert!(tracker.observe(Some(0.50), 0.0).is_none()); // arms only
        let intent = tracker.observe(Some(0.40), 50.0);
        assert_eq!(intent.map(|i| i.kind), Some(IntentKind::Flap));
        assert!(tracker.observe(Some(0.38), 120.0).is_none());
    }

    #[test]
    fn test_gesture_cooldown_suppresses_rapid_flicks() {
        let mut tracker = GestureTracker::new();
        tracker.observe(Some(0.80), 0.0);
        assert!(tracker.observe(Some(0.60), 10.0).is_some());
        // Big flick but inside the 250ms window
        assert!(tracker.observe(Some(0.40), 100.0).is_none());
        // Past the window again
        assert!(tracker.observe(Some(0.20), 400.0).is_some());
    }

    #[test]
    fn test_gesture_downward_motion_ignored() {
        let mut tracker = GestureTracker::new();
        tracker.observe(Some(0.30), 0.0);
        assert!(tracker.observe(Some(0.50), 50.0).is_none());
    }

    #[test]
    fn test_tracking_loss_rearms_detector() {
        let mut tracker = GestureTracker::new();
        tracker.observe(Some(0.90), 0.0);
        // Subject lost; hand reappears much higher. Without the re-arm this
        // jump would read as a huge upward flick.
        assert!(tracker.observe(None, 30.0).is_none());
        assert!(tracker.observe(Some(0.10), 60.0).is_none());
        // Normal motion resumes and detects again
        assert!(tracker.observe(Some(0.05), 400.0).is_some());
    }
}
