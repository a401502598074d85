//! Touch vocabulary and drag classification.
//!
//! Hosts translate their platform's pointer or touch callbacks into
//! [`TouchEvent`]s and feed them to [`Switch::handle`](crate::switch::Switch::handle).
//! Only the horizontal coordinate matters; it is measured in the switch's
//! own coordinate space.
//!
//! # How a drag becomes a state change
//!
//! | Event   | Effect                                                        |
//! |---------|---------------------------------------------------------------|
//! | `Down`  | Record the start x, enter [`GesturePhase::Pressed`]            |
//! | `Move`  | Distance `start − x`: `< −threshold` previews on, `> threshold` previews off, back within the threshold returns to `Pressed` |
//! | `Up`    | Commit a previewed state, treat a short press as a tap, or do nothing |
//! | `Cancel`| Revert to the pre-gesture state                               |
//! | `Tap`   | A tap recognised by the host itself                            |

use serde::{Deserialize, Serialize};

/// Tuning for gesture recognition.
///
/// `drag_threshold` is how far (in logical units) the finger has to travel
/// before the switch previews the opposite state.  `tap_slop` is the most
/// a finger may wander during a press that should still count as a tap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Default: `20.0`.
    pub drag_threshold: f64,
    /// Default: `10.0`.
    pub tap_slop: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 20.0,
            tap_slop: 10.0,
        }
    }
}

/// A single touch input, in switch-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TouchEvent {
    /// Finger down at `x`.
    Down { x: f64 },
    /// Finger moved to `x`.
    Move { x: f64 },
    /// Finger lifted at `x`.
    Up { x: f64 },
    /// The platform took the touch away (e.g. a scroll view claimed it).
    Cancel,
    /// A complete tap recognised by the host.
    Tap,
}

/// Where the switch is within a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GesturePhase {
    /// No finger on the switch.
    #[default]
    Idle,
    /// Finger down, not yet dragged past the threshold.
    Pressed,
    /// Dragged past the threshold; releasing commits to `target_on`.
    Pending { target_on: bool },
}

/// Which way a drag is pulling the switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragIntent {
    /// Pulled right past the threshold.
    TowardOn,
    /// Pulled left past the threshold.
    TowardOff,
    /// Within the threshold.
    Neutral,
}

/// Classify a drag by `distance = start_x − current_x`.
///
/// Crossing is strict: a distance exactly equal to the threshold is still
/// neutral.
pub fn classify_drag(distance: f64, threshold: f64) -> DragIntent {
    if distance < -threshold {
        DragIntent::TowardOn
    } else if distance > threshold {
        DragIntent::TowardOff
    } else {
        DragIntent::Neutral
    }
}

/// Bookkeeping for the finger currently on the switch.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Touch {
    pub start_x: f64,
    /// Largest |start − x| seen so far.
    pub max_travel: f64,
    /// Whether the gesture ever previewed a state.
    pub entered_pending: bool,
}

impl Touch {
    pub fn begin(x: f64) -> Self {
        Self {
            start_x: x,
            max_travel: 0.0,
            entered_pending: false,
        }
    }

    /// Record movement to `x` and return the signed distance.
    pub fn track(&mut self, x: f64) -> f64 {
        let distance = self.start_x - x;
        self.max_travel = self.max_travel.max(distance.abs());
        distance
    }

    /// A press that stayed put and never previewed a state.
    pub fn is_tap(&self, slop: f64) -> bool {
        !self.entered_pending && self.max_travel <= slop
    }
}
